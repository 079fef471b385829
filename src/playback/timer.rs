use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// The single tick source for a playback session.
///
/// Holds at most one interval. Arming replaces the previous one and
/// disarming drops it, so a tick can never fire for a timer that was
/// disarmed. The interval is created on first await, so arming does not
/// need a running runtime.
#[derive(Debug, Default)]
pub struct Ticker {
    period: Option<Duration>,
    armed_at: Option<Instant>,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with a tick period. Any previously armed timer is disarmed first.
    pub fn arm(&mut self, period: Duration) {
        self.disarm();
        self.period = Some(period);
        self.armed_at = Some(Instant::now());
        debug!("Timer armed ({} ms)", period.as_millis());
    }

    pub fn disarm(&mut self) {
        if self.period.take().is_some() {
            debug!("Timer disarmed");
        }
        self.armed_at = None;
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick. Never resolves while disarmed.
    ///
    /// Cancel safe: dropping the future before it completes loses no tick.
    pub async fn tick(&mut self) {
        let period = match self.period {
            Some(period) => period,
            None => return std::future::pending().await,
        };

        let armed_at = self.armed_at;
        let interval = self.interval.get_or_insert_with(|| {
            let start = armed_at.unwrap_or_else(Instant::now) + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_elapsed(start: Instant, expected_ms: u64) {
        let elapsed = start.elapsed();
        let expected = Duration::from_millis(expected_ms);
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {:?}, expected {:?}",
            elapsed,
            expected
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.arm(Duration::from_millis(100));

        ticker.tick().await;
        assert_elapsed(start, 100);
        ticker.tick().await;
        assert_elapsed(start, 200);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_never_ticks() {
        let mut ticker = Ticker::new();
        ticker.arm(Duration::from_millis(50));
        ticker.disarm();
        assert!(!ticker.is_armed());

        let res = tokio::time::timeout(Duration::from_secs(10), ticker.tick()).await;
        assert!(res.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_period() {
        let mut ticker = Ticker::new();
        ticker.arm(Duration::from_millis(500));
        ticker.tick().await;

        let start = Instant::now();
        ticker.arm(Duration::from_millis(50));
        assert_eq!(ticker.period(), Some(Duration::from_millis(50)));
        ticker.tick().await;
        assert_elapsed(start, 50);
    }
}
