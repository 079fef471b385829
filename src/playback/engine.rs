use crate::core::{NormalizedSample, TelemetrySeries};
use crate::playback::{EndOfSeries, PlaybackSpeed, PlaybackState, TransportState};
use tracing::debug;

/// Playback engine over a telemetry series.
///
/// Pure state machine: it never sleeps or owns a timer. The owner calls
/// [`PlaybackEngine::tick`] every [`PlaybackEngine::speed`] interval while
/// [`PlaybackEngine::is_playing`] is true.
pub struct PlaybackEngine {
    series: TelemetrySeries,
    state: TransportState,
    speed: PlaybackSpeed,
    end_of_series: EndOfSeries,
    current_position: usize,
    fallback: NormalizedSample,
}

impl PlaybackEngine {
    pub fn new(series: TelemetrySeries) -> Self {
        Self {
            series,
            state: TransportState::Paused,
            speed: PlaybackSpeed::default(),
            end_of_series: EndOfSeries::default(),
            current_position: 0,
            fallback: NormalizedSample::zero(),
        }
    }

    /// Install a new series, resetting to index 0 and paused.
    /// Speed and end-of-series policy are kept.
    pub fn load(&mut self, series: TelemetrySeries) {
        self.series = series;
        self.state = TransportState::Paused;
        self.current_position = 0;
    }

    pub fn series(&self) -> &TelemetrySeries {
        &self.series
    }

    /// Get current playback position (index into the series)
    pub fn position(&self) -> usize {
        self.current_position
    }

    /// Get total number of samples
    pub fn total_samples(&self) -> usize {
        self.series.len()
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Change the tick interval; applies from the next tick
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn end_of_series(&self) -> EndOfSeries {
        self.end_of_series
    }

    pub fn set_end_of_series(&mut self, policy: EndOfSeries) {
        self.end_of_series = policy;
    }

    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current_position,
            is_playing: self.is_playing(),
            speed_ms: self.speed.as_millis(),
        }
    }

    /// Current sample, or the zero sample when the series is empty
    pub fn current_sample(&self) -> &NormalizedSample {
        self.series.at(self.current_position).unwrap_or(&self.fallback)
    }

    /// Start/resume playback. Returns true if the state changed.
    ///
    /// Under [`EndOfSeries::Pause`] playback cannot start on the last sample,
    /// since the first tick would pause it again.
    pub fn play(&mut self) -> bool {
        if self.is_playing() || self.series.is_empty() {
            return false;
        }
        if self.end_of_series == EndOfSeries::Pause && self.at_end() {
            debug!("Not playing, already at the last sample {}", self.current_position);
            return false;
        }

        self.state = TransportState::Playing;
        debug!("Playing from {} at {}", self.current_position, self.speed);
        true
    }

    /// Pause playback. Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.state = TransportState::Paused;
        debug!("Paused at {}", self.current_position);
        true
    }

    /// Flip between playing and paused
    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Jump to an index, clamped to the series. Always pauses.
    pub fn scrub(&mut self, index: usize) {
        self.current_position = self.series.clamp_index(index);
        self.state = TransportState::Paused;
    }

    /// Step forward one sample, pausing
    pub fn step_forward(&mut self) {
        self.scrub(self.current_position + 1);
    }

    /// Step backward one sample, pausing
    pub fn step_back(&mut self) {
        self.scrub(self.current_position.saturating_sub(1));
    }

    /// Advance one sample. The index stops at the last sample; what the
    /// transport does there depends on the end-of-series policy.
    pub fn tick(&mut self) -> usize {
        if !self.is_playing() {
            return self.current_position;
        }

        self.current_position = (self.current_position + 1).min(self.series.last_index());

        if self.current_position == self.series.last_index()
            && self.end_of_series == EndOfSeries::Pause
        {
            self.state = TransportState::Paused;
            debug!("Reached end of series, pausing");
        }

        self.current_position
    }

    /// Whether the index sits on the last sample
    pub fn at_end(&self) -> bool {
        self.current_position == self.series.last_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawRow;

    fn series(n: usize) -> TelemetrySeries {
        TelemetrySeries::from_rows(
            (0..n)
                .map(|i| RawRow::new().with("time", i as f64).with("lat", i as f64))
                .collect(),
        )
    }

    #[test]
    fn test_initial_state() {
        let engine = PlaybackEngine::new(series(3));
        assert_eq!(
            engine.snapshot(),
            PlaybackState { current_index: 0, is_playing: false, speed_ms: 200 }
        );
    }

    #[test]
    fn test_empty_series_commands_are_noops() {
        let mut engine = PlaybackEngine::new(TelemetrySeries::empty());
        assert!(!engine.play());
        assert!(!engine.is_playing());
        engine.scrub(10);
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.current_sample(), &NormalizedSample::zero());
    }

    #[test]
    fn test_play_pause_noops() {
        let mut engine = PlaybackEngine::new(series(3));
        assert!(!engine.pause());
        assert!(engine.play());
        assert!(!engine.play());
        assert!(engine.pause());
        assert_eq!(engine.state(), TransportState::Paused);
    }

    #[test]
    fn test_scrub_clamps_and_pauses() {
        let mut engine = PlaybackEngine::new(series(5));
        engine.play();
        engine.scrub(2);
        assert_eq!(engine.position(), 2);
        assert!(!engine.is_playing());
        assert_eq!(engine.current_sample(), engine.series().at(2).unwrap());

        engine.scrub(99);
        assert_eq!(engine.position(), 4);
        assert_eq!(engine.current_sample().time(), 4.0);
    }

    #[test]
    fn test_step_pauses_and_clamps() {
        let mut engine = PlaybackEngine::new(series(3));
        engine.play();
        engine.step_back();
        assert_eq!(engine.position(), 0);
        assert!(!engine.is_playing());
        engine.step_forward();
        engine.step_forward();
        engine.step_forward();
        assert_eq!(engine.position(), 2);
    }

    #[test]
    fn test_tick_pins_at_end_and_keeps_playing() {
        let mut engine = PlaybackEngine::new(series(5));
        engine.set_speed(PlaybackSpeed::Double);
        engine.scrub(3);
        engine.play();

        assert_eq!(engine.tick(), 4);
        assert_eq!(engine.tick(), 4);
        assert_eq!(engine.tick(), 4);
        assert!(engine.is_playing());
        assert!(engine.at_end());
    }

    #[test]
    fn test_tick_strictly_increases_until_end() {
        let mut engine = PlaybackEngine::new(series(4));
        engine.play();
        let mut last = engine.position();
        for _ in 0..3 {
            let next = engine.tick();
            assert!(next > last);
            last = next;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_tick_ignored_while_paused() {
        let mut engine = PlaybackEngine::new(series(4));
        assert_eq!(engine.tick(), 0);
    }

    #[test]
    fn test_pause_resume_keeps_index() {
        let mut engine = PlaybackEngine::new(series(10));
        engine.play();
        engine.tick();
        engine.tick();
        engine.pause();
        assert_eq!(engine.position(), 2);
        engine.play();
        assert_eq!(engine.tick(), 3);
    }

    #[test]
    fn test_end_of_series_pause_policy() {
        let mut engine = PlaybackEngine::new(series(3));
        engine.set_end_of_series(EndOfSeries::Pause);
        engine.play();
        engine.tick();
        assert!(engine.is_playing());
        engine.tick();
        assert_eq!(engine.position(), 2);
        assert!(!engine.is_playing());

        // restarting on the last sample would only pause again
        assert!(!engine.play());
        assert!(!engine.is_playing());
        engine.scrub(1);
        assert!(engine.play());

        engine.set_end_of_series(EndOfSeries::Hold);
        engine.scrub(2);
        assert!(engine.play());
    }

    #[test]
    fn test_load_resets_state() {
        let mut engine = PlaybackEngine::new(series(10));
        engine.set_speed(PlaybackSpeed::Quadruple);
        engine.scrub(7);
        engine.play();

        engine.load(series(3));
        assert_eq!(
            engine.snapshot(),
            PlaybackState { current_index: 0, is_playing: false, speed_ms: 50 }
        );
    }

    #[test]
    fn test_single_sample_series() {
        let mut engine = PlaybackEngine::new(series(1));
        assert!(engine.play());
        assert_eq!(engine.tick(), 0);
        assert!(engine.is_playing());
    }
}
