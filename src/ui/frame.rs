use crate::core::{Channel, NormalizedSample};
use crate::playback::{PlaybackSpeed, PlaybackState};
use serde::Serialize;
use std::fmt::Write;

/// Width of a text gauge bar in characters
const GAUGE_WIDTH: usize = 10;

/// Everything a frame shows: the playback state and the current sample
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub state: PlaybackState,
    pub total: usize,
    pub sample: &'a NormalizedSample,
}

impl<'a> Frame<'a> {
    pub fn new(state: PlaybackState, total: usize, sample: &'a NormalizedSample) -> Self {
        Self { state, total, sample }
    }

    /// One line of text gauges
    pub fn to_text(&self) -> String {
        let mut line = String::new();
        let transport = if self.state.is_playing { ">" } else { "||" };
        let speed = PlaybackSpeed::from_millis(self.state.speed_ms)
            .map(|s| s.label())
            .unwrap_or("?");

        let width = self.total.max(1).to_string().len();
        let _ = write!(
            line,
            "[{:>width$}/{}] {:<2} {:<4} t={:>8.2}s",
            self.state.current_index,
            self.total.saturating_sub(1),
            transport,
            speed,
            self.sample.time(),
            width = width,
        );

        for channel in [Channel::Throttle, Channel::Speed, Channel::Rpm] {
            let value = self.sample.value(channel);
            let _ = write!(
                line,
                "  {} {:>6.0}{} {}",
                channel,
                value,
                channel.unit().map(|u| format!(" {}", u)).unwrap_or_default(),
                gauge(channel, value)
            );
        }

        let [x, y] = self.sample.track_point();
        let _ = write!(line, "  pos ({:.1}, {:.1})", x, y);
        line
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Bar like `|####......|` filled to the channel's gauge range
pub fn gauge(channel: Channel, value: f64) -> String {
    let (min, max) = channel.gauge_range().unwrap_or((0.0, 1.0));
    let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = (fraction * GAUGE_WIDTH as f64).round() as usize;
    format!("|{}{}|", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}
