pub mod engine;
pub mod timer;

pub use engine::PlaybackEngine;
pub use timer::Ticker;

use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Paused,
    Playing,
}

/// Snapshot of the playback state handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub speed_ms: u64,
}

/// Tick interval, one of a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    #[serde(rename = "0.5x")]
    Half,
    #[default]
    #[serde(rename = "1x")]
    Normal,
    #[serde(rename = "2x")]
    Double,
    #[serde(rename = "4x")]
    Quadruple,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 4] = [
        PlaybackSpeed::Half,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Double,
        PlaybackSpeed::Quadruple,
    ];

    /// Milliseconds between ticks
    pub fn as_millis(&self) -> u64 {
        match self {
            PlaybackSpeed::Half => 500,
            PlaybackSpeed::Normal => 200,
            PlaybackSpeed::Double => 100,
            PlaybackSpeed::Quadruple => 50,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Normal => "1x",
            PlaybackSpeed::Double => "2x",
            PlaybackSpeed::Quadruple => "4x",
        }
    }

    pub fn from_millis(ms: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_millis() == ms)
    }

    /// Next faster speed, saturating at 4x
    pub fn faster(&self) -> Self {
        match self {
            PlaybackSpeed::Half => PlaybackSpeed::Normal,
            PlaybackSpeed::Normal => PlaybackSpeed::Double,
            PlaybackSpeed::Double | PlaybackSpeed::Quadruple => PlaybackSpeed::Quadruple,
        }
    }

    /// Next slower speed, saturating at 0.5x
    pub fn slower(&self) -> Self {
        match self {
            PlaybackSpeed::Quadruple => PlaybackSpeed::Double,
            PlaybackSpeed::Double => PlaybackSpeed::Normal,
            PlaybackSpeed::Normal | PlaybackSpeed::Half => PlaybackSpeed::Half,
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.label(), self.as_millis())
    }
}

impl FromStr for PlaybackSpeed {
    type Err = CommandError;

    /// Accepts a multiplier label ("2x") or a tick interval in ms ("100", "100ms")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Some(speed) = Self::ALL.into_iter().find(|sp| sp.label() == s) {
            return Ok(speed);
        }

        s.trim_end_matches("ms")
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::from_millis)
            .ok_or(CommandError::InvalidSpeed(s))
    }
}

/// What a playing engine does once the last sample is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfSeries {
    /// Stay in `Playing` with the index pinned at the last sample
    #[default]
    Hold,
    /// Drop to `Paused` when the last sample is reached
    Pause,
}
