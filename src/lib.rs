//! Telemetry log replay.
//!
//! A CSV log is parsed into rows ([`input`]), GPS channels are rescaled into a
//! display space ([`normalize`]) and the resulting [`core::TelemetrySeries`]
//! is replayed by a [`session::Session`] with play, pause, scrub and
//! variable speed.

pub mod core;
pub mod error;
pub mod input;
pub mod normalize;
pub mod playback;
pub mod session;
pub mod settings;
pub mod ui;

pub use crate::core::{Channel, FieldValue, NormalizedSample, RawRow, TelemetrySeries};
pub use error::{CommandError, SeriesError, SettingsError};
pub use playback::{EndOfSeries, PlaybackSpeed, PlaybackState};
pub use session::Session;
