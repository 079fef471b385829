use crate::core::{NormalizedSample, TelemetrySeries};
use crate::input::{self, ParseReport};
use crate::playback::{EndOfSeries, PlaybackEngine, PlaybackSpeed, PlaybackState, Ticker};
use crate::settings::ReplaySettings;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// One replay session: the installed series, its playback state and the
/// timer that drives it.
///
/// All commands and ticks go through `&mut self`, so they are serialized
/// by construction. The timer is armed exactly when the engine is playing.
pub struct Session {
    engine: PlaybackEngine,
    ticker: Ticker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session: no samples, index 0, paused
    pub fn new() -> Self {
        Self {
            engine: PlaybackEngine::new(TelemetrySeries::empty()),
            ticker: Ticker::new(),
        }
    }

    pub fn with_settings(settings: &ReplaySettings) -> Self {
        let mut session = Self::new();
        session.engine.set_speed(settings.speed);
        session.engine.set_end_of_series(settings.end_of_series);
        session
    }

    /// Replace the series. Any pending tick is cancelled and playback
    /// resets to index 0, paused.
    pub fn install(&mut self, series: TelemetrySeries) {
        self.engine.load(series);
        self.sync_timer();
        info!("Installed series with {} samples", self.engine.total_samples());
    }

    /// Parse and normalize CSV text, then install it.
    /// Returns the number of dropped rows.
    pub fn load_text(&mut self, text: &str) -> usize {
        self.install_report(input::parse_report(text))
    }

    /// Load a CSV file and install it. On error the current series is kept.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let report = input::load_file(path)?;
        Ok(self.install_report(report))
    }

    fn install_report(&mut self, report: ParseReport) -> usize {
        self.install(TelemetrySeries::from_rows(report.rows));
        report.dropped
    }

    pub fn series(&self) -> &TelemetrySeries {
        self.engine.series()
    }

    pub fn current_sample(&self) -> &NormalizedSample {
        self.engine.current_sample()
    }

    pub fn state(&self) -> PlaybackState {
        self.engine.snapshot()
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.engine.speed()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn at_end(&self) -> bool {
        self.engine.at_end()
    }

    /// Whether a tick is pending
    pub fn timer_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn play(&mut self) {
        if self.engine.play() {
            self.sync_timer();
        }
    }

    pub fn pause(&mut self) {
        if self.engine.pause() {
            self.sync_timer();
        }
    }

    pub fn toggle(&mut self) {
        if self.engine.toggle() {
            self.sync_timer();
        }
    }

    pub fn scrub(&mut self, index: usize) {
        self.engine.scrub(index);
        self.sync_timer();
    }

    pub fn step_forward(&mut self) {
        self.engine.step_forward();
        self.sync_timer();
    }

    pub fn step_back(&mut self) {
        self.engine.step_back();
        self.sync_timer();
    }

    /// Change speed. While playing, the old timer is disarmed and a new one
    /// armed at the new period; the next tick comes one new period later.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        if speed == self.engine.speed() {
            return;
        }
        self.engine.set_speed(speed);
        if self.engine.is_playing() {
            self.ticker.arm(speed.interval());
        }
    }

    pub fn set_end_of_series(&mut self, policy: EndOfSeries) {
        self.engine.set_end_of_series(policy);
    }

    /// Wait for the next tick and apply it, returning the new index.
    ///
    /// Never resolves while paused, so it can sit in a `tokio::select!`
    /// next to command input.
    pub async fn next_tick(&mut self) -> usize {
        self.ticker.tick().await;
        let index = self.engine.tick();
        if !self.engine.is_playing() {
            self.sync_timer();
        }
        index
    }

    fn sync_timer(&mut self) {
        match (self.engine.is_playing(), self.ticker.is_armed()) {
            (true, false) => self.ticker.arm(self.engine.speed().interval()),
            (false, true) => self.ticker.disarm(),
            _ => {}
        }
    }
}
