//! Playback clock for animated simulations

use crate::solar;
use hifitime::{Duration, Epoch};

/// Elapsed simulation time with variable-rate playback
///
/// Time is kept as days since an origin epoch so the physics can work with
/// plain `f64` days while callers still get calendar dates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    origin: Epoch,
    /// Days since `origin`
    elapsed: f64,
    /// Simulation days per real second; negative runs backward
    rate: f64,
    paused: bool,
}

/// Largest accepted playback rate (days per second), either direction
pub const MAX_RATE: f64 = 1e6;

impl PlaybackClock {
    /// Start at 2000-01-01 00:00 UTC, running at one day per second
    pub fn new() -> Self {
        Self::at_epoch(Epoch::from_gregorian_utc_at_midnight(2000, 1, 1))
    }

    /// Start at a specific epoch
    pub fn at_epoch(origin: Epoch) -> Self {
        Self { origin, elapsed: 0.0, rate: rates::DAY_PER_SEC, paused: false }
    }

    /// Simulated days since the origin
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed
    }

    /// Epoch at elapsed time zero
    pub fn origin(&self) -> Epoch {
        self.origin
    }

    /// Calendar time of the current position
    pub fn current(&self) -> Epoch {
        self.origin + Duration::from_days(self.elapsed)
    }

    /// Continuous day of year of the current position
    pub fn day_of_year(&self) -> f64 {
        solar::day_of_year(self.current())
    }

    /// Playback rate in days per real second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Set the rate; clamped to ±MAX_RATE, non-finite values ignored
    pub fn set_rate(&mut self, days_per_second: f64) {
        if days_per_second.is_finite() {
            self.rate = days_per_second.clamp(-MAX_RATE, MAX_RATE);
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume playback
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Is playback paused?
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by real-world `dt_seconds`; returns elapsed days
    pub fn tick(&mut self, dt_seconds: f64) -> f64 {
        if !self.paused && dt_seconds.is_finite() {
            self.elapsed += dt_seconds * self.rate;
        }
        self.elapsed
    }

    /// Jump to an absolute elapsed time, paused or not
    pub fn advance_to(&mut self, days: f64) {
        if days.is_finite() {
            self.elapsed = days;
        }
    }

    /// Move by `days` relative to the current position
    pub fn jump(&mut self, days: f64) {
        self.advance_to(self.elapsed + days);
    }

    /// Return to the origin, keeping rate and pause state
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset playback rates (simulation days per real second)
pub mod rates {
    pub const HOUR_PER_SEC: f64 = 1.0 / 24.0;
    pub const DAY_PER_SEC: f64 = 1.0;
    pub const WEEK_PER_SEC: f64 = 7.0;
    /// Roughly one lunar month per second
    pub const MONTH_PER_SEC: f64 = 30.0;
    pub const YEAR_PER_SEC: f64 = 365.25;
}
