//! Apparent motion of Mars seen from Earth
//!
//! Two detectors are offered. The heuristic one compares the current
//! apparent longitude with the one a few samples back, which is what a
//! trail-drawing animation has at hand; it misfires when the longitude wraps
//! through ±π. The exact one reads the sign of the relative angular momentum.

use crate::elements::OrbitalElements;
use nalgebra::Vector2;
use orrery_core::constants::{EARTH_PERIOD_DAYS, MARS_ORBIT_AU, MARS_PERIOD_DAYS};
use orrery_core::{normalize_radians, polar_angle};
use serde::Serialize;
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Samples between the compared longitudes
pub const DEFAULT_LOOKBACK: usize = 5;

/// Backward motion threshold for the heuristic (radians per lookback)
const HEURISTIC_TOLERANCE: f64 = 0.001;

/// Heuristic test on a longitude difference `current − earlier`
pub fn heuristic_retrograde(longitude_diff: f64) -> bool {
    longitude_diff < -HEURISTIC_TOLERANCE || longitude_diff > PI
}

/// Observer-outer planet pair on coplanar orbits
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlanetPair {
    pub observer: OrbitalElements,
    pub target: OrbitalElements,
}

impl Default for PlanetPair {
    /// Earth and Mars on circular orbits starting at opposition
    fn default() -> Self {
        Self {
            observer: OrbitalElements::circular(EARTH_PERIOD_DAYS, 1.0),
            target: OrbitalElements::circular(MARS_PERIOD_DAYS, MARS_ORBIT_AU),
        }
    }
}

impl PlanetPair {
    pub fn new(observer: OrbitalElements, target: OrbitalElements) -> Self {
        Self { observer, target }
    }

    /// Target position relative to the observer
    pub fn relative_position(&self, day: f64) -> Vector2<f64> {
        self.target.position(day) - self.observer.position(day)
    }

    pub fn relative_velocity(&self, day: f64) -> Vector2<f64> {
        self.target.velocity(day) - self.observer.velocity(day)
    }

    /// Apparent longitude (radians, (−π, π]) of the target
    pub fn apparent_longitude(&self, day: f64) -> f64 {
        let r = self.relative_position(day);
        if r.norm_squared() == 0.0 {
            return 0.0;
        }
        r.y.atan2(r.x)
    }

    /// Rate of change of the apparent longitude (radians per day)
    pub fn apparent_rate(&self, day: f64) -> f64 {
        let r = self.relative_position(day);
        let r2 = r.norm_squared();
        if r2 == 0.0 {
            return 0.0;
        }
        r.perp(&self.relative_velocity(day)) / r2
    }

    pub fn is_retrograde(&self, day: f64) -> bool {
        self.apparent_rate(day) < 0.0
    }

    /// Heliocentric angle between the two planets in [0, 2π)
    pub fn heliocentric_separation(&self, day: f64) -> f64 {
        let a = polar_angle(&self.target.position(day));
        let b = polar_angle(&self.observer.position(day));
        normalize_radians(a - b)
    }
}

/// One tracked sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RetrogradeSample {
    pub day: f64,
    /// Target relative to the observer (AU)
    pub geocentric: Vector2<f64>,
    pub apparent_longitude: f64,
    pub heuristic: bool,
    pub exact: bool,
}

/// Streams samples and flags retrograde motion
#[derive(Clone, Debug)]
pub struct RetrogradeTracker {
    pair: PlanetPair,
    lookback: usize,
    history: VecDeque<f64>,
}

impl Default for RetrogradeTracker {
    fn default() -> Self {
        Self::new(PlanetPair::default())
    }
}

impl RetrogradeTracker {
    pub fn new(pair: PlanetPair) -> Self {
        Self::with_lookback(pair, DEFAULT_LOOKBACK)
    }

    pub fn with_lookback(pair: PlanetPair, lookback: usize) -> Self {
        let lookback = lookback.max(1);
        Self { pair, lookback, history: VecDeque::with_capacity(lookback) }
    }

    pub fn pair(&self) -> &PlanetPair {
        &self.pair
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Record the configuration at `day`. The heuristic stays false until
    /// enough history has accumulated.
    pub fn sample(&mut self, day: f64) -> RetrogradeSample {
        let longitude = self.pair.apparent_longitude(day);
        let heuristic = if self.history.len() == self.lookback {
            self.history.front().map_or(false, |earlier| heuristic_retrograde(longitude - earlier))
        } else {
            false
        };

        if self.history.len() == self.lookback {
            self.history.pop_front();
        }
        self.history.push_back(longitude);

        RetrogradeSample {
            day,
            geocentric: self.pair.relative_position(day),
            apparent_longitude: longitude,
            heuristic,
            exact: self.pair.is_retrograde(day),
        }
    }

    /// Sample `count` days starting at `start`, `step` days apart
    pub fn sweep(&mut self, start: f64, step: f64, count: usize) -> Vec<RetrogradeSample> {
        (0..count).map(|i| self.sample(start + i as f64 * step)).collect()
    }
}
