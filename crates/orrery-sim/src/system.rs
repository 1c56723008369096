//! Sun-Earth-Moon-Mars state at a given day

use crate::elements::{CompoundOrbit, OrbitalElements};
use crate::planets::Body;
use nalgebra::Vector2;
use serde::Serialize;
use std::collections::BTreeMap;

/// Body state at a specific time (heliocentric, AU)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodyState {
    pub position: Vector2<f64>,
    pub distance_from_sun: f64,
}

impl BodyState {
    fn at(position: Vector2<f64>) -> Self {
        Self { position, distance_from_sun: position.norm() }
    }
}

/// Orrery snapshot at a specific day
#[derive(Clone, Debug, Serialize)]
pub struct SystemSnapshot {
    pub day: f64,
    /// Ordered by `Body`, so serialized snapshots are stable
    pub states: BTreeMap<Body, BodyState>,
}

impl SystemSnapshot {
    pub fn position(&self, body: Body) -> Vector2<f64> {
        self.states.get(&body).map(|s| s.position).unwrap_or_else(Vector2::zeros)
    }
}

/// Textbook orrery: Sun at the origin, Earth and Mars on Kepler orbits,
/// Moon riding on Earth.
#[derive(Clone, Debug)]
pub struct Orrery {
    earth_moon: CompoundOrbit,
    mars: OrbitalElements,
    /// Multiplier applied to the Moon's geocentric offset
    moon_display_scale: f64,
}

impl Orrery {
    pub fn new() -> Self {
        Self::with_moon_display_scale(1.0)
    }

    /// Exaggerate the Moon's distance from Earth so it is visible at
    /// solar-system scale. Physical positions use a scale of 1.
    pub fn with_moon_display_scale(scale: f64) -> Self {
        let elements = |body: Body| {
            body.elements()
                .unwrap_or_else(|| OrbitalElements::circular(1.0, 0.0))
        };
        Self {
            earth_moon: CompoundOrbit::new(elements(Body::Earth), elements(Body::Moon)),
            mars: elements(Body::Mars),
            moon_display_scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
        }
    }

    pub fn moon_display_scale(&self) -> f64 {
        self.moon_display_scale
    }

    /// Get body position (heliocentric, AU)
    pub fn body_position(&self, body: Body, day: f64) -> Vector2<f64> {
        match body {
            Body::Sun => Vector2::zeros(),
            Body::Earth => self.earth_moon.primary.position(day),
            Body::Moon => {
                let p = self.earth_moon.position(day);
                p.primary + p.offset * self.moon_display_scale
            }
            Body::Mars => self.mars.position(day),
        }
    }

    /// Get snapshot of entire system
    pub fn snapshot(&self, day: f64) -> SystemSnapshot {
        let states = Body::all()
            .iter()
            .map(|body| (*body, BodyState::at(self.body_position(*body, day))))
            .collect();
        SystemSnapshot { day, states }
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use orrery_core::constants::{AU, EARTH_MOON_DISTANCE};

    #[test]
    fn test_snapshot_contains_all_bodies() {
        let snap = Orrery::new().snapshot(42.0);
        assert_eq!(snap.states.len(), Body::all().len());
        assert_eq!(snap.position(Body::Sun), Vector2::zeros());
    }

    #[test]
    fn test_snapshot_order_is_stable() {
        let orrery = Orrery::new();
        let keys: Vec<Body> = orrery.snapshot(3.0).states.keys().copied().collect();
        assert_eq!(keys, Body::all().to_vec());
        let a = serde_json::to_string(&orrery.snapshot(3.0)).unwrap();
        let b = serde_json::to_string(&orrery.snapshot(3.0)).unwrap();
        assert_eq!(a, b);
        assert!(a.find("\"Sun\"").unwrap() < a.find("\"Mars\"").unwrap());
    }

    #[test]
    fn test_moon_rides_on_earth() {
        let orrery = Orrery::new();
        for day in [0.0, 7.0, 100.0] {
            let snap = orrery.snapshot(day);
            let d = (snap.position(Body::Moon) - snap.position(Body::Earth)).norm();
            assert_abs_diff_eq!(d, EARTH_MOON_DISTANCE / AU, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_display_scale_only_moves_moon() {
        let physical = Orrery::new();
        let display = Orrery::with_moon_display_scale(50.0);
        let a = physical.snapshot(12.0);
        let b = display.snapshot(12.0);
        assert_eq!(a.position(Body::Earth), b.position(Body::Earth));
        assert_eq!(a.position(Body::Mars), b.position(Body::Mars));
        let da = (a.position(Body::Moon) - a.position(Body::Earth)).norm();
        let db = (b.position(Body::Moon) - b.position(Body::Earth)).norm();
        assert_abs_diff_eq!(db / da, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_display_scale_falls_back() {
        assert_eq!(Orrery::with_moon_display_scale(-3.0).moon_display_scale(), 1.0);
        assert_eq!(Orrery::with_moon_display_scale(f64::NAN).moon_display_scale(), 1.0);
    }
}
