//! Simplified Keplerian orbits in the orbital plane

use nalgebra::Vector2;
use orrery_core::{normalize_radians, OrreryError, OrreryResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Orbital elements of the first-order model
///
/// The true anomaly is taken equal to the mean anomaly, θ = 2π·t/P + θ₀,
/// which is indistinguishable on screen for e < 0.1 and avoids solving
/// Kepler's equation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Orbital period (days)
    pub period_days: f64,
    /// Eccentricity (dimensionless, 0 = circular)
    pub eccentricity: f64,
    /// Semi-major axis (caller's length unit)
    pub semi_major_axis: f64,
    /// Anomaly at t = 0 (radians)
    pub epoch_phase: f64,
}

impl OrbitalElements {
    /// Create from parameters, rejecting open or degenerate orbits
    pub fn new(
        period_days: f64,
        eccentricity: f64,
        semi_major_axis: f64,
        epoch_phase: f64,
    ) -> OrreryResult<Self> {
        let elements = Self { period_days, eccentricity, semi_major_axis, epoch_phase };
        elements.validate()?;
        Ok(elements)
    }

    /// Circular orbit of the given radius
    pub fn circular(period_days: f64, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "negative orbit radius {}", radius);
        Self { period_days, eccentricity: 0.0, semi_major_axis: radius, epoch_phase: 0.0 }
    }

    /// Check the elements describe a closed orbit
    pub fn validate(&self) -> OrreryResult<()> {
        if !(self.period_days.is_finite() && self.period_days > 0.0) {
            return Err(OrreryError::InvalidElements(format!(
                "period must be positive, got {}", self.period_days
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrreryError::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {}", self.eccentricity
            )));
        }
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis >= 0.0) {
            return Err(OrreryError::InvalidElements(format!(
                "semi-major axis must be non-negative, got {}", self.semi_major_axis
            )));
        }
        Ok(())
    }

    /// Semi-latus rectum p = a(1 − e²)
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity.powi(2))
    }

    /// True anomaly (radians, [0, 2π)) after `t_days`.
    /// A non-positive period freezes the body at its epoch phase.
    pub fn true_anomaly(&self, t_days: f64) -> f64 {
        if !(self.period_days > 0.0) {
            return normalize_radians(self.epoch_phase);
        }
        normalize_radians(TAU * t_days / self.period_days + self.epoch_phase)
    }

    /// Distance from the focus at true anomaly θ
    pub fn radius(&self, true_anomaly: f64) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.eccentricity * true_anomaly.cos())
    }

    /// Position relative to the focus after `t_days`; x points to periapsis
    pub fn position(&self, t_days: f64) -> Vector2<f64> {
        let theta = self.true_anomaly(t_days);
        let r = self.radius(theta);
        Vector2::new(r * theta.cos(), r * theta.sin())
    }

    /// Velocity (length unit per day) after `t_days`, the exact derivative
    /// of [`position`](Self::position). Zero for a frozen orbit.
    pub fn velocity(&self, t_days: f64) -> Vector2<f64> {
        if !(self.period_days > 0.0) {
            return Vector2::zeros();
        }
        let rate = TAU / self.period_days;
        let theta = self.true_anomaly(t_days);
        let (sin, cos) = theta.sin_cos();
        let denom = 1.0 + self.eccentricity * cos;
        let r = self.semi_latus_rectum() / denom;
        let dr = self.semi_latus_rectum() * self.eccentricity * sin / (denom * denom);
        Vector2::new(dr * cos - r * sin, dr * sin + r * cos) * rate
    }

    /// Closest approach to the focus
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

/// A satellite orbiting a body that itself orbits the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundOrbit {
    pub primary: OrbitalElements,
    pub satellite: OrbitalElements,
}

/// Positions of a primary and its satellite at one instant
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompoundPosition {
    pub primary: Vector2<f64>,
    /// Satellite position relative to the origin
    pub satellite: Vector2<f64>,
    /// Satellite position relative to the primary
    pub offset: Vector2<f64>,
}

impl CompoundOrbit {
    pub fn new(primary: OrbitalElements, satellite: OrbitalElements) -> Self {
        Self { primary, satellite }
    }

    pub fn position(&self, t_days: f64) -> CompoundPosition {
        let primary = self.primary.position(t_days);
        let offset = self.satellite.position(t_days);
        CompoundPosition { primary, satellite: primary + offset, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_circular_orbit_constant_radius() {
        let orbit = OrbitalElements::circular(365.25, 1.0);
        for t in [0.0, 50.0, 91.3, 200.0, 365.0] {
            assert_abs_diff_eq!(orbit.position(t).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_eccentric_orbit_focus_distances() {
        // Earth-like orbit
        let orbit = OrbitalElements::new(365.25, 0.0167, 1.0, 0.0).unwrap();

        // t = 0 is periapsis, half a period later apoapsis
        assert_abs_diff_eq!(orbit.position(0.0).norm(), orbit.periapsis(), epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.position(365.25 / 2.0).norm(), orbit.apoapsis(), epsilon = 1e-12);
    }

    #[test]
    fn test_anomaly_is_linear_in_time() {
        let orbit = OrbitalElements::new(100.0, 0.05, 2.0, PI / 2.0).unwrap();
        assert_abs_diff_eq!(orbit.true_anomaly(0.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.true_anomaly(25.0), PI, epsilon = 1e-12);
        // Full period returns to start
        assert_abs_diff_eq!(
            (orbit.position(100.0) - orbit.position(0.0)).norm(), 0.0, epsilon = 1e-12
        );
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let orbit = OrbitalElements::new(365.25, 0.0167, 1.0, 0.3).unwrap();
        for t in [0.0, 40.0, 180.0, 300.0] {
            let h = 1e-4;
            let numeric = (orbit.position(t + h) - orbit.position(t - h)) / (2.0 * h);
            let analytic = orbit.velocity(t);
            assert_abs_diff_eq!(analytic.x, numeric.x, epsilon = 1e-9);
            assert_abs_diff_eq!(analytic.y, numeric.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_new_rejects_invalid_elements() {
        assert!(matches!(
            OrbitalElements::new(10.0, 1.5, 1.0, 0.0),
            Err(OrreryError::InvalidElements(_))
        ));
        assert!(OrbitalElements::new(10.0, -0.1, 1.0, 0.0).is_err());
        assert!(OrbitalElements::new(10.0, 0.2, -1.0, 0.0).is_err());
        assert!(OrbitalElements::new(f64::NAN, 0.2, 1.0, 0.0).is_err());

        let orbit = OrbitalElements::new(10.0, 0.5, 1.0, 0.0).unwrap();
        assert_eq!(orbit.eccentricity, 0.5);
        let bad = OrbitalElements { eccentricity: 1.0, ..orbit };
        assert!(bad.validate().is_err());
        let bad = OrbitalElements { period_days: 0.0, ..orbit };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_zero_period_is_frozen() {
        let orbit = OrbitalElements { period_days: 0.0, ..OrbitalElements::circular(1.0, 3.0) };
        assert_eq!(orbit.position(0.0), orbit.position(1234.5));
    }

    #[test]
    fn test_compound_position() {
        let earth = OrbitalElements::circular(365.25, 1.0);
        let moon = OrbitalElements::circular(27.32, 0.1);
        let system = CompoundOrbit::new(earth, moon);

        let p = system.position(10.0);
        assert_abs_diff_eq!((p.satellite - p.primary).norm(), 0.1, epsilon = 1e-12);
        assert_eq!(p.offset, moon.position(10.0));
        assert_eq!(p.primary, earth.position(10.0));
    }
}
