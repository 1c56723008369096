//! Restricted two-body trajectory integration
//!
//! A massless test body moves under a single central mass in normalized
//! units (μ = 1, reference body radius = 1). Propagation uses velocity Verlet,
//! which keeps orbital energy bounded over thousands of steps where explicit
//! Euler drifts visibly.

use nalgebra::Vector2;
use orrery_core::constants::{BODY_RADIUS_NORMALIZED, MU_NORMALIZED};
use orrery_core::{OrreryError, OrreryResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Position and velocity of the test body
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryState {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl TrajectoryState {
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        Self { position, velocity }
    }

    pub fn radius(&self) -> f64 {
        self.position.norm()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Specific orbital energy ½v² − μ/r
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.norm_squared() - mu / self.radius()
    }

    /// Specific angular momentum (z component of r × v)
    pub fn angular_momentum(&self) -> f64 {
        self.position.perp(&self.velocity)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }
}

/// One recorded step of a trajectory
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Simulated time since launch (normalized units)
    pub elapsed: f64,
    pub step: u64,
}

/// Why propagation stopped. None of these are errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Fell below the reference body's surface (or the state diverged)
    Impact,
    /// Crossed the escape distance
    Escaped,
    /// Reached the step limit without impacting or escaping
    Timeout,
}

/// Integrator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Central gravitational parameter
    pub mu: f64,
    /// Reference body radius; falling below it is an impact
    pub body_radius: f64,
    /// Distance beyond which the body has escaped
    pub escape_radius: f64,
    /// Time step
    pub dt: f64,
    /// Maximum number of steps before timing out
    pub max_steps: u64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            mu: MU_NORMALIZED,
            body_radius: BODY_RADIUS_NORMALIZED,
            escape_radius: 12.0,
            dt: 0.005,
            max_steps: 12_000,
        }
    }
}

impl IntegratorConfig {
    pub fn validate(&self) -> OrreryResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(OrreryError::InvalidIntegrator(format!("{} must be positive, got {}", name, v)))
            }
        };
        positive("mu", self.mu)?;
        positive("body_radius", self.body_radius)?;
        positive("escape_radius", self.escape_radius)?;
        positive("dt", self.dt)?;
        if self.escape_radius <= self.body_radius {
            return Err(OrreryError::InvalidIntegrator(format!(
                "escape_radius ({}) must exceed body_radius ({})",
                self.escape_radius, self.body_radius
            )));
        }
        if self.max_steps == 0 {
            return Err(OrreryError::InvalidIntegrator("max_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Gravitational acceleration −μ·r̂/|r|². Zero at the origin.
pub fn acceleration(position: &Vector2<f64>, mu: f64) -> Vector2<f64> {
    let r2 = position.norm_squared();
    if r2 == 0.0 {
        return Vector2::zeros();
    }
    let r = r2.sqrt();
    position * (-mu / (r2 * r))
}

/// Advance a state by one velocity-Verlet step
pub fn verlet_step(state: &TrajectoryState, dt: f64, mu: f64) -> TrajectoryState {
    let a0 = acceleration(&state.position, mu);
    let v_half = state.velocity + a0 * (0.5 * dt);
    let position = state.position + v_half * dt;
    let a1 = acceleration(&position, mu);
    let velocity = v_half + a1 * (0.5 * dt);
    TrajectoryState { position, velocity }
}

/// Speed of a circular orbit at radius `r`
pub fn circular_speed(mu: f64, r: f64) -> f64 {
    if r > 0.0 { (mu / r).sqrt() } else { 0.0 }
}

/// Escape speed at radius `r`
pub fn escape_speed(mu: f64, r: f64) -> f64 {
    SQRT_2 * circular_speed(mu, r)
}

/// Coarse, display-only label for a launch speed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OrbitClass {
    /// Will fall back onto the surface
    Suborbital,
    Circular,
    Elliptical,
    /// Escape at (about) exactly the escape speed
    Parabolic,
    Hyperbolic,
}

impl OrbitClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suborbital => "suborbital (surface impact)",
            Self::Circular => "circular orbit (v = v1)",
            Self::Elliptical => "elliptical orbit",
            Self::Parabolic => "parabolic escape (v = v2)",
            Self::Hyperbolic => "hyperbolic escape (v > v2)",
        }
    }

    /// Does the label predict the body leaves for good?
    pub fn escapes(&self) -> bool {
        matches!(self, Self::Parabolic | Self::Hyperbolic)
    }
}

/// Width of the circular and parabolic bands around 1 and √2
const CLASS_BAND: f64 = 0.05;

/// Label a launch by its speed as a multiple of the circular speed.
///
/// Anything below √2 that is not circular stays bound, so the parabolic
/// band only extends upward from √2. Advisory only: near the band edges
/// the integrator may disagree.
pub fn classify_launch(speed_ratio: f64) -> OrbitClass {
    if speed_ratio < 0.85 {
        OrbitClass::Suborbital
    } else if (speed_ratio - 1.0).abs() < CLASS_BAND {
        OrbitClass::Circular
    } else if speed_ratio < SQRT_2 {
        OrbitClass::Elliptical
    } else if speed_ratio - SQRT_2 < CLASS_BAND {
        OrbitClass::Parabolic
    } else {
        OrbitClass::Hyperbolic
    }
}

/// Stateful integrator for one simulated body
///
/// Holds the only mutable state of the engine: the current state vector,
/// the step count and the terminal status once reached.
#[derive(Clone, Debug)]
pub struct VerletIntegrator {
    config: IntegratorConfig,
    state: TrajectoryState,
    steps: u64,
    status: Option<Termination>,
}

impl VerletIntegrator {
    pub fn new(config: IntegratorConfig, initial: TrajectoryState) -> Self {
        let mut integrator = Self { config, state: initial, steps: 0, status: None };
        integrator.status = integrator.check_termination();
        integrator
    }

    /// Horizontal launch from `launch_radius` at `speed_ratio` times the
    /// circular speed at that radius. The body starts below the center
    /// (0, −r) moving in +x.
    pub fn launch(config: IntegratorConfig, launch_radius: f64, speed_ratio: f64) -> Self {
        let speed = speed_ratio * circular_speed(config.mu, launch_radius);
        let initial = TrajectoryState::new(
            Vector2::new(0.0, -launch_radius),
            Vector2::new(speed, 0.0),
        );
        Self::new(config, initial)
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn state(&self) -> &TrajectoryState {
        &self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.config.dt
    }

    pub fn status(&self) -> Option<Termination> {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_none()
    }

    pub fn specific_energy(&self) -> f64 {
        self.state.specific_energy(self.config.mu)
    }

    fn check_termination(&self) -> Option<Termination> {
        if !self.state.is_finite() {
            return Some(Termination::Impact);
        }
        let r = self.state.radius();
        if r < self.config.body_radius {
            Some(Termination::Impact)
        } else if r > self.config.escape_radius {
            Some(Termination::Escaped)
        } else if self.steps >= self.config.max_steps {
            Some(Termination::Timeout)
        } else {
            None
        }
    }

    /// Advance one step. Returns the new sample, or None once terminated.
    pub fn step(&mut self) -> Option<TrajectorySample> {
        if self.status.is_some() {
            return None;
        }
        self.state = verlet_step(&self.state, self.config.dt, self.config.mu);
        self.steps += 1;
        self.status = self.check_termination();
        Some(self.sample())
    }

    /// Advance up to `n` steps, stopping early on termination
    pub fn advance(&mut self, n: usize) -> Vec<TrajectorySample> {
        let mut samples = Vec::with_capacity(n);
        for _ in 0..n {
            match self.step() {
                Some(s) => samples.push(s),
                None => break,
            }
            if !self.is_running() {
                break;
            }
        }
        samples
    }

    /// Propagate until a terminal state; returns it with the step count
    pub fn run_to_end(&mut self) -> Termination {
        while self.step().is_some() {}
        // max_steps >= 1 guarantees termination; Timeout covers a zero limit
        self.status.unwrap_or(Termination::Timeout)
    }

    pub fn sample(&self) -> TrajectorySample {
        TrajectorySample {
            position: self.state.position,
            velocity: self.state.velocity,
            elapsed: self.elapsed(),
            step: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn circular_at_unit_radius() -> TrajectoryState {
        TrajectoryState::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0))
    }

    #[test]
    fn test_acceleration_points_inward() {
        let a = acceleration(&Vector2::new(2.0, 0.0), 1.0);
        assert_abs_diff_eq!(a.x, -0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(a.y, 0.0, epsilon = 1e-15);
        assert_eq!(acceleration(&Vector2::zeros(), 1.0), Vector2::zeros());
    }

    #[test]
    fn test_verlet_conserves_energy() {
        let mut state = circular_at_unit_radius();
        let e0 = state.specific_energy(1.0);
        let l0 = state.angular_momentum();

        for _ in 0..10_000 {
            state = verlet_step(&state, 0.005, 1.0);
        }

        let e1 = state.specific_energy(1.0);
        assert_relative_eq!(e1, e0, max_relative = 1e-3);
        assert_relative_eq!(state.angular_momentum(), l0, max_relative = 1e-9);
        assert_abs_diff_eq!(state.radius(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_circular_launch_times_out() {
        let mut integrator = VerletIntegrator::launch(IntegratorConfig::default(), 1.2, 1.0);
        assert_eq!(integrator.run_to_end(), Termination::Timeout);
        assert_eq!(integrator.steps(), 12_000);
        assert_abs_diff_eq!(integrator.state().radius(), 1.2, epsilon = 1e-2);
    }

    #[test]
    fn test_slow_launch_impacts() {
        let mut integrator = VerletIntegrator::launch(IntegratorConfig::default(), 1.2, 0.5);
        assert_eq!(integrator.run_to_end(), Termination::Impact);
        assert!(integrator.steps() < 2_000, "took {} steps", integrator.steps());
        assert!(integrator.state().radius() < 1.0);
    }

    #[test]
    fn test_escape_speed_launch_escapes() {
        let mut integrator = VerletIntegrator::launch(IntegratorConfig::default(), 1.2, SQRT_2);
        assert_eq!(integrator.run_to_end(), Termination::Escaped);
        assert!(integrator.state().radius() > 12.0);
        // Radial acceleration has decayed to almost nothing out there
        let a = acceleration(&integrator.state().position, 1.0);
        assert!(a.norm() < 1.0 / 144.0);
    }

    #[test]
    fn test_no_steps_after_termination() {
        let mut integrator = VerletIntegrator::launch(IntegratorConfig::default(), 1.2, 0.5);
        integrator.run_to_end();
        let steps = integrator.steps();
        assert!(integrator.step().is_none());
        assert!(integrator.advance(10).is_empty());
        assert_eq!(integrator.steps(), steps);
    }

    #[test]
    fn test_starting_inside_body_is_impact() {
        let integrator = VerletIntegrator::new(
            IntegratorConfig::default(),
            TrajectoryState::new(Vector2::new(0.5, 0.0), Vector2::zeros()),
        );
        assert_eq!(integrator.status(), Some(Termination::Impact));
    }

    #[test]
    fn test_divergence_is_impact() {
        let integrator = VerletIntegrator::new(
            IntegratorConfig::default(),
            TrajectoryState::new(Vector2::new(f64::NAN, 2.0), Vector2::zeros()),
        );
        assert_eq!(integrator.status(), Some(Termination::Impact));
    }

    #[test]
    fn test_advance_is_frame_independent() {
        let config = IntegratorConfig::default();
        let mut a = VerletIntegrator::launch(config.clone(), 1.2, 1.1);
        let mut b = VerletIntegrator::launch(config, 1.2, 1.1);

        for _ in 0..100 {
            a.advance(8);
        }
        for _ in 0..8 {
            b.advance(100);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.steps(), 800);
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(classify_launch(0.5), OrbitClass::Suborbital);
        assert_eq!(classify_launch(0.9), OrbitClass::Elliptical);
        assert_eq!(classify_launch(1.0), OrbitClass::Circular);
        assert_eq!(classify_launch(1.03), OrbitClass::Circular);
        assert_eq!(classify_launch(1.2), OrbitClass::Elliptical);
        assert_eq!(classify_launch(SQRT_2), OrbitClass::Parabolic);
        assert_eq!(classify_launch(1.45), OrbitClass::Parabolic);
        assert_eq!(classify_launch(1.47), OrbitClass::Hyperbolic);
        assert_eq!(classify_launch(1.6), OrbitClass::Hyperbolic);
        assert!(classify_launch(2.0).escapes());
    }

    #[test]
    fn test_bound_speeds_below_escape_are_elliptical() {
        for ratio in [1.37, 1.40, 1.41] {
            let class = classify_launch(ratio);
            assert_eq!(class, OrbitClass::Elliptical, "ratio {}", ratio);
            assert!(!class.escapes());
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(IntegratorConfig::default().validate().is_ok());
        let bad = IntegratorConfig { dt: 0.0, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = IntegratorConfig { escape_radius: 0.5, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = IntegratorConfig { max_steps: 0, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
