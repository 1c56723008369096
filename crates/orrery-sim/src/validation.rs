//! Validation of the integrator against the closed-form circular orbit

use crate::trajectory::{verlet_step, TrajectoryState};
use nalgebra::Vector2;
use orrery_core::{OrreryError, OrreryResult};
use serde::Serialize;

/// Numerical against analytic state at one step
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ValidationPoint {
    pub step: u64,
    pub time: f64,
    pub computed: Vector2<f64>,
    pub analytic: Vector2<f64>,
    pub position_error: f64,
    /// (E − E₀) / |E₀|
    pub energy_drift: f64,
}

/// Summary statistics over a validation run
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ValidationSummary {
    pub num_points: usize,
    pub mean_position_error: f64,
    pub max_position_error: f64,
    pub max_energy_drift: f64,
}

/// Propagate a circular orbit of `radius` around `mu` and compare with
/// r(t) = radius·(cos ωt, sin ωt), sampling every `sample_every` steps.
pub fn validate_circular(
    mu: f64,
    radius: f64,
    dt: f64,
    steps: u64,
    sample_every: u64,
) -> OrreryResult<Vec<ValidationPoint>> {
    if !(mu > 0.0 && radius > 0.0 && dt > 0.0) || sample_every == 0 {
        return Err(OrreryError::InvalidIntegrator(format!(
            "validation needs positive mu, radius, dt and sample interval (mu={}, r={}, dt={}, every={})",
            mu, radius, dt, sample_every
        )));
    }

    let omega = (mu / radius.powi(3)).sqrt();
    let speed = (mu / radius).sqrt();
    let mut state = TrajectoryState::new(Vector2::new(radius, 0.0), Vector2::new(0.0, speed));
    let e0 = state.specific_energy(mu);

    let mut results = Vec::with_capacity((steps / sample_every) as usize + 1);
    for step in 0..=steps {
        if step % sample_every == 0 {
            let time = step as f64 * dt;
            let analytic = Vector2::new(radius * (omega * time).cos(), radius * (omega * time).sin());
            results.push(ValidationPoint {
                step,
                time,
                computed: state.position,
                analytic,
                position_error: (state.position - analytic).norm(),
                energy_drift: (state.specific_energy(mu) - e0) / e0.abs(),
            });
        }
        if step < steps {
            state = verlet_step(&state, dt, mu);
        }
    }

    Ok(results)
}

pub fn summarize_validation(results: &[ValidationPoint]) -> Option<ValidationSummary> {
    if results.is_empty() {
        return None;
    }
    let n = results.len();
    Some(ValidationSummary {
        num_points: n,
        mean_position_error: results.iter().map(|p| p.position_error).sum::<f64>() / n as f64,
        max_position_error: results.iter().map(|p| p.position_error).fold(0.0, f64::max),
        max_energy_drift: results.iter().map(|p| p.energy_drift.abs()).fold(0.0, f64::max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_tracks_circle() {
        let results = validate_circular(1.0, 1.0, 0.005, 10_000, 100).unwrap();
        assert_eq!(results.len(), 101);
        let summary = summarize_validation(&results).unwrap();
        assert!(summary.max_energy_drift < 1e-3);
        assert!(summary.max_position_error < 1e-2, "{:?}", summary);
        assert_eq!(results[0].position_error, 0.0);
    }

    #[test]
    fn test_error_shrinks_with_step() {
        let coarse = validate_circular(1.0, 1.0, 0.05, 1_000, 1_000).unwrap();
        let fine = validate_circular(1.0, 1.0, 0.005, 10_000, 10_000).unwrap();
        let coarse_err = coarse.last().unwrap().position_error;
        let fine_err = fine.last().unwrap().position_error;
        // Second order: ten times smaller step, about a hundred times smaller error
        assert!(fine_err < coarse_err / 50.0, "coarse {} fine {}", coarse_err, fine_err);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(validate_circular(1.0, 1.0, 0.0, 10, 1).is_err());
        assert!(validate_circular(1.0, 1.0, 0.01, 10, 0).is_err());
        assert!(summarize_validation(&[]).is_none());
    }
}
