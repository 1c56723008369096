//! Engine configuration (JSON)

use crate::projection::{SkyProjection, DEFAULT_VIEW_AZIMUTH_DEG, DEFAULT_VIEW_ELEVATION_DEG};
use crate::trajectory::IntegratorConfig;
use orrery_core::{OrreryError, OrreryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for every animated component. Missing JSON fields fall back to
/// the defaults, so a config file only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig,
    /// Launch altitude as a multiple of the body radius
    pub launch_radius: f64,
    /// Integrator steps per animation frame
    pub substeps_per_frame: usize,
    /// Points kept in the launch trail
    pub trail_capacity: usize,
    /// Points kept in the orbit trail
    pub orbit_trail_capacity: usize,
    /// Exaggeration of the Moon's distance in the orbit view
    pub moon_display_scale: f64,
    pub sky: SkyConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub view_azimuth_deg: f64,
    pub view_elevation_deg: f64,
    /// Hour angle advanced per animation frame (degrees)
    pub hour_angle_step_deg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::default(),
            launch_radius: 1.2,
            substeps_per_frame: 8,
            trail_capacity: 4000,
            orbit_trail_capacity: 600,
            moon_display_scale: 1.0,
            sky: SkyConfig::default(),
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            view_azimuth_deg: DEFAULT_VIEW_AZIMUTH_DEG,
            view_elevation_deg: DEFAULT_VIEW_ELEVATION_DEG,
            hour_angle_step_deg: 0.8,
        }
    }
}

impl SkyConfig {
    pub fn projection(&self) -> SkyProjection {
        SkyProjection::new(self.view_azimuth_deg, self.view_elevation_deg).prepared()
    }
}

impl EngineConfig {
    pub fn validate(&self) -> OrreryResult<()> {
        self.integrator.validate()?;
        if !(self.launch_radius.is_finite() && self.launch_radius >= self.integrator.body_radius) {
            return Err(OrreryError::InvalidConfig(format!(
                "launch_radius ({}) must be at least body_radius ({})",
                self.launch_radius, self.integrator.body_radius
            )));
        }
        if self.launch_radius >= self.integrator.escape_radius {
            return Err(OrreryError::InvalidConfig(format!(
                "launch_radius ({}) must be inside escape_radius ({})",
                self.launch_radius, self.integrator.escape_radius
            )));
        }
        if self.substeps_per_frame == 0 {
            return Err(OrreryError::InvalidConfig("substeps_per_frame must be at least 1".into()));
        }
        if self.trail_capacity == 0 || self.orbit_trail_capacity == 0 {
            return Err(OrreryError::InvalidConfig("trail capacities must be at least 1".into()));
        }
        if !(self.moon_display_scale.is_finite() && self.moon_display_scale > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "moon_display_scale must be positive, got {}", self.moon_display_scale
            )));
        }
        let sky = &self.sky;
        if ![sky.view_azimuth_deg, sky.view_elevation_deg, sky.hour_angle_step_deg]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(OrreryError::InvalidConfig("sky view angles must be finite".into()));
        }
        Ok(())
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> OrreryResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate
    pub fn load(path: &Path) -> OrreryResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            dt = config.integrator.dt,
            substeps = config.substeps_per_frame,
            "loaded engine config"
        );
        Ok(config)
    }
}
