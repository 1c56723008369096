//! Oblique parallel projection of the celestial sphere
//!
//! Horizon directions become unit vectors in an east-north-up frame, are
//! turned about the vertical by the scene azimuth, tilted about the new
//! horizontal axis by the viewing elevation, and projected orthographically.

use nalgebra::{Rotation3, Vector3};
use orrery_core::HorizonCoord;
use serde::{Deserialize, Serialize};

/// Default scene azimuth: south toward the upper left
pub const DEFAULT_VIEW_AZIMUTH_DEG: f64 = -135.0;
/// Default viewing elevation above the horizon plane
pub const DEFAULT_VIEW_ELEVATION_DEG: f64 = 30.0;

/// Projected point on the unit sphere's image
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectedPoint {
    /// Screen right
    pub x: f64,
    /// Screen up
    pub y: f64,
    /// Into the screen; negative values face the viewer
    pub depth: f64,
}

impl ProjectedPoint {
    pub fn is_near_side(&self) -> bool {
        self.depth < 0.0
    }

    /// Scale and translate into pixel space (y down)
    pub fn to_screen(&self, center: (f64, f64), radius: f64) -> (f64, f64) {
        (center.0 + self.x * radius, center.1 - self.y * radius)
    }
}

/// Fixed oblique view of the sky dome
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyProjection {
    pub view_azimuth_deg: f64,
    pub view_elevation_deg: f64,
    #[serde(skip)]
    rotation: Option<Rotation3<f64>>,
}

impl Default for SkyProjection {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_AZIMUTH_DEG, DEFAULT_VIEW_ELEVATION_DEG)
    }
}

impl SkyProjection {
    pub fn new(view_azimuth_deg: f64, view_elevation_deg: f64) -> Self {
        Self { view_azimuth_deg, view_elevation_deg, rotation: None }
    }

    fn rotation(&self) -> Rotation3<f64> {
        self.rotation.unwrap_or_else(|| {
            let spin = Rotation3::from_axis_angle(&Vector3::z_axis(), self.view_azimuth_deg.to_radians());
            let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), self.view_elevation_deg.to_radians());
            tilt * spin
        })
    }

    /// Cache the rotation matrix for repeated projection
    pub fn prepared(mut self) -> Self {
        self.rotation = Some(self.rotation());
        self
    }

    /// Project an east-north-up vector
    pub fn project_vector(&self, enu: &Vector3<f64>) -> ProjectedPoint {
        let v = self.rotation() * enu;
        ProjectedPoint { x: v.x, y: v.z, depth: v.y }
    }

    pub fn project(&self, coord: &HorizonCoord) -> ProjectedPoint {
        self.project_vector(&coord.to_enu())
    }

    pub fn project_deg(&self, azimuth_deg: f64, altitude_deg: f64) -> ProjectedPoint {
        self.project(&HorizonCoord::new(azimuth_deg, altitude_deg))
    }

    /// Horizon circle sampled every `step_deg` of azimuth, closed
    pub fn horizon(&self, step_deg: f64) -> Vec<ProjectedPoint> {
        let step = if step_deg > 0.0 && step_deg.is_finite() { step_deg } else { 2.0 };
        let n = (360.0 / step).ceil() as usize;
        (0..=n)
            .map(|i| self.project_deg((i as f64 * step).min(360.0), 0.0))
            .collect()
    }
}
