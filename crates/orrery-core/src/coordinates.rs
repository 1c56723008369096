use crate::angle::{clamped_asin, normalize_degrees};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Direction in local horizon coordinates
///
/// Azimuth is measured from north through east, altitude above the horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizonCoord {
    pub azimuth_deg: f64,   // [0, 360)
    pub altitude_deg: f64,  // [-90, 90]
}

impl HorizonCoord {
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth_deg: normalize_degrees(azimuth_deg),
            altitude_deg: altitude_deg.clamp(-90.0, 90.0),
        }
    }

    /// Unit vector in the east-north-up frame
    pub fn to_enu(&self) -> Vector3<f64> {
        let az = self.azimuth_deg.to_radians();
        let alt = self.altitude_deg.to_radians();
        Vector3::new(
            alt.cos() * az.sin(), // east
            alt.cos() * az.cos(), // north
            alt.sin(),            // up
        )
    }

    /// Direction of an east-north-up vector. A zero vector maps to (0°, 0°).
    pub fn from_enu(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        if r == 0.0 || !r.is_finite() {
            return Self::new(0.0, 0.0);
        }
        let altitude = clamped_asin(v.z / r).to_degrees();
        let azimuth = if v.x == 0.0 && v.y == 0.0 {
            0.0
        } else {
            v.x.atan2(v.y).to_degrees()
        };
        Self::new(azimuth, altitude)
    }

    /// Is the direction above the horizon?
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }
}

/// Unit vector along `v`, or the zero vector when `v` has no direction
pub fn direction2(v: &Vector2<f64>) -> Vector2<f64> {
    let n = v.norm();
    if n > 0.0 && n.is_finite() { v / n } else { Vector2::zeros() }
}

/// Unit vector along `v`, or the zero vector when `v` has no direction
pub fn direction3(v: &Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n > 0.0 && n.is_finite() { v / n } else { Vector3::zeros() }
}

/// Polar angle of a point in the orbital plane, in [0, 2π).
/// The origin maps to 0.
pub fn polar_angle(v: &Vector2<f64>) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    crate::angle::normalize_radians(v.y.atan2(v.x))
}
