//! Angles with an explicit unit and clamped inverse trigonometry
//!
//! Every trigonometric consumer works in radians internally. Inverse functions
//! clamp their argument into [-1, 1] first, so sweeping parameters through
//! extremes yields boundary values instead of NaN.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Unit an angle was expressed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// A plane angle. Stored in radians, remembers the unit it was created with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    radians: f64,
    unit: AngleUnit,
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Self {
        Self { radians: degrees.to_radians(), unit: AngleUnit::Degrees }
    }

    pub fn from_radians(radians: f64) -> Self {
        Self { radians, unit: AngleUnit::Radians }
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    /// Unit the angle was created with
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Value in the angle's own unit
    pub fn value(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.degrees(),
            AngleUnit::Radians => self.radians,
        }
    }

    /// Bearing in [0°, 360°)
    pub fn bearing_degrees(&self) -> f64 {
        normalize_degrees(self.degrees())
    }

    /// Elevation clamped into [-90°, 90°]
    pub fn elevation_degrees(&self) -> f64 {
        self.degrees().clamp(-90.0, 90.0)
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    pub fn tan(&self) -> f64 {
        self.radians.tan()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AngleUnit::Degrees => write!(f, "{:.3}°", self.degrees()),
            AngleUnit::Radians => write!(f, "{:.6} rad", self.radians),
        }
    }
}

/// Normalize angle to [0, 2π)
pub fn normalize_radians(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Normalize angle to [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 { 0.0 } else { a }
}

/// Wrap angle to (-π, π]
pub fn wrap_pi(angle: f64) -> f64 {
    let a = normalize_radians(angle);
    if a > PI { a - TAU } else { a }
}

/// Wrap angle to (-180, 180]
pub fn wrap_180(angle: f64) -> f64 {
    let a = normalize_degrees(angle);
    if a > 180.0 { a - 360.0 } else { a }
}

/// arcsin with its argument clamped into [-1, 1]
pub fn clamped_asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// arccos with its argument clamped into [-1, 1]
pub fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}
