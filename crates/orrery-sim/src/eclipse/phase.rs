//! Lunar phase as seen from Earth

use nalgebra::Vector2;
use orrery_core::constants::SYNODIC_MONTH_DAYS;
use orrery_core::normalize_radians;
use serde::Serialize;
use std::f64::consts::{PI, TAU};

/// Eight traditional phase names, one per eighth of the synodic month
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    const ALL: [PhaseName; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Illuminated fraction (1 − cos φ) / 2 for phase angle φ (0 = new, π = full)
pub fn illuminated_fraction(phase_angle: f64) -> f64 {
    ((1.0 - phase_angle.cos()) / 2.0).clamp(0.0, 1.0)
}

/// Synodic phase of the Moon
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LunarPhase {
    /// Phase angle φ in [0, 2π)
    angle: f64,
}

impl LunarPhase {
    pub fn from_angle(angle: f64) -> Self {
        Self { angle: normalize_radians(angle) }
    }

    /// Phase `days` after a new moon
    pub fn from_days(days: f64) -> Self {
        Self::from_angle(TAU * days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Fraction of the synodic month elapsed, [0, 1)
    pub fn cycle_fraction(&self) -> f64 {
        self.angle / TAU
    }

    pub fn is_waxing(&self) -> bool {
        self.angle < PI
    }

    pub fn illuminated_fraction(&self) -> f64 {
        illuminated_fraction(self.angle)
    }

    pub fn name(&self) -> PhaseName {
        let idx = (self.cycle_fraction() * 8.0).floor() as usize % 8;
        PhaseName::ALL[idx]
    }

    /// Semi-minor axis of the terminator half-ellipse on a disk of `radius`
    pub fn terminator_semi_minor(&self, radius: f64) -> f64 {
        self.angle.cos().abs() * radius
    }

    /// Terminator x coordinate at height `y` on a disk of `radius`
    /// centered at the origin, +x to the observer's right.
    ///
    /// Waxing (northern-hemisphere view): lit on the right.
    pub fn terminator_x(&self, y: f64, radius: f64) -> f64 {
        let half_chord = half_chord(y, radius);
        let c = self.angle.cos();
        if self.is_waxing() { c * half_chord } else { -c * half_chord }
    }

    /// Sunlit interval [x_min, x_max] of the disk row at height `y`.
    /// None outside the disk or when the row is entirely dark.
    pub fn lit_span(&self, y: f64, radius: f64) -> Option<(f64, f64)> {
        if y.abs() > radius {
            return None;
        }
        let w = half_chord(y, radius);
        let t = self.terminator_x(y, radius);
        let (lo, hi) = if self.is_waxing() { (t, w) } else { (-w, t) };
        if hi > lo { Some((lo, hi)) } else { None }
    }

    /// Moon's position on its orbit in the top view, Sun toward −x,
    /// counter-clockwise as seen from above the north pole
    pub fn orbit_position(&self, orbit_radius: f64) -> Vector2<f64> {
        Vector2::new(-orbit_radius * self.angle.cos(), -orbit_radius * self.angle.sin())
    }

    /// Approximate local moonrise hour (0..24); a new moon rises with the Sun
    pub fn moonrise_hour(&self) -> f64 {
        (self.cycle_fraction() * 24.0 + 6.0).rem_euclid(24.0)
    }

    pub fn moonset_hour(&self) -> f64 {
        (self.cycle_fraction() * 24.0 + 18.0).rem_euclid(24.0)
    }
}

fn half_chord(y: f64, radius: f64) -> f64 {
    (radius * radius - y * y).max(0.0).sqrt()
}
