//! Eclipse geometry
//!
//! - `shadow`: umbra/penumbra cones and their tangent lines (side view)
//! - `phase`: lunar phase, illuminated fraction and terminator
//! - `events`: catalog of observed eclipses and their timelines
//!
//! This module covers the sky view: two disks, the occluded target and the
//! occluder, described by apparent radii and the separation of their
//! centers, all in degrees.

pub mod events;
pub mod phase;
pub mod shadow;

pub use events::{ObservedEclipse, ObservedKind};
pub use phase::{LunarPhase, PhaseName};
pub use shadow::{ShadowCone, ShadowLines, TangentLine};

use orrery_core::clamped_acos;
use orrery_core::constants::{AU, EARTH_MOON_DISTANCE, R_EARTH, R_MOON, R_SUN};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which body is in the middle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EclipseKind {
    /// Moon between Sun and Earth
    Solar,
    /// Earth between Sun and Moon
    Lunar,
}

impl EclipseKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
        }
    }
}

/// What an observer would call the event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EclipseType {
    None,
    /// Moon inside Earth's penumbra only
    Penumbral,
    Partial,
    /// Occluder fully inside a larger target disk
    Annular,
    Total,
}

impl EclipseType {
    pub fn occurs(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Two disks on the sky
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiskOverlap {
    pub target_radius: f64,
    pub occluder_radius: f64,
    /// Distance between disk centers
    pub separation: f64,
}

impl DiskOverlap {
    pub fn new(target_radius: f64, occluder_radius: f64, separation: f64) -> Self {
        Self { target_radius, occluder_radius, separation: separation.abs() }
    }

    /// Largest separation at which the disks still touch
    pub fn reach(&self) -> f64 {
        self.target_radius + self.occluder_radius
    }

    pub fn overlaps(&self) -> bool {
        self.separation < self.reach()
    }

    /// Fraction of the target's diameter covered, clamped to [0, 1]
    pub fn magnitude(&self) -> f64 {
        eclipse_magnitude(self.target_radius, self.occluder_radius, self.separation)
    }

    /// Fraction of the target's area covered
    pub fn obscuration(&self) -> f64 {
        let (r1, r2, d) = (self.target_radius, self.occluder_radius, self.separation);
        if r1 <= 0.0 || r2 <= 0.0 || d >= r1 + r2 {
            return 0.0;
        }
        if d <= (r1 - r2).abs() {
            let inner = r1.min(r2);
            return (inner * inner / (r1 * r1)).min(1.0);
        }
        let a1 = r1 * r1 * clamped_acos((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1));
        let a2 = r2 * r2 * clamped_acos((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2));
        let k = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);
        let lens = a1 + a2 - 0.5 * k.max(0.0).sqrt();
        (lens / (PI * r1 * r1)).clamp(0.0, 1.0)
    }

    /// Central phase reached at this separation, if any
    pub fn eclipse_type(&self) -> EclipseType {
        let (rt, ro, d) = (self.target_radius, self.occluder_radius, self.separation);
        if !self.overlaps() {
            EclipseType::None
        } else if ro >= rt && d <= ro - rt {
            EclipseType::Total
        } else if ro < rt && d <= rt - ro {
            EclipseType::Annular
        } else {
            EclipseType::Partial
        }
    }
}

/// Eclipse magnitude (rₜ + rₒ − d) / 2rₜ clamped to [0, 1].
///
/// 1 when the occluder covers the target's full diameter, falling linearly
/// to 0 when the disks just touch. A degenerate target gives 0.
pub fn eclipse_magnitude(target_radius: f64, occluder_radius: f64, separation: f64) -> f64 {
    if !(target_radius > 0.0) {
        return 0.0;
    }
    let m = (target_radius + occluder_radius - separation.abs()) / (2.0 * target_radius);
    m.clamp(0.0, 1.0)
}

/// Apparent angular radius (degrees) of a sphere at a distance
pub fn apparent_radius_deg(radius: f64, distance: f64) -> f64 {
    if !(distance > 0.0) {
        return 0.0;
    }
    (radius / distance).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Sun-Earth-Moon alignment at syzygy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EclipseConfiguration {
    pub kind: EclipseKind,
    /// Moon's angle out of the ecliptic at syzygy (degrees)
    pub inclination_offset_deg: f64,
    /// Earth-Sun distance (m)
    pub sun_distance: f64,
    /// Earth-Moon distance (m)
    pub moon_distance: f64,
}

/// Evaluated eclipse at one instant
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EclipseState {
    pub kind: EclipseKind,
    pub eclipse_type: EclipseType,
    /// Center separation on the sky (degrees)
    pub separation_deg: f64,
    /// Apparent radius of the eclipsed disk (degrees)
    pub target_radius_deg: f64,
    /// Apparent radius of the occluding disk or umbra (degrees)
    pub occluder_radius_deg: f64,
    /// Apparent penumbra radius; lunar only (degrees)
    pub penumbra_radius_deg: Option<f64>,
    pub magnitude: f64,
    pub obscuration: f64,
}

impl EclipseConfiguration {
    pub fn new(kind: EclipseKind, inclination_offset_deg: f64) -> Self {
        Self { kind, inclination_offset_deg, sun_distance: AU, moon_distance: EARTH_MOON_DISTANCE }
    }

    pub fn with_moon_distance(mut self, moon_distance: f64) -> Self {
        self.moon_distance = moon_distance;
        self
    }

    /// Side-view shadow of the middle body, in meters
    pub fn shadow_cone(&self) -> ShadowCone {
        match self.kind {
            EclipseKind::Solar => {
                let lateral = self.moon_distance * self.inclination_offset_deg.to_radians().tan();
                ShadowCone::new(R_SUN, R_MOON, self.sun_distance - self.moon_distance, lateral)
            }
            // Earth sits on the ecliptic; the Moon is what's displaced
            EclipseKind::Lunar => ShadowCone::new(R_SUN, R_EARTH, self.sun_distance, 0.0),
        }
    }

    /// Target and occluder disks plus the penumbra radius for lunar events
    fn disks(&self) -> (f64, f64, Option<f64>) {
        match self.kind {
            EclipseKind::Solar => (
                apparent_radius_deg(R_SUN, self.sun_distance),
                apparent_radius_deg(R_MOON, self.moon_distance),
                None,
            ),
            EclipseKind::Lunar => {
                let cone = self.shadow_cone();
                let x = self.sun_distance + self.moon_distance;
                let angular = |w: f64| (w / self.moon_distance).atan().to_degrees();
                (
                    apparent_radius_deg(R_MOON, self.moon_distance),
                    angular(cone.umbra_radius(x).max(0.0)),
                    Some(angular(cone.penumbra_radius(x))),
                )
            }
        }
    }

    /// Separation of the disk centers at greatest eclipse (degrees)
    pub fn minimum_separation(&self) -> f64 {
        self.inclination_offset_deg.abs()
    }

    /// Largest separation at which anything is still eclipsed
    pub fn reach(&self) -> f64 {
        let (target, occluder, penumbra) = self.disks();
        target + penumbra.unwrap_or(occluder)
    }

    /// Evaluate at greatest eclipse
    pub fn evaluate(&self) -> EclipseState {
        self.evaluate_at_separation(self.minimum_separation())
    }

    /// Evaluate along the pass: the occluder sweeps across at progress
    /// t ∈ [0, 1], from first contact range at 0 through greatest eclipse
    /// at 0.5 to the far side at 1.
    pub fn at_progress(&self, t: f64) -> EclipseState {
        let along = (t.clamp(0.0, 1.0) - 0.5) * 2.0 * self.reach();
        self.evaluate_at_separation(self.minimum_separation().hypot(along))
    }

    pub fn evaluate_at_separation(&self, separation_deg: f64) -> EclipseState {
        let (target, occluder, penumbra) = self.disks();
        let overlap = DiskOverlap::new(target, occluder, separation_deg);
        let mut eclipse_type = overlap.eclipse_type();
        if eclipse_type == EclipseType::Annular && self.kind == EclipseKind::Lunar {
            // Umbra narrower than the Moon: still only partly dark
            eclipse_type = EclipseType::Partial;
        }
        if eclipse_type == EclipseType::None {
            if let Some(p) = penumbra {
                if overlap.separation < p + target {
                    eclipse_type = EclipseType::Penumbral;
                }
            }
        }
        EclipseState {
            kind: self.kind,
            eclipse_type,
            separation_deg: overlap.separation,
            target_radius_deg: target,
            occluder_radius_deg: occluder,
            penumbra_radius_deg: penumbra,
            magnitude: overlap.magnitude(),
            obscuration: overlap.obscuration(),
        }
    }
}
