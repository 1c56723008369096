//! Umbra and penumbra cones in the side view
//!
//! The side view puts the light source's center at the origin with the
//! occluder's center `distance` along +x and `offset` to the side. Every
//! boundary is a straight tangent line from the source limb through the
//! occluder limb.

use serde::Serialize;

/// Straight line y = intercept + slope·x
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TangentLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TangentLine {
    /// Line through two points. A vertical pair yields a flat line through `a`.
    pub fn through(a: (f64, f64), b: (f64, f64)) -> Self {
        let dx = b.0 - a.0;
        let slope = if dx.abs() > f64::EPSILON { (b.1 - a.1) / dx } else { 0.0 };
        Self { slope, intercept: a.1 - slope * a.0 }
    }

    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// The four limb-to-limb tangent lines
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShadowLines {
    /// Same-side tangents; they converge behind the occluder
    pub umbra_upper: TangentLine,
    pub umbra_lower: TangentLine,
    /// Crossed tangents; they diverge behind the occluder
    pub penumbra_upper: TangentLine,
    pub penumbra_lower: TangentLine,
}

/// Shadow cast by a spherical occluder lit by a larger spherical source
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShadowCone {
    pub source_radius: f64,
    pub occluder_radius: f64,
    /// Center-to-center distance along the axis
    pub distance: f64,
    /// Lateral displacement of the occluder from the axis
    pub offset: f64,
}

impl ShadowCone {
    pub fn new(source_radius: f64, occluder_radius: f64, distance: f64, offset: f64) -> Self {
        Self { source_radius, occluder_radius, distance, offset }
    }

    pub fn lines(&self) -> ShadowLines {
        let (rs, ro, d, h) = (self.source_radius, self.occluder_radius, self.distance, self.offset);
        ShadowLines {
            umbra_upper: TangentLine::through((0.0, rs), (d, h + ro)),
            umbra_lower: TangentLine::through((0.0, -rs), (d, h - ro)),
            penumbra_upper: TangentLine::through((0.0, -rs), (d, h + ro)),
            penumbra_lower: TangentLine::through((0.0, rs), (d, h - ro)),
        }
    }

    /// Lateral position of the shadow axis at axial position `x`
    pub fn axis_at(&self, x: f64) -> f64 {
        if self.distance > 0.0 { self.offset * x / self.distance } else { self.offset }
    }

    /// Umbra half-width at `x`. Negative past the apex, where its magnitude
    /// is the antumbra half-width (annular region).
    pub fn umbra_radius(&self, x: f64) -> f64 {
        if self.distance <= 0.0 {
            return self.occluder_radius;
        }
        let behind = (x - self.distance) / self.distance;
        self.occluder_radius - (self.source_radius - self.occluder_radius) * behind
    }

    /// Penumbra half-width at `x`
    pub fn penumbra_radius(&self, x: f64) -> f64 {
        if self.distance <= 0.0 {
            return self.occluder_radius;
        }
        let behind = (x - self.distance) / self.distance;
        self.occluder_radius + (self.source_radius + self.occluder_radius) * behind
    }

    /// Axial position where the umbra closes to a point.
    /// None if the occluder is as large as the source (the umbra never closes).
    pub fn umbra_apex(&self) -> Option<f64> {
        let shrink = self.source_radius - self.occluder_radius;
        if shrink <= 0.0 {
            return None;
        }
        Some(self.distance * self.source_radius / shrink)
    }
}
