//! Bodies of the textbook Sun-Earth-Moon-Mars orrery
//!
//! Elements are the simplified classroom values, not a fitted ephemeris.
//! Distances are in AU, periods in days.

use crate::elements::OrbitalElements;
use orrery_core::constants::{
    AU, EARTH_ECCENTRICITY, EARTH_MOON_DISTANCE, EARTH_PERIOD_DAYS, MARS_ORBIT_AU,
    MARS_PERIOD_DAYS, R_EARTH, R_MOON, R_SUN, SIDEREAL_MONTH_DAYS,
};

/// Body identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Body {
    Sun,
    Earth,
    Moon,
    Mars,
}

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
        }
    }

    /// Mean radius in meters
    pub fn radius(&self) -> f64 {
        match self {
            Self::Sun => R_SUN,
            Self::Earth => R_EARTH,
            Self::Moon => R_MOON,
            Self::Mars => 3.3895e6,
        }
    }

    /// Elements relative to the body this one orbits.
    /// Returns None for the Sun (it's the center).
    pub fn elements(&self) -> Option<OrbitalElements> {
        match self {
            Self::Sun => None,
            Self::Earth => Some(OrbitalElements {
                period_days: EARTH_PERIOD_DAYS,
                eccentricity: EARTH_ECCENTRICITY,
                semi_major_axis: 1.0,
                epoch_phase: 0.0,
            }),
            // Geocentric
            Self::Moon => Some(OrbitalElements::circular(SIDEREAL_MONTH_DAYS, EARTH_MOON_DISTANCE / AU)),
            Self::Mars => Some(OrbitalElements::circular(MARS_PERIOD_DAYS, MARS_ORBIT_AU)),
        }
    }

    /// Body this one orbits
    pub fn parent(&self) -> Option<Body> {
        match self {
            Self::Sun => None,
            Self::Moon => Some(Self::Earth),
            Self::Earth | Self::Mars => Some(Self::Sun),
        }
    }

    /// All bodies including Sun
    pub fn all() -> &'static [Body] {
        &[Self::Sun, Self::Earth, Self::Moon, Self::Mars]
    }

    /// Planets only (heliocentric, no Sun/Moon)
    pub fn planets() -> &'static [Body] {
        &[Self::Earth, Self::Mars]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_orbiting_body_has_valid_elements() {
        for body in Body::all() {
            match (body.parent(), body.elements()) {
                (None, None) => assert_eq!(*body, Body::Sun),
                (Some(_), Some(elements)) => elements.validate().unwrap(),
                _ => panic!("{} has inconsistent parent/elements", body.name()),
            }
        }
    }

    #[test]
    fn test_planets_orbit_the_sun() {
        for body in Body::planets() {
            assert_eq!(body.parent(), Some(Body::Sun));
        }
    }
}
