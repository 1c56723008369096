//! Newtonian attraction between Sun, Earth and Moon

use orrery_core::constants::{AU, EARTH_MOON_DISTANCE, G, M_EARTH, M_MOON, M_SUN};
use serde::Serialize;

/// F = G·m₁·m₂ / r². Zero for a non-positive separation.
pub fn gravitational_force(m1: f64, m2: f64, distance: f64) -> f64 {
    if !(distance > 0.0) {
        return 0.0;
    }
    G * m1 * m2 / (distance * distance)
}

/// Forces in the Sun-Earth-Moon system for a scaled Earth
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GravityScenario {
    /// Sun-Earth distance in AU
    pub distance_au: f64,
    /// Earth mass as a multiple of the real one
    pub earth_mass_factor: f64,
}

/// Evaluated forces (newtons)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GravityForces {
    pub sun_earth: f64,
    pub earth_moon: f64,
    pub sun_earth_distance: f64,
    pub earth_moon_distance: f64,
}

impl Default for GravityScenario {
    fn default() -> Self {
        Self { distance_au: 1.0, earth_mass_factor: 1.0 }
    }
}

impl GravityScenario {
    pub fn new(distance_au: f64, earth_mass_factor: f64) -> Self {
        Self { distance_au, earth_mass_factor }
    }

    pub fn forces(&self) -> GravityForces {
        let earth = M_EARTH * self.earth_mass_factor;
        let r_se = AU * self.distance_au;
        GravityForces {
            sun_earth: gravitational_force(M_SUN, earth, r_se),
            earth_moon: gravitational_force(earth, M_MOON, EARTH_MOON_DISTANCE),
            sun_earth_distance: r_se,
            earth_moon_distance: EARTH_MOON_DISTANCE,
        }
    }
}
