//! Physical constants shared by every component

/// Earth's axial tilt (degrees)
pub const OBLIQUITY_DEG: f64 = 23.44;

/// Day of year of the March equinox in the sinusoidal declination model
pub const EQUINOX_DAY: f64 = 81.0;

/// Year length used by the declination sinusoid (days)
pub const DECLINATION_YEAR_DAYS: f64 = 365.0;

/// Tropical year (days), used for multi-year playback
pub const TROPICAL_YEAR_DAYS: f64 = 365.25;

/// Solar constant at the top of the atmosphere (W/m²)
pub const SOLAR_CONSTANT: f64 = 1361.0;

/// Clear-sky atmospheric transmittance per air mass
pub const ATMOSPHERIC_TRANSMITTANCE: f64 = 0.7;

/// Empirical air-mass exponent of the transmission model
pub const AIR_MASS_EXPONENT: f64 = 0.678;

/// Hour angle swept per hour of solar time (degrees)
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674e-11;

/// Mass of the Sun (kg)
pub const M_SUN: f64 = 1.989e30;

/// Mass of the Earth (kg)
pub const M_EARTH: f64 = 5.972e24;

/// Mass of the Moon (kg)
pub const M_MOON: f64 = 7.342e22;

/// Astronomical unit in meters
pub const AU: f64 = 1.495978707e11;

/// Mean Earth-Moon distance in meters
pub const EARTH_MOON_DISTANCE: f64 = 3.844e8;

/// Mean radius of the Sun (m)
pub const R_SUN: f64 = 6.9634e8;

/// Mean radius of the Earth (m)
pub const R_EARTH: f64 = 6.371e6;

/// Mean radius of the Moon (m)
pub const R_MOON: f64 = 1.7374e6;

/// Earth's orbital eccentricity
pub const EARTH_ECCENTRICITY: f64 = 0.0167;

/// Earth's orbital period (days)
pub const EARTH_PERIOD_DAYS: f64 = 365.25;

/// Moon's sidereal period (days)
pub const SIDEREAL_MONTH_DAYS: f64 = 27.32;

/// New moon to new moon (days)
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Mars' orbital period (days)
pub const MARS_PERIOD_DAYS: f64 = 687.0;

/// Mars' mean distance from the Sun (AU)
pub const MARS_ORBIT_AU: f64 = 1.524;

/// Gravitational parameter in normalized units
pub const MU_NORMALIZED: f64 = 1.0;

/// Reference body radius in normalized units
pub const BODY_RADIUS_NORMALIZED: f64 = 1.0;

/// Circular orbital speed at Earth's surface, for display (km/s)
pub const V_CIRCULAR_KMS: f64 = 7.9;

/// Escape speed at Earth's surface, for display (km/s)
pub const V_ESCAPE_KMS: f64 = 11.2;
