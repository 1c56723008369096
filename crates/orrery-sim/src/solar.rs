//! Solar geometry for a ground observer
//!
//! First-order textbook model: a sinusoidal declination curve, the spherical
//! altitude/azimuth formulas, and an empirical clear-sky transmission law.
//! Every function is total. Out-of-domain inverse-trig arguments are clamped,
//! so sweeping latitude or day through extremes yields boundary values
//! (0°/90° elevation, 0 h/24 h day length) rather than NaN.

use orrery_core::constants::{
    AIR_MASS_EXPONENT, ATMOSPHERIC_TRANSMITTANCE, DECLINATION_YEAR_DAYS, DEGREES_PER_HOUR,
    EQUINOX_DAY, OBLIQUITY_DEG, SOLAR_CONSTANT,
};
use orrery_core::{clamped_acos, clamped_asin, normalize_degrees, wrap_180, HorizonCoord};
use hifitime::Epoch;
use serde::Serialize;
use std::f64::consts::TAU;

/// Hour angle at which the sun crosses the horizon
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum SunriseHourAngle {
    /// Sun rises and sets; value is H₀ in degrees, in (0, 180)
    Crossing(f64),
    /// Sun never sets (midnight sun)
    PolarDay,
    /// Sun never rises
    PolarNight,
}

impl SunriseHourAngle {
    /// H₀ in degrees: 180 for polar day, 0 for polar night
    pub fn degrees(&self) -> f64 {
        match self {
            Self::Crossing(h) => *h,
            Self::PolarDay => 180.0,
            Self::PolarNight => 0.0,
        }
    }
}

/// Solar declination in degrees for a (continuous) day of year.
///
/// δ(d) = ε·sin(2π(d − 81)/365). Days outside [0, 365) are accepted and
/// simply continue the sinusoid.
pub fn declination(day: f64) -> f64 {
    OBLIQUITY_DEG * (TAU * (day - EQUINOX_DAY) / DECLINATION_YEAR_DAYS).sin()
}

/// Sun altitude (degrees) at hour angle `hour_angle_deg` (0 at local noon,
/// positive in the afternoon).
pub fn altitude(latitude_deg: f64, declination_deg: f64, hour_angle_deg: f64) -> f64 {
    let phi = latitude_deg.to_radians();
    let delta = declination_deg.to_radians();
    let h = hour_angle_deg.to_radians();
    let sin_alt = phi.sin() * delta.sin() + phi.cos() * delta.cos() * h.cos();
    clamped_asin(sin_alt).to_degrees()
}

/// Maximum (noon) altitude in degrees
pub fn noon_altitude(latitude_deg: f64, declination_deg: f64) -> f64 {
    altitude(latitude_deg, declination_deg, 0.0)
}

/// Sun azimuth (degrees from north through east) at the given hour angle.
///
/// Returns 0 when the azimuth is undefined (observer at a pole, or sun at
/// the zenith).
pub fn azimuth(latitude_deg: f64, declination_deg: f64, hour_angle_deg: f64) -> f64 {
    let phi = latitude_deg.to_radians();
    let delta = declination_deg.to_radians();
    let h = hour_angle_deg.to_radians();
    let alt = altitude(latitude_deg, declination_deg, hour_angle_deg).to_radians();

    let denom = phi.cos() * alt.cos();
    if denom.abs() < 1e-12 {
        return 0.0;
    }
    let cos_az = (delta.sin() - phi.sin() * alt.sin()) / denom;
    let az = clamped_acos(cos_az);
    // Afternoon: sun is west of the meridian
    let az = if h.sin() > 0.0 { TAU - az } else { az };
    normalize_degrees(az.to_degrees())
}

/// Sun direction in horizon coordinates
pub fn sun_position(latitude_deg: f64, declination_deg: f64, hour_angle_deg: f64) -> HorizonCoord {
    HorizonCoord::new(
        azimuth(latitude_deg, declination_deg, hour_angle_deg),
        altitude(latitude_deg, declination_deg, hour_angle_deg),
    )
}

/// Hour angle of sunrise/sunset, H₀ = arccos(−tan φ · tan δ)
pub fn sunrise_hour_angle(latitude_deg: f64, declination_deg: f64) -> SunriseHourAngle {
    let cos_h = -latitude_deg.to_radians().tan() * declination_deg.to_radians().tan();
    if cos_h <= -1.0 {
        SunriseHourAngle::PolarDay
    } else if cos_h >= 1.0 {
        SunriseHourAngle::PolarNight
    } else {
        SunriseHourAngle::Crossing(clamped_acos(cos_h).to_degrees())
    }
}

/// Hours of daylight for a given declination, in [0, 24]
pub fn day_length_for_declination(latitude_deg: f64, declination_deg: f64) -> f64 {
    match sunrise_hour_angle(latitude_deg, declination_deg) {
        SunriseHourAngle::PolarDay => 24.0,
        SunriseHourAngle::PolarNight => 0.0,
        SunriseHourAngle::Crossing(h0) => (2.0 * h0 / DEGREES_PER_HOUR).clamp(0.0, 24.0),
    }
}

/// Hours of daylight at `latitude_deg` on `day`, in [0, 24]
pub fn day_length(latitude_deg: f64, day: f64) -> f64 {
    day_length_for_declination(latitude_deg, declination(day))
}

/// Relative air mass AM = 1/sin α. `None` when the sun is not above the horizon.
pub fn air_mass(altitude_deg: f64) -> Option<f64> {
    if altitude_deg <= 0.0 {
        return None;
    }
    Some(1.0 / altitude_deg.to_radians().sin())
}

/// Clear-sky irradiance on a horizontal surface (W/m²):
/// I = S₀ · sin α · 0.7^(AM^0.678), zero when the sun is down.
pub fn clear_sky_irradiance(altitude_deg: f64) -> f64 {
    match air_mass(altitude_deg) {
        None => 0.0,
        Some(am) => {
            let transmission = ATMOSPHERIC_TRANSMITTANCE.powf(am.powf(AIR_MASS_EXPONENT));
            SOLAR_CONSTANT * altitude_deg.to_radians().sin() * transmission
        }
    }
}

/// Hour angle (degrees, (-180, 180]) for a local solar clock time in hours
pub fn hour_angle_from_clock(clock_hours: f64) -> f64 {
    wrap_180((clock_hours - 12.0) * DEGREES_PER_HOUR)
}

/// Local solar clock time in [0, 24) for an hour angle in degrees
pub fn clock_from_hour_angle(hour_angle_deg: f64) -> f64 {
    (normalize_degrees(hour_angle_deg + 180.0) / DEGREES_PER_HOUR).rem_euclid(24.0)
}

/// Sun positions over a full day, sampled every `step_deg` of hour angle
/// from −180° (midnight) to +180°.
pub fn daily_path(latitude_deg: f64, declination_deg: f64, step_deg: f64) -> Vec<HorizonCoord> {
    let step = if step_deg > 0.0 && step_deg.is_finite() { step_deg } else { 1.0 };
    let n = (360.0 / step).ceil() as usize;
    (0..=n)
        .map(|i| (-180.0 + i as f64 * step).min(180.0))
        .map(|h| sun_position(latitude_deg, declination_deg, h))
        .collect()
}

/// Day of year (0 = 1 January 00:00 UTC) as a continuous value
pub fn day_of_year(epoch: Epoch) -> f64 {
    let (year, _, _, _, _, _, _) = epoch.to_gregorian_utc();
    let new_year = Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
    (epoch - new_year).to_seconds() / 86400.0
}

/// Everything the solar panels of the visualization need for one latitude/day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolarSnapshot {
    pub day: f64,
    pub latitude_deg: f64,
    pub declination_deg: f64,
    pub noon_altitude_deg: f64,
    pub sunrise_hour_angle_deg: f64,
    pub day_length_hours: f64,
    pub noon_air_mass: Option<f64>,
    pub noon_irradiance: f64,
    pub sunrise_azimuth_deg: Option<f64>,
    pub sunset_azimuth_deg: Option<f64>,
}

impl SolarSnapshot {
    pub fn compute(latitude_deg: f64, day: f64) -> Self {
        let decl = declination(day);
        let noon_alt = noon_altitude(latitude_deg, decl);
        let h0 = sunrise_hour_angle(latitude_deg, decl);

        let (sunrise_az, sunset_az) = match h0 {
            SunriseHourAngle::Crossing(h) => (
                Some(azimuth(latitude_deg, decl, -h)),
                Some(azimuth(latitude_deg, decl, h)),
            ),
            _ => (None, None),
        };

        Self {
            day,
            latitude_deg,
            declination_deg: decl,
            noon_altitude_deg: noon_alt,
            sunrise_hour_angle_deg: h0.degrees(),
            day_length_hours: day_length_for_declination(latitude_deg, decl),
            noon_air_mass: air_mass(noon_alt),
            noon_irradiance: clear_sky_irradiance(noon_alt),
            sunrise_azimuth_deg: sunrise_az,
            sunset_azimuth_deg: sunset_az,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_declination_extrema() {
        // Solstices sit a quarter year after/before the equinox
        let june = EQUINOX_DAY + DECLINATION_YEAR_DAYS / 4.0;
        let december = EQUINOX_DAY + 3.0 * DECLINATION_YEAR_DAYS / 4.0;
        assert_abs_diff_eq!(declination(june), OBLIQUITY_DEG, epsilon = 1e-9);
        assert_abs_diff_eq!(declination(december), -OBLIQUITY_DEG, epsilon = 1e-9);
        assert_abs_diff_eq!(declination(EQUINOX_DAY), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_declination_periodic() {
        for d in [0.0, 40.5, 172.0, 300.25] {
            assert_abs_diff_eq!(declination(d), declination(d + 365.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_noon_altitude_matches_zenith_distance() {
        // asin(sin φ sin δ + cos φ cos δ) = 90 − |φ − δ|
        for (lat, decl) in [(37.5, 23.44), (-6.2, -10.0), (51.5, -23.44), (0.0, 0.0)] {
            assert_abs_diff_eq!(noon_altitude(lat, decl), 90.0 - f64::abs(lat - decl), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equinox_day_length_is_twelve_hours() {
        for lat in [-66.0, -30.0, 0.0, 37.5, 60.0] {
            assert_abs_diff_eq!(day_length(lat, EQUINOX_DAY), 12.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_polar_day_and_night() {
        let june = 172.0;
        assert_eq!(day_length(80.0, june), 24.0);
        assert_eq!(day_length(-80.0, june), 0.0);
        assert_eq!(sunrise_hour_angle(80.0, 23.0), SunriseHourAngle::PolarDay);
        assert_eq!(sunrise_hour_angle(80.0, -23.0), SunriseHourAngle::PolarNight);
    }

    #[test]
    fn test_day_length_bounds() {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut day = 0.0;
            while day < 400.0 {
                let dl = day_length(lat, day);
                assert!((0.0..=24.0).contains(&dl), "lat={} day={} -> {}", lat, day, dl);
                day += 7.3;
            }
            lat += 2.5;
        }
    }

    #[test]
    fn test_azimuth_morning_east_afternoon_west() {
        let decl = 0.0;
        let morning = azimuth(37.5, decl, -60.0);
        let afternoon = azimuth(37.5, decl, 60.0);
        assert!(morning > 0.0 && morning < 180.0, "morning az {}", morning);
        assert!(afternoon > 180.0 && afternoon < 360.0, "afternoon az {}", afternoon);
        // Symmetric about the meridian
        assert_abs_diff_eq!(morning + afternoon, 360.0, epsilon = 1e-9);
        // Northern mid-latitude noon sun is due south
        assert_abs_diff_eq!(azimuth(37.5, 10.0, 0.0), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_equinox_sunrise_due_east() {
        let h0 = sunrise_hour_angle(45.0, 0.0).degrees();
        assert_abs_diff_eq!(h0, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(altitude(45.0, 0.0, -h0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(azimuth(45.0, 0.0, -h0), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pole_azimuth_sentinel() {
        assert_eq!(azimuth(90.0, 10.0, 45.0), 0.0);
        // Altitude at the pole equals declination regardless of hour angle
        assert_abs_diff_eq!(altitude(90.0, 10.0, 123.0), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_irradiance_model() {
        assert_eq!(clear_sky_irradiance(0.0), 0.0);
        assert_eq!(clear_sky_irradiance(-10.0), 0.0);
        // Overhead sun: AM = 1
        let zenith = clear_sky_irradiance(90.0);
        assert_abs_diff_eq!(zenith, SOLAR_CONSTANT * 0.7, epsilon = 1e-6);
        assert!(clear_sky_irradiance(30.0) < zenith);
        assert!(clear_sky_irradiance(30.0) > clear_sky_irradiance(10.0));
        assert_eq!(air_mass(0.0), None);
        assert_abs_diff_eq!(air_mass(30.0).unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clock_conversion() {
        assert_abs_diff_eq!(hour_angle_from_clock(12.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hour_angle_from_clock(6.0), -90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(clock_from_hour_angle(-90.0), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(clock_from_hour_angle(0.0), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(clock_from_hour_angle(-180.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_path_covers_full_day() {
        let path = daily_path(37.5, 10.0, 1.0);
        assert_eq!(path.len(), 361);
        let highest = path.iter().map(|p| p.altitude_deg).fold(f64::MIN, f64::max);
        assert_abs_diff_eq!(highest, noon_altitude(37.5, 10.0), epsilon = 1e-9);
    }

    #[test]
    fn test_day_of_year_from_epoch() {
        let epoch = Epoch::from_gregorian_utc(2025, 3, 22, 12, 0, 0, 0);
        // 31 + 28 + 21 full days, plus half a day
        assert_abs_diff_eq!(day_of_year(epoch), 80.5, epsilon = 1e-6);
    }

    #[test]
    fn test_snapshot_is_pure() {
        let a = SolarSnapshot::compute(37.5, 172.0);
        let b = SolarSnapshot::compute(37.5, 172.0);
        assert_eq!(a, b);
        assert!(a.sunrise_azimuth_deg.unwrap() < 90.0, "June sunrise is north of east");
        assert!(a.day_length_hours > 14.0);
    }
}
