//! Monthly clearness climatology and weather-adjusted irradiance
//!
//! Clearness is the ratio of observed to possible sunshine. Twelve monthly
//! values are interpolated linearly across the year, wrapping December back
//! to January.

use crate::solar;
use orrery_core::{OrreryError, OrreryResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Days in each month of a non-leap year
pub const MONTH_DAYS: [f64; 12] = [31.0, 28.0, 31.0, 30.0, 31.0, 30.0, 31.0, 31.0, 30.0, 31.0, 30.0, 31.0];

/// Location with a monthly clearness climatology
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    pub name: String,
    pub latitude_deg: f64,
    /// Clearness factor per month, January first
    pub monthly_clearness: [f64; 12],
}

impl ClimateProfile {
    pub fn new(name: impl Into<String>, latitude_deg: f64, monthly_clearness: [f64; 12]) -> Self {
        Self { name: name.into(), latitude_deg, monthly_clearness }
    }

    /// Seoul, 37.5°N. Monsoon and typhoon season June to September.
    pub fn seoul() -> Self {
        Self::new("Seoul", 37.5, [0.52, 0.53, 0.50, 0.48, 0.49, 0.36, 0.28, 0.32, 0.44, 0.53, 0.50, 0.52])
    }

    /// Jakarta, 6.2°S. Rainy season November to March.
    pub fn jakarta() -> Self {
        Self::new("Jakarta", -6.2, [0.38, 0.38, 0.42, 0.48, 0.52, 0.55, 0.58, 0.60, 0.56, 0.48, 0.40, 0.36])
    }

    /// London, 51.5°N. Overcast all year.
    pub fn london() -> Self {
        Self::new("London", 51.5, [0.22, 0.28, 0.33, 0.38, 0.40, 0.42, 0.42, 0.40, 0.36, 0.28, 0.22, 0.18])
    }

    pub fn builtin() -> Vec<ClimateProfile> {
        vec![Self::seoul(), Self::jakarta(), Self::london()]
    }

    /// Look up a built-in profile by (case-insensitive) name
    pub fn by_name(name: &str) -> OrreryResult<ClimateProfile> {
        Self::builtin()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| OrreryError::UnknownCity(name.to_string()))
    }

    /// Clearness on `day`, interpolated between this month's value and the next.
    pub fn clearness(&self, day: f64) -> f64 {
        let mut d = day.rem_euclid(365.0);
        let mut month = 0;
        while month < 11 && d >= MONTH_DAYS[month] {
            d -= MONTH_DAYS[month];
            month += 1;
        }
        let frac = (d / MONTH_DAYS[month]).clamp(0.0, 1.0);
        let next = (month + 1) % 12;
        self.monthly_clearness[month] * (1.0 - frac) + self.monthly_clearness[next] * frac
    }

    /// Noon clear-sky irradiance (W/m²)
    pub fn clear_sky_irradiance(&self, day: f64) -> f64 {
        let alt = solar::noon_altitude(self.latitude_deg, solar::declination(day));
        solar::clear_sky_irradiance(alt)
    }

    /// Noon irradiance scaled by the climatological clearness (W/m²)
    pub fn weather_adjusted_irradiance(&self, day: f64) -> f64 {
        self.clear_sky_irradiance(day) * self.clearness(day)
    }

    /// One sample per day for days 0..365
    pub fn annual_profile(&self) -> Vec<DailyIrradiance> {
        (0..365u32)
            .into_par_iter()
            .map(|d| {
                let day = d as f64;
                DailyIrradiance {
                    day,
                    clearness: self.clearness(day),
                    clear_sky: self.clear_sky_irradiance(day),
                    weather_adjusted: self.weather_adjusted_irradiance(day),
                    day_length_hours: solar::day_length(self.latitude_deg, day),
                }
            })
            .collect()
    }
}

/// Irradiance for one day of the annual profile
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyIrradiance {
    pub day: f64,
    pub clearness: f64,
    pub clear_sky: f64,
    pub weather_adjusted: f64,
    pub day_length_hours: f64,
}
