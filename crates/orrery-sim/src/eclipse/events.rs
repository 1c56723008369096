//! Catalog of eclipses observable from Seoul
//!
//! Times are local clock hours (UTC+9). Events that run past midnight store
//! the raw clock value (e.g. 1.5 for 01:30) and are unwrapped on use.

use super::{DiskOverlap, EclipseKind};
use crate::solar;
use hifitime::Epoch;
use orrery_core::{OrreryError, OrreryResult};
use serde::Serialize;

/// Local time zone of the catalog, hours east of UTC
pub const UTC_OFFSET_HOURS: f64 = 9.0;

/// How the event appears at its central line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ObservedKind {
    Total,
    Annular,
    Partial,
}

/// One observed eclipse
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ObservedEclipse {
    pub id: &'static str,
    pub eclipse: EclipseKind,
    pub kind: ObservedKind,
    /// Calendar date (year, month, day) of the start
    pub date: (i32, u8, u8),
    pub start_hour: f64,
    pub max_hour: f64,
    pub end_hour: f64,
    /// Published magnitude at greatest eclipse; above 1 for deep totality
    pub max_magnitude: f64,
    /// Altitude (degrees) of the eclipsed body at start, maximum and end
    pub altitude_start: f64,
    pub altitude_max: f64,
    pub altitude_end: f64,
}

pub const CATALOG: [ObservedEclipse; 5] = [
    ObservedEclipse {
        id: "solar-2035-09-02",
        eclipse: EclipseKind::Solar,
        kind: ObservedKind::Total,
        date: (2035, 9, 2),
        start_hour: 8.8,
        max_hour: 9.95,
        end_hour: 11.2,
        max_magnitude: 1.02,
        altitude_start: 35.0,
        altitude_max: 47.0,
        altitude_end: 57.0,
    },
    ObservedEclipse {
        id: "solar-2030-06-01",
        eclipse: EclipseKind::Solar,
        kind: ObservedKind::Annular,
        date: (2030, 6, 1),
        start_hour: 15.5,
        max_hour: 16.8,
        end_hour: 17.9,
        max_magnitude: 0.89,
        altitude_start: 52.0,
        altitude_max: 38.0,
        altitude_end: 22.0,
    },
    ObservedEclipse {
        id: "solar-2028-07-22",
        eclipse: EclipseKind::Solar,
        kind: ObservedKind::Partial,
        date: (2028, 7, 22),
        start_hour: 17.0,
        max_hour: 17.8,
        end_hour: 18.5,
        max_magnitude: 0.36,
        altitude_start: 30.0,
        altitude_max: 20.0,
        altitude_end: 10.0,
    },
    ObservedEclipse {
        id: "lunar-2025-09-07",
        eclipse: EclipseKind::Lunar,
        kind: ObservedKind::Total,
        date: (2025, 9, 7),
        start_hour: 23.3,
        max_hour: 1.5,
        end_hour: 3.7,
        max_magnitude: 1.36,
        altitude_start: 35.0,
        altitude_max: 28.0,
        altitude_end: 15.0,
    },
    ObservedEclipse {
        id: "lunar-2028-12-31",
        eclipse: EclipseKind::Lunar,
        kind: ObservedKind::Total,
        date: (2028, 12, 31),
        start_hour: 22.1,
        max_hour: 0.5,
        end_hour: 2.9,
        max_magnitude: 1.22,
        altitude_start: 60.0,
        altitude_max: 65.0,
        altitude_end: 55.0,
    },
];

/// Instantaneous view of an observed eclipse
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ObservedState {
    pub progress: f64,
    pub clock_hour: f64,
    pub altitude_deg: f64,
    pub coverage: f64,
    pub magnitude: f64,
}

impl ObservedEclipse {
    pub fn all() -> &'static [ObservedEclipse] {
        &CATALOG
    }

    pub fn by_id(id: &str) -> OrreryResult<&'static ObservedEclipse> {
        CATALOG
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| OrreryError::UnknownEvent(id.to_string()))
    }

    /// Start, maximum and end hours made monotonic across midnight
    pub fn unwrapped_hours(&self) -> (f64, f64, f64) {
        let start = self.start_hour;
        let mut max = self.max_hour;
        if max < start {
            max += 24.0;
        }
        let mut end = self.end_hour;
        while end < max {
            end += 24.0;
        }
        (start, max, end)
    }

    pub fn duration_hours(&self) -> f64 {
        let (start, _, end) = self.unwrapped_hours();
        end - start
    }

    /// Progress in [0, 1] at which greatest eclipse occurs
    pub fn max_progress(&self) -> f64 {
        let (start, max, end) = self.unwrapped_hours();
        if end > start { (max - start) / (end - start) } else { 0.5 }
    }

    /// Local clock hour in [0, 24) at progress `t`
    pub fn clock_hour(&self, t: f64) -> f64 {
        let (start, _, end) = self.unwrapped_hours();
        (start + t.clamp(0.0, 1.0) * (end - start)).rem_euclid(24.0)
    }

    /// Altitude of the eclipsed body, linear from start to maximum to end
    pub fn altitude_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let m = self.max_progress();
        if t <= m && m > 0.0 {
            self.altitude_start + (self.altitude_max - self.altitude_start) * t / m
        } else if m < 1.0 {
            self.altitude_max + (self.altitude_end - self.altitude_max) * (t - m) / (1.0 - m)
        } else {
            self.altitude_max
        }
    }

    /// 0 at first and last contact, 1 at greatest eclipse
    pub fn coverage(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let m = self.max_progress();
        let c = if t <= m {
            if m > 0.0 { t / m } else { 1.0 }
        } else if m < 1.0 {
            (1.0 - t) / (1.0 - m)
        } else {
            1.0
        };
        c.clamp(0.0, 1.0)
    }

    /// Magnitude on the published scale at progress `t`
    pub fn magnitude_at(&self, t: f64) -> f64 {
        self.max_magnitude * self.coverage(t)
    }

    /// Moon-to-Sun apparent radius ratio used for the disk view
    fn moon_ratio(&self) -> f64 {
        match self.kind {
            ObservedKind::Annular => 0.92,
            _ => 1.02,
        }
    }

    /// Sun and Moon disks at progress `t`, Sun radius 1.
    ///
    /// The Moon passes at the closest approach that reproduces the published
    /// maximum magnitude and touches the Sun exactly at t = 0 and t = 1.
    /// None for lunar events.
    pub fn solar_disks(&self, t: f64) -> Option<DiskOverlap> {
        if self.eclipse != EclipseKind::Solar {
            return None;
        }
        let k = self.moon_ratio();
        let reach = 1.0 + k;
        let closest = (reach - 2.0 * self.max_magnitude).clamp(0.0, reach);
        let half_chord = (reach * reach - closest * closest).max(0.0).sqrt();
        let along = half_chord * (1.0 - self.coverage(t));
        Some(DiskOverlap::new(1.0, k, closest.hypot(along)))
    }

    pub fn state_at(&self, t: f64) -> ObservedState {
        let progress = t.clamp(0.0, 1.0);
        ObservedState {
            progress,
            clock_hour: self.clock_hour(progress),
            altitude_deg: self.altitude_at(progress),
            coverage: self.coverage(progress),
            magnitude: self.magnitude_at(progress),
        }
    }

    /// Start date at 00:00 UTC
    pub fn epoch(&self) -> Epoch {
        let (y, m, d) = self.date;
        Epoch::from_gregorian_utc_at_midnight(y, m, d)
    }

    /// Day of year of greatest eclipse, counting local clock hours
    pub fn day_of_year(&self) -> f64 {
        let (_, max, _) = self.unwrapped_hours();
        solar::day_of_year(self.epoch()) + max / 24.0
    }

    /// Greatest eclipse as a UTC epoch
    pub fn max_epoch(&self) -> Epoch {
        let (_, max, _) = self.unwrapped_hours();
        self.epoch() + hifitime::Unit::Hour * (max - UTC_OFFSET_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_midnight_unwrap() {
        let ev = ObservedEclipse::by_id("lunar-2025-09-07").unwrap();
        let (s, m, e) = ev.unwrapped_hours();
        assert_abs_diff_eq!(s, 23.3, epsilon = 1e-12);
        assert_abs_diff_eq!(m, 25.5, epsilon = 1e-12);
        assert_abs_diff_eq!(e, 27.7, epsilon = 1e-12);
        assert_abs_diff_eq!(ev.duration_hours(), 4.4, epsilon = 1e-12);
        assert_abs_diff_eq!(ev.max_progress(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_clock_wraps_past_midnight() {
        let ev = ObservedEclipse::by_id("lunar-2028-12-31").unwrap();
        assert_abs_diff_eq!(ev.clock_hour(0.0), 22.1, epsilon = 1e-12);
        assert_abs_diff_eq!(ev.clock_hour(1.0), 2.9, epsilon = 1e-12);
        assert!(ev.clock_hour(0.5) < 24.0);
    }

    #[test]
    fn test_altitude_passes_through_maximum() {
        for ev in ObservedEclipse::all() {
            assert_abs_diff_eq!(ev.altitude_at(0.0), ev.altitude_start, epsilon = 1e-12);
            assert_abs_diff_eq!(ev.altitude_at(ev.max_progress()), ev.altitude_max, epsilon = 1e-9);
            assert_abs_diff_eq!(ev.altitude_at(1.0), ev.altitude_end, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_magnitude_peaks_at_maximum() {
        for ev in ObservedEclipse::all() {
            assert_abs_diff_eq!(ev.magnitude_at(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(ev.magnitude_at(1.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(ev.magnitude_at(ev.max_progress()), ev.max_magnitude, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solar_disks_reproduce_magnitude() {
        for ev in ObservedEclipse::all().iter().filter(|e| e.eclipse == EclipseKind::Solar) {
            let start = ev.solar_disks(0.0).unwrap();
            assert_abs_diff_eq!(start.magnitude(), 0.0, epsilon = 1e-12);
            let peak = ev.solar_disks(ev.max_progress()).unwrap();
            assert_abs_diff_eq!(peak.magnitude(), ev.max_magnitude.min(1.0), epsilon = 1e-9);
        }
        let total = ObservedEclipse::by_id("solar-2035-09-02").unwrap();
        assert_eq!(
            total.solar_disks(total.max_progress()).unwrap().eclipse_type(),
            crate::eclipse::EclipseType::Total
        );
        assert!(ObservedEclipse::by_id("lunar-2025-09-07").unwrap().solar_disks(0.5).is_none());
    }

    #[test]
    fn test_unknown_event() {
        assert!(matches!(ObservedEclipse::by_id("solar-1999-08-11"), Err(OrreryError::UnknownEvent(_))));
    }

    #[test]
    fn test_event_dates() {
        let ev = ObservedEclipse::by_id("solar-2035-09-02").unwrap();
        // 2 September is day 244 of a non-leap year (0-based)
        assert_abs_diff_eq!(ev.day_of_year().floor(), 244.0, epsilon = 1e-9);
        let (y, m, d, h, _, _, _) = ev.max_epoch().to_gregorian_utc();
        assert_eq!((y, m, d, h), (2035, 9, 2, 0));
    }
}
