use crate::config::EngineConfig;
use crate::eclipse::{EclipseConfiguration, EclipseKind, EclipseType, ObservedEclipse};
use crate::playback::PlaybackClock;
use crate::planets::Body;
use crate::projection::SkyProjection;
use crate::retrograde::RetrogradeTracker;
use crate::session::{LaunchSession, OrbitSession};
use crate::solar::{self, SolarSnapshot};
use crate::system::Orrery;
use crate::trajectory::Termination;
use approx::assert_abs_diff_eq;
use orrery_core::constants::EARTH_PERIOD_DAYS;

#[test]
fn test_day_length_stays_in_range() {
    for lat in (-90..=90).step_by(5) {
        for day in (0..365).step_by(7) {
            let hours = solar::day_length(lat as f64, day as f64);
            assert!((0.0..=24.0).contains(&hours), "lat {} day {}: {}", lat, day, hours);
            assert!(!hours.is_nan());
        }
    }
}

#[test]
fn test_equinox_day_is_twelve_hours() {
    for lat in [-60.0, -23.5, 0.0, 37.5, 51.5, 66.0] {
        assert_abs_diff_eq!(solar::day_length(lat, 81.0), 12.0, epsilon = 1e-9);
    }
    let seoul = SolarSnapshot::compute(37.5, 81.0);
    assert_abs_diff_eq!(seoul.noon_altitude_deg, 52.5, epsilon = 1e-9);
}

#[test]
fn test_solstices_mirror_between_hemispheres() {
    let summer = solar::day_length(37.5, 172.0);
    let winter = solar::day_length(37.5, 355.0);
    assert!(summer > 14.0 && summer < 15.0, "{}", summer);
    assert!(winter > 9.0 && winter < 10.0, "{}", winter);
    assert_abs_diff_eq!(solar::day_length(-37.5, 172.0), 24.0 - summer, epsilon = 1e-9);

    // Arctic midnight sun and polar night
    assert_eq!(solar::day_length(80.0, 172.0), 24.0);
    assert_eq!(solar::day_length(80.0, 355.0), 0.0);
}

#[test]
fn test_snapshot_agrees_with_free_functions() {
    let snap = SolarSnapshot::compute(51.5, 200.0);
    let dec = solar::declination(200.0);
    assert_abs_diff_eq!(snap.declination_deg, dec, epsilon = 1e-12);
    assert_abs_diff_eq!(snap.noon_altitude_deg, solar::noon_altitude(51.5, dec), epsilon = 1e-12);
    assert_abs_diff_eq!(snap.day_length_hours, solar::day_length(51.5, 200.0), epsilon = 1e-12);
    assert!(snap.noon_irradiance > 0.0);
}

#[test]
fn test_fast_launch_escapes_slow_launch_impacts() {
    let config = EngineConfig::default();

    let mut fast = LaunchSession::new(&config, 1.6).unwrap();
    assert_eq!(fast.run_to_end(), Termination::Escaped);
    assert!(fast.integrator().state().radius() > config.integrator.escape_radius);

    let mut slow = LaunchSession::new(&config, 0.5).unwrap();
    assert_eq!(slow.run_to_end(), Termination::Impact);
    assert!(slow.integrator().state().radius() < config.integrator.body_radius);
}

#[test]
fn test_launch_sessions_are_deterministic() {
    let config = EngineConfig::default();
    let mut a = LaunchSession::new(&config, 1.2).unwrap();
    let mut b = LaunchSession::new(&config, 1.2).unwrap();
    for _ in 0..50 {
        assert_eq!(a.frame(), b.frame());
    }
    assert!(a.trail().iter().eq(b.trail().iter()));
}

#[test]
fn test_orbit_ticks_match_jump() {
    let config = EngineConfig::default();
    let mut clock = PlaybackClock::new();
    clock.set_rate(3.0);
    let mut ticked = OrbitSession::new(&config, clock);
    for _ in 0..10 {
        ticked.tick(1.0);
    }
    let mut jumped = OrbitSession::new(&config, PlaybackClock::new());
    let snap = jumped.advance_to(30.0);

    for body in Body::all() {
        let a = ticked.snapshot().position(*body);
        let b = snap.position(*body);
        assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_earth_returns_after_one_year() {
    let orrery = Orrery::new();
    let start = orrery.body_position(Body::Earth, 0.0);
    let later = orrery.body_position(Body::Earth, EARTH_PERIOD_DAYS);
    assert_abs_diff_eq!((start - later).norm(), 0.0, epsilon = 1e-9);
    assert_eq!(orrery.body_position(Body::Sun, 123.0).norm(), 0.0);
}

#[test]
fn test_solar_magnitude_falls_with_offset() {
    let offsets = [0.0, 0.1, 0.2, 0.3, 0.45, 0.6];
    let magnitudes: Vec<f64> = offsets
        .iter()
        .map(|&o| EclipseConfiguration::new(EclipseKind::Solar, o).evaluate().magnitude)
        .collect();
    for pair in magnitudes.windows(2) {
        assert!(pair[1] <= pair[0], "{:?}", magnitudes);
    }
    assert!(magnitudes[0] > 0.9);
    assert_eq!(magnitudes[5], 0.0);
}

#[test]
fn test_pass_peaks_at_midpoint() {
    let eclipse = EclipseConfiguration::new(EclipseKind::Solar, 0.1);
    let mut previous = -1.0;
    for i in 0..=10 {
        let m = eclipse.at_progress(i as f64 / 20.0).magnitude;
        assert!(m >= previous, "step {}: {} < {}", i, m, previous);
        previous = m;
    }
    assert_eq!(eclipse.at_progress(0.0).eclipse_type, EclipseType::None);
    assert_eq!(eclipse.at_progress(1.0).eclipse_type, EclipseType::None);
    assert_abs_diff_eq!(
        eclipse.at_progress(0.25).magnitude,
        eclipse.at_progress(0.75).magnitude,
        epsilon = 1e-12
    );
}

#[test]
fn test_lunar_eclipse_types_by_offset() {
    let central = EclipseConfiguration::new(EclipseKind::Lunar, 0.0).evaluate();
    assert_eq!(central.eclipse_type, EclipseType::Total);
    assert_eq!(central.magnitude, 1.0);

    let far = EclipseConfiguration::new(EclipseKind::Lunar, 5.0).evaluate();
    assert_eq!(far.eclipse_type, EclipseType::None);
}

#[test]
fn test_observed_events_are_well_formed() {
    for event in ObservedEclipse::all() {
        assert!(event.duration_hours() > 0.0, "{}", event.id);
        let peak = event.state_at(event.max_progress());
        let start = event.state_at(0.0);
        assert!(peak.magnitude >= start.magnitude, "{}", event.id);
        assert!(ObservedEclipse::by_id(event.id).is_ok());
    }
    assert!(ObservedEclipse::by_id("solar-1999-01-01").is_err());
}

#[test]
fn test_projection_is_a_rotation() {
    let projection = SkyProjection::default().prepared();
    for az in (0..360).step_by(30) {
        for alt in [-60.0, 0.0, 30.0, 89.0] {
            let p = projection.project_deg(az as f64, alt);
            assert_abs_diff_eq!(p.x * p.x + p.y * p.y + p.depth * p.depth, 1.0, epsilon = 1e-12);
        }
    }
    let zenith = projection.project_deg(0.0, 90.0);
    assert_abs_diff_eq!(zenith.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(zenith.y, 30f64.to_radians().cos(), epsilon = 1e-12);

    let horizon = projection.horizon(10.0);
    assert!(horizon.iter().any(|p| p.is_near_side()));
    assert!(horizon.iter().any(|p| !p.is_near_side()));
}

#[test]
fn test_retrograde_loop_around_opposition() {
    let samples = RetrogradeTracker::default().sweep(-60.0, 2.0, 61);
    let exact: Vec<bool> = samples.iter().map(|s| s.exact).collect();
    // Direct, then retrograde around opposition at day 0, then direct again
    assert!(!exact[0]);
    assert!(exact[30]);
    assert!(!exact[60]);
    let switches = exact.windows(2).filter(|w| w[0] != w[1]).count();
    assert_eq!(switches, 2);
}
