//! Caller-owned simulation sessions
//!
//! Each session bundles the mutable state of one animated view and is
//! advanced explicitly, one frame or one jump at a time. Nothing here
//! depends on wall-clock time.

use crate::config::EngineConfig;
use crate::playback::PlaybackClock;
use crate::planets::Body;
use crate::projection::{ProjectedPoint, SkyProjection};
use crate::solar;
use crate::system::{Orrery, SystemSnapshot};
use crate::trajectory::{classify_launch, OrbitClass, Termination, TrajectoryState, VerletIntegrator};
use nalgebra::Vector2;
use orrery_core::constants::V_CIRCULAR_KMS;
use orrery_core::{wrap_180, HorizonCoord, OrreryResult};
use serde::Serialize;
use std::collections::VecDeque;

/// Bounded history of recent points; the oldest is dropped when full
#[derive(Clone, Debug)]
pub struct Trail<T> {
    points: VecDeque<T>,
    capacity: usize,
    saturated: bool,
}

impl<T> Trail<T> {
    /// Empty trail holding at most `capacity` points (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity), capacity, saturated: false }
    }

    /// Append a point, evicting the oldest when full
    pub fn push(&mut self, point: T) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
            if !self.saturated {
                self.saturated = true;
                tracing::debug!(capacity = self.capacity, "trail full, evicting oldest points");
            }
        }
        self.points.push_back(point);
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the trail empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every point
    pub fn clear(&mut self) {
        self.points.clear();
        self.saturated = false;
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&T> {
        self.points.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.points.iter()
    }
}

/// A launched test body with its trail
#[derive(Clone, Debug)]
pub struct LaunchSession {
    integrator: VerletIntegrator,
    trail: Trail<Vector2<f64>>,
    substeps: usize,
    speed_ratio: f64,
    launch_radius: f64,
    reported: bool,
}

/// What one frame of a launch produced
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LaunchFrame {
    pub steps_taken: usize,
    pub total_steps: u64,
    pub state: TrajectoryState,
    pub status: Option<Termination>,
}

impl LaunchSession {
    /// Launch from the configured radius; fails if the config is invalid
    pub fn new(config: &EngineConfig, speed_ratio: f64) -> OrreryResult<Self> {
        config.validate()?;
        let integrator =
            VerletIntegrator::launch(config.integrator.clone(), config.launch_radius, speed_ratio);
        let mut trail = Trail::new(config.trail_capacity);
        trail.push(integrator.state().position);

        tracing::info!(
            speed_ratio,
            launch_radius = config.launch_radius,
            class = classify_launch(speed_ratio).label(),
            "launch"
        );

        Ok(Self {
            integrator,
            trail,
            substeps: config.substeps_per_frame,
            speed_ratio,
            launch_radius: config.launch_radius,
            reported: false,
        })
    }

    /// Launch speed as a multiple of the circular speed
    pub fn speed_ratio(&self) -> f64 {
        self.speed_ratio
    }

    /// Launch speed in km/s. The ratio is relative to the circular speed at
    /// the launch radius, which is 7.9 km/s scaled by 1/√r.
    pub fn display_speed_kms(&self) -> f64 {
        self.speed_ratio * V_CIRCULAR_KMS / self.launch_radius.sqrt()
    }

    /// Advisory label for the launch speed
    pub fn classification(&self) -> OrbitClass {
        classify_launch(self.speed_ratio)
    }

    /// Underlying integrator
    pub fn integrator(&self) -> &VerletIntegrator {
        &self.integrator
    }

    /// Positions so far, oldest first
    pub fn trail(&self) -> &Trail<Vector2<f64>> {
        &self.trail
    }

    /// Terminal state, once reached
    pub fn status(&self) -> Option<Termination> {
        self.integrator.status()
    }

    /// Run the fixed number of sub-steps for one animation frame
    pub fn frame(&mut self) -> LaunchFrame {
        let samples = self.integrator.advance(self.substeps);
        for s in &samples {
            self.trail.push(s.position);
        }
        self.report_termination();
        LaunchFrame {
            steps_taken: samples.len(),
            total_steps: self.integrator.steps(),
            state: *self.integrator.state(),
            status: self.integrator.status(),
        }
    }

    /// Run frames until the body impacts, escapes or times out
    pub fn run_to_end(&mut self) -> Termination {
        loop {
            let frame = self.frame();
            if let Some(status) = frame.status {
                return status;
            }
            if frame.steps_taken == 0 {
                return Termination::Timeout;
            }
        }
    }

    fn report_termination(&mut self) {
        if self.reported {
            return;
        }
        if let Some(status) = self.integrator.status() {
            self.reported = true;
            tracing::info!(
                ?status,
                steps = self.integrator.steps(),
                radius = self.integrator.state().radius(),
                "trajectory finished"
            );
        }
    }
}

/// Heliocentric orrery driven by a playback clock
#[derive(Clone, Debug)]
pub struct OrbitSession {
    clock: PlaybackClock,
    orrery: Orrery,
    earth_trail: Trail<Vector2<f64>>,
    moon_trail: Trail<Vector2<f64>>,
}

impl OrbitSession {
    /// Orrery driven by `clock`, with empty trails
    pub fn new(config: &EngineConfig, clock: PlaybackClock) -> Self {
        Self {
            clock,
            orrery: Orrery::with_moon_display_scale(config.moon_display_scale),
            earth_trail: Trail::new(config.orbit_trail_capacity),
            moon_trail: Trail::new(config.orbit_trail_capacity),
        }
    }

    /// Playback clock
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Playback clock, for rate and pause control
    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    /// Recent Earth positions
    pub fn earth_trail(&self) -> &Trail<Vector2<f64>> {
        &self.earth_trail
    }

    /// Recent Moon positions (display-scaled)
    pub fn moon_trail(&self) -> &Trail<Vector2<f64>> {
        &self.moon_trail
    }

    /// System state at the clock's current time
    pub fn snapshot(&self) -> SystemSnapshot {
        self.orrery.snapshot(self.clock.elapsed_days())
    }

    /// Advance by `dt_seconds` of playback and record the trails
    pub fn tick(&mut self, dt_seconds: f64) -> SystemSnapshot {
        self.clock.tick(dt_seconds);
        self.record()
    }

    /// Jump to `days` and record the trails
    pub fn advance_to(&mut self, days: f64) -> SystemSnapshot {
        self.clock.advance_to(days);
        self.record()
    }

    fn record(&mut self) -> SystemSnapshot {
        let snapshot = self.snapshot();
        self.earth_trail.push(snapshot.position(Body::Earth));
        self.moon_trail.push(snapshot.position(Body::Moon));
        snapshot
    }
}

/// One frame of the sun's daily motion on the sky dome
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SkyFrame {
    pub hour_angle_deg: f64,
    pub clock_hour: f64,
    pub sun: HorizonCoord,
    pub projected: ProjectedPoint,
}

/// Sun sweeping across the sky for a fixed latitude and day
#[derive(Clone, Debug)]
pub struct SkySession {
    latitude_deg: f64,
    declination_deg: f64,
    hour_angle_deg: f64,
    step_deg: f64,
    projection: SkyProjection,
    paused: bool,
}

impl SkySession {
    /// Starts at local midnight (hour angle −180°)
    pub fn new(config: &EngineConfig, latitude_deg: f64, day: f64) -> Self {
        Self {
            latitude_deg,
            declination_deg: solar::declination(day),
            hour_angle_deg: -180.0,
            step_deg: config.sky.hour_angle_step_deg,
            projection: config.sky.projection(),
            paused: false,
        }
    }

    /// Change the day, keeping the current hour angle
    pub fn set_day(&mut self, day: f64) {
        self.declination_deg = solar::declination(day);
    }

    /// Change the observer latitude
    pub fn set_latitude(&mut self, latitude_deg: f64) {
        self.latitude_deg = latitude_deg;
    }

    /// Jump to an hour angle, wrapped into (−180°, 180°]
    pub fn set_hour_angle(&mut self, hour_angle_deg: f64) {
        self.hour_angle_deg = wrap_180(hour_angle_deg);
    }

    /// Freeze the sun in place
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the daily sweep
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Current hour angle (degrees)
    pub fn hour_angle(&self) -> f64 {
        self.hour_angle_deg
    }

    /// Projection used for the dome view
    pub fn projection(&self) -> &SkyProjection {
        &self.projection
    }

    /// Current sun without advancing
    pub fn current(&self) -> SkyFrame {
        let sun = solar::sun_position(self.latitude_deg, self.declination_deg, self.hour_angle_deg);
        SkyFrame {
            hour_angle_deg: self.hour_angle_deg,
            clock_hour: solar::clock_from_hour_angle(self.hour_angle_deg),
            sun,
            projected: self.projection.project(&sun),
        }
    }

    /// Advance one animation frame, wrapping from +180° back to −180°
    pub fn frame(&mut self) -> SkyFrame {
        if !self.paused {
            let mut next = self.hour_angle_deg + self.step_deg;
            if next > 180.0 {
                next -= 360.0;
            }
            self.hour_angle_deg = next;
        }
        self.current()
    }

    /// The whole day's path, projected
    pub fn daily_path(&self, step_deg: f64) -> Vec<(HorizonCoord, ProjectedPoint)> {
        solar::daily_path(self.latitude_deg, self.declination_deg, step_deg)
            .into_iter()
            .map(|c| (c, self.projection.project(&c)))
            .collect()
    }
}
