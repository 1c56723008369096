use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hifitime::Epoch;
use orrery_sim::eclipse::{EclipseConfiguration, EclipseKind, LunarPhase, ObservedEclipse};
use orrery_sim::{
    classify_launch, solar, summarize_validation, validate_circular, Body, ClimateProfile,
    EngineConfig, GravityScenario, LaunchSession, OrbitSession, PlaybackClock, RetrogradeTracker,
    SkySession, SolarSnapshot,
};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Textbook celestial mechanics: sun, orbits, launches and eclipses")]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sun declination, noon altitude, day length and irradiance
    Solar {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Day of year (0 = 1 January)
        #[arg(long, conflicts_with = "date")]
        day: Option<f64>,
        /// Calendar date, "YYYY-MM-DD" or any hifitime epoch string
        #[arg(long)]
        date: Option<String>,
    },

    /// The sun's path across the sky, projected for the dome view
    SkyPath {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, default_value = "172")]
        day: f64,
        /// Hour-angle spacing of samples (degrees)
        #[arg(long, default_value = "15")]
        step: f64,
        /// Animate this many frames instead of printing the whole path
        #[arg(long)]
        frames: Option<usize>,
    },

    /// Annual noon irradiance for a city with its cloud climatology
    Irradiance {
        #[arg(long, default_value = "Seoul")]
        city: String,
        /// Print every Nth day
        #[arg(long, default_value = "30")]
        every: usize,
    },

    /// Play the Sun-Earth-Moon-Mars orrery
    Orbit {
        /// Simulation days per real second
        #[arg(long, default_value = "1")]
        rate: f64,
        /// Real seconds per frame
        #[arg(long, default_value = "1")]
        frame_seconds: f64,
        #[arg(long, default_value = "12")]
        frames: usize,
        /// Moon distance exaggeration (overrides config)
        #[arg(long)]
        moon_scale: Option<f64>,
    },

    /// Launch a test body horizontally and integrate until it ends
    Launch {
        /// Launch speed as a multiple of the circular speed
        #[arg(long, default_value = "1.0")]
        speed: f64,
        /// Number of trail points to print
        #[arg(long, default_value = "10")]
        samples: usize,
        /// Integrator time step (overrides config)
        #[arg(long)]
        dt: Option<f64>,
        /// Integrator steps per frame (overrides config)
        #[arg(long)]
        substeps: Option<usize>,
    },

    /// Eclipse geometry for an alignment
    Eclipse {
        #[arg(long, value_enum, default_value = "solar")]
        kind: KindArg,
        /// Moon's angle out of the ecliptic (degrees)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        inclination: f64,
        /// Earth-Moon distance in meters
        #[arg(long)]
        moon_distance: Option<f64>,
        /// Number of progress samples across the pass
        #[arg(long, default_value = "11")]
        steps: usize,
    },

    /// Timeline of an observed eclipse from Seoul
    Observe {
        /// Event id; omit to list the catalog
        #[arg(long)]
        event: Option<String>,
        #[arg(long, default_value = "11")]
        steps: usize,
    },

    /// Lunar phase for a number of days after new moon
    Phase {
        #[arg(long)]
        day: f64,
    },

    /// Mars' apparent motion seen from Earth
    Retrograde {
        #[arg(long, default_value = "-60", allow_hyphen_values = true)]
        start: f64,
        #[arg(long, default_value = "120")]
        days: usize,
        #[arg(long, default_value = "5")]
        step: f64,
    },

    /// Sun-Earth and Earth-Moon attraction
    Gravity {
        /// Sun-Earth distance (AU)
        #[arg(long, default_value = "1")]
        distance: f64,
        /// Earth mass multiple
        #[arg(long, default_value = "1")]
        mass: f64,
    },

    /// Compare the integrator with the exact circular orbit
    Validate {
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long, default_value = "10000")]
        steps: u64,
        #[arg(long, default_value = "1000")]
        every: u64,
    },

    /// Print the effective configuration or write it to a file
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Solar { .. } => "solar",
            Self::SkyPath { .. } => "sky-path",
            Self::Irradiance { .. } => "irradiance",
            Self::Orbit { .. } => "orbit",
            Self::Launch { .. } => "launch",
            Self::Eclipse { .. } => "eclipse",
            Self::Observe { .. } => "observe",
            Self::Phase { .. } => "phase",
            Self::Retrograde { .. } => "retrograde",
            Self::Gravity { .. } => "gravity",
            Self::Validate { .. } => "validate",
            Self::Config { .. } => "config",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Solar,
    Lunar,
}

impl From<KindArg> for EclipseKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Solar => EclipseKind::Solar,
            KindArg::Lunar => EclipseKind::Lunar,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let json = cli.json;
    tracing::debug!(command = cli.command.name(), json, config = ?cli.config, "dispatch");

    match cli.command {
        Commands::Solar { lat, day, date } => {
            let day = match (day, date) {
                (Some(d), _) => d,
                (None, Some(date)) => solar::day_of_year(parse_date(&date)?),
                (None, None) => bail!("either --day or --date is required"),
            };
            let snap = SolarSnapshot::compute(lat, day);
            emit(json, &snap, || {
                println!("Latitude {:.2}°, day {:.1}", snap.latitude_deg, snap.day);
                println!("  Declination:       {:>8.2}°", snap.declination_deg);
                println!("  Noon altitude:     {:>8.2}°", snap.noon_altitude_deg);
                println!("  Sunrise H0:        {:>8.2}°", snap.sunrise_hour_angle_deg);
                println!("  Day length:        {:>8.2} h", snap.day_length_hours);
                match snap.noon_air_mass {
                    Some(m) => println!("  Noon air mass:     {:>8.3}", m),
                    None => println!("  Noon air mass:          n/a (sun below horizon)"),
                }
                println!("  Noon irradiance:   {:>8.1} W/m²", snap.noon_irradiance);
                if let (Some(rise), Some(set)) = (snap.sunrise_azimuth_deg, snap.sunset_azimuth_deg) {
                    println!("  Sunrise azimuth:   {:>8.2}°", rise);
                    println!("  Sunset azimuth:    {:>8.2}°", set);
                }
            })?;
        }

        Commands::SkyPath { lat, day, step, frames } => {
            let mut sky = SkySession::new(&config, lat, day);
            match frames {
                Some(n) => {
                    let frames: Vec<_> = (0..n).map(|_| sky.frame()).collect();
                    emit(json, &frames, || {
                        println!("{:>8} {:>7} {:>9} {:>9} {:>8} {:>8} {:>6}", "HA", "Clock", "Az", "Alt", "X", "Y", "Near");
                        for f in &frames {
                            println!("{:>8.2} {:>7.2} {:>9.2} {:>9.2} {:>8.3} {:>8.3} {:>6}",
                                f.hour_angle_deg, f.clock_hour, f.sun.azimuth_deg, f.sun.altitude_deg,
                                f.projected.x, f.projected.y, f.projected.is_near_side());
                        }
                    })?;
                }
                None => {
                    let path = sky.daily_path(step);
                    emit(json, &path, || {
                        println!("{:>9} {:>9} {:>8} {:>8} {:>8}", "Az", "Alt", "X", "Y", "Depth");
                        for (c, p) in &path {
                            println!("{:>9.2} {:>9.2} {:>8.3} {:>8.3} {:>8.3}",
                                c.azimuth_deg, c.altitude_deg, p.x, p.y, p.depth);
                        }
                    })?;
                }
            }
        }

        Commands::Irradiance { city, every } => {
            let profile = ClimateProfile::by_name(&city)?;
            let annual = profile.annual_profile();
            let rows: Vec<_> = annual.iter().step_by(every.max(1)).collect();
            emit(json, &rows, || {
                println!("{} ({:.1}°)", profile.name, profile.latitude_deg);
                println!("{:>6} {:>10} {:>12} {:>12} {:>10}", "Day", "Clearness", "Clear W/m²", "Actual W/m²", "Daylight");
                for r in &rows {
                    println!("{:>6.0} {:>10.2} {:>12.1} {:>12.1} {:>9.2}h",
                        r.day, r.clearness, r.clear_sky, r.weather_adjusted, r.day_length_hours);
                }
            })?;
        }

        Commands::Orbit { rate, frame_seconds, frames, moon_scale } => {
            if let Some(scale) = moon_scale {
                config.moon_display_scale = scale;
            }
            config.validate()?;
            let mut clock = PlaybackClock::new();
            clock.set_rate(rate);
            let mut session = OrbitSession::new(&config, clock);
            let snapshots: Vec<_> = (0..frames).map(|_| session.tick(frame_seconds)).collect();
            emit(json, &snapshots, || {
                println!("{:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                    "Day", "Earth x", "Earth y", "Moon x", "Moon y", "Mars x", "Mars y");
                for s in &snapshots {
                    let (e, m, r) = (s.position(Body::Earth), s.position(Body::Moon), s.position(Body::Mars));
                    println!("{:>8.1} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                        s.day, e.x, e.y, m.x, m.y, r.x, r.y);
                }
            })?;
        }

        Commands::Launch { speed, samples, dt, substeps } => {
            if let Some(dt) = dt {
                config.integrator.dt = dt;
            }
            if let Some(n) = substeps {
                config.substeps_per_frame = n;
            }
            let mut session = LaunchSession::new(&config, speed)?;
            let status = session.run_to_end();

            #[derive(Serialize)]
            struct LaunchReport {
                speed_ratio: f64,
                speed_kms: f64,
                classification: &'static str,
                status: orrery_sim::Termination,
                steps: u64,
                elapsed: f64,
                final_radius: f64,
                trail: Vec<[f64; 2]>,
            }

            let trail: Vec<_> = session.trail().iter().map(|p| [p.x, p.y]).collect();
            let stride = (trail.len() / samples.max(1)).max(1);
            let report = LaunchReport {
                speed_ratio: speed,
                speed_kms: session.display_speed_kms(),
                classification: classify_launch(speed).label(),
                status,
                steps: session.integrator().steps(),
                elapsed: session.integrator().elapsed(),
                final_radius: session.integrator().state().radius(),
                trail: trail.iter().step_by(stride).copied().collect(),
            };
            emit(json, &report, || {
                println!("Launch at {:.2} v_circ ({:.1} km/s): {}", report.speed_ratio, report.speed_kms, report.classification);
                println!("Result: {:?} after {} steps (t = {:.2}), r = {:.3}",
                    report.status, report.steps, report.elapsed, report.final_radius);
                println!("{:>10} {:>10}", "x", "y");
                for p in &report.trail {
                    println!("{:>10.4} {:>10.4}", p[0], p[1]);
                }
            })?;
        }

        Commands::Eclipse { kind, inclination, moon_distance, steps } => {
            let mut eclipse = EclipseConfiguration::new(kind.into(), inclination);
            if let Some(d) = moon_distance {
                if !(d > 0.0) {
                    bail!("--moon-distance must be positive, got {}", d);
                }
                eclipse = eclipse.with_moon_distance(d);
            }
            let n = steps.max(2);
            let pass: Vec<_> = (0..n)
                .map(|i| eclipse.at_progress(i as f64 / (n - 1) as f64))
                .collect();
            let peak = eclipse.evaluate();
            emit(json, &pass, || {
                println!("{} eclipse, inclination offset {:.3}°: {:?} (magnitude {:.3})",
                    eclipse.kind.name(), inclination, peak.eclipse_type, peak.magnitude);
                println!("{:>6} {:>10} {:>10} {:>11} {:>10}", "t", "Sep (°)", "Magnitude", "Obscuration", "Type");
                for (i, s) in pass.iter().enumerate() {
                    println!("{:>6.2} {:>10.4} {:>10.3} {:>11.3} {:>10}",
                        i as f64 / (n - 1) as f64, s.separation_deg, s.magnitude, s.obscuration,
                        format!("{:?}", s.eclipse_type));
                }
            })?;
        }

        Commands::Observe { event, steps } => match event {
            None => {
                let events = ObservedEclipse::all();
                emit(json, &events, || {
                    println!("{:<18} {:>7} {:>8} {:>7} {:>7} {:>7} {:>6}", "Id", "Kind", "Type", "Start", "Max", "End", "Mag");
                    for e in events {
                        println!("{:<18} {:>7} {:>8} {:>7.2} {:>7.2} {:>7.2} {:>6.2}",
                            e.id, e.eclipse.name(), format!("{:?}", e.kind), e.start_hour, e.max_hour, e.end_hour, e.max_magnitude);
                    }
                })?;
            }
            Some(id) => {
                let event = ObservedEclipse::by_id(&id)?;
                let n = steps.max(2);
                let timeline: Vec<_> = (0..n).map(|i| event.state_at(i as f64 / (n - 1) as f64)).collect();
                emit(json, &timeline, || {
                    println!("{} ({} {:?}), greatest eclipse at {}", event.id, event.eclipse.name(), event.kind, event.max_epoch());
                    println!("{:>6} {:>7} {:>9} {:>9} {:>10}", "t", "Clock", "Alt (°)", "Coverage", "Magnitude");
                    for s in &timeline {
                        let h = s.clock_hour.floor();
                        let m = ((s.clock_hour - h) * 60.0).floor();
                        println!("{:>6.2} {:>4}:{:02} {:>9.1} {:>9.2} {:>10.3}",
                            s.progress, h as u32, m as u32, s.altitude_deg, s.coverage, s.magnitude);
                    }
                })?;
            }
        },

        Commands::Phase { day } => {
            let phase = LunarPhase::from_days(day);

            #[derive(Serialize)]
            struct PhaseReport {
                day: f64,
                angle_deg: f64,
                name: &'static str,
                illuminated_fraction: f64,
                waxing: bool,
                moonrise_hour: f64,
                moonset_hour: f64,
            }

            let report = PhaseReport {
                day,
                angle_deg: phase.angle().to_degrees(),
                name: phase.name().label(),
                illuminated_fraction: phase.illuminated_fraction(),
                waxing: phase.is_waxing(),
                moonrise_hour: phase.moonrise_hour(),
                moonset_hour: phase.moonset_hour(),
            };
            emit(json, &report, || {
                println!("Day {:.1}: {} ({:.0}% lit, {})", report.day, report.name,
                    report.illuminated_fraction * 100.0, if report.waxing { "waxing" } else { "waning" });
                println!("Phase angle {:.1}°, rises ~{:.0}h, sets ~{:.0}h",
                    report.angle_deg, report.moonrise_hour, report.moonset_hour);
            })?;
        }

        Commands::Retrograde { start, days, step } => {
            if !(step > 0.0) {
                bail!("--step must be positive, got {}", step);
            }
            let count = (days as f64 / step).ceil() as usize + 1;
            let samples = RetrogradeTracker::default().sweep(start, step, count);
            emit(json, &samples, || {
                println!("{:>8} {:>10} {:>10} {:>10} {:>10}", "Day", "Lon (°)", "Dist (AU)", "Heuristic", "Exact");
                for s in &samples {
                    println!("{:>8.1} {:>10.2} {:>10.3} {:>10} {:>10}",
                        s.day, s.apparent_longitude.to_degrees(), s.geocentric.norm(), s.heuristic, s.exact);
                }
            })?;
        }

        Commands::Gravity { distance, mass } => {
            let forces = GravityScenario::new(distance, mass).forces();
            emit(json, &forces, || {
                println!("Sun-Earth:  {:.3e} N at {:.3e} m", forces.sun_earth, forces.sun_earth_distance);
                println!("Earth-Moon: {:.3e} N at {:.3e} m", forces.earth_moon, forces.earth_moon_distance);
            })?;
        }

        Commands::Validate { dt, steps, every } => {
            let dt = dt.unwrap_or(config.integrator.dt);
            let results = validate_circular(config.integrator.mu, 1.0, dt, steps, every)?;
            let summary = summarize_validation(&results)
                .context("validation produced no samples")?;
            emit(json, &summary, || {
                println!("{:>8} {:>10} {:>14} {:>14}", "Step", "Time", "Pos error", "Energy drift");
                for p in &results {
                    println!("{:>8} {:>10.2} {:>14.3e} {:>14.3e}", p.step, p.time, p.position_error, p.energy_drift);
                }
                println!("\nMean error {:.3e}, max error {:.3e}, max drift {:.3e}",
                    summary.mean_position_error, summary.max_position_error, summary.max_energy_drift);
            })?;
        }

        Commands::Config { output } => match output {
            Some(path) => {
                config.save(&path)?;
                tracing::info!(path = %path.display(), "wrote engine config");
                println!("Wrote configuration -> {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&config)?),
        },
    }

    Ok(())
}

/// Print `value` as JSON, or run the table printer
fn emit<T: Serialize + ?Sized>(json: bool, value: &T, table: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table();
    }
    Ok(())
}

/// Parse "YYYY-MM-DD" as midnight UTC, otherwise defer to hifitime
fn parse_date(s: &str) -> Result<Epoch> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() == 3 {
        if let (Ok(y), Ok(m), Ok(d)) = (parts[0].parse::<i32>(), parts[1].parse::<u8>(), parts[2].parse::<u8>()) {
            if !(1..=12).contains(&m) || !(1..=31).contains(&d) {
                bail!("invalid calendar date: {}", s);
            }
            return Epoch::maybe_from_gregorian_utc(y, m, d, 0, 0, 0, 0)
                .with_context(|| format!("invalid calendar date: {}", s));
        }
    }
    Epoch::from_str(s).with_context(|| format!("Failed to parse date: {}", s))
}
