pub mod climate;
pub mod config;
pub mod eclipse;
pub mod elements;
pub mod gravity;
pub mod planets;
pub mod playback;
pub mod projection;
pub mod retrograde;
pub mod session;
pub mod solar;
pub mod system;
pub mod trajectory;
pub mod validation;

pub use climate::{ClimateProfile, DailyIrradiance};
pub use config::{EngineConfig, SkyConfig};
pub use eclipse::{
    DiskOverlap, EclipseConfiguration, EclipseKind, EclipseState, EclipseType, LunarPhase,
    ObservedEclipse, PhaseName, ShadowCone,
};
pub use elements::{CompoundOrbit, OrbitalElements};
pub use gravity::{GravityForces, GravityScenario};
pub use planets::Body;
pub use playback::{rates, PlaybackClock};
pub use projection::{ProjectedPoint, SkyProjection};
pub use retrograde::{PlanetPair, RetrogradeSample, RetrogradeTracker};
pub use session::{LaunchSession, OrbitSession, SkySession, Trail};
pub use solar::{SolarSnapshot, SunriseHourAngle};
pub use system::{BodyState, Orrery, SystemSnapshot};
pub use trajectory::{
    classify_launch, IntegratorConfig, OrbitClass, Termination, TrajectorySample, TrajectoryState,
    VerletIntegrator,
};
pub use validation::{summarize_validation, validate_circular, ValidationPoint, ValidationSummary};

#[cfg(test)]
mod tests;
