pub mod angle;
pub mod constants;
pub mod coordinates;
pub mod error;

pub use angle::{Angle, AngleUnit, clamped_acos, clamped_asin, normalize_degrees, normalize_radians, wrap_180, wrap_pi};
pub use coordinates::{HorizonCoord, direction2, direction3, polar_angle};
pub use error::{OrreryError, OrreryResult};
