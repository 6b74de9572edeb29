//! Numeric constants for the low-precision ephemerides.

use std::f64::consts::PI;

use qtty::{Days, Degrees, Meters};

pub const TWO_PI: f64 = 2.0 * PI;
pub const HALF_PI: f64 = PI / 2.0;

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const JULIAN_CENTURY: f64 = 36_525.0;

/// Julian date of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Flattening of the Earth, 1/298.257.
pub const FLATTEN: f64 = 0.003_352_813;

/// Equatorial radius of the Earth.
pub const EQUAT_RAD: Meters = Meters::new(6_378_137.0);

/// Standard refraction plus semi-diameter at the horizon.
pub const HORIZON_REFRACTION: Degrees = Degrees::new(-0.883);

/// Sun altitude of the 12° (nautical) twilight.
pub const TWELVE_DEGREE_TWILIGHT: Degrees = Degrees::new(-12.0);

/// Ratio of the lunar day to the solar day; scales hour angles into time for the Moon.
pub const MOON_HOUR_ANGLE_RATE: f64 = 1.035_050_1;

/// Returned by [`hour_angle_to_angle`](super::hour_angle_to_angle) when the body never
/// gets down to the requested altitude (negated) or never gets up to it (positive).
pub const NO_CROSSING: f64 = 1000.0;

/// Default step used for the numerical altitude derivative.
pub const DEFAULT_TIMESTEP: Days = Days::new(0.002);
