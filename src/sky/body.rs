use std::f64::consts::PI;

use qtty::{Days, Degrees, Radians};

use super::altitude::{altitude_above, local_sidereal_time, HorizontalCoordinates};
use super::constants::{NO_CROSSING, TWO_PI};
use super::error::SkyError;
use super::location::EarthLocation;
use super::time::JulianDate;

/// Right ascension and declination in the frame of date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equatorial {
    /// In `[0°, 360°)`.
    pub ra: Degrees,
    pub dec: Degrees,
}

impl Equatorial {
    /// Builds a position from radians, wrapping the right ascension.
    pub fn from_radians(ra: f64, dec: f64) -> Self {
        Self {
            ra: Degrees::new(ra.to_degrees().rem_euclid(360.0)),
            dec: Degrees::new(dec.to_degrees()),
        }
    }

    pub fn ra_rad(&self) -> f64 {
        self.ra.value().to_radians()
    }

    pub fn dec_rad(&self) -> f64 {
        self.dec.value().to_radians()
    }
}

/// A solar-system body with a low-precision ephemeris.
pub trait CelestialBody {
    /// Used in log lines and errors.
    const NAME: &'static str;

    /// Apparent position at `time` as seen from `location`.
    fn position(&self, time: JulianDate, location: &EarthLocation) -> Equatorial;

    /// Where the body stands on the local sky at `time`.
    fn horizontal(&self, time: JulianDate, location: &EarthLocation) -> HorizontalCoordinates {
        let pos = self.position(time, location);
        let lst = local_sidereal_time(time, location.longitude);
        altitude_above(
            Radians::new(pos.dec_rad()),
            Radians::new(lst.value() - pos.ra_rad()),
            Radians::new(location.latitude_rad()),
        )
    }

    fn altitude(&self, time: JulianDate, location: &EarthLocation) -> Radians {
        self.horizontal(time, location).altitude
    }
}

/// Fraction of a day swept by an hour angle.
pub(crate) fn hour_angle_days(angle: f64) -> Days {
    Days::new(angle / TWO_PI)
}

/// Wraps an angle into `[-π, π)`.
pub(crate) fn wrap_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TWO_PI) - PI
}

/// Unwraps an hour angle from [`hour_angle_to_angle`](super::hour_angle_to_angle),
/// turning its sentinels into `NoCrossing`.
pub(crate) fn crossing(
    hour_angle: Radians,
    body: &'static str,
    event: &'static str,
) -> Result<f64, SkyError> {
    if hour_angle.value().abs() >= NO_CROSSING {
        Err(SkyError::NoCrossing { body, event })
    } else {
        Ok(hour_angle.value())
    }
}
