//! Julian dates and their conversion to and from chrono timestamps.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};
use qtty::Days;

use super::constants::{J2000, JULIAN_CENTURY, SECONDS_PER_DAY, UNIX_EPOCH_JD};
use super::error::SkyError;

/// A UTC instant expressed as a Julian date.
///
/// No distinction is made between UT1 and UTC; the ephemerides in this module
/// are not precise enough for it to matter.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate(Days);

impl JulianDate {
    pub const J2000: JulianDate = JulianDate(Days::new(J2000));

    pub const fn new(jd: f64) -> Self {
        Self(Days::new(jd))
    }

    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Days elapsed since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        self.value() - J2000
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / JULIAN_CENTURY
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
        Self::new(secs / SECONDS_PER_DAY + UNIX_EPOCH_JD)
    }

    /// Rounds to the nearest microsecond.
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` if the date is not finite or lies outside chrono's range.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, SkyError> {
        let micros = ((self.value() - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1e6).round();
        if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
            return Err(SkyError::TimeOutOfRange(self.value()));
        }
        DateTime::from_timestamp_micros(micros as i64).ok_or(SkyError::TimeOutOfRange(self.value()))
    }
}

impl From<DateTime<Utc>> for JulianDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl Add<Days> for JulianDate {
    type Output = JulianDate;

    fn add(self, rhs: Days) -> Self::Output {
        JulianDate(self.0 + rhs)
    }
}

impl Sub<Days> for JulianDate {
    type Output = JulianDate;

    fn sub(self, rhs: Days) -> Self::Output {
        JulianDate(self.0 - rhs)
    }
}

impl Sub for JulianDate {
    type Output = Days;

    fn sub(self, rhs: JulianDate) -> Self::Output {
        self.0 - rhs.0
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.value())
    }
}
