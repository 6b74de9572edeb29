//! Sun and Moon events for whole nights.

use chrono::{DateTime, FixedOffset, Utc};

use super::altitude::local_midnight;
use super::error::SkyError;
use super::location::EarthLocation;
use super::moon::Moon;
use super::solver::SolverConfig;
use super::sun::Sun;
use super::time::JulianDate;

/// Everything that happens in the sky over one night, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NightEvents {
    /// Local clock midnight the other events are computed around.
    pub midnight: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub evening_twilight: DateTime<Utc>,
    pub morning_twilight: DateTime<Utc>,
    pub moonrise: DateTime<Utc>,
    pub moonset: DateTime<Utc>,
}

/// Night events for each of `times` with the default solver settings.
///
/// See [`night_events_with`].
pub fn night_events(
    times: &[DateTime<Utc>],
    location: &EarthLocation,
    utc_offset: FixedOffset,
) -> Result<Vec<NightEvents>, SkyError> {
    night_events_with(times, location, utc_offset, &SolverConfig::default())
}

/// Night events for each of `times`.
///
/// A time before local noon selects the night that just ended, a time after
/// it the night to come. Rise and set use the apparent horizon of the site.
///
/// # Errors
///
/// Anything [`Sun::rise_and_set`] or [`Moon::rise_and_set`] returns, and
/// `TimeOutOfRange` if a result cannot be expressed as a timestamp.
pub fn night_events_with(
    times: &[DateTime<Utc>],
    location: &EarthLocation,
    utc_offset: FixedOffset,
    config: &SolverConfig,
) -> Result<Vec<NightEvents>, SkyError> {
    let midnights: Vec<DateTime<Utc>> = times.iter().map(|&t| local_midnight(t, utc_offset)).collect();
    let midnight_jds: Vec<JulianDate> = midnights.iter().map(|&m| JulianDate::from(m)).collect();
    let horizon = location.horizon_altitude();

    let sun = Sun.rise_and_set(location, &midnight_jds, horizon, horizon, config)?;
    let moon = Moon.rise_and_set(location, &midnight_jds, horizon, horizon, config)?;

    midnights
        .into_iter()
        .zip(sun)
        .zip(moon)
        .map(|((midnight, sun), moon)| {
            Ok(NightEvents {
                midnight,
                sunset: sun.sunset.to_datetime()?,
                sunrise: sun.sunrise.to_datetime()?,
                evening_twilight: sun.evening_twilight.to_datetime()?,
                morning_twilight: sun.morning_twilight.to_datetime()?,
                moonrise: moon.moonrise.to_datetime()?,
                moonset: moon.moonset.to_datetime()?,
            })
        })
        .collect()
}
