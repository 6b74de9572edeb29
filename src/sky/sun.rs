//! Low-precision Sun.

use qtty::{Degrees, Radians};

use super::altitude::{hour_angle_to_angle, local_sidereal_time};
use super::body::{crossing, hour_angle_days, CelestialBody, Equatorial};
use super::constants::{TWELVE_DEGREE_TWILIGHT, TWO_PI};
use super::error::SkyError;
use super::location::EarthLocation;
use super::solver::{time_by_altitude, SolverConfig};
use super::time::JulianDate;

/// The Sun, from the 1990 Astronomical Almanac formulae (p. C24).
///
/// Good to about 0.01°, so no topocentric correction is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sun;

/// Solar events around one local midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvents {
    pub sunset: JulianDate,
    pub sunrise: JulianDate,
    /// 12° twilight after sunset.
    pub evening_twilight: JulianDate,
    /// 12° twilight before sunrise.
    pub morning_twilight: JulianDate,
}

impl Sun {
    /// Geocentric position at `time`, equinox of date.
    pub fn at(time: JulianDate) -> Equatorial {
        let n = time.days_since_j2000();
        let ell = 280.460 + 0.985_647_4 * n;
        let g = (357.528 + 0.985_600_3 * n).to_radians();
        let lambda = (ell + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();
        let epsilon = (23.439 - 0.000_000_4 * n).to_radians();

        let x = lambda.cos();
        let y = epsilon.cos() * lambda.sin();
        let z = epsilon.sin() * lambda.sin();

        Equatorial::from_radians(y.atan2(x), z.asin())
    }

    /// Sunset, sunrise and both 12° twilights around each of `midnights`.
    ///
    /// First guesses come from the hour angles of the Sun's position at
    /// midnight and are then refined with [`time_by_altitude`].
    ///
    /// # Errors
    ///
    /// - `NoCrossing` if the Sun stays above or below one of the altitudes all night
    /// - `NotConverging` from the refinement
    pub fn rise_and_set(
        &self,
        location: &EarthLocation,
        midnights: &[JulianDate],
        set_alt: Degrees,
        rise_alt: Degrees,
        config: &SolverConfig,
    ) -> Result<Vec<SunEvents>, SkyError> {
        if midnights.is_empty() {
            return Ok(Vec::new());
        }
        let lat = Radians::new(location.latitude_rad());
        let set_rad = Radians::new(set_alt.value().to_radians());
        let rise_rad = Radians::new(rise_alt.value().to_radians());
        let twilight_rad = Radians::new(TWELVE_DEGREE_TWILIGHT.value().to_radians());

        let n = midnights.len();
        let mut sunset = Vec::with_capacity(n);
        let mut sunrise = Vec::with_capacity(n);
        let mut evening = Vec::with_capacity(n);
        let mut morning = Vec::with_capacity(n);

        for &midnight in midnights {
            let pos = Sun::at(midnight);
            let dec = Radians::new(pos.dec_rad());
            let midnight_ha =
                (local_sidereal_time(midnight, location.longitude).value() - pos.ra_rad()).rem_euclid(TWO_PI);

            let set_ha = crossing(hour_angle_to_angle(dec, lat, set_rad), "Sun", "sunset")?;
            let rise_ha = crossing(hour_angle_to_angle(dec, lat, rise_rad), "Sun", "sunrise")?;
            let twilight_ha = crossing(hour_angle_to_angle(dec, lat, twilight_rad), "Sun", "12° twilight")?;

            sunset.push(midnight - hour_angle_days(midnight_ha - set_ha));
            sunrise.push(midnight + hour_angle_days(TWO_PI - rise_ha - midnight_ha));
            evening.push(midnight - hour_angle_days(midnight_ha - twilight_ha));
            morning.push(midnight + hour_angle_days(TWO_PI - twilight_ha - midnight_ha));
        }

        let sunset = time_by_altitude(self, &[set_rad], &sunset, location, config)?;
        let sunrise = time_by_altitude(self, &[rise_rad], &sunrise, location, config)?;
        let evening = time_by_altitude(self, &[twilight_rad], &evening, location, config)?;
        let morning = time_by_altitude(self, &[twilight_rad], &morning, location, config)?;

        Ok((0..n)
            .map(|i| SunEvents {
                sunset: sunset[i],
                sunrise: sunrise[i],
                evening_twilight: evening[i],
                morning_twilight: morning[i],
            })
            .collect())
    }
}

impl CelestialBody for Sun {
    const NAME: &'static str = "Sun";

    fn position(&self, time: JulianDate, _location: &EarthLocation) -> Equatorial {
        Sun::at(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    fn jd(h: u32, m: u32, s: u32) -> JulianDate {
        JulianDate::from(Utc.with_ymd_and_hms(2020, 7, 1, h, m, s).unwrap())
    }

    #[test]
    fn position_at_reference_time() {
        let pos = Sun::at(jd(9, 25, 0));
        assert_abs_diff_eq!(pos.ra.value(), 100.885_919_31, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.dec.value(), 23.058_699_65, epsilon = 1e-6);
    }

    #[test]
    fn sunset_at_the_geometric_horizon() {
        let expected = JulianDate::from(
            Utc.with_ymd_and_hms(2020, 7, 1, 5, 1, 7).unwrap() + chrono::Duration::milliseconds(885),
        );
        let found = time_by_altitude(
            &Sun,
            &[Radians::new(0.0)],
            &[jd(5, 0, 0)],
            &EarthLocation::gemini_north(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_abs_diff_eq!(found[0].value(), expected.value(), epsilon = 1e-3);
    }

    #[test]
    fn broadcasts_one_guess_over_many_altitudes() {
        let alts = [Radians::new(0.0), Radians::new((-6.0f64).to_radians())];
        let found = time_by_altitude(
            &Sun,
            &alts,
            &[jd(5, 0, 0)],
            &EarthLocation::gemini_north(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[1] > found[0]);
    }

    #[test]
    fn unreachable_altitude_does_not_converge() {
        let err = time_by_altitude(
            &Sun,
            &[Radians::new(89.0f64.to_radians())],
            &[jd(22, 0, 0)],
            &EarthLocation::gemini_north(),
            &SolverConfig::default(),
        );
        assert_eq!(
            err,
            Err(SkyError::NotConverging {
                body: "Sun",
                iterations: 10
            })
        );
    }

    #[test]
    fn mismatched_batches_rejected() {
        let err = time_by_altitude(
            &Sun,
            &[Radians::new(0.0), Radians::new(0.1)],
            &[jd(5, 0, 0), jd(5, 0, 0), jd(5, 0, 0)],
            &EarthLocation::gemini_north(),
            &SolverConfig::default(),
        );
        assert_eq!(err, Err(SkyError::LengthMismatch { left: 2, right: 3 }));
    }

    #[test]
    fn midnight_sun_has_no_sunset() {
        let arctic = EarthLocation::new(
            Degrees::new(80.0),
            Degrees::new(15.0),
            qtty::Meters::new(0.0),
        );
        let err = Sun.rise_and_set(
            &arctic,
            &[jd(0, 0, 0)],
            Degrees::new(-0.883),
            Degrees::new(-0.883),
            &SolverConfig::default(),
        );
        assert_eq!(
            err,
            Err(SkyError::NoCrossing {
                body: "Sun",
                event: "sunset"
            })
        );
    }
}
