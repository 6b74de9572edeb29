//! Low-precision Moon.

use qtty::{Degrees, Radians};

use super::altitude::{geocentric_coordinates, hour_angle_to_angle, local_sidereal_time};
use super::body::{crossing, hour_angle_days, wrap_pi, CelestialBody, Equatorial};
use super::constants::{EQUAT_RAD, MOON_HOUR_ANGLE_RATE};
use super::error::SkyError;
use super::location::EarthLocation;
use super::solver::{time_by_altitude, SolverConfig};
use super::time::JulianDate;

/// The Moon, from the Astronomical Almanac low-precision series,
/// corrected to topocentric.
///
/// Good to about 0.1°, plenty for rise and set times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Moon;

/// Lunar events around one local midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonEvents {
    pub moonrise: JulianDate,
    pub moonset: JulianDate,
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

impl Moon {
    /// Topocentric position and distance, in Earth radii, at `time`.
    pub fn low_precision_location(&self, time: JulianDate, location: &EarthLocation) -> (Equatorial, f64) {
        let t = time.centuries_since_j2000();

        let lambda = 218.32 + 481_267.883 * t
            + 6.29 * sin_deg(134.9 + 477_198.85 * t)
            - 1.27 * sin_deg(259.2 - 413_335.38 * t)
            + 0.66 * sin_deg(235.7 + 890_534.23 * t)
            + 0.21 * sin_deg(269.9 + 954_397.70 * t)
            - 0.19 * sin_deg(357.5 + 35_999.05 * t)
            - 0.11 * sin_deg(186.6 + 966_404.05 * t);
        let beta = 5.13 * sin_deg(93.3 + 483_202.03 * t)
            + 0.28 * sin_deg(228.2 + 960_400.87 * t)
            - 0.28 * sin_deg(318.3 + 6_003.18 * t)
            - 0.17 * sin_deg(217.6 - 407_332.20 * t);
        let parallax = 0.9508
            + 0.0518 * cos_deg(134.9 + 477_198.85 * t)
            + 0.0095 * cos_deg(259.2 - 413_335.38 * t)
            + 0.0078 * cos_deg(235.7 + 890_534.23 * t)
            + 0.0028 * cos_deg(269.9 + 954_397.70 * t);

        let (lambda, beta) = (lambda.to_radians(), beta.to_radians());
        let distance = 1.0 / parallax.to_radians().sin();

        // Ecliptic to equatorial, mean obliquity of J2000.
        let l = beta.cos() * lambda.cos();
        let m = 0.9175 * beta.cos() * lambda.sin() - 0.3978 * beta.sin();
        let n = 0.3978 * beta.cos() * lambda.sin() + 0.9175 * beta.sin();

        let lst = local_sidereal_time(time, location.longitude);
        let [xg, yg, zg] = geocentric_coordinates(lst, Radians::new(location.latitude_rad()), location.height);
        let radius = EQUAT_RAD.value();
        let x = l * distance - xg.value() / radius;
        let y = m * distance - yg.value() / radius;
        let z = n * distance - zg.value() / radius;
        let topo_distance = (x * x + y * y + z * z).sqrt();

        (Equatorial::from_radians(y.atan2(x), (z / topo_distance).asin()), topo_distance)
    }

    /// Moonrise and moonset around each of `midnights`.
    ///
    /// Hour angles are turned into time at the lunar rate, since the Moon
    /// returns to the meridian about 50 minutes later each day.
    ///
    /// # Errors
    ///
    /// - `NoCrossing` if the Moon stays above or below the altitude all night
    /// - `NotConverging` from the refinement
    pub fn rise_and_set(
        &self,
        location: &EarthLocation,
        midnights: &[JulianDate],
        set_alt: Degrees,
        rise_alt: Degrees,
        config: &SolverConfig,
    ) -> Result<Vec<MoonEvents>, SkyError> {
        if midnights.is_empty() {
            return Ok(Vec::new());
        }
        let lat = Radians::new(location.latitude_rad());
        let set_rad = Radians::new(set_alt.value().to_radians());
        let rise_rad = Radians::new(rise_alt.value().to_radians());

        let mut rises = Vec::with_capacity(midnights.len());
        let mut sets = Vec::with_capacity(midnights.len());
        for &midnight in midnights {
            let (pos, _) = self.low_precision_location(midnight, location);
            let dec = Radians::new(pos.dec_rad());
            let midnight_ha = wrap_pi(local_sidereal_time(midnight, location.longitude).value() - pos.ra_rad());

            let rise_ha = crossing(hour_angle_to_angle(dec, lat, rise_rad), "Moon", "moonrise")?;
            let set_ha = crossing(hour_angle_to_angle(dec, lat, set_rad), "Moon", "moonset")?;

            rises.push(midnight + hour_angle_days(-rise_ha - midnight_ha) * MOON_HOUR_ANGLE_RATE);
            sets.push(midnight + hour_angle_days(set_ha - midnight_ha) * MOON_HOUR_ANGLE_RATE);
        }

        let rises = time_by_altitude(self, &[rise_rad], &rises, location, config)?;
        let sets = time_by_altitude(self, &[set_rad], &sets, location, config)?;

        Ok(rises
            .into_iter()
            .zip(sets)
            .map(|(moonrise, moonset)| MoonEvents { moonrise, moonset })
            .collect())
    }
}

impl CelestialBody for Moon {
    const NAME: &'static str = "Moon";

    fn position(&self, time: JulianDate, location: &EarthLocation) -> Equatorial {
        self.low_precision_location(time, location).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    fn jd(h: u32, m: u32) -> JulianDate {
        JulianDate::from(Utc.with_ymd_and_hms(2020, 7, 1, h, m, 0).unwrap())
    }

    #[test]
    fn position_from_mauna_kea() {
        let (pos, distance) = Moon.low_precision_location(jd(9, 25), &EarthLocation::gemini_north());
        assert_abs_diff_eq!(pos.ra.value(), 228.417_711_77, epsilon = 1e-2);
        assert_abs_diff_eq!(pos.dec.value(), -15.297_127_68, epsilon = 1e-2);
        assert_abs_diff_eq!(distance, 57.346_679_15, epsilon = 1e-2);
    }

    #[test]
    fn topocentric_differs_between_sites() {
        let (north, _) = Moon.low_precision_location(jd(9, 25), &EarthLocation::gemini_north());
        let (south, _) = Moon.low_precision_location(jd(9, 25), &EarthLocation::gemini_south());
        assert!((north.dec.value() - south.dec.value()).abs() > 0.1);
    }

    #[test]
    fn sets_at_the_geometric_horizon() {
        let expected = JulianDate::from(Utc.with_ymd_and_hms(2020, 7, 1, 12, 38, 22).unwrap());
        let found = time_by_altitude(
            &Moon,
            &[Radians::new(0.0)],
            &[jd(10, 0)],
            &EarthLocation::gemini_north(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(found[0].value(), expected.value(), epsilon = 1e-3);
    }

    #[test]
    fn rise_before_set_on_reference_night() {
        let location = EarthLocation::gemini_north();
        let horizon = location.horizon_altitude();
        let events = Moon
            .rise_and_set(&location, &[jd(10, 0)], horizon, horizon, &SolverConfig::default())
            .unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].moonrise < events[0].moonset);
    }
}
