//! Spherical astronomy on the local horizon.
//!
//! Everything here is closed form: altitude and azimuth from an hour angle,
//! sidereal time, the hour angle at which a declination reaches an altitude,
//! and the airmass and twilight approximations used by the sky-brightness
//! model. Angles cross the API as `qtty` quantities and are handled as plain
//! radians internally.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Timelike, Utc};
use qtty::{Degrees, Meters, Radians};

use super::constants::{EQUAT_RAD, FLATTEN, HALF_PI, J2000, JULIAN_CENTURY, NO_CROSSING, TWO_PI};
use super::error::SkyError;
use super::solver::{broadcast_len, pick};
use super::time::JulianDate;

/// Position of a body on the local sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinates {
    pub altitude: Radians,
    /// Measured from north through east, in `[0, 2π)`.
    pub azimuth: Radians,
    pub parallactic_angle: Radians,
}

/// Altitude, azimuth and parallactic angle of a body at declination `dec`
/// and hour angle `hour_angle`, seen from `latitude`.
pub fn altitude_above(dec: Radians, hour_angle: Radians, latitude: Radians) -> HorizontalCoordinates {
    let (sin_dec, cos_dec) = dec.value().sin_cos();
    let (sin_ha, cos_ha) = hour_angle.value().sin_cos();
    let (sin_lat, cos_lat) = latitude.value().sin_cos();

    let altitude = (cos_dec * cos_ha * cos_lat + sin_dec * sin_lat).asin();

    let y = sin_dec * cos_lat - cos_dec * cos_ha * sin_lat;
    let z = -cos_dec * sin_ha;
    let azimuth = z.atan2(y).rem_euclid(TWO_PI);

    let (sin_az, cos_az) = azimuth.sin_cos();
    let parallactic_angle = (-sin_az * cos_lat / cos_dec).atan2(-cos_az * cos_ha - sin_az * sin_ha * sin_lat);

    HorizontalCoordinates {
        altitude: Radians::new(altitude),
        azimuth: Radians::new(azimuth),
        parallactic_angle: Radians::new(parallactic_angle),
    }
}

/// Local mean sidereal time, good to about a second, in `[0, 2π)`.
pub fn local_sidereal_time(time: JulianDate, longitude: Degrees) -> Radians {
    let jd = time.value();
    let julian_int = jd.trunc();
    let fraction = jd - julian_int;
    let (mid, ut) = if fraction < 0.5 {
        (julian_int - 0.5, fraction + 0.5)
    } else {
        (julian_int + 0.5, fraction - 0.5)
    };

    let t = (mid - J2000) / JULIAN_CENTURY;
    let greenwich =
        (24_110.548_41 + 8_640_184.812_866 * t + 0.093_104 * t * t - 6.2e-6 * t * t * t) / 86_400.0;
    // Longitude is measured east, so it adds.
    let sidereal = (greenwich.rem_euclid(1.0) + 1.002_737_909_3 * ut + longitude.value() / 360.0)
        .rem_euclid(1.0);

    Radians::new(sidereal * TWO_PI)
}

/// Geocentric rectangular coordinates of a point at `height` above the
/// ellipsoid.
///
/// Passing the local sidereal time as `longitude` gives coordinates in the
/// equatorial frame of date, which is what the topocentric lunar correction
/// needs.
pub fn geocentric_coordinates(longitude: Radians, latitude: Radians, height: Meters) -> [Meters; 3] {
    let (sin_lat, cos_lat) = latitude.value().sin_cos();
    let (sin_lon, cos_lon) = longitude.value().sin_cos();
    let radius = EQUAT_RAD.value();

    let flattened = (1.0 - FLATTEN) * sin_lat;
    let c_geo = 1.0 / (cos_lat * cos_lat + flattened * flattened).sqrt();
    let s_geo = (1.0 - FLATTEN) * (1.0 - FLATTEN) * c_geo;
    let c_geo = c_geo + height.value() / radius;
    let s_geo = s_geo + height.value() / radius;

    [
        Meters::new(radius * c_geo * cos_lat * cos_lon),
        Meters::new(radius * c_geo * cos_lat * sin_lon),
        Meters::new(radius * s_geo * sin_lat),
    ]
}

/// Lowest and highest altitude a body at `dec` reaches over a day at `latitude`.
///
/// Returns `(min, max)`. A bound whose sine falls outside `[-1, 1]` is reported as 0.
pub fn min_max_alt(latitude: Radians, dec: Radians) -> (Radians, Radians) {
    let (sin_dec, cos_dec) = dec.value().sin_cos();
    let (sin_lat, cos_lat) = latitude.value().sin_cos();
    let bounded_asin = |x: f64| if x.abs() <= 1.0 { x.asin() } else { 0.0 };

    let max = bounded_asin(cos_dec * cos_lat + sin_dec * sin_lat);
    let min = bounded_asin(sin_dec * sin_lat - cos_dec * cos_lat);
    (Radians::new(min), Radians::new(max))
}

/// Hour angle, east or west of the meridian, at which a body at `dec` stands
/// at `alt` as seen from `latitude`.
///
/// When the body never gets down to `alt` the result is `-NO_CROSSING` radians;
/// when it never gets up to `alt` it is `+NO_CROSSING`.
pub fn hour_angle_to_angle(dec: Radians, latitude: Radians, alt: Radians) -> Radians {
    let (min, max) = min_max_alt(latitude, dec);
    if alt < min {
        return Radians::new(-NO_CROSSING);
    }
    if alt > max {
        return Radians::new(NO_CROSSING);
    }

    let codec = HALF_PI - dec.value();
    let colat = HALF_PI - latitude.value();
    let zdist = HALF_PI - alt.value();
    let x = (zdist.cos() - codec.cos() * colat.cos()) / (codec.sin() * colat.sin());
    Radians::new(x.clamp(-1.0, 1.0).acos())
}

/// [`min_max_alt`] for each of `decs`, in the same order.
pub fn min_max_alts(latitude: Radians, decs: &[Radians]) -> Vec<(Radians, Radians)> {
    decs.iter().map(|&dec| min_max_alt(latitude, dec)).collect()
}

/// [`hour_angle_to_angle`] over parallel slices of declinations and altitudes.
///
/// A slice of length one is paired with every element of the other.
///
/// # Errors
///
/// `LengthMismatch` if neither slice has length one and their lengths differ.
pub fn hour_angles_to_angle(
    decs: &[Radians],
    latitude: Radians,
    alts: &[Radians],
) -> Result<Vec<Radians>, SkyError> {
    let n = broadcast_len(decs.len(), alts.len())?;
    Ok((0..n)
        .map(|i| hour_angle_to_angle(pick(decs, i), latitude, pick(alts, i)))
        .collect())
}

/// True airmass at an altitude, from a fit to the Kitt Peak tables
/// (Snell & Heiser 1968).
///
/// Valid to about airmass 12; beyond that sec z is returned unchanged, and
/// 500 below the horizon.
pub fn true_airmass(altitude: Radians) -> f64 {
    const COEFFICIENTS: [f64; 5] = [-4.716_679e-5, 1.351_167e-3, 3.033_104e-3, 2.879_465e-3, 0.0];

    let alt = altitude.value();
    let secz = if alt > 0.0 { 1.0 / alt.sin() } else { 500.0 };
    if (0.0..12.0).contains(&secz) {
        let x = secz - 1.0;
        secz - COEFFICIENTS.iter().fold(0.0, |acc, c| acc * x + c)
    } else {
        secz
    }
}

/// Airmass from a zenith distance (Krisciunas & Schaefer 1991, eq. 3).
///
/// Capped at 10 at and below the horizon.
pub fn xair(zenith_distance: Radians) -> f64 {
    let zd = zenith_distance.value();
    if zd > HALF_PI {
        return 10.0;
    }
    let v = (1.0 - 0.96 * zd.sin().powi(2)).sqrt();
    if v == 0.0 {
        10.0
    } else {
        1.0 / v
    }
}

/// Twilight brightening of the zenith sky, in magnitudes, for a Sun altitude
/// between -0.9° and -18°.
///
/// 20 when the Sun is up, 0 when it is below -18°.
pub fn ztwilight(sun_altitude: Degrees) -> f64 {
    let alt = sun_altitude.value();
    if alt > -0.9 {
        20.0
    } else if alt < -18.0 {
        0.0
    } else {
        let y = (-alt - 9.0) / 9.0;
        ((2.063_517_5 * y + 1.246_602) * y - 9.408_449_5) * y + 6.132_725
    }
}

/// The local clock midnight nearest to `time`, in UTC.
///
/// Before local noon this is the previous midnight, from noon on the next one.
pub fn local_midnight(time: DateTime<Utc>, utc_offset: FixedOffset) -> DateTime<Utc> {
    let mut local = time.with_timezone(&utc_offset);
    if local.hour() >= 12 {
        local += Duration::hours(12);
    }
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    (midnight - Duration::seconds(i64::from(utc_offset.local_minus_utc()))).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn rad(deg: f64) -> Radians {
        Radians::new(deg.to_radians())
    }

    fn hst() -> FixedOffset {
        FixedOffset::west_opt(10 * 3600).unwrap()
    }

    #[test]
    fn altitude_three_hours_east() {
        let dec = rad(31.0 + 12.0 / 60.0 + 43.0 / 3600.0);
        let ha = rad(-45.0);
        let pos = altitude_above(dec, ha, rad(19.823_806));
        assert_abs_diff_eq!(pos.altitude.value(), 0.840_022_09, epsilon = 1e-3);
        assert_abs_diff_eq!(pos.azimuth.value(), 1.133_917_1, epsilon = 1e-3);
        assert_abs_diff_eq!(pos.parallactic_angle.value(), -1.652_797_5, epsilon = 1e-3);
    }

    #[test]
    fn transit_at_zenith() {
        let lat = rad(19.8);
        let pos = altitude_above(lat, rad(0.0), lat);
        assert_abs_diff_eq!(pos.altitude.value(), std::f64::consts::FRAC_PI_2, epsilon = 1e-7);
    }

    #[test]
    fn sidereal_time_in_range() {
        let t = JulianDate::from(Utc.with_ymd_and_hms(2020, 7, 1, 9, 25, 0).unwrap());
        let lst = local_sidereal_time(t, Degrees::new(-155.469_056)).value();
        assert!((0.0..TWO_PI).contains(&lst));
    }

    #[test]
    fn greenwich_sidereal_at_j2000() {
        // 18h 41m 50.5s at J2000.0
        let lst = local_sidereal_time(JulianDate::J2000, Degrees::new(0.0));
        let hours = lst.value() * 12.0 / std::f64::consts::PI;
        assert_abs_diff_eq!(hours, 18.697_375, epsilon = 1e-4);
    }

    #[test]
    fn sidereal_day_is_shorter() {
        let t = JulianDate::new(2_459_031.9);
        let a = local_sidereal_time(t, Degrees::new(0.0)).value();
        let b = local_sidereal_time(t + qtty::Days::new(0.997_269_566), Degrees::new(0.0)).value();
        let diff = (b - a).rem_euclid(TWO_PI);
        assert!(diff < 1e-4 || TWO_PI - diff < 1e-4);
    }

    #[test]
    fn geocentric_equator_sea_level() {
        let [x, y, z] = geocentric_coordinates(rad(0.0), rad(0.0), Meters::new(0.0));
        assert_abs_diff_eq!(x.value(), EQUAT_RAD.value(), epsilon = 1e-6);
        assert_abs_diff_eq!(y.value(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z.value(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn geocentric_pole_is_flattened() {
        let [_, _, z] = geocentric_coordinates(rad(0.0), rad(90.0), Meters::new(0.0));
        assert_abs_diff_eq!(z.value(), EQUAT_RAD.value() * (1.0 - FLATTEN), epsilon = 1.0);
    }

    #[test]
    fn min_max_for_summer_sun_at_mauna_kea() {
        let (min, max) = min_max_alt(rad(19.823_806), rad(23.058_699_65));
        assert_abs_diff_eq!(min.value().to_degrees(), -47.117, epsilon = 1e-2);
        assert_abs_diff_eq!(max.value().to_degrees(), 86.765, epsilon = 1e-2);
    }

    #[test]
    fn hour_angle_sentinels() {
        let lat = rad(19.823_806);
        let dec = rad(23.058_699_65);
        assert_eq!(hour_angle_to_angle(dec, lat, rad(89.0)).value(), NO_CROSSING);
        assert_eq!(hour_angle_to_angle(dec, lat, rad(-60.0)).value(), -NO_CROSSING);
    }

    #[test]
    fn bounds_for_several_declinations() {
        let lat = rad(19.823_806);
        let decs = [rad(23.058_699_65), rad(-15.3)];
        let bounds = min_max_alts(lat, &decs);
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0], min_max_alt(lat, decs[0]));
        assert_eq!(bounds[1], min_max_alt(lat, decs[1]));
    }

    #[test]
    fn hour_angles_broadcast_one_declination() {
        let lat = rad(19.823_806);
        let dec = rad(23.058_699_65);
        let alts = [rad(0.0), rad(-12.0), rad(89.0)];
        let found = hour_angles_to_angle(&[dec], lat, &alts).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], hour_angle_to_angle(dec, lat, alts[0]));
        assert!(found[1] > found[0]);
        assert_eq!(found[2].value(), NO_CROSSING);
    }

    #[test]
    fn hour_angles_reject_mismatched_slices() {
        let lat = rad(19.823_806);
        let err = hour_angles_to_angle(&[rad(1.0), rad(2.0)], lat, &[rad(0.0), rad(1.0), rad(2.0)]);
        assert_eq!(err, Err(SkyError::LengthMismatch { left: 2, right: 3 }));
    }

    #[test]
    fn hour_angle_is_symmetric_about_meridian() {
        let lat = rad(19.823_806);
        let dec = rad(10.0);
        let ha = hour_angle_to_angle(dec, lat, rad(30.0));
        assert!(ha.value() > 0.0 && ha.value() < std::f64::consts::PI);
        let east = altitude_above(dec, Radians::new(-ha.value()), lat);
        let west = altitude_above(dec, ha, lat);
        assert_abs_diff_eq!(east.altitude.value(), rad(30.0).value(), epsilon = 1e-9);
        assert_abs_diff_eq!(west.altitude.value(), rad(30.0).value(), epsilon = 1e-9);
    }

    #[test]
    fn airmass_at_zenith_is_one() {
        assert_abs_diff_eq!(true_airmass(rad(90.0)), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(xair(rad(0.0)), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn airmass_near_horizon() {
        assert_eq!(true_airmass(rad(-5.0)), 500.0);
        let low = true_airmass(rad(3.0));
        assert_abs_diff_eq!(low, 1.0 / rad(3.0).value().sin());
        assert_eq!(xair(rad(95.0)), 10.0);
        assert!(true_airmass(rad(30.0)) < 2.0);
    }

    #[test]
    fn twilight_brightness_bounds() {
        assert_eq!(ztwilight(Degrees::new(5.0)), 20.0);
        assert_eq!(ztwilight(Degrees::new(-20.0)), 0.0);
        let nautical = ztwilight(Degrees::new(-12.0));
        assert!(nautical > 0.0 && nautical < 20.0);
        assert!(ztwilight(Degrees::new(-6.0)) > nautical);
    }

    #[test]
    fn midnight_before_noon_is_previous() {
        // 23:25 HST on June 30th
        let t = Utc.with_ymd_and_hms(2020, 7, 1, 9, 25, 0).unwrap();
        let midnight = local_midnight(t, hst());
        assert_eq!(midnight, Utc.with_ymd_and_hms(2020, 7, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn midnight_in_the_morning() {
        // 03:00 HST on July 1st
        let t = Utc.with_ymd_and_hms(2020, 7, 1, 13, 0, 0).unwrap();
        assert_eq!(
            local_midnight(t, hst()),
            Utc.with_ymd_and_hms(2020, 7, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn midnight_east_of_greenwich() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = Utc.with_ymd_and_hms(2020, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(
            local_midnight(t, cest),
            Utc.with_ymd_and_hms(2020, 7, 1, 22, 0, 0).unwrap()
        );
    }
}
