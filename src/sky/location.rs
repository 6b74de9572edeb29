use qtty::{Degrees, Meters};

use super::constants::{EQUAT_RAD, HORIZON_REFRACTION};

/// A geodetic position on the Earth: east-positive longitude, height above sea level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarthLocation {
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub height: Meters,
}

impl EarthLocation {
    pub const fn new(latitude: Degrees, longitude: Degrees, height: Meters) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Gemini North, Mauna Kea.
    pub const fn gemini_north() -> Self {
        Self::new(
            Degrees::new(19.823_806),
            Degrees::new(-155.469_056),
            Meters::new(4213.0),
        )
    }

    /// Gemini South, Cerro Pachón.
    pub const fn gemini_south() -> Self {
        Self::new(
            Degrees::new(-30.240_7),
            Degrees::new(-70.736_7),
            Meters::new(2722.0),
        )
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude.value().to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude.value().to_radians()
    }

    /// Apparent altitude of the horizon seen from this height, refraction included.
    pub fn horizon_altitude(&self) -> Degrees {
        let dip = (2.0 * self.height.value() / EQUAT_RAD.value()).sqrt().to_degrees();
        HORIZON_REFRACTION - Degrees::new(dip)
    }
}
