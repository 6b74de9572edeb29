//! Low-precision Sun and Moon toolkit.
//!
//! Enough astronomy to plan a night: where the Sun and Moon are, when they
//! cross a given altitude, and the resulting sunset, sunrise, twilight,
//! moonrise and moonset for a site. Positions come from short analytic
//! series (0.01° for the Sun, about 0.1° for the Moon) rather than a full
//! ephemeris.
//!
//! # Usage Pattern
//!
//! ```ignore
//! use chrono::{FixedOffset, TimeZone, Utc};
//! use gemsched::sky::{night_events, EarthLocation};
//!
//! let hst = FixedOffset::west_opt(10 * 3600).unwrap();
//! let when = Utc.with_ymd_and_hms(2020, 7, 1, 9, 25, 0).unwrap();
//! let nights = night_events(&[when], &EarthLocation::gemini_north(), hst)?;
//! println!("sunset {}", nights[0].sunset);
//! ```

mod altitude;
mod body;
pub mod constants;
mod error;
mod events;
mod location;
mod moon;
mod solver;
mod sun;
mod time;

pub use altitude::{
    altitude_above, geocentric_coordinates, hour_angle_to_angle, hour_angles_to_angle, local_midnight,
    local_sidereal_time, min_max_alt, min_max_alts, true_airmass, xair, ztwilight, HorizontalCoordinates,
};
pub use body::{CelestialBody, Equatorial};
pub use error::SkyError;
pub use events::{night_events, night_events_with, NightEvents};
pub use location::EarthLocation;
pub use moon::{Moon, MoonEvents};
pub use solver::{time_by_altitude, SolverConfig};
pub use sun::{Sun, SunEvents};
pub use time::JulianDate;
