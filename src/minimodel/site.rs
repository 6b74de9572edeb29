use std::fmt;

use chrono::FixedOffset;

use crate::sky::EarthLocation;

/// The observatory's sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Site {
    GN,
    GS,
}

pub const ALL_SITES: [Site; 2] = [Site::GN, Site::GS];

impl Site {
    pub fn site_name(self) -> &'static str {
        match self {
            Site::GN => "Gemini North",
            Site::GS => "Gemini South",
        }
    }

    /// Horizons coordinate centre code.
    pub fn coordinate_center(self) -> &'static str {
        match self {
            Site::GN => "568@399",
            Site::GS => "I11@399",
        }
    }

    /// Id of the resource standing for this site.
    pub fn resource_id(self) -> &'static str {
        match self {
            Site::GN => "GN",
            Site::GS => "GS",
        }
    }

    pub fn location(self) -> EarthLocation {
        match self {
            Site::GN => EarthLocation::gemini_north(),
            Site::GS => EarthLocation::gemini_south(),
        }
    }

    /// Standard-time offset from UTC in seconds. Daylight saving is ignored.
    pub fn utc_offset_seconds(self) -> i32 {
        match self {
            Site::GN => -10 * 3600,
            Site::GS => -4 * 3600,
        }
    }

    pub fn utc_offset(self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds())
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.site_name())
    }
}
