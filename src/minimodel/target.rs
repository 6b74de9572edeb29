use qtty::Degrees;

use super::magnitude::{Magnitude, MagnitudeBand};

/// Role of a target within an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    Base,
    User,
    BlindOffset,
    OffAxis,
    TuningStar,
    Guidestar,
    Other,
}

/// How quickly a guider can guide on a star, as assessed by the guide-star
/// search that supplied the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuideSpeed {
    Slow,
    Medium,
    Fast,
}

/// Kind of solar-system body a nonsidereal target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetTag {
    Comet,
    Asteroid,
    MajorBody,
}

/// Position information of a target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// Fixed coordinates with proper motion in mas/yr and the epoch as a
    /// decimal year.
    Sidereal {
        ra: Degrees,
        dec: Degrees,
        pm_ra: f64,
        pm_dec: f64,
        epoch: f64,
    },
    /// A Horizons designation plus an ephemeris.
    Nonsidereal {
        des: String,
        tag: TargetTag,
        ra: Vec<Degrees>,
        dec: Vec<Degrees>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub name: String,
    pub target_type: TargetType,
    pub kind: TargetKind,
    /// At most one entry per band.
    pub magnitudes: Vec<Magnitude>,
    pub guide_speed: Option<GuideSpeed>,
}

impl Target {
    pub fn sidereal(name: impl Into<String>, target_type: TargetType, ra: Degrees, dec: Degrees) -> Self {
        Self {
            name: name.into(),
            target_type,
            kind: TargetKind::Sidereal {
                ra,
                dec,
                pm_ra: 0.0,
                pm_dec: 0.0,
                epoch: 2000.0,
            },
            magnitudes: Vec::new(),
            guide_speed: None,
        }
    }

    /// Replaces the magnitudes. A later entry for a band overrides an earlier one.
    pub fn with_magnitudes<I: IntoIterator<Item = Magnitude>>(mut self, magnitudes: I) -> Self {
        self.magnitudes.clear();
        for magnitude in magnitudes {
            match self.magnitudes.iter_mut().find(|m| m.band == magnitude.band) {
                Some(existing) => *existing = magnitude,
                None => self.magnitudes.push(magnitude),
            }
        }
        self
    }

    pub fn with_guide_speed(mut self, speed: GuideSpeed) -> Self {
        self.guide_speed = Some(speed);
        self
    }

    pub fn magnitude(&self, band: MagnitudeBand) -> Option<&Magnitude> {
        self.magnitudes.iter().find(|m| m.band == band)
    }

    /// Guide speed if the target has been assessed as a guide star.
    pub fn guide_speed(&self) -> Option<GuideSpeed> {
        self.guide_speed
    }

    pub fn is_base(&self) -> bool {
        self.target_type == TargetType::Base
    }

    pub fn is_sidereal(&self) -> bool {
        matches!(self.kind, TargetKind::Sidereal { .. })
    }
}
