//! Photometric bands and target brightnesses.

/// Zero point a band's magnitudes are quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MagnitudeSystem {
    Vega,
    AB,
    Jy,
}

/// A photometric band. Lowercase variants are the SDSS bands.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MagnitudeBand {
    u,
    g,
    r,
    i,
    z,
    U,
    B,
    V,
    UC,
    R,
    I,
    Y,
    J,
    H,
    K,
    L,
    M,
    N,
    Q,
    AP,
}

impl MagnitudeBand {
    pub const ALL: [MagnitudeBand; 20] = [
        MagnitudeBand::u,
        MagnitudeBand::g,
        MagnitudeBand::r,
        MagnitudeBand::i,
        MagnitudeBand::z,
        MagnitudeBand::U,
        MagnitudeBand::B,
        MagnitudeBand::V,
        MagnitudeBand::UC,
        MagnitudeBand::R,
        MagnitudeBand::I,
        MagnitudeBand::Y,
        MagnitudeBand::J,
        MagnitudeBand::H,
        MagnitudeBand::K,
        MagnitudeBand::L,
        MagnitudeBand::M,
        MagnitudeBand::N,
        MagnitudeBand::Q,
        MagnitudeBand::AP,
    ];

    /// Centre and width in microns.
    fn extent(self) -> (f64, f64) {
        match self {
            MagnitudeBand::u => (0.356, 0.046),
            MagnitudeBand::g => (0.483, 0.099),
            MagnitudeBand::r => (0.626, 0.096),
            MagnitudeBand::i => (0.767, 0.106),
            MagnitudeBand::z => (0.910, 0.125),
            MagnitudeBand::U => (0.360, 0.075),
            MagnitudeBand::B => (0.440, 0.090),
            MagnitudeBand::V => (0.550, 0.085),
            MagnitudeBand::UC => (0.610, 0.063),
            MagnitudeBand::R => (0.670, 0.100),
            MagnitudeBand::I => (0.870, 0.100),
            MagnitudeBand::Y => (1.020, 0.120),
            MagnitudeBand::J => (1.250, 0.240),
            MagnitudeBand::H => (1.650, 0.300),
            MagnitudeBand::K => (2.200, 0.410),
            MagnitudeBand::L => (3.760, 0.700),
            MagnitudeBand::M => (4.770, 0.240),
            MagnitudeBand::N => (10.470, 5.230),
            MagnitudeBand::Q => (20.130, 1.650),
            MagnitudeBand::AP => (0.550, 0.085),
        }
    }

    /// Central wavelength in microns.
    pub fn center(self) -> f64 {
        self.extent().0
    }

    /// Band width in microns.
    pub fn width(self) -> f64 {
        self.extent().1
    }

    pub fn system(self) -> MagnitudeSystem {
        match self {
            MagnitudeBand::u | MagnitudeBand::g | MagnitudeBand::r | MagnitudeBand::i | MagnitudeBand::z => {
                MagnitudeSystem::AB
            }
            _ => MagnitudeSystem::Vega,
        }
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            MagnitudeBand::u => Some("UV"),
            MagnitudeBand::g => Some("green"),
            MagnitudeBand::r | MagnitudeBand::R => Some("red"),
            MagnitudeBand::i => Some("far red"),
            MagnitudeBand::z => Some("near-infrared"),
            MagnitudeBand::U => Some("ultraviolet"),
            MagnitudeBand::B => Some("blue"),
            MagnitudeBand::V => Some("visual"),
            MagnitudeBand::UC => Some("UCAC"),
            MagnitudeBand::I => Some("infrared"),
            MagnitudeBand::AP => Some("apparent"),
            _ => None,
        }
    }

    /// Looks a band up by its name, which is case sensitive (`g` and `G` differ).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            MagnitudeBand::u => "u",
            MagnitudeBand::g => "g",
            MagnitudeBand::r => "r",
            MagnitudeBand::i => "i",
            MagnitudeBand::z => "z",
            MagnitudeBand::U => "U",
            MagnitudeBand::B => "B",
            MagnitudeBand::V => "V",
            MagnitudeBand::UC => "UC",
            MagnitudeBand::R => "R",
            MagnitudeBand::I => "I",
            MagnitudeBand::Y => "Y",
            MagnitudeBand::J => "J",
            MagnitudeBand::H => "H",
            MagnitudeBand::K => "K",
            MagnitudeBand::L => "L",
            MagnitudeBand::M => "M",
            MagnitudeBand::N => "N",
            MagnitudeBand::Q => "Q",
            MagnitudeBand::AP => "AP",
        }
    }
}

/// A brightness in one band, with an optional uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Magnitude {
    pub band: MagnitudeBand,
    pub value: f64,
    pub error: Option<f64>,
}

impl Magnitude {
    pub fn new(band: MagnitudeBand, value: f64) -> Self {
        Self {
            band,
            value,
            error: None,
        }
    }

    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }
}
