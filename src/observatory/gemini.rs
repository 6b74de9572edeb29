//! Gemini's instrument catalogue and calibration rules.

use std::collections::BTreeSet;

use qtty::{Hours, Second, Seconds};

use super::{ObservationMode, ObservatoryProperties};
use crate::minimodel::{Observation, Wavelength};
use crate::resource::{Resource, ResourceError, ResourceRegistry, ResourceType};
use crate::units::ZERO_TIME;

/// Calibration charged to IGRINS observations that used partner time.
pub const IGRINS_CALIBRATION: Seconds = Seconds::new(600.0);

/// Longest wavelength, in microns, for the short standard-star cadence.
const STANDARD_WAVELENGTH_LIMIT: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Flamingos2,
    Nifs,
    Niri,
    Igrins,
    GmosS,
    GmosN,
    Gnirs,
    Gpi,
    Gsaoi,
}

impl Instrument {
    pub const ALL: [Instrument; 9] = [
        Instrument::Flamingos2,
        Instrument::Nifs,
        Instrument::Niri,
        Instrument::Igrins,
        Instrument::GmosS,
        Instrument::GmosN,
        Instrument::Gnirs,
        Instrument::Gpi,
        Instrument::Gsaoi,
    ];

    pub const NIR: [Instrument; 6] = [
        Instrument::Flamingos2,
        Instrument::Gnirs,
        Instrument::Nifs,
        Instrument::Niri,
        Instrument::Igrins,
        Instrument::Gsaoi,
    ];

    /// Instruments with a standard-star calibration programme.
    pub const STANDARD: [Instrument; 4] = [
        Instrument::Flamingos2,
        Instrument::Gnirs,
        Instrument::Nifs,
        Instrument::Igrins,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Instrument::Flamingos2 => "Flamingos2",
            Instrument::Nifs => "NIFS",
            Instrument::Niri => "NIRI",
            Instrument::Igrins => "IGRINS",
            Instrument::GmosS => "GMOS-S",
            Instrument::GmosN => "GMOS-N",
            Instrument::Gnirs => "GNIRS",
            Instrument::Gpi => "GPI",
            Instrument::Gsaoi => "GSAOI",
        }
    }
}

fn lookup_all(
    registry: &ResourceRegistry,
    instruments: &[Instrument],
) -> Result<BTreeSet<Resource>, ResourceError> {
    instruments
        .iter()
        .map(|i| registry.lookup(i.id(), None, Some(ResourceType::Instrument)))
        .collect()
}

/// [`ObservatoryProperties`] for Gemini North and South.
#[derive(Debug, Clone)]
pub struct GeminiProperties {
    nir: BTreeSet<Resource>,
    standard: BTreeSet<Resource>,
}

impl GeminiProperties {
    /// Resolves Gemini's instruments through `registry`.
    ///
    /// The registry keeps the first type given for an id. An instrument id
    /// already minted without [`ResourceType::Instrument`] keeps its old type,
    /// and observations using it report no instrument.
    pub fn new(registry: &ResourceRegistry) -> Result<Self, ResourceError> {
        Ok(Self {
            nir: lookup_all(registry, &Instrument::NIR)?,
            standard: lookup_all(registry, &Instrument::STANDARD)?,
        })
    }
}

impl ObservatoryProperties for GeminiProperties {
    /// Matches by substring, so configuration-specific ids such as
    /// `GMOS-N-IFU` count as the instrument.
    fn is_instrument(&self, resource: &Resource) -> bool {
        Instrument::ALL.iter().any(|i| resource.id().contains(i.id()))
    }

    fn nir_instruments(&self) -> &BTreeSet<Resource> {
        &self.nir
    }

    fn determine_standard_time(
        &self,
        resources: &BTreeSet<Resource>,
        wavelengths: &BTreeSet<Wavelength>,
        modes: &BTreeSet<ObservationMode>,
        cal_length: u32,
    ) -> Seconds {
        if cal_length <= 1 {
            return ZERO_TIME;
        }
        let hours = if resources.iter().any(|r| self.standard.contains(r)) {
            if wavelengths.iter().all(|w| w.value() <= STANDARD_WAVELENGTH_LIMIT) {
                1.5
            } else {
                1.0
            }
        } else if modes.contains(&ObservationMode::Imaging) {
            2.0
        } else {
            0.0
        };
        Hours::new(hours).to::<Second>()
    }
}

/// Adds the IGRINS calibration to `total_used` when the observation uses
/// IGRINS and has been charged partner time.
pub fn with_igrins_cal(observation: &Observation, total_used: Seconds) -> Seconds {
    let uses_igrins = observation
        .required_resources()
        .iter()
        .any(|r| r.id() == Instrument::Igrins.id());
    if uses_igrins && observation.partner_used() > ZERO_TIME {
        total_used + IGRINS_CALIBRATION
    } else {
        total_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn instrument(registry: &ResourceRegistry, id: &str) -> Resource {
        registry
            .lookup(id, None, Some(ResourceType::Instrument))
            .unwrap()
    }

    #[test]
    fn instruments_match_by_substring() {
        let registry = ResourceRegistry::new();
        let props = GeminiProperties::new(&registry).unwrap();
        assert!(props.is_instrument(&instrument(&registry, "GMOS-N")));
        assert!(props.is_instrument(&instrument(&registry, "GMOS-S-IFU")));
        assert!(!props.is_instrument(&registry.lookup("PWFS2", None, None).unwrap()));
    }

    #[test]
    fn nir_set() {
        let registry = ResourceRegistry::new();
        let props = GeminiProperties::new(&registry).unwrap();
        assert_eq!(props.nir_instruments().len(), 6);
        assert!(props.is_nir_instrument(&instrument(&registry, "GNIRS")));
        assert!(!props.is_nir_instrument(&instrument(&registry, "GMOS-N")));
    }

    #[test]
    fn standard_time_for_short_wavelength_spectroscopy() {
        let registry = ResourceRegistry::new();
        let props = GeminiProperties::new(&registry).unwrap();
        let resources = BTreeSet::from([instrument(&registry, "GNIRS")]);
        let waves: BTreeSet<Wavelength> = [1.2, 2.2].into_iter().map(Wavelength::microns).collect();
        let t = props.determine_standard_time(&resources, &waves, &BTreeSet::new(), 2);
        assert_abs_diff_eq!(t.value(), 5400.0, epsilon = 1e-9);

        let long: BTreeSet<Wavelength> = [3.5].into_iter().map(Wavelength::microns).collect();
        let t = props.determine_standard_time(&resources, &long, &BTreeSet::new(), 2);
        assert_abs_diff_eq!(t.value(), 3600.0, epsilon = 1e-9);
    }

    #[test]
    fn standard_time_for_imaging() {
        let registry = ResourceRegistry::new();
        let props = GeminiProperties::new(&registry).unwrap();
        let resources = BTreeSet::from([instrument(&registry, "GMOS-N")]);
        let modes = BTreeSet::from([ObservationMode::Imaging]);
        let t = props.determine_standard_time(&resources, &BTreeSet::new(), &modes, 3);
        assert_abs_diff_eq!(t.value(), 7200.0, epsilon = 1e-9);
        let none = props.determine_standard_time(&resources, &BTreeSet::new(), &BTreeSet::new(), 3);
        assert_eq!(none, ZERO_TIME);
    }

    #[test]
    fn igrins_calibration_keys_on_resource_id() {
        use crate::ids::ObservationID;
        use crate::minimodel::{Atom, Site};

        let registry = ResourceRegistry::new();
        let igrins = registry.lookup("IGRINS", None, None).unwrap();
        let obs = Observation::new(ObservationID::new("GS-2023A-Q-5-2"), Site::GS, &registry)
            .unwrap()
            .with_sequence(vec![Atom::new(0)
                .with_used(Seconds::new(200.0), Seconds::new(30.0), ZERO_TIME)
                .with_resources([igrins])]);
        assert_eq!(obs.instrument(), None);
        assert_eq!(with_igrins_cal(&obs, Seconds::new(230.0)), Seconds::new(830.0));
        assert_eq!(obs.total_used(), Seconds::new(830.0));

        let plain = Observation::new(ObservationID::new("GS-2023A-Q-5-3"), Site::GS, &registry)
            .unwrap()
            .with_sequence(vec![Atom::new(0).with_used(Seconds::new(200.0), Seconds::new(30.0), ZERO_TIME)]);
        assert_eq!(plain.total_used(), Seconds::new(230.0));
    }

    #[test]
    fn single_calibration_needs_no_standard() {
        let registry = ResourceRegistry::new();
        let props = GeminiProperties::new(&registry).unwrap();
        let resources = BTreeSet::from([instrument(&registry, "NIFS")]);
        let t = props.determine_standard_time(&resources, &BTreeSet::new(), &BTreeSet::new(), 1);
        assert_eq!(t, ZERO_TIME);
    }
}
