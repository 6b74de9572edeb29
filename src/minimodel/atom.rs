use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use qtty::Seconds;

use super::qastate::QAState;
use crate::resource::Resource;
use crate::units::ZERO_TIME;

/// A wavelength in microns, totally ordered so it can live in sets.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Wavelength(f64);

impl Wavelength {
    pub fn microns(value: f64) -> Self {
        Wavelength(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Wavelength {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Wavelength {}

impl Ord for Wavelength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Wavelength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Wavelength {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Wavelength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}um", self.0)
    }
}

/// The smallest schedulable set of steps that still yields useful data.
///
/// Atoms are produced by the observing database and only read here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Atom {
    pub id: u32,
    pub exec_time: Seconds,
    pub prog_time: Seconds,
    pub part_time: Seconds,
    pub program_used: Seconds,
    pub partner_used: Seconds,
    pub not_charged: Seconds,
    pub observed: bool,
    pub qa_state: QAState,
    pub guide_state: bool,
    pub resources: BTreeSet<Resource>,
    pub wavelengths: BTreeSet<Wavelength>,
}

impl Atom {
    /// An unobserved atom with zero times and no requirements.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            exec_time: ZERO_TIME,
            prog_time: ZERO_TIME,
            part_time: ZERO_TIME,
            program_used: ZERO_TIME,
            partner_used: ZERO_TIME,
            not_charged: ZERO_TIME,
            observed: false,
            qa_state: QAState::None,
            guide_state: false,
            resources: BTreeSet::new(),
            wavelengths: BTreeSet::new(),
        }
    }

    /// Sets the planned times: execution, program share and partner share.
    pub fn with_times(mut self, exec_time: Seconds, prog_time: Seconds, part_time: Seconds) -> Self {
        self.exec_time = exec_time;
        self.prog_time = prog_time;
        self.part_time = part_time;
        self
    }

    /// Sets the time already charged for this atom.
    pub fn with_used(mut self, program_used: Seconds, partner_used: Seconds, not_charged: Seconds) -> Self {
        self.program_used = program_used;
        self.partner_used = partner_used;
        self.not_charged = not_charged;
        self
    }

    pub fn with_observed(mut self, observed: bool, qa_state: QAState) -> Self {
        self.observed = observed;
        self.qa_state = qa_state;
        self
    }

    pub fn with_resources<I: IntoIterator<Item = Resource>>(mut self, resources: I) -> Self {
        self.resources.extend(resources);
        self
    }

    pub fn with_wavelengths<I: IntoIterator<Item = f64>>(mut self, microns: I) -> Self {
        self.wavelengths.extend(microns.into_iter().map(Wavelength::microns));
        self
    }
}
