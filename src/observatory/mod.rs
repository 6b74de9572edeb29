//! Observatory-specific knowledge behind a trait.
//!
//! The model asks an [`Observatory`] context which resources are instruments
//! and which of those are near-infrared. The context is passed in explicitly;
//! querying one that has not been configured fails with
//! [`ObservatoryError::NotConfigured`].
//!
//! # Usage Pattern
//!
//! ```ignore
//! let registry = ResourceRegistry::new();
//! let observatory = Observatory::new(GeminiProperties::new(&registry)?);
//! let nir = observation.is_nir(&observatory)?;
//! ```

pub mod gemini;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use qtty::Seconds;
use thiserror::Error;

use crate::minimodel::Wavelength;
use crate::resource::Resource;

pub use gemini::GeminiProperties;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObservatoryError {
    #[error("Observatory properties have not been configured")]
    NotConfigured,
}

/// Observing mode of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationMode {
    Unknown,
    Imaging,
    Longslit,
    Ifu,
    Mos,
    Xd,
    Coron,
    Nrm,
}

/// Facts about an observatory that the model does not hard-code.
pub trait ObservatoryProperties: Debug + Send + Sync {
    /// Returns true if `resource` is one of the observatory's instruments.
    fn is_instrument(&self, resource: &Resource) -> bool;

    /// The near-infrared instruments.
    fn nir_instruments(&self) -> &BTreeSet<Resource>;

    fn is_nir_instrument(&self, resource: &Resource) -> bool {
        self.nir_instruments().contains(resource)
    }

    /// Time to spend on standard stars for a calibration of `cal_length` parts.
    fn determine_standard_time(
        &self,
        resources: &BTreeSet<Resource>,
        wavelengths: &BTreeSet<Wavelength>,
        modes: &BTreeSet<ObservationMode>,
        cal_length: u32,
    ) -> Seconds;
}

/// Holder for the configured [`ObservatoryProperties`].
///
/// Cloning shares the same properties.
#[derive(Debug, Clone, Default)]
pub struct Observatory {
    properties: Option<Arc<dyn ObservatoryProperties>>,
}

impl Observatory {
    pub fn new<P: ObservatoryProperties + 'static>(properties: P) -> Self {
        Self {
            properties: Some(Arc::new(properties)),
        }
    }

    /// A context with nothing installed; every query fails until configured.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Installs or replaces the properties.
    pub fn configure<P: ObservatoryProperties + 'static>(&mut self, properties: P) {
        self.properties = Some(Arc::new(properties));
    }

    pub fn is_configured(&self) -> bool {
        self.properties.is_some()
    }

    pub fn properties(&self) -> Result<&dyn ObservatoryProperties, ObservatoryError> {
        self.properties
            .as_deref()
            .ok_or(ObservatoryError::NotConfigured)
    }

    pub fn is_instrument(&self, resource: &Resource) -> Result<bool, ObservatoryError> {
        Ok(self.properties()?.is_instrument(resource))
    }

    pub fn nir_instruments(&self) -> Result<&BTreeSet<Resource>, ObservatoryError> {
        Ok(self.properties()?.nir_instruments())
    }

    pub fn is_nir_instrument(&self, resource: &Resource) -> Result<bool, ObservatoryError> {
        Ok(self.properties()?.is_nir_instrument(resource))
    }

    pub fn determine_standard_time(
        &self,
        resources: &BTreeSet<Resource>,
        wavelengths: &BTreeSet<Wavelength>,
        modes: &BTreeSet<ObservationMode>,
        cal_length: u32,
    ) -> Result<Seconds, ObservatoryError> {
        Ok(self
            .properties()?
            .determine_standard_time(resources, wavelengths, modes, cal_length))
    }
}
