//! The leaf of the program tree.
//!
//! Every time and requirement an observation reports is derived on demand from
//! its atom sequence; nothing is cached.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use qtty::Seconds;

use super::atom::{Atom, Wavelength};
use super::constraints::Constraints;
use super::site::Site;
use super::target::{Target, TargetType};
use super::timeallocation::Band;
use super::too::TooType;
use crate::ids::{ObservationID, ProgramID, UniqueGroupID};
use crate::observatory::{gemini, Observatory, ObservatoryError};
use crate::resource::{Resource, ResourceError, ResourceRegistry, ResourceType};
use crate::units::{sum_durations, ZERO_TIME};

/// Status of an observation in the observing database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationStatus {
    New,
    Included,
    Proposed,
    Approved,
    ForReview,
    OnHold,
    Ready,
    Ongoing,
    Observed,
    Inactive,
    Phase2,
}

/// Observation priority. Ordered, and numeric for averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn value(self) -> f64 {
        self as i32 as f64
    }
}

/// What has to be redone when an observation is started or resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupTimeType {
    None,
    Reacquisition,
    Full,
}

/// Class of an observation, in scheduling precedence order.
///
/// `Science` is the highest precedence and compares lowest. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationClass {
    Science,
    Progcal,
    Partnercal,
    Acq,
    Acqcal,
    Daycal,
    None,
}

impl ObservationClass {
    /// The highest-precedence class among `classes`, if any.
    pub fn select<I: IntoIterator<Item = ObservationClass>>(classes: I) -> Option<ObservationClass> {
        classes.into_iter().min()
    }

    /// Science and program calibrations are charged to the program.
    pub fn is_program_charged(self) -> bool {
        matches!(self, ObservationClass::Science | ObservationClass::Progcal)
    }
}

/// An observation: identity, classification and its atom sequence.
///
/// # Equality
///
/// `PartialEq` compares every field **except `sequence`**. Two observations
/// with different atoms but otherwise identical compare equal. This lets
/// observations be compared before their sequence has been built and is kept
/// on purpose; compare [`Observation::sequence`] explicitly when it matters.
///
/// # Gemini calibration
///
/// [`total_used`](Self::total_used) applies Gemini's IGRINS calibration rule
/// ([`gemini::with_igrins_cal`]) to every observation. The rule keys on the
/// `IGRINS` resource id, so it is inert for observatories without one.
///
/// # Example
///
/// ```ignore
/// let registry = ResourceRegistry::new();
/// let obs = Observation::new(ObservationID::new("GN-2018B-Q-101-1"), Site::GN, &registry)?
///     .with_priority(Priority::High)
///     .with_sequence(vec![atom]);
/// assert_eq!(obs.program_id().as_str(), "GN-2018B-Q-101");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Observation {
    id: ObservationID,
    belongs_to: ProgramID,
    internal_id: String,
    order: u32,
    title: String,
    site: Site,
    site_resource: Resource,
    status: ObservationStatus,
    active: bool,
    priority: Priority,
    setup_time_type: SetupTimeType,
    acq_overhead: Seconds,
    obs_class: ObservationClass,
    targets: Vec<Target>,
    guiding: BTreeMap<Resource, Target>,
    sequence: Vec<Atom>,
    constraints: Option<Constraints>,
    too_type: Option<TooType>,
    band: Option<Band>,
}

impl Observation {
    /// A ready, active, low-priority science observation with an empty sequence.
    ///
    /// The site's resource is resolved through `registry`.
    pub fn new(id: ObservationID, site: Site, registry: &ResourceRegistry) -> Result<Self, ResourceError> {
        let site_resource = registry.lookup_site(site)?;
        Ok(Self {
            belongs_to: id.program_id(),
            id,
            internal_id: String::new(),
            order: 0,
            title: String::new(),
            site,
            site_resource,
            status: ObservationStatus::Ready,
            active: true,
            priority: Priority::Low,
            setup_time_type: SetupTimeType::Full,
            acq_overhead: ZERO_TIME,
            obs_class: ObservationClass::Science,
            targets: Vec::new(),
            guiding: BTreeMap::new(),
            sequence: Vec::new(),
            constraints: None,
            too_type: None,
            band: None,
        })
    }

    pub fn with_belongs_to(mut self, program: ProgramID) -> Self {
        self.belongs_to = program;
        self
    }

    pub fn with_internal_id(mut self, internal_id: impl Into<String>, order: u32) -> Self {
        self.internal_id = internal_id.into();
        self.order = order;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: ObservationStatus, active: bool) -> Self {
        self.status = status;
        self.active = active;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_setup(mut self, setup_time_type: SetupTimeType, acq_overhead: Seconds) -> Self {
        self.setup_time_type = setup_time_type;
        self.acq_overhead = acq_overhead;
        self
    }

    pub fn with_obs_class(mut self, obs_class: ObservationClass) -> Self {
        self.obs_class = obs_class;
        self
    }

    /// Targets in observing-database order; the base target comes first.
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_guiding(mut self, guiding: BTreeMap<Resource, Target>) -> Self {
        self.guiding = guiding;
        self
    }

    pub fn with_sequence(mut self, sequence: Vec<Atom>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_too_type(mut self, too_type: TooType) -> Self {
        self.too_type = Some(too_type);
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    pub fn id(&self) -> &ObservationID {
        &self.id
    }

    pub fn belongs_to(&self) -> &ProgramID {
        &self.belongs_to
    }

    pub fn internal_id(&self) -> &str {
        &self.internal_id
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn status(&self) -> ObservationStatus {
        self.status
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn setup_time_type(&self) -> SetupTimeType {
        self.setup_time_type
    }

    pub fn acq_overhead(&self) -> Seconds {
        self.acq_overhead
    }

    pub fn obs_class(&self) -> ObservationClass {
        self.obs_class
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn guiding(&self) -> &BTreeMap<Resource, Target> {
        &self.guiding
    }

    pub fn sequence(&self) -> &[Atom] {
        &self.sequence
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    pub fn too_type(&self) -> Option<TooType> {
        self.too_type
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    /// The first base target, if any.
    pub fn base_target(&self) -> Option<&Target> {
        self.targets.iter().find(|t| t.target_type == TargetType::Base)
    }

    pub fn to_unique_group_id(&self) -> UniqueGroupID {
        self.id.to_unique_group_id()
    }

    pub fn is_science_or_progcal(&self) -> bool {
        self.obs_class.is_program_charged()
    }

    /// Inactive either by status or by the active flag.
    pub fn is_inactive(&self) -> bool {
        self.status == ObservationStatus::Inactive || !self.active
    }

    /// Observations count as one child so they can stand in for groups.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1
    }

    fn sum_atoms(&self, f: impl Fn(&Atom) -> Seconds) -> Seconds {
        sum_durations(self.sequence.iter().map(f))
    }

    /// Atom execution time plus the acquisition overhead.
    pub fn exec_time(&self) -> Seconds {
        self.sum_atoms(|a| a.exec_time) + self.acq_overhead
    }

    /// Planned program time; includes acquisition for science and program calibrations.
    pub fn prog_time(&self) -> Seconds {
        let acq = if self.is_science_or_progcal() {
            self.acq_overhead
        } else {
            ZERO_TIME
        };
        self.sum_atoms(|a| a.prog_time) + acq
    }

    /// Planned partner time; includes acquisition for partner calibrations.
    pub fn part_time(&self) -> Seconds {
        let acq = if self.obs_class == ObservationClass::Partnercal {
            self.acq_overhead
        } else {
            ZERO_TIME
        };
        self.sum_atoms(|a| a.part_time) + acq
    }

    pub fn program_used(&self) -> Seconds {
        self.sum_atoms(|a| a.program_used)
    }

    pub fn partner_used(&self) -> Seconds {
        self.sum_atoms(|a| a.partner_used)
    }

    pub fn not_charged(&self) -> Seconds {
        self.sum_atoms(|a| a.not_charged)
    }

    /// Program plus partner time used, with instrument calibration overheads.
    ///
    /// Adds [`gemini::IGRINS_CALIBRATION`] when the observation uses IGRINS and
    /// was charged partner time.
    pub fn total_used(&self) -> Seconds {
        gemini::with_igrins_cal(self, self.program_used() + self.partner_used())
    }

    /// Running sum of atom execution times, skipping atoms already observed.
    ///
    /// One entry per atom.
    pub fn cumulative_exec_times(&self) -> Vec<Seconds> {
        self.sequence
            .iter()
            .scan(ZERO_TIME, |acc, atom| {
                if !atom.observed {
                    *acc += atom.exec_time;
                }
                Some(*acc)
            })
            .collect()
    }

    /// The site resource together with every atom's resources.
    pub fn required_resources(&self) -> BTreeSet<Resource> {
        std::iter::once(self.site_resource.clone())
            .chain(self.sequence.iter().flat_map(|a| a.resources.iter().cloned()))
            .collect()
    }

    fn resources_of_type(&self, resource_type: ResourceType) -> impl Iterator<Item = Resource> {
        self.required_resources()
            .into_iter()
            .filter(move |r| r.resource_type() == resource_type)
    }

    /// The instrument, if any. At most one is expected; with several, the
    /// lowest id is returned.
    ///
    /// Only resources typed [`ResourceType::Instrument`] qualify. The registry
    /// keeps the type given at first lookup, so an instrument id first minted
    /// untyped is never reported here.
    pub fn instrument(&self) -> Option<Resource> {
        self.resources_of_type(ResourceType::Instrument).next()
    }

    pub fn fpu(&self) -> Option<Resource> {
        self.resources_of_type(ResourceType::Fpu).next()
    }

    pub fn disperser(&self) -> Option<Resource> {
        self.resources_of_type(ResourceType::Disperser).next()
    }

    pub fn filters(&self) -> BTreeSet<Resource> {
        self.resources_of_type(ResourceType::Filter).collect()
    }

    pub fn wavelengths(&self) -> BTreeSet<Wavelength> {
        self.sequence
            .iter()
            .flat_map(|a| a.wavelengths.iter().copied())
            .collect()
    }

    /// True if the instrument is near-infrared according to the observatory.
    ///
    /// Observations without an [`instrument`](Self::instrument), including
    /// those whose instrument resource was minted untyped, are not NIR.
    ///
    /// # Errors
    ///
    /// `NotConfigured` if the observatory has no properties installed.
    pub fn is_nir(&self, observatory: &Observatory) -> Result<bool, ObservatoryError> {
        let props = observatory.properties()?;
        Ok(self
            .instrument()
            .is_some_and(|instrument| props.is_nir_instrument(&instrument)))
    }
}

impl PartialEq for Observation {
    /// Ignores `sequence`; see the type documentation.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.belongs_to == other.belongs_to
            && self.internal_id == other.internal_id
            && self.order == other.order
            && self.title == other.title
            && self.site == other.site
            && self.status == other.status
            && self.active == other.active
            && self.priority == other.priority
            && self.setup_time_type == other.setup_time_type
            && self.acq_overhead == other.acq_overhead
            && self.obs_class == other.obs_class
            && self.targets == other.targets
            && self.guiding == other.guiding
            && self.constraints == other.constraints
            && self.too_type == other.too_type
            && self.band == other.band
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observation: {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimodel::qastate::QAState;
    use crate::observatory::GeminiProperties;

    fn secs(v: f64) -> Seconds {
        Seconds::new(v)
    }

    fn base(registry: &ResourceRegistry) -> Observation {
        Observation::new(ObservationID::new("GN-2018B-Q-101-7"), Site::GN, registry).unwrap()
    }

    #[test]
    fn belongs_to_program_from_id() {
        let registry = ResourceRegistry::new();
        assert_eq!(base(&registry).belongs_to().as_str(), "GN-2018B-Q-101");
    }

    #[test]
    fn acquisition_charged_to_program_for_science() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry)
            .with_setup(SetupTimeType::Full, secs(600.0))
            .with_sequence(vec![
                Atom::new(0).with_times(secs(100.0), secs(80.0), secs(20.0)),
                Atom::new(1).with_times(secs(50.0), secs(50.0), secs(0.0)),
            ]);
        assert_eq!(obs.exec_time(), secs(750.0));
        assert_eq!(obs.prog_time(), secs(730.0));
        assert_eq!(obs.part_time(), secs(20.0));
    }

    #[test]
    fn acquisition_charged_to_partner_for_partnercal() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry)
            .with_obs_class(ObservationClass::Partnercal)
            .with_setup(SetupTimeType::Full, secs(300.0))
            .with_sequence(vec![Atom::new(0).with_times(secs(100.0), secs(0.0), secs(100.0))]);
        assert_eq!(obs.prog_time(), secs(0.0));
        assert_eq!(obs.part_time(), secs(400.0));
    }

    #[test]
    fn acquisition_not_charged_for_daycal() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry)
            .with_obs_class(ObservationClass::Daycal)
            .with_setup(SetupTimeType::Full, secs(300.0));
        assert_eq!(obs.prog_time(), ZERO_TIME);
        assert_eq!(obs.part_time(), ZERO_TIME);
        assert_eq!(obs.exec_time(), secs(300.0));
    }

    #[test]
    fn used_times_sum_atoms() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry).with_sequence(vec![
            Atom::new(0).with_used(secs(10.0), secs(2.0), secs(1.0)),
            Atom::new(1).with_used(secs(5.0), secs(3.0), secs(4.0)),
        ]);
        assert_eq!(obs.program_used(), secs(15.0));
        assert_eq!(obs.partner_used(), secs(5.0));
        assert_eq!(obs.not_charged(), secs(5.0));
        assert_eq!(obs.total_used(), secs(20.0));
    }

    #[test]
    fn igrins_calibration_added_when_partner_time_used() {
        let registry = ResourceRegistry::new();
        let igrins = registry
            .lookup("IGRINS", None, Some(ResourceType::Instrument))
            .unwrap();
        let obs = base(&registry).with_sequence(vec![Atom::new(0)
            .with_used(secs(100.0), secs(50.0), secs(0.0))
            .with_resources([igrins.clone()])]);
        assert_eq!(obs.total_used(), secs(150.0 + 600.0));

        let program_only = base(&registry).with_sequence(vec![Atom::new(0)
            .with_used(secs(100.0), secs(0.0), secs(0.0))
            .with_resources([igrins])]);
        assert_eq!(program_only.total_used(), secs(100.0));
    }

    #[test]
    fn cumulative_exec_times_skip_observed() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry).with_sequence(vec![
            Atom::new(0)
                .with_times(secs(10.0), ZERO_TIME, ZERO_TIME)
                .with_observed(true, QAState::Pass),
            Atom::new(1).with_times(secs(20.0), ZERO_TIME, ZERO_TIME),
            Atom::new(2).with_times(secs(30.0), ZERO_TIME, ZERO_TIME),
        ]);
        assert_eq!(
            obs.cumulative_exec_times(),
            vec![secs(0.0), secs(20.0), secs(50.0)]
        );
    }

    #[test]
    fn required_resources_include_site() {
        let registry = ResourceRegistry::new();
        let gmos = registry
            .lookup("GMOS-N", None, Some(ResourceType::Instrument))
            .unwrap();
        let fpu = registry
            .lookup("1.0arcsec", None, Some(ResourceType::Fpu))
            .unwrap();
        let g = registry.lookup("g_G0301", None, Some(ResourceType::Filter)).unwrap();
        let r = registry.lookup("r_G0303", None, Some(ResourceType::Filter)).unwrap();
        let obs = base(&registry).with_sequence(vec![
            Atom::new(0).with_resources([gmos.clone(), fpu.clone(), g.clone()]),
            Atom::new(1).with_resources([gmos.clone(), r.clone()]),
        ]);
        let resources = obs.required_resources();
        assert_eq!(resources.len(), 5);
        assert!(resources.contains(&registry.lookup_site(Site::GN).unwrap()));
        assert_eq!(obs.instrument(), Some(gmos));
        assert_eq!(obs.fpu(), Some(fpu));
        assert_eq!(obs.disperser(), None);
        assert_eq!(obs.filters(), BTreeSet::from([g, r]));
    }

    #[test]
    fn wavelengths_union_over_atoms() {
        let registry = ResourceRegistry::new();
        let obs = base(&registry).with_sequence(vec![
            Atom::new(0).with_wavelengths([0.47, 0.62]),
            Atom::new(1).with_wavelengths([0.62, 2.2]),
        ]);
        let w: Vec<f64> = obs.wavelengths().iter().map(Wavelength::value).collect();
        assert_eq!(w, vec![0.47, 0.62, 2.2]);
    }

    #[test]
    fn equality_ignores_sequence() {
        let registry = ResourceRegistry::new();
        let a = base(&registry);
        let b = base(&registry).with_sequence(vec![Atom::new(0).with_times(secs(1.0), secs(1.0), ZERO_TIME)]);
        assert_eq!(a, b);
        assert_ne!(a, base(&registry).with_priority(Priority::High));
    }

    #[test]
    fn inactive_by_status_or_flag() {
        let registry = ResourceRegistry::new();
        assert!(!base(&registry).is_inactive());
        assert!(base(&registry)
            .with_status(ObservationStatus::Inactive, true)
            .is_inactive());
        assert!(base(&registry)
            .with_status(ObservationStatus::Ready, false)
            .is_inactive());
    }

    #[test]
    fn base_target_is_first_base() {
        use qtty::Degrees;
        let registry = ResourceRegistry::new();
        let obs = base(&registry).with_targets(vec![
            Target::sidereal("gs", TargetType::Guidestar, Degrees::new(1.0), Degrees::new(2.0)),
            Target::sidereal("M31", TargetType::Base, Degrees::new(10.68), Degrees::new(41.27)),
        ]);
        assert_eq!(obs.base_target().map(|t| t.name.as_str()), Some("M31"));
    }

    #[test]
    fn nir_needs_a_configured_observatory() {
        let registry = ResourceRegistry::new();
        let niri = registry.lookup("NIRI", None, Some(ResourceType::Instrument)).unwrap();
        let obs = base(&registry).with_sequence(vec![Atom::new(0).with_resources([niri])]);
        assert_eq!(
            obs.is_nir(&Observatory::unconfigured()),
            Err(ObservatoryError::NotConfigured)
        );
    }

    #[test]
    fn nir_follows_the_instrument() {
        let registry = ResourceRegistry::new();
        let observatory = Observatory::new(GeminiProperties::new(&registry).unwrap());
        let niri = registry.lookup("NIRI", None, Some(ResourceType::Instrument)).unwrap();
        let gmos = registry.lookup("GMOS-N", None, Some(ResourceType::Instrument)).unwrap();

        let nir = base(&registry).with_sequence(vec![Atom::new(0).with_resources([niri])]);
        let optical = base(&registry).with_sequence(vec![Atom::new(0).with_resources([gmos])]);
        assert_eq!(nir.is_nir(&observatory), Ok(true));
        assert_eq!(optical.is_nir(&observatory), Ok(false));
        assert_eq!(base(&registry).is_nir(&observatory), Ok(false));
    }

    #[test]
    fn untyped_instrument_is_not_nir() {
        let registry = ResourceRegistry::new();
        let untyped = registry.lookup("NIRI", None, None).unwrap();
        let observatory = Observatory::new(GeminiProperties::new(&registry).unwrap());
        let obs = base(&registry).with_sequence(vec![Atom::new(0).with_resources([untyped])]);
        assert_eq!(obs.instrument(), None);
        assert_eq!(obs.is_nir(&observatory), Ok(false));
    }

    #[test]
    fn class_selection_prefers_science() {
        assert_eq!(
            ObservationClass::select([ObservationClass::Daycal, ObservationClass::Science]),
            Some(ObservationClass::Science)
        );
        assert!(Priority::High > Priority::Medium);
        assert_eq!(Priority::Medium.value(), 2.0);
    }
}
