//! The root aggregate of the model.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use qtty::{Days, Second, Seconds};

use super::error::ProgramError;
use super::group::{Group, ROOT_GROUP_ID};
use super::index::GroupIndex;
use super::observation::{Observation, Priority};
use super::semester::Semester;
use super::timeallocation::{Band, TimeAccountingCode, TimeAllocation, TimeUsed};
use super::too::TooType;
use crate::ids::{ObservationID, ProgramID, UniqueGroupID};
use crate::units::sum_durations;

/// Tolerance consumers apply around a program's start and end.
pub const FUZZY_BOUNDARY: Days = Days::new(14.0);

/// Main operational mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgramMode {
    #[default]
    Queue,
    Classical,
    /// Priority visitor: between queue and classical.
    Pv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgramType {
    C,
    Cal,
    DD,
    DS,
    Eng,
    FT,
    LP,
    Q,
    SV,
}

impl ProgramType {
    /// The code used in program ids, e.g. `Q` or `FT`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            ProgramType::C => "C",
            ProgramType::Cal => "CAL",
            ProgramType::DD => "DD",
            ProgramType::DS => "DS",
            ProgramType::Eng => "ENG",
            ProgramType::FT => "FT",
            ProgramType::LP => "LP",
            ProgramType::Q => "Q",
            ProgramType::SV => "SV",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProgramType::C => "Classical",
            ProgramType::Cal => "Calibration",
            ProgramType::DD => "Director's Time",
            ProgramType::DS => "Demo Science",
            ProgramType::Eng => "Engineering",
            ProgramType::FT => "Fast Turnaround",
            ProgramType::LP => "Large Program",
            ProgramType::Q => "Queue",
            ProgramType::SV => "System Verification",
        }
    }

    pub fn is_science(self) -> bool {
        !matches!(self, ProgramType::Cal | ProgramType::Eng)
    }
}

/// A program: one root AND-group plus its time accounting.
///
/// # Invariants
///
/// - the root group's id is [`ROOT_GROUP_ID`]
/// - at most one [`TimeAllocation`] per category
///
/// # Example
///
/// ```ignore
/// let program = Program::new(
///     ProgramID::new("GN-2018B-Q-101"),
///     ProgramMode::Queue,
///     start,
///     end,
///     root_group,
///     vec![TimeAllocation::new(TimeAccountingCode::US, awarded, Seconds::new(0.0))],
/// )?;
/// let group = program.get_group(&UniqueGroupID::new("GN-2018B-Q-101:10"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Program {
    id: ProgramID,
    internal_id: String,
    semester: Option<Semester>,
    band: Option<Band>,
    thesis: bool,
    mode: ProgramMode,
    program_type: Option<ProgramType>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    allocated_time: HashMap<TimeAccountingCode, TimeAllocation>,
    used_time: Vec<TimeUsed>,
    root_group: Group,
    too_type: Option<TooType>,
}

impl Program {
    /// # Errors
    ///
    /// - `IllegalRootGroup` if `root_group` is not named [`ROOT_GROUP_ID`]
    /// - `DuplicateAllocation` if two allocations share a category
    pub fn new(
        id: ProgramID,
        mode: ProgramMode,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        root_group: Group,
        allocated_time: Vec<TimeAllocation>,
    ) -> Result<Self, ProgramError> {
        if root_group.id().as_str() != ROOT_GROUP_ID {
            return Err(ProgramError::IllegalRootGroup {
                program: id,
                found: root_group.id().clone(),
            });
        }

        let mut allocations = HashMap::with_capacity(allocated_time.len());
        for alloc in allocated_time {
            if allocations.insert(alloc.category, alloc).is_some() {
                return Err(ProgramError::DuplicateAllocation {
                    program: id,
                    category: alloc.category,
                });
            }
        }

        log::debug!(
            "built program {} with {} groups and {} observations",
            id,
            root_group.subgroup_ids().len() + 1,
            root_group.observations().len()
        );

        Ok(Self {
            id,
            internal_id: String::new(),
            semester: None,
            band: None,
            thesis: false,
            mode,
            program_type: None,
            start,
            end,
            allocated_time: allocations,
            used_time: Vec::new(),
            root_group,
            too_type: None,
        })
    }

    pub fn with_internal_id(mut self, internal_id: impl Into<String>) -> Self {
        self.internal_id = internal_id.into();
        self
    }

    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    pub fn with_thesis(mut self, thesis: bool) -> Self {
        self.thesis = thesis;
        self
    }

    pub fn with_type(mut self, program_type: ProgramType) -> Self {
        self.program_type = Some(program_type);
        self
    }

    /// Time charged outside the atoms, e.g. reported by the observing database.
    pub fn with_used_time(mut self, used_time: Vec<TimeUsed>) -> Self {
        self.used_time = used_time;
        self
    }

    pub fn with_too_type(mut self, too_type: TooType) -> Self {
        self.too_type = Some(too_type);
        self
    }

    pub fn id(&self) -> &ProgramID {
        &self.id
    }

    pub fn internal_id(&self) -> &str {
        &self.internal_id
    }

    pub fn semester(&self) -> Option<Semester> {
        self.semester
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    pub fn thesis(&self) -> bool {
        self.thesis
    }

    pub fn mode(&self) -> ProgramMode {
        self.mode
    }

    pub fn program_type(&self) -> Option<ProgramType> {
        self.program_type
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn allocated_time(&self) -> impl Iterator<Item = &TimeAllocation> {
        self.allocated_time.values()
    }

    pub fn allocation(&self, category: TimeAccountingCode) -> Option<&TimeAllocation> {
        self.allocated_time.get(&category)
    }

    pub fn used_time(&self) -> &[TimeUsed] {
        &self.used_time
    }

    pub fn root_group(&self) -> &Group {
        &self.root_group
    }

    pub fn too_type(&self) -> Option<TooType> {
        self.too_type
    }

    pub fn program_awarded(&self) -> Seconds {
        sum_durations(self.allocated_time.values().map(|a| a.program_awarded))
    }

    pub fn partner_awarded(&self) -> Seconds {
        sum_durations(self.allocated_time.values().map(|a| a.partner_awarded))
    }

    pub fn total_awarded(&self) -> Seconds {
        sum_durations(self.allocated_time.values().map(TimeAllocation::total_awarded))
    }

    /// Atom-derived program time plus the separately tracked used time.
    pub fn program_used(&self) -> Seconds {
        self.root_group.program_used() + sum_durations(self.used_time.iter().map(|u| u.program_used))
    }

    pub fn partner_used(&self) -> Seconds {
        self.root_group.partner_used() + sum_durations(self.used_time.iter().map(|u| u.partner_used))
    }

    pub fn total_used(&self) -> Seconds {
        self.root_group.total_used() + sum_durations(self.used_time.iter().map(TimeUsed::total_used))
    }

    pub fn not_charged(&self) -> Seconds {
        self.root_group.not_charged() + sum_durations(self.used_time.iter().map(|u| u.not_charged))
    }

    pub fn observations(&self) -> Vec<&Observation> {
        self.root_group.observations()
    }

    /// Depth-first search for a group, the root included. First match wins.
    pub fn get_group(&self, unique_id: &UniqueGroupID) -> Option<&Group> {
        fn find<'a>(group: &'a Group, unique_id: &UniqueGroupID) -> Option<&'a Group> {
            if group.unique_id() == unique_id {
                return Some(group);
            }
            group.subgroups().iter().find_map(|g| find(g, unique_id))
        }
        find(&self.root_group, unique_id)
    }

    /// Depth-first search over the leaves.
    pub fn get_observation(&self, observation_id: &ObservationID) -> Option<&Observation> {
        fn find<'a>(group: &'a Group, observation_id: &ObservationID) -> Option<&'a Observation> {
            match group.observation() {
                Some(obs) => (obs.id() == observation_id).then_some(obs),
                None => group
                    .subgroups()
                    .iter()
                    .find_map(|g| find(g, observation_id)),
            }
        }
        find(&self.root_group, observation_id)
    }

    /// Mean priority over active science and program-calibration observations.
    ///
    /// Falls back to [`Priority::Low`] when there are none.
    pub fn mean_priority(&self) -> f64 {
        let (sum, count) = self
            .observations()
            .into_iter()
            .filter(|o| o.is_science_or_progcal() && !o.is_inactive())
            .fold((0.0, 0usize), |(sum, count), o| (sum + o.priority().value(), count + 1));
        if count == 0 {
            Priority::Low.value()
        } else {
            sum / count as f64
        }
    }

    /// True if `time` lies within `[start, end]` widened by [`FUZZY_BOUNDARY`].
    pub fn within_fuzzy_bounds(&self, time: DateTime<Utc>) -> bool {
        let fuzz = Duration::seconds(FUZZY_BOUNDARY.to::<Second>().value() as i64);
        self.start - fuzz <= time && time <= self.end + fuzz
    }

    /// Builds an index for upward queries over this program's groups.
    pub fn group_index(&self) -> GroupIndex {
        GroupIndex::build(&self.root_group)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program: {}", self.id)?;
        self.root_group.fmt_tree(f, 1)
    }
}
