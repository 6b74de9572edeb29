//! AND/OR scheduling groups.
//!
//! A [`Group`] either wraps exactly one [`Observation`] (an *observation
//! group*) or owns an ordered list of sub-groups (a *scheduling group*). Every
//! aggregate below is a match over [`GroupChildren`]: the observation is the
//! base case, the list the recursive case.
//!
//! # AND and OR
//!
//! There is a single node type. A group whose `group_option` is
//! [`GroupOption::None`] and that asks for fewer children than it has is an
//! OR-group; everything else is an AND-group. The two predicates are derived,
//! never stored.
//!
//! # Invariants
//!
//! - `number_to_observe > 0`
//! - an OR-group never asks for more children than it has
//! - `previous`, when set, indexes into the children
//! - `unique_id` is fixed at construction
//!
//! # Example
//!
//! ```ignore
//! let obs_group = Group::observation_group(observation);
//! let scheduling = Group::new(
//!     GroupID::new("10"),
//!     ProgramID::new("GN-2018B-Q-101"),
//!     1,
//!     GroupChildren::Groups(vec![obs_group]),
//!     GroupOption::Anyorder,
//! )?;
//! assert_eq!(scheduling.unique_id().as_str(), "GN-2018B-Q-101:10");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use qtty::Seconds;

use super::atom::Wavelength;
use super::constraints::Constraints;
use super::error::GroupError;
use super::observation::{Observation, ObservationClass, Priority};
use super::site::Site;
use crate::ids::{GroupID, ObservationID, ProgramID, UniqueGroupID};
use crate::resource::Resource;
use crate::units::{sum_durations, ZERO_TIME};

/// Id reserved for a program's root group.
pub const ROOT_GROUP_ID: &str = "root";

/// How the children of a group are to be ordered. `None` marks an OR-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupOption {
    ConsecOrdered,
    ConsecAnyorder,
    NightOrdered,
    NightAnyorder,
    #[default]
    Anyorder,
    /// Used for cadences.
    Custom,
    None,
}

/// The members of a group: one observation, or sub-groups. Never both.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GroupChildren {
    Observation(Box<Observation>),
    Groups(Vec<Group>),
}

impl GroupChildren {
    /// 1 for an observation, the number of sub-groups otherwise.
    pub fn len(&self) -> usize {
        match self {
            GroupChildren::Observation(_) => 1,
            GroupChildren::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node of a program tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Group {
    id: GroupID,
    program_id: ProgramID,
    unique_id: UniqueGroupID,
    group_name: String,
    number_to_observe: usize,
    delay_min: Seconds,
    delay_max: Seconds,
    children: GroupChildren,
    group_option: GroupOption,
    previous: Option<usize>,
    parent_id: Option<GroupID>,
    parent_index: Option<usize>,
}

pub(super) fn make_unique_id(id: &GroupID, program_id: &ProgramID) -> UniqueGroupID {
    if id.starts_with(program_id.as_str()) {
        UniqueGroupID::new(id.as_str())
    } else {
        UniqueGroupID::new(format!("{program_id}:{id}"))
    }
}

impl Group {
    /// Builds a group, checking its cardinality.
    ///
    /// The group name defaults to the id and both cadence delays to zero.
    ///
    /// # Errors
    ///
    /// - `NonPositiveObservationCount` if `number_to_observe` is 0
    /// - `TooManyToObserve` if an OR-group asks for more children than it has
    pub fn new(
        id: GroupID,
        program_id: ProgramID,
        number_to_observe: usize,
        children: GroupChildren,
        group_option: GroupOption,
    ) -> Result<Self, GroupError> {
        if number_to_observe == 0 {
            return Err(GroupError::NonPositiveObservationCount { group: id });
        }
        if group_option == GroupOption::None && number_to_observe > children.len() {
            return Err(GroupError::TooManyToObserve {
                group: id,
                number_to_observe,
                children: children.len(),
            });
        }
        let unique_id = make_unique_id(&id, &program_id);
        Ok(Self {
            group_name: id.to_string(),
            unique_id,
            id,
            program_id,
            number_to_observe,
            delay_min: ZERO_TIME,
            delay_max: ZERO_TIME,
            children,
            group_option,
            previous: None,
            parent_id: None,
            parent_index: None,
        })
    }

    /// Wraps a single observation in an AND-group of one.
    ///
    /// The group takes the observation's id, so its unique id equals
    /// [`Observation::to_unique_group_id`].
    pub fn observation_group(observation: Observation) -> Self {
        let id = GroupID::new(observation.id().as_str());
        let program_id = observation.belongs_to().clone();
        let unique_id = make_unique_id(&id, &program_id);
        Self {
            group_name: id.to_string(),
            unique_id,
            id,
            program_id,
            number_to_observe: 1,
            delay_min: ZERO_TIME,
            delay_max: ZERO_TIME,
            children: GroupChildren::Observation(Box::new(observation)),
            group_option: GroupOption::Anyorder,
            previous: None,
            parent_id: None,
            parent_index: None,
        }
    }

    pub fn with_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Cadence delays between consecutive children.
    pub fn with_delays(mut self, delay_min: Seconds, delay_max: Seconds) -> Self {
        self.delay_min = delay_min;
        self.delay_max = delay_max;
        self
    }

    /// Records where this group sits in its parent. Informational only.
    pub fn with_parent(mut self, parent_id: GroupID, parent_index: usize) -> Self {
        self.parent_id = Some(parent_id);
        self.parent_index = Some(parent_index);
        self
    }

    /// Returns this group with `previous` marking the last observed child.
    ///
    /// # Errors
    ///
    /// `IllegalPrevious` if `previous` is not an index into the children.
    pub fn with_previous(mut self, previous: Option<usize>) -> Result<Self, GroupError> {
        if let Some(index) = previous {
            if index >= self.children.len() {
                return Err(GroupError::IllegalPrevious {
                    group: self.id,
                    previous: index,
                    children: self.children.len(),
                });
            }
        }
        self.previous = previous;
        Ok(self)
    }

    pub fn id(&self) -> &GroupID {
        &self.id
    }

    pub fn program_id(&self) -> &ProgramID {
        &self.program_id
    }

    pub fn unique_id(&self) -> &UniqueGroupID {
        &self.unique_id
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn number_to_observe(&self) -> usize {
        self.number_to_observe
    }

    pub fn delay_min(&self) -> Seconds {
        self.delay_min
    }

    pub fn delay_max(&self) -> Seconds {
        self.delay_max
    }

    pub fn children(&self) -> &GroupChildren {
        &self.children
    }

    pub fn group_option(&self) -> GroupOption {
        self.group_option
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn parent_id(&self) -> Option<&GroupID> {
        self.parent_id.as_ref()
    }

    pub fn parent_index(&self) -> Option<usize> {
        self.parent_index
    }

    /// 1 for an observation group, the number of sub-groups otherwise.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_and_group(&self) -> bool {
        self.group_option != GroupOption::None || self.number_to_observe == self.children.len()
    }

    pub fn is_or_group(&self) -> bool {
        !self.is_and_group()
    }

    pub fn is_observation_group(&self) -> bool {
        matches!(self.children, GroupChildren::Observation(_))
    }

    pub fn is_scheduling_group(&self) -> bool {
        !self.is_observation_group()
    }

    /// The wrapped observation of an observation group.
    pub fn observation(&self) -> Option<&Observation> {
        match &self.children {
            GroupChildren::Observation(obs) => Some(&**obs),
            GroupChildren::Groups(_) => None,
        }
    }

    /// Sub-groups of a scheduling group; empty for an observation group.
    pub fn subgroups(&self) -> &[Group] {
        match &self.children {
            GroupChildren::Observation(_) => &[],
            GroupChildren::Groups(groups) => groups,
        }
    }

    /// # Errors
    ///
    /// `NotObservationGroup` if this is a scheduling group.
    pub fn to_observation_id(&self) -> Result<&ObservationID, GroupError> {
        self.observation()
            .map(Observation::id)
            .ok_or_else(|| GroupError::NotObservationGroup(self.unique_id.clone()))
    }

    /// Ids of every descendant group, excluding this one.
    pub fn subgroup_ids(&self) -> BTreeSet<GroupID> {
        let mut ids = BTreeSet::new();
        self.walk_subgroups(&mut |g| {
            ids.insert(g.id.clone());
        });
        ids
    }

    /// Unique ids of every descendant group, excluding this one.
    pub fn subgroup_unique_ids(&self) -> BTreeSet<UniqueGroupID> {
        let mut ids = BTreeSet::new();
        self.walk_subgroups(&mut |g| {
            ids.insert(g.unique_id.clone());
        });
        ids
    }

    fn walk_subgroups(&self, visit: &mut impl FnMut(&Group)) {
        match &self.children {
            GroupChildren::Observation(_) => {}
            GroupChildren::Groups(groups) => {
                for g in groups {
                    visit(g);
                    g.walk_subgroups(visit);
                }
            }
        }
    }

    /// Leaf observations, depth first.
    pub fn observations(&self) -> Vec<&Observation> {
        let mut out = Vec::new();
        self.collect_observations(&mut out);
        out
    }

    fn collect_observations<'a>(&'a self, out: &mut Vec<&'a Observation>) {
        match &self.children {
            GroupChildren::Observation(obs) => out.push(&**obs),
            GroupChildren::Groups(groups) => {
                for g in groups {
                    g.collect_observations(out);
                }
            }
        }
    }

    pub fn program_observations(&self) -> Vec<&Observation> {
        self.observations_where(|o| o.obs_class().is_program_charged())
    }

    pub fn partner_observations(&self) -> Vec<&Observation> {
        self.observations_where(|o| o.obs_class() == ObservationClass::Partnercal)
    }

    pub fn daycal_observations(&self) -> Vec<&Observation> {
        self.observations_where(|o| o.obs_class() == ObservationClass::Daycal)
    }

    fn observations_where(&self, keep: impl Fn(&Observation) -> bool) -> Vec<&Observation> {
        self.observations().into_iter().filter(|o| keep(o)).collect()
    }

    pub fn sites(&self) -> BTreeSet<Site> {
        match &self.children {
            GroupChildren::Observation(obs) => BTreeSet::from([obs.site()]),
            GroupChildren::Groups(groups) => groups.iter().flat_map(Group::sites).collect(),
        }
    }

    pub fn required_resources(&self) -> BTreeSet<Resource> {
        match &self.children {
            GroupChildren::Observation(obs) => obs.required_resources(),
            GroupChildren::Groups(groups) => {
                groups.iter().flat_map(Group::required_resources).collect()
            }
        }
    }

    pub fn wavelengths(&self) -> BTreeSet<Wavelength> {
        match &self.children {
            GroupChildren::Observation(obs) => obs.wavelengths(),
            GroupChildren::Groups(groups) => groups.iter().flat_map(Group::wavelengths).collect(),
        }
    }

    /// Constraints of every observation, depth first.
    ///
    /// Unlike resources and wavelengths this is a concatenation: repeated
    /// constraints are kept. Observations without constraints contribute
    /// nothing.
    pub fn constraints(&self) -> Vec<&Constraints> {
        match &self.children {
            GroupChildren::Observation(obs) => obs.constraints().into_iter().collect(),
            GroupChildren::Groups(groups) => groups.iter().flat_map(Group::constraints).collect(),
        }
    }

    /// Instruments used anywhere below this group.
    pub fn instruments(&self) -> BTreeSet<Resource> {
        match &self.children {
            GroupChildren::Observation(obs) => obs.instrument().into_iter().collect(),
            GroupChildren::Groups(groups) => groups.iter().flat_map(Group::instruments).collect(),
        }
    }

    /// Highest-precedence class below this AND-group; `None` for OR-groups.
    pub fn obs_class(&self) -> ObservationClass {
        if self.is_or_group() {
            return ObservationClass::None;
        }
        match &self.children {
            GroupChildren::Observation(obs) => obs.obs_class(),
            GroupChildren::Groups(groups) => {
                ObservationClass::select(groups.iter().map(Group::obs_class))
                    .unwrap_or(ObservationClass::None)
            }
        }
    }

    /// Highest priority below this group.
    ///
    /// An observation only contributes its priority when it is science or a
    /// program calibration and is not inactive; otherwise it counts as `Low`.
    pub fn priority(&self) -> Priority {
        match &self.children {
            GroupChildren::Observation(obs) => {
                if obs.is_science_or_progcal() && !obs.is_inactive() {
                    obs.priority()
                } else {
                    Priority::Low
                }
            }
            GroupChildren::Groups(groups) => groups
                .iter()
                .map(Group::priority)
                .max()
                .unwrap_or(Priority::Low),
        }
    }

    fn sum_time<F>(&self, per_observation: &F) -> Seconds
    where
        F: Fn(&Observation) -> Seconds,
    {
        match &self.children {
            GroupChildren::Observation(obs) => per_observation(&**obs),
            GroupChildren::Groups(groups) => {
                sum_durations(groups.iter().map(|g| g.sum_time(per_observation)))
            }
        }
    }

    pub fn exec_time(&self) -> Seconds {
        self.sum_time(&Observation::exec_time)
    }

    pub fn prog_time(&self) -> Seconds {
        self.sum_time(&Observation::prog_time)
    }

    pub fn part_time(&self) -> Seconds {
        self.sum_time(&Observation::part_time)
    }

    pub fn program_used(&self) -> Seconds {
        self.sum_time(&Observation::program_used)
    }

    pub fn partner_used(&self) -> Seconds {
        self.sum_time(&Observation::partner_used)
    }

    pub fn total_used(&self) -> Seconds {
        self.sum_time(&Observation::total_used)
    }

    pub fn not_charged(&self) -> Seconds {
        self.sum_time(&Observation::not_charged)
    }

    pub(super) fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let kind = if self.is_scheduling_group() {
            "Scheduling Group"
        } else {
            "Observation Group"
        };
        writeln!(
            f,
            "{} Group: {}, unique_id={} ({}, num_children={})",
            "-----".repeat(depth),
            self.id,
            self.unique_id,
            kind,
            self.len()
        )?;
        match &self.children {
            GroupChildren::Observation(obs) => {
                writeln!(f, "{} {}", "-----".repeat(depth + 1), obs)?;
                for atom in obs.sequence() {
                    writeln!(f, "{} Atom {}", "-----".repeat(depth + 2), atom.id)?;
                }
                Ok(())
            }
            GroupChildren::Groups(groups) => {
                for g in groups {
                    g.fmt_tree(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 1)
    }
}
