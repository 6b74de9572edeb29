//! The scheduling mini-model: observations, groups and programs.
//!
//! Values are built bottom-up by whatever reads the observing database:
//! atoms into [`Observation`]s, observations into [`Group`] trees, a tree into
//! a [`Program`]. After that the structure is read-only; every roll-up is
//! recomputed from the tree on demand.
//!
//! # Usage Pattern
//!
//! ```ignore
//! use gemsched::minimodel::*;
//!
//! let registry = ResourceRegistry::new();
//! let obs = Observation::new(ObservationID::new("GN-2018B-Q-101-1"), Site::GN, &registry)?;
//! let root = Group::new(
//!     GroupID::new(ROOT_GROUP_ID),
//!     ProgramID::new("GN-2018B-Q-101"),
//!     1,
//!     GroupChildren::Groups(vec![Group::observation_group(obs)]),
//!     GroupOption::Anyorder,
//! )?;
//! let program = Program::new(id, ProgramMode::Queue, start, end, root, allocations)?;
//! println!("{}", program.total_used().value());
//! ```

mod atom;
mod constraints;
mod error;
mod group;
mod index;
mod magnitude;
mod observation;
mod program;
mod qastate;
mod semester;
mod site;
mod target;
mod timeallocation;
mod timingwindow;
mod too;


pub use atom::{Atom, Wavelength};
pub use constraints::{
    Bins, CloudCover, Conditions, Constraints, ElevationType, ImageQuality, SkyBackground, Strehl,
    Variant, WaterVapor,
};
pub use error::{ConditionsError, GroupError, ProgramError};
pub use group::{Group, GroupChildren, GroupOption, ROOT_GROUP_ID};
pub use index::GroupIndex;
pub use magnitude::{Magnitude, MagnitudeBand, MagnitudeSystem};
pub use observation::{Observation, ObservationClass, ObservationStatus, Priority, SetupTimeType};
pub use program::{Program, ProgramMode, ProgramType, FUZZY_BOUNDARY};
pub use qastate::QAState;
pub use semester::{Semester, SemesterHalf};
pub use site::{Site, ALL_SITES};
pub use target::{GuideSpeed, Target, TargetKind, TargetTag, TargetType};
pub use timeallocation::{Band, TimeAccountingCode, TimeAllocation, TimeUsed};
pub use timingwindow::TimingWindow;
pub use too::TooType;
