//! gemsched - Gemini scheduling mini-model
//!
//! Domain model for queue scheduling at an observatory: observations composed into
//! AND/OR scheduling groups, rolled up into programs with time accounting, plus a
//! low-precision Sun/Moon toolkit for nightly rise, set and twilight times.

pub mod ids;
pub mod minimodel;
pub mod observatory;
pub mod resource;
pub mod sky;
pub mod units;

pub use ids::{GroupID, ObservationID, ProgramID, UniqueGroupID};
pub use minimodel::{Group, Observation, Program};
pub use resource::{Resource, ResourceRegistry, ResourceType};
