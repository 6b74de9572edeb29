use thiserror::Error;

use super::timeallocation::TimeAccountingCode;
use crate::ids::{GroupID, ProgramID, UniqueGroupID};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("Group {group} must observe a positive number of children")]
    NonPositiveObservationCount { group: GroupID },

    #[error("OR group {group} asks for {number_to_observe} children to be observed but has {children}")]
    TooManyToObserve {
        group: GroupID,
        number_to_observe: usize,
        children: usize,
    },

    #[error("Group {group} has {children} children and an illegal previous value of {previous}")]
    IllegalPrevious {
        group: GroupID,
        previous: usize,
        children: usize,
    },

    #[error("Group {0} is a scheduling group, not an observation group")]
    NotObservationGroup(UniqueGroupID),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Program {program} must have a root group named \"root\", received: \"{found}\"")]
    IllegalRootGroup { program: ProgramID, found: GroupID },

    #[error("Program {program} allocates time to category {category:?} more than once")]
    DuplicateAllocation {
        program: ProgramID,
        category: TimeAccountingCode,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionsError {
    #[error("Conditions mix array and scalar values")]
    MixedShapes,

    #[error("Conditions arrays have different lengths")]
    LengthMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_display() {
        let e = GroupError::NonPositiveObservationCount {
            group: GroupID::new("10"),
        };
        assert_eq!(
            e.to_string(),
            "Group 10 must observe a positive number of children"
        );
    }

    #[test]
    fn too_many_display() {
        let e = GroupError::TooManyToObserve {
            group: GroupID::new("or"),
            number_to_observe: 3,
            children: 2,
        };
        assert_eq!(
            e.to_string(),
            "OR group or asks for 3 children to be observed but has 2"
        );
    }

    #[test]
    fn illegal_previous_display() {
        let e = GroupError::IllegalPrevious {
            group: GroupID::new("10"),
            previous: 4,
            children: 2,
        };
        assert!(e.to_string().contains("illegal previous value of 4"));
    }

    #[test]
    fn not_observation_group_display() {
        let e = GroupError::NotObservationGroup(UniqueGroupID::new("GN-2018B-Q-101:10"));
        assert_eq!(
            e.to_string(),
            "Group GN-2018B-Q-101:10 is a scheduling group, not an observation group"
        );
    }

    #[test]
    fn illegal_root_display() {
        let e = ProgramError::IllegalRootGroup {
            program: ProgramID::new("GN-2018B-Q-101"),
            found: GroupID::new("top"),
        };
        assert_eq!(
            e.to_string(),
            "Program GN-2018B-Q-101 must have a root group named \"root\", received: \"top\""
        );
    }

    #[test]
    fn duplicate_allocation_display() {
        let e = ProgramError::DuplicateAllocation {
            program: ProgramID::new("GN-2018B-Q-101"),
            category: TimeAccountingCode::US,
        };
        assert!(e.to_string().contains("US"));
    }

    #[test]
    fn conditions_errors_differ() {
        assert_ne!(ConditionsError::MixedShapes, ConditionsError::LengthMismatch);
        assert_eq!(
            ConditionsError::MixedShapes.to_string(),
            "Conditions mix array and scalar values"
        );
    }
}
