//! Typed string identifiers for programs, groups and observations.
//!
//! Each identifier is its own type, so comparing a [`GroupID`] with a
//! [`UniqueGroupID`] holding the same text is a compile error rather than a
//! silent `false`.

use std::fmt;

/// Defines a newtype identifier around a `String` and generates:
/// - derives (Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)
/// - `Display`, `AsRef<str>`, `From<&str>`, `From<String>`
/// - `new`, `as_str`, `starts_with`
macro_rules! define_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if this identifier begins with the given text.
            pub fn starts_with(&self, prefix: &str) -> bool {
                self.0.starts_with(prefix)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

define_id_type!(
    /// Identifier of a program, e.g. `GN-2018B-Q-101`.
    ProgramID
);

define_id_type!(
    /// Identifier of a group as given by the observing database.
    ///
    /// Scheduling-group ids are frequently plain integers and are only unique
    /// within their program; see [`UniqueGroupID`].
    GroupID
);

define_id_type!(
    /// Identifier of a group that is unique across all programs.
    UniqueGroupID
);

define_id_type!(
    /// Identifier of an observation, e.g. `GN-2018B-Q-101-1337`.
    ObservationID
);

impl ObservationID {
    /// The program this observation belongs to: everything before the last `-`.
    ///
    /// An id without a separator is its own program id.
    pub fn program_id(&self) -> ProgramID {
        match self.0.rfind('-') {
            Some(idx) => ProgramID::new(&self.0[..idx]),
            None => ProgramID::new(self.0.clone()),
        }
    }

    /// Promotes this id to the unique id of the observation group wrapping it.
    pub fn to_unique_group_id(&self) -> UniqueGroupID {
        UniqueGroupID::new(self.0.clone())
    }
}
