//! The resource handle and its type tag.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The kind of an observatory resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceType {
    #[default]
    None,
    Site,
    Wfs,
    Instrument,
    Fpu,
    Disperser,
    Filter,
}

#[derive(Debug)]
struct ResourceData {
    id: String,
    description: Option<String>,
    resource_type: ResourceType,
}

/// A canonical, shared observatory resource.
///
/// `Resource` is a cheap-to-clone handle. It can only be obtained from a
/// [`ResourceRegistry`](super::ResourceRegistry), which guarantees that every
/// handle for a given id points at the same instance. Equality, ordering and
/// hashing use the id alone.
///
/// # Invariants
///
/// - `id()` is non-empty and never contains `NONE` (case-insensitive)
/// - two handles with equal ids are the same instance (`is_same_instance`)
#[derive(Clone)]
pub struct Resource(Arc<ResourceData>);

impl Resource {
    /// Only the registry mints resources.
    pub(super) fn mint(
        id: String,
        description: Option<String>,
        resource_type: ResourceType,
    ) -> Self {
        Resource(Arc::new(ResourceData {
            id,
            description,
            resource_type,
        }))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    pub fn resource_type(&self) -> ResourceType {
        self.0.resource_type
    }

    /// Returns true if both handles share one allocation.
    pub fn is_same_instance(&self, other: &Resource) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_instance(other) || self.0.id == other.0.id
    }
}

impl Eq for Resource {}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource(id='{}', type={:?})", self.0.id, self.0.resource_type)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.id)
    }
}

/// Resources serialize as their id; deserializing needs a registry.
#[cfg(feature = "serde")]
impl serde::Serialize for Resource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.id)
    }
}
