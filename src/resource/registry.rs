//! Flyweight registry for [`Resource`] handles.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::error::ResourceError;
use super::resource::{Resource, ResourceType};
use crate::minimodel::Site;

static GLOBAL: Lazy<ResourceRegistry> = Lazy::new(ResourceRegistry::new);

/// Deduplicates resources by id.
///
/// The first lookup of an id fixes its description and type; later lookups
/// return that same instance regardless of the arguments they pass.
///
/// Registries are normally created by the caller and passed to whatever builds
/// observations. [`ResourceRegistry::global`] exists for code that needs one
/// registry for the whole process.
///
/// # Example
///
/// ```ignore
/// use gemsched::resource::{ResourceRegistry, ResourceType};
///
/// let registry = ResourceRegistry::new();
/// let a = registry.lookup("GMOS-N", None, Some(ResourceType::Instrument))?;
/// let b = registry.lookup("GMOS-N", Some("ignored"), None)?;
/// assert!(a.is_same_instance(&b));
/// ```
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: RwLock<HashMap<String, Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static ResourceRegistry {
        &GLOBAL
    }

    /// Returns the canonical resource for `id`, minting it on first use.
    ///
    /// # Errors
    ///
    /// - `EmptyId` if `id` is empty
    /// - `IllegalId` if `id` contains `NONE` in any letter case
    pub fn lookup(
        &self,
        id: &str,
        description: Option<&str>,
        resource_type: Option<ResourceType>,
    ) -> Result<Resource, ResourceError> {
        if id.is_empty() {
            return Err(ResourceError::EmptyId);
        }
        if let Some(existing) = self.resources.read().get(id) {
            return Ok(existing.clone());
        }
        if id.to_uppercase().contains("NONE") {
            return Err(ResourceError::IllegalId(id.to_string()));
        }

        // Another writer may have minted the id between the two locks.
        let mut resources = self.resources.write();
        let resource = resources
            .entry(id.to_string())
            .or_insert_with(|| {
                log::trace!("minting resource {id} ({resource_type:?})");
                Resource::mint(
                    id.to_string(),
                    description.map(str::to_string),
                    resource_type.unwrap_or_default(),
                )
            })
            .clone();
        Ok(resource)
    }

    /// Returns the resource representing a site.
    pub fn lookup_site(&self, site: Site) -> Result<Resource, ResourceError> {
        self.lookup(
            site.resource_id(),
            Some(site.site_name()),
            Some(ResourceType::Site),
        )
    }

    /// Returns the resource for `id` if it has already been minted.
    pub fn get(&self, id: &str) -> Option<Resource> {
        self.resources.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Forgets every resource. Handles already handed out stay valid but will
    /// no longer be the canonical instance for their id.
    pub fn clear(&self) {
        self.resources.write().clear();
    }
}
