//! Observatory resources and the flyweight registry that mints them.
//!
//! A resource is anything an observation needs in order to be performed: the
//! site, an instrument, a focal-plane unit, a disperser, a filter or a wavefront
//! sensor. Resources are compared constantly while building and querying the
//! group tree, so each id is backed by exactly one canonical instance.
//!
//! # Usage Pattern
//!
//! 1. Create (or share) a [`ResourceRegistry`]
//! 2. Obtain resources with [`ResourceRegistry::lookup`]
//! 3. Compare, hash and collect them freely; equal ids are the same instance

mod error;
mod registry;
mod resource;

pub use error::ResourceError;
pub use registry::ResourceRegistry;
pub use resource::{Resource, ResourceType};
