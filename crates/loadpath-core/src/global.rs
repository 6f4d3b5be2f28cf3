//! Process-wide registry.
//!
//! The registry is created on first use, seeded from `$LOADPATH`, and lives
//! for the rest of the process. Code that wants an isolated registry should
//! build its own with [`SearchPathRegistry::builder`].

use crate::error::Result;
use crate::location::IntoLocation;
use crate::registry::{Insertion, Removal, SearchPathRegistry};
use std::sync::OnceLock;

static REGISTRY: OnceLock<SearchPathRegistry> = OnceLock::new();

/// The process registry.
pub fn registry() -> &'static SearchPathRegistry {
    REGISTRY.get_or_init(SearchPathRegistry::from_env)
}

/// Insert `location` first in `context` (the default context for `None`).
pub fn prepend_location(location: impl IntoLocation, context: Option<&str>) -> Result<Insertion> {
    registry().prepend_location(location, context)
}

/// Insert `location` last in `context` (the default context for `None`).
pub fn append_location(location: impl IntoLocation, context: Option<&str>) -> Result<Insertion> {
    registry().append_location(location, context)
}

/// Remove the first occurrence of `location` from `context`.
pub fn remove_location(location: impl IntoLocation, context: Option<&str>) -> Result<Removal> {
    registry().remove_location(location, context)
}

pub fn list_locations(context: Option<&str>) -> Vec<String> {
    registry().list_locations(context)
}
