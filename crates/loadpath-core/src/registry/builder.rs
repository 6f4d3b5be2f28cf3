//! Builder for configuring a SearchPathRegistry.

use super::search_path_registry::SearchPathRegistry;
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::location::Location;
use std::ffi::OsStr;
use tracing::{debug, warn};

/// Builder for configuring a [`SearchPathRegistry`].
///
/// # Example
///
/// ```
/// use loadpath::{DuplicatePolicy, SearchPathRegistry};
///
/// let registry = SearchPathRegistry::builder()
///     .duplicate_policy(DuplicatePolicy::Forbid)
///     .seed_from_env(false)
///     .build();
/// assert!(registry.default_context().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchPathRegistryBuilder {
    duplicate_policy: DuplicatePolicy,
    seed_from_env: bool,
    seeds: Vec<Location>,
}

impl SearchPathRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertion policy shared by every context of the registry.
    ///
    /// Default: [`DuplicatePolicy::Allow`]
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Append the entries of `$LOADPATH` to the default context.
    ///
    /// Entries are platform path lists, as for `PATH`. Entries that cannot
    /// be normalized are skipped with a warning.
    ///
    /// Default: `false`
    pub fn seed_from_env(mut self, enable: bool) -> Self {
        self.seed_from_env = enable;
        self
    }

    /// Append `location` to the default context. Explicit seeds go after
    /// any environment entries.
    pub fn seed(mut self, location: Location) -> Self {
        self.seeds.push(location);
        self
    }

    pub fn build(self) -> SearchPathRegistry {
        let registry = SearchPathRegistry::new(self.duplicate_policy);
        let default = registry.default_context();

        if self.seed_from_env {
            if let Some(raw) = std::env::var_os(RegistryConfig::ENV_VAR) {
                for location in parse_path_list(&raw) {
                    default.append(location);
                }
            }
        }
        for location in self.seeds {
            default.append(location);
        }

        debug!(
            "Built search path registry ({} policy, {} default entries)",
            registry.policy(),
            default.len()
        );
        registry
    }
}

/// Split a platform path list into locations, skipping empty and invalid entries.
fn parse_path_list(raw: &OsStr) -> Vec<Location> {
    std::env::split_paths(raw)
        .filter(|path| !path.as_os_str().is_empty())
        .filter_map(|path| match Location::from_path(&path) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(
                    "Skipping {} entry {}: {}",
                    RegistryConfig::ENV_VAR,
                    path.display(),
                    e
                );
                None
            }
        })
        .collect()
}
