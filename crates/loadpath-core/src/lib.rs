//! loadpath - runtime-mutable search paths for resolving loadable units.
//!
//! A process keeps one or more named resolution contexts, each an ordered
//! list of [`Location`]s that is searched front to back when a loadable unit
//! (a library, plugin, module or data file) is resolved by name. Entries can
//! be prepended, appended and removed while other threads are resolving.
//!
//! # Example
//!
//! ```
//! use loadpath::{Insertion, SearchPathRegistry};
//!
//! let registry = SearchPathRegistry::builder().build();
//! registry.append_location("https://repo.example.com/libs/", Some("plugins"))?;
//! let inserted = registry.prepend_location("https://mirror.example.com/libs/", Some("plugins"))?;
//! assert_eq!(inserted, Insertion::Inserted);
//!
//! assert_eq!(
//!     registry.list_locations(Some("plugins")),
//!     vec!["https://mirror.example.com/libs/", "https://repo.example.com/libs/"]
//! );
//! # Ok::<(), loadpath::LoadPathError>(())
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod location;
pub mod registry;

// Re-export commonly used types
pub use config::{DuplicatePolicy, RegistryConfig};
pub use error::{LoadPathError, Result};
pub use global::{append_location, list_locations, prepend_location, remove_location};
pub use location::{IntoLocation, Location};
pub use registry::{
    ContextName, Insertion, Removal, ResolutionContext, ResolvedUnit, SearchPathRegistry,
    SearchPathRegistryBuilder, Snapshot,
};
