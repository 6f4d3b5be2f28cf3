//! Search path registry: named resolution contexts and their ordered locations.
//!
//! - [`SearchPathRegistry`] owns every context and creates them lazily.
//! - [`ResolutionContext`] holds one ordered list plus an optional read-only
//!   parent that lookups fall through to.
//! - [`Snapshot`] is a lock-free copy of one context's order.

mod adapter;
mod builder;
mod context;
mod search_path_registry;
mod unit;

pub use builder::SearchPathRegistryBuilder;
pub use context::{ContextName, Insertion, Removal, ResolutionContext, Snapshot};
pub use search_path_registry::SearchPathRegistry;
pub use unit::ResolvedUnit;
