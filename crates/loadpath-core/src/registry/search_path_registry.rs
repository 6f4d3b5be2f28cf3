//! Registry of resolution contexts keyed by name.

use super::builder::SearchPathRegistryBuilder;
use super::context::{ContextName, Insertion, Removal, ResolutionContext, Snapshot};
use crate::config::DuplicatePolicy;
use crate::error::Result;
use crate::location::Location;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Owner of every resolution context in a process.
///
/// Contexts are created on first reference and live as long as the registry.
/// Each context has its own lock, so unrelated contexts never contend; the
/// table lock is only held to find or insert a context.
#[derive(Debug)]
pub struct SearchPathRegistry {
    policy: DuplicatePolicy,
    default: Arc<ResolutionContext>,
    contexts: RwLock<HashMap<ContextName, Arc<ResolutionContext>>>,
}

impl SearchPathRegistry {
    /// Create an empty registry holding only the default context.
    pub fn new(policy: DuplicatePolicy) -> Self {
        let name = ContextName::default_context();
        let default = Arc::new(ResolutionContext::new(name.clone(), None, policy));

        let mut contexts = HashMap::new();
        contexts.insert(name, Arc::clone(&default));

        Self {
            policy,
            default,
            contexts: RwLock::new(contexts),
        }
    }

    /// Create a builder for a registry.
    pub fn builder() -> SearchPathRegistryBuilder {
        SearchPathRegistryBuilder::new()
    }

    /// Registry whose default context is seeded from `$LOADPATH`.
    pub fn from_env() -> Self {
        Self::builder().seed_from_env(true).build()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn default_context(&self) -> Arc<ResolutionContext> {
        Arc::clone(&self.default)
    }

    /// Named context, created empty on first use; the default context when
    /// `name` is `None` or blank. Never fails.
    pub fn resolve_context(&self, name: Option<&str>) -> Arc<ResolutionContext> {
        match name.map(ContextName::new) {
            Some(Ok(name)) => self.get_or_create(name, None),
            Some(Err(_)) | None => self.default_context(),
        }
    }

    /// Named context; fails only when `name` is blank.
    pub fn context(&self, name: &str) -> Result<Arc<ResolutionContext>> {
        Ok(self.get_or_create(ContextName::new(name)?, None))
    }

    /// Named context, or the default one for `None`. `Some` of a blank name
    /// is an error.
    pub fn context_or_default(&self, name: Option<&str>) -> Result<Arc<ResolutionContext>> {
        match name {
            Some(name) => self.context(name),
            None => Ok(self.default_context()),
        }
    }

    /// Like [`context`](Self::context), but a context created by this call
    /// delegates to `parent`.
    ///
    /// A context that already exists keeps the parent it was created with.
    /// Parents are fixed at creation, so delegation chains cannot loop.
    pub fn resolve_child(&self, name: &str, parent: &str) -> Result<Arc<ResolutionContext>> {
        let name = ContextName::new(name)?;
        let parent_name = ContextName::new(parent)?;
        let parent = self.get_or_create(parent_name, None);

        if name.as_str() == parent.name() {
            return Ok(parent);
        }

        let child = self.get_or_create(name, Some(Arc::clone(&parent)));
        let linked = child
            .parent()
            .map(|p| Arc::ptr_eq(p, &parent))
            .unwrap_or(false);
        if !linked {
            warn!(
                "Context '{}' already exists with parent {:?}; requested parent '{}' ignored",
                child.name(),
                child.parent().map(|p| p.name().to_string()),
                parent.name()
            );
        }
        Ok(child)
    }

    fn get_or_create(
        &self,
        name: ContextName,
        parent: Option<Arc<ResolutionContext>>,
    ) -> Arc<ResolutionContext> {
        if let Some(existing) = self.read_contexts().get(&name) {
            return Arc::clone(existing);
        }

        // Another thread may have won the race between the two locks; the
        // entry API keeps whichever instance got there first.
        match self.write_contexts().entry(name) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let context = Arc::new(ResolutionContext::new(
                    entry.key().clone(),
                    parent,
                    self.policy,
                ));
                debug!(
                    "Created resolution context '{}' (parent: {:?})",
                    context.name(),
                    context.parent().map(|p| p.name().to_string())
                );
                Arc::clone(entry.insert(context))
            }
        }
    }

    /// Names of every context created so far, sorted.
    pub fn contexts(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .read_contexts()
            .keys()
            .map(|name| name.as_str().to_string())
            .collect();
        names.sort();
        names
    }

    // ========================================
    // Operations by context name
    // ========================================

    pub fn prepend(&self, context: &str, location: Location) -> Result<Insertion> {
        Ok(self.context(context)?.prepend(location))
    }

    pub fn append(&self, context: &str, location: Location) -> Result<Insertion> {
        Ok(self.context(context)?.append(location))
    }

    pub fn remove(&self, context: &str, location: &Location) -> Result<Removal> {
        Ok(self.context(context)?.remove(location))
    }

    pub fn snapshot(&self, context: Option<&str>) -> Snapshot {
        self.resolve_context(context).snapshot()
    }

    pub fn lookup<P>(&self, context: Option<&str>, predicate: P) -> Option<Location>
    where
        P: FnMut(&Location) -> bool,
    {
        self.resolve_context(context).lookup(predicate)
    }

    fn read_contexts(&self) -> RwLockReadGuard<'_, HashMap<ContextName, Arc<ResolutionContext>>> {
        self.contexts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_contexts(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<ContextName, Arc<ResolutionContext>>> {
        self.contexts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SearchPathRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}
