//! Named, ordered search scopes.

use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::error::{LoadPathError, Result};
use crate::location::Location;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A validated, non-blank context name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextName(String);

impl ContextName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoadPathError::InvalidContextName(name));
        }
        Ok(Self(name))
    }

    /// Name of the distinguished default context.
    pub(crate) fn default_context() -> Self {
        Self(RegistryConfig::DEFAULT_CONTEXT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a prepend or append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    /// The context forbids duplicates and already held the location.
    AlreadyPresent,
}

/// Outcome of a remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The first matching entry was removed from this index.
    Removed { index: usize },
    NotFound,
}

impl Removal {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed { .. })
    }
}

/// Immutable view of a context's order at one instant.
///
/// Holds no lock; later mutations of the context are not reflected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    entries: Arc<Vec<Location>>,
}

impl Snapshot {
    /// Normalized identifiers in search order.
    pub fn identifiers(&self) -> Vec<String> {
        self.entries.iter().map(|l| l.as_str().to_string()).collect()
    }

    pub fn to_vec(&self) -> Vec<Location> {
        self.entries.as_ref().clone()
    }
}

impl Deref for Snapshot {
    type Target = [Location];

    fn deref(&self) -> &[Location] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

enum End {
    Front,
    Back,
}

/// One named search scope.
///
/// Writers are serialized by a per-context lock. Readers copy the current
/// `Arc` under a brief read lock, and writers replace it copy-on-write, so a
/// snapshot is never observed half-mutated.
#[derive(Debug)]
pub struct ResolutionContext {
    name: ContextName,
    /// Read-only delegate searched after local entries.
    parent: Option<Arc<ResolutionContext>>,
    policy: DuplicatePolicy,
    entries: RwLock<Arc<Vec<Location>>>,
}

impl ResolutionContext {
    pub(crate) fn new(
        name: ContextName,
        parent: Option<Arc<ResolutionContext>>,
        policy: DuplicatePolicy,
    ) -> Self {
        Self {
            name,
            parent,
            policy,
            entries: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn parent(&self) -> Option<&Arc<ResolutionContext>> {
        self.parent.as_ref()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Insert at index 0. Successive prepends end up in reverse call order.
    pub fn prepend(&self, location: Location) -> Insertion {
        self.insert(location, End::Front)
    }

    /// Insert at the tail.
    pub fn append(&self, location: Location) -> Insertion {
        self.insert(location, End::Back)
    }

    fn insert(&self, location: Location, end: End) -> Insertion {
        let mut guard = self.write_entries();

        if !self.policy.allows_duplicates() && guard.contains(&location) {
            debug!(
                "Context '{}' already holds {}, insertion skipped",
                self.name, location
            );
            return Insertion::AlreadyPresent;
        }

        let entries = Arc::make_mut(&mut *guard);
        match end {
            End::Front => {
                debug!("Prepended {} to context '{}'", location, self.name);
                entries.insert(0, location);
            }
            End::Back => {
                debug!("Appended {} to context '{}'", location, self.name);
                entries.push(location);
            }
        }
        Insertion::Inserted
    }

    /// Remove the first entry equal to `location`.
    pub fn remove(&self, location: &Location) -> Removal {
        let mut guard = self.write_entries();

        match guard.iter().position(|entry| entry == location) {
            Some(index) => {
                Arc::make_mut(&mut *guard).remove(index);
                debug!(
                    "Removed {} from context '{}' at index {}",
                    location, self.name, index
                );
                Removal::Removed { index }
            }
            None => Removal::NotFound,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: Arc::clone(&self.read_entries()),
        }
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.read_entries().contains(location)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// This context followed by its parent chain, in search order.
    pub fn ancestry(&self) -> impl Iterator<Item = &ResolutionContext> {
        std::iter::successors(Some(self), |&context| context.parent.as_deref())
    }

    /// First location matching `predicate`, local entries before the parent's.
    ///
    /// Each context is scanned over its own snapshot, so no lock is held
    /// while the predicate runs or while the parent is consulted.
    pub fn lookup<P>(&self, mut predicate: P) -> Option<Location>
    where
        P: FnMut(&Location) -> bool,
    {
        self.ancestry().find_map(|context| {
            let snapshot = context.snapshot();
            snapshot.iter().find(|&location| predicate(location)).cloned()
        })
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, Arc<Vec<Location>>> {
        // Every mutation is a single Vec call, so a poisoned lock still guards
        // a consistent sequence.
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Arc<Vec<Location>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn context(policy: DuplicatePolicy) -> ResolutionContext {
        ResolutionContext::new(ContextName::new("test").unwrap(), None, policy)
    }

    #[test]
    fn test_context_name_rejects_blank() {
        assert!(ContextName::new("").is_err());
        assert!(ContextName::new(" \t").is_err());
        assert_eq!(ContextName::new("plugins").unwrap().as_str(), "plugins");
    }

    #[test]
    fn test_prepend_reverses_call_order() {
        let ctx = context(DuplicatePolicy::Allow);
        ctx.prepend(loc("https://example.com/l1/"));
        ctx.prepend(loc("https://example.com/l2/"));
        assert_eq!(
            ctx.snapshot().identifiers(),
            vec!["https://example.com/l2/", "https://example.com/l1/"]
        );
    }

    #[test]
    fn test_append_keeps_call_order() {
        let ctx = context(DuplicatePolicy::Allow);
        ctx.append(loc("https://example.com/l1/"));
        ctx.append(loc("https://example.com/l2/"));
        assert_eq!(
            ctx.snapshot().identifiers(),
            vec!["https://example.com/l1/", "https://example.com/l2/"]
        );
    }

    #[test]
    fn test_forbid_policy_skips_duplicates() {
        let ctx = context(DuplicatePolicy::Forbid);
        let a = loc("https://example.com/a/");
        let b = loc("https://example.com/b/");

        assert_eq!(ctx.append(a.clone()), Insertion::Inserted);
        assert_eq!(ctx.append(b.clone()), Insertion::Inserted);
        assert_eq!(ctx.prepend(b.clone()), Insertion::AlreadyPresent);
        assert_eq!(ctx.snapshot().to_vec(), vec![a, b]);
    }

    #[test]
    fn test_allow_policy_keeps_duplicates() {
        let ctx = context(DuplicatePolicy::Allow);
        let a = loc("https://example.com/a/");
        ctx.append(a.clone());
        ctx.prepend(a.clone());
        assert_eq!(ctx.len(), 2);

        // Only the first occurrence goes.
        assert_eq!(ctx.remove(&a), Removal::Removed { index: 0 });
        assert_eq!(ctx.snapshot().to_vec(), vec![a]);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let ctx = context(DuplicatePolicy::Allow);
        ctx.append(loc("https://example.com/a/"));
        let before = ctx.snapshot();

        assert_eq!(ctx.remove(&loc("https://example.com/zzz/")), Removal::NotFound);
        assert_eq!(ctx.snapshot(), before);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let ctx = context(DuplicatePolicy::Allow);
        ctx.append(loc("https://example.com/a/"));
        let snap = ctx.snapshot();
        ctx.append(loc("https://example.com/b/"));

        assert_eq!(snap.len(), 1);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_lookup_prefers_local_entries() {
        let parent = Arc::new(context(DuplicatePolicy::Allow));
        parent.append(loc("https://parent.example.com/shared/"));

        let child = ResolutionContext::new(
            ContextName::new("child").unwrap(),
            Some(parent.clone()),
            DuplicatePolicy::Allow,
        );
        child.append(loc("https://child.example.com/shared/"));

        let hit = child.lookup(|l| l.as_str().ends_with("/shared/")).unwrap();
        assert_eq!(hit.as_str(), "https://child.example.com/shared/");
    }

    #[test]
    fn test_lookup_falls_through_to_parent() {
        let parent = Arc::new(context(DuplicatePolicy::Allow));
        parent.append(loc("https://parent.example.com/only-here/"));
        let child = ResolutionContext::new(
            ContextName::new("child").unwrap(),
            Some(parent),
            DuplicatePolicy::Allow,
        );

        let hit = child.lookup(|l| l.as_str().contains("only-here"));
        assert_eq!(
            hit.map(|l| l.to_string()),
            Some("https://parent.example.com/only-here/".to_string())
        );
        assert!(child.lookup(|_| false).is_none());
        assert_eq!(
            child.ancestry().map(|c| c.name()).collect::<Vec<_>>(),
            vec!["child", "test"]
        );
    }
}
