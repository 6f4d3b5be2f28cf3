//! Resolving loadable units by relative name against the filesystem.

use super::context::ResolutionContext;
use super::search_path_registry::SearchPathRegistry;
use crate::location::Location;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Where a loadable unit was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUnit {
    /// The unit name as requested
    pub unit: String,
    /// Context whose entry matched (the searched context or an ancestor)
    pub context: String,
    /// Search entry that produced the match
    pub location: Location,
    /// Concrete file or directory on disk
    pub path: PathBuf,
}

impl ResolutionContext {
    /// Find `unit` under this context's `file:` locations, then its parent's.
    ///
    /// `unit` is a relative path such as `com/acme/Plugin.class` or
    /// `libfoo.so`. Directory entries are searched by joining `unit` onto
    /// them; a file entry matches only a single-segment unit equal to its
    /// file name. Non-file locations are skipped. Absolute units and units
    /// containing `..` never match.
    pub fn find_unit(&self, unit: &str) -> Option<ResolvedUnit> {
        let relative = relative_unit_path(unit)?;

        for context in self.ancestry() {
            for location in &context.snapshot() {
                if let Some(path) = probe(location, &relative) {
                    debug!(
                        "Resolved unit '{}' to {} via {} in context '{}'",
                        unit,
                        path.display(),
                        location,
                        context.name()
                    );
                    return Some(ResolvedUnit {
                        unit: unit.to_string(),
                        context: context.name().to_string(),
                        location: location.clone(),
                        path,
                    });
                }
            }
        }

        debug!("Unit '{}' not found from context '{}'", unit, self.name());
        None
    }
}

impl SearchPathRegistry {
    /// Find `unit` starting from the named context (default when `None`).
    pub fn find_unit(&self, context: Option<&str>, unit: &str) -> Option<ResolvedUnit> {
        self.resolve_context(context).find_unit(unit)
    }
}

fn relative_unit_path(unit: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(unit).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}

fn probe(location: &Location, unit: &Path) -> Option<PathBuf> {
    let base = location.to_file_path()?;

    if base.is_dir() {
        let candidate = base.join(unit);
        return candidate.exists().then_some(candidate);
    }

    let single_segment = unit.components().count() == 1;
    (single_segment && base.is_file() && base.file_name() == unit.file_name()).then_some(base)
}
