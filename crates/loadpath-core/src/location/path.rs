//! Lexical path normalization.

use crate::error::{LoadPathError, Result};
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current working directory and resolve
/// `.` and `..` segments without touching the filesystem.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(LoadPathError::invalid_location("", "path is empty"));
    }

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| LoadPathError::invalid_location_io(path.display().to_string(), e))?;
        cwd.join(path)
    };

    Ok(normalize_lexically(&joined))
}

/// Resolve `.` and `..` in an absolute path. `..` at the root stays at the root.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
