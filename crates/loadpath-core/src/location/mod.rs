//! Normalized search-path locations.
//!
//! A [`Location`] is always an absolute, hierarchical URL. Local paths become
//! `file:` URLs with `.` and `..` resolved when the location is built, so two
//! spellings of the same place compare equal no matter which working
//! directory was current when they were compared.

mod convert;
mod path;

pub use convert::IntoLocation;

use crate::error::{LoadPathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// One candidate source for loadable units.
///
/// Equality and hashing use the normalized URL, never the input spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    url: Url,
}

impl Location {
    /// Interpret free text as a location.
    ///
    /// The text is tried as a URL first. When it does not parse, names a
    /// single-letter scheme (a Windows drive such as `C:\lib`) or is not
    /// hierarchical (`foo:bar`), it is read as a local path instead.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(LoadPathError::invalid_location(text, "location is empty"));
        }

        match Url::parse(text) {
            Ok(url) if is_structured(&url) => Ok(Self { url }),
            _ => Self::from_path(Path::new(text)),
        }
    }

    /// Build a location from a structured URL.
    pub fn from_url(url: Url) -> Result<Self> {
        if !is_structured(&url) {
            return Err(LoadPathError::invalid_location(
                url.as_str(),
                "URL has no hierarchical path",
            ));
        }
        Ok(Self { url })
    }

    /// Build a location from a local filesystem path.
    ///
    /// Relative paths are resolved against the current working directory.
    /// An existing directory gets a trailing slash in its URL. This is
    /// decided when the location is built: a path added before its directory
    /// exists and removed by the same spelling afterwards no longer compares
    /// equal, and the remove reports `NotFound`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let absolute = path::absolutize(path)?;
        let url = if absolute.is_dir() {
            Url::from_directory_path(&absolute)
        } else {
            Url::from_file_path(&absolute)
        }
        .map_err(|()| {
            LoadPathError::invalid_location(
                path.display().to_string(),
                "path cannot be expressed as a file URL",
            )
        })?;

        Ok(Self { url })
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn into_url(self) -> Url {
        self.url
    }

    /// Whether this location points at the local filesystem.
    pub fn is_file(&self) -> bool {
        self.url.scheme() == "file"
    }

    /// Whether this location was recorded as a directory (trailing slash).
    pub fn is_directory(&self) -> bool {
        self.url.path().ends_with('/')
    }

    /// Local path for `file:` locations.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if !self.is_file() {
            return None;
        }
        self.url.to_file_path().ok()
    }
}

/// Hierarchical URL with a real scheme. Single-letter schemes are drive letters.
fn is_structured(url: &Url) -> bool {
    !url.cannot_be_a_base() && url.scheme().len() > 1
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl FromStr for Location {
    type Err = LoadPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Location {
    type Error = LoadPathError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.url.into()
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
