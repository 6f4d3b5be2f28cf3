//! Conversions from the accepted location spellings.

use super::Location;
use crate::error::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// Anything that can name a location: free text, a structured URL or a
/// local path.
pub trait IntoLocation {
    fn into_location(self) -> Result<Location>;
}

impl IntoLocation for Location {
    fn into_location(self) -> Result<Location> {
        Ok(self)
    }
}

impl IntoLocation for &Location {
    fn into_location(self) -> Result<Location> {
        Ok(self.clone())
    }
}

impl IntoLocation for &str {
    fn into_location(self) -> Result<Location> {
        Location::parse(self)
    }
}

impl IntoLocation for String {
    fn into_location(self) -> Result<Location> {
        Location::parse(&self)
    }
}

impl IntoLocation for &String {
    fn into_location(self) -> Result<Location> {
        Location::parse(self)
    }
}

impl IntoLocation for Url {
    fn into_location(self) -> Result<Location> {
        Location::from_url(self)
    }
}

impl IntoLocation for &Url {
    fn into_location(self) -> Result<Location> {
        Location::from_url(self.clone())
    }
}

impl IntoLocation for &Path {
    fn into_location(self) -> Result<Location> {
        Location::from_path(self)
    }
}

impl IntoLocation for PathBuf {
    fn into_location(self) -> Result<Location> {
        Location::from_path(&self)
    }
}

impl IntoLocation for &PathBuf {
    fn into_location(self) -> Result<Location> {
        Location::from_path(self)
    }
}
