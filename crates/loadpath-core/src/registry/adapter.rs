//! Location-spelling adapters over the registry operations.
//!
//! These accept any [`IntoLocation`] (text, `Url`, `Path`) and an optional
//! context name, where `None` targets the default context.

use super::context::{Insertion, Removal};
use super::search_path_registry::SearchPathRegistry;
use crate::error::Result;
use crate::location::IntoLocation;

impl SearchPathRegistry {
    pub fn prepend_location(
        &self,
        location: impl IntoLocation,
        context: Option<&str>,
    ) -> Result<Insertion> {
        let location = location.into_location()?;
        Ok(self.context_or_default(context)?.prepend(location))
    }

    pub fn append_location(
        &self,
        location: impl IntoLocation,
        context: Option<&str>,
    ) -> Result<Insertion> {
        let location = location.into_location()?;
        Ok(self.context_or_default(context)?.append(location))
    }

    pub fn remove_location(
        &self,
        location: impl IntoLocation,
        context: Option<&str>,
    ) -> Result<Removal> {
        let location = location.into_location()?;
        Ok(self.context_or_default(context)?.remove(&location))
    }

    /// Normalized identifiers of the context, in search order.
    pub fn list_locations(&self, context: Option<&str>) -> Vec<String> {
        self.snapshot(context).identifiers()
    }
}
