//! Core traits for the eligibility stage.
//!
//! This module defines the Filter trait that allows composable filters to
//! be applied to a borrowed view of the catalog.

use crate::error::Result;
use crate::types::{MediaItem, UserProfile};

/// Core trait for filtering catalog items.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows one pipeline to serve concurrent requests
/// - Filters take and return references into the caller's catalog, so the
///   catalog itself is never copied or mutated
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of items.
    ///
    /// Implementations must keep the relative order of surviving items.
    fn apply<'a>(
        &self,
        items: Vec<&'a MediaItem>,
        profile: &UserProfile,
    ) -> Result<Vec<&'a MediaItem>>;
}
