//! Filter that drops catalog records without an identifier.
//!
//! Upstream catalog snapshots are occasionally partially malformed. Under
//! the lenient item policy those records are skipped so the rest of the
//! request can still be served.

use crate::error::Result;
use crate::traits::Filter;
use crate::types::{MediaItem, UserProfile};
use tracing::warn;

/// Removes items with a blank `media_id`, logging each one.
pub struct WellFormedFilter;

impl Filter for WellFormedFilter {
    fn name(&self) -> &str {
        "WellFormedFilter"
    }

    fn apply<'a>(
        &self,
        items: Vec<&'a MediaItem>,
        profile: &UserProfile,
    ) -> Result<Vec<&'a MediaItem>> {
        let mut kept = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            if item.has_identifier() {
                kept.push(item);
            } else {
                warn!(
                    user_id = %profile.user_id,
                    position,
                    "Skipping media item without identifier"
                );
            }
        }
        Ok(kept)
    }
}
