//! Filter to remove media the user has already interacted with.
//!
//! This is the eligibility stage proper: there's no point in recommending
//! something the user already consumed.

use crate::error::Result;
use crate::traits::Filter;
use crate::types::{MediaItem, UserProfile};

/// Removes items whose id is in `UserProfile::interacted_media_ids`.
///
/// ## Algorithm
/// Uses the HashSet on the profile for O(1) lookups. An empty exclusion set
/// returns the input untouched.
pub struct AlreadyInteractedFilter;

impl Filter for AlreadyInteractedFilter {
    fn name(&self) -> &str {
        "AlreadyInteractedFilter"
    }

    fn apply<'a>(
        &self,
        items: Vec<&'a MediaItem>,
        profile: &UserProfile,
    ) -> Result<Vec<&'a MediaItem>> {
        if profile.interacted_media_ids.is_empty() {
            return Ok(items);
        }
        let filtered: Vec<&MediaItem> = items
            .into_iter()
            .filter(|item| !profile.interacted_media_ids.contains(&item.media_id))
            .collect();
        Ok(filtered)
    }
}
