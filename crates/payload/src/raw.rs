//! Loosely-typed wire records.
//!
//! Upstream producers disagree on field names (`user_id` vs `userId`,
//! `interacted_media_ids` vs `interactedBookIds`, ...) and sometimes send
//! numbers as strings. Everything is reconciled here so the engine only ever
//! sees its strict types.
//!
//! Catalog records are read field by field from a `Value`. A record that
//! cannot be used for scoring comes out with a blank id, and the engine's
//! item policy decides whether to skip it or reject the request.

use engine::{EngineError, MediaDetails, MediaItem, UserProfile};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct RawRequest {
    #[serde(alias = "userProfile")]
    pub user_profile: RawProfile,
    #[serde(
        default,
        alias = "availableMedia",
        alias = "media",
        alias = "catalog"
    )]
    pub available_media: Vec<Value>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProfile {
    #[serde(default, alias = "userId", alias = "id")]
    pub user_id: Option<Value>,
    #[serde(
        default,
        alias = "genreScores",
        alias = "genre_preferences",
        alias = "genrePreferences"
    )]
    pub genre_scores: Option<Map<String, Value>>,
    #[serde(
        default,
        alias = "interactedMediaIds",
        alias = "interacted_book_ids",
        alias = "interactedBookIds"
    )]
    pub interacted_media_ids: Option<Vec<Value>>,
    #[serde(default, alias = "totalEngagementScore")]
    pub total_engagement_score: Option<Value>,
}

const MEDIA_ID_KEYS: [&str; 5] = ["media_id", "mediaId", "book_id", "bookId", "id"];
const POPULARITY_KEYS: [&str; 3] = ["popularity_score", "popularityScore", "popularity"];

/// Canonical form of a genre label.
pub(crate) fn normalize_genre(label: &str) -> String {
    label.trim().to_uppercase()
}

/// Identifier as a string. Numbers are accepted; anything else is blank.
fn identifier(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A JSON number or a numeric string. `None` for anything else.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A finite number, or a profile error naming `field`.
fn profile_number(field: &str, value: &Value) -> Result<f64, EngineError> {
    let parsed = number(value).ok_or_else(|| {
        EngineError::invalid_profile(format!("{field} is not a number: {value}"))
    })?;
    if !parsed.is_finite() {
        return Err(EngineError::invalid_profile(format!(
            "{field} is out of range: {value}"
        )));
    }
    Ok(parsed)
}

impl RawProfile {
    pub(crate) fn into_profile(self) -> Result<UserProfile, EngineError> {
        let mut profile = UserProfile::new(identifier(self.user_id.as_ref()));

        for (label, raw_weight) in self.genre_scores.unwrap_or_default() {
            let weight = profile_number(&format!("weight for genre {label}"), &raw_weight)?;
            // Labels that differ only in case or padding collapse onto one genre
            let entry = profile
                .genre_scores
                .entry(normalize_genre(&label))
                .or_insert(0.0);
            *entry += weight;
            if !entry.is_finite() {
                return Err(EngineError::invalid_profile(format!(
                    "weight for genre {label} is out of range after merging case variants"
                )));
            }
        }

        profile.interacted_media_ids = self
            .interacted_media_ids
            .unwrap_or_default()
            .iter()
            .map(|id| identifier(Some(id)))
            .filter(|id| !id.is_empty())
            .collect();

        profile.total_engagement_score = match self.total_engagement_score {
            None | Some(Value::Null) => None,
            Some(raw) => Some(profile_number("total_engagement_score", &raw)?),
        };

        Ok(profile)
    }
}

fn field<'v>(record: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match field(record, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn year(record: &Map<String, Value>) -> Option<i32> {
    let value = number(field(record, &["release_year", "releaseYear"])?)?;
    if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

/// Genre labels; a lone string counts as one label, non-strings are dropped.
fn genres(record: &Map<String, Value>) -> Vec<String> {
    let labels: Vec<&str> = match record.get("genres") {
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(label)) => vec![label.as_str()],
        _ => Vec::new(),
    };
    labels
        .into_iter()
        .map(normalize_genre)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Build a catalog item from one `available_media` entry.
///
/// Display fields are coerced or dropped. A record that is not an object or
/// whose popularity is not a finite number keeps no id.
pub(crate) fn media_item(position: usize, value: &Value) -> MediaItem {
    let Some(record) = value.as_object() else {
        warn!(position, "Catalog entry is not an object");
        return MediaItem::default();
    };

    let mut media_id = identifier(field(record, &MEDIA_ID_KEYS));
    let popularity_score = match field(record, &POPULARITY_KEYS) {
        None => 0.0,
        Some(raw) => match number(raw).filter(|p| p.is_finite()) {
            Some(popularity) => popularity,
            None => {
                warn!(
                    position,
                    media_id = %media_id,
                    "Unusable popularity_score {}, dropping record",
                    raw
                );
                media_id.clear();
                0.0
            }
        },
    };

    MediaItem {
        media_id,
        genres: genres(record),
        popularity_score,
        details: MediaDetails {
            title: text(record, &["title"]),
            description: text(record, &["description"]),
            release_year: year(record),
            media_type: text(record, &["media_type", "mediaType"]),
            cover_url: text(record, &["cover_url", "coverUrl"]),
        },
    }
}
