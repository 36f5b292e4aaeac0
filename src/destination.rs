//! Destination record, draft, and patch types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DestinationId, default_emoji, latitude_in_range, longitude_in_range};

/// Fully materialized, authoritative destination record.
///
/// Serializes with the keys used by the persisted slot and by export files
/// (`id`, `lat`, `lng`, `title`, `description`, `emoji`, `completed`, `dateAdded`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    /// Stable identifier.
    pub id: DestinationId,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// User title, possibly empty.
    #[serde(default)]
    pub title: String,
    /// User description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Marker glyph.
    #[serde(default = "default_emoji")]
    pub emoji: String,
    /// True once the destination has been visited.
    #[serde(default)]
    pub completed: bool,
    /// Creation time, never mutated.
    pub date_added: DateTime<Utc>,
}

impl DestinationRecord {
    /// True when both coordinates are finite and in range.
    pub fn has_valid_coordinates(&self) -> bool {
        latitude_in_range(self.lat) && longitude_in_range(self.lng)
    }
}

/// Create payload used to build a new [`DestinationRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationDraft {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Optional title, empty when omitted.
    pub title: Option<String>,
    /// Optional description, empty when omitted.
    pub description: Option<String>,
    /// Optional emoji, the pin glyph when omitted.
    pub emoji: Option<String>,
    /// Optional completion flag, false when omitted.
    pub completed: Option<bool>,
}

impl DestinationDraft {
    /// Draft for a bare map click at `(lat, lng)`.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            title: None,
            description: None,
            emoji: None,
            completed: None,
        }
    }

    /// Sets the title.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the emoji.
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

/// Sparse patch where each `Some` field overwrites the record value.
///
/// Coordinates, id and creation time are not patchable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DestinationPatch {
    /// Optional replacement title.
    pub title: Option<String>,
    /// Optional replacement description.
    pub description: Option<String>,
    /// Optional replacement emoji.
    pub emoji: Option<String>,
    /// Optional replacement completion flag.
    pub completed: Option<bool>,
}

impl DestinationPatch {
    /// Patch that only sets the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut DestinationRecord) {
        if let Some(v) = &self.title {
            rec.title = v.clone();
        }
        if let Some(v) = &self.description {
            rec.description = v.clone();
        }
        if let Some(v) = &self.emoji {
            rec.emoji = v.clone();
        }
        if let Some(v) = self.completed {
            rec.completed = v;
        }
    }
}
