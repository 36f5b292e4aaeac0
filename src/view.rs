//! What the map and list views read, and what they send back.
//!
//! Views never keep their own copy of the collection. They are handed a
//! snapshot slice plus its revision and raise [`Intent`]s for the planner.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    destination::{DestinationPatch, DestinationRecord},
    types::{DestinationId, Revision},
};

/// Marker label for a destination without a title.
pub const MARKER_FALLBACK_TITLE: &str = "New Location";
/// List label for a destination without a title.
pub const LIST_FALLBACK_TITLE: &str = "Untitled Location";

/// User action raised by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Map surface clicked at a point.
    Add { lat: f64, lng: f64 },
    /// Edit form saved.
    Edit { id: DestinationId, fields: EditFields },
    /// Complete / undo pressed.
    Toggle { id: DestinationId },
    Delete { id: DestinationId },
    /// Parsed import file.
    Import { records: Vec<DestinationRecord> },
}

/// Fields collected by the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFields {
    pub title: String,
    pub description: String,
    pub emoji: String,
}

impl EditFields {
    /// Form contents pre-filled from `rec`.
    pub fn from_record(rec: &DestinationRecord) -> Self {
        Self {
            title: rec.title.clone(),
            description: rec.description.clone(),
            emoji: rec.emoji.clone(),
        }
    }
}

impl From<EditFields> for DestinationPatch {
    fn from(fields: EditFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            emoji: Some(fields.emoji),
            completed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: DestinationId,
    pub lat: f64,
    pub lng: f64,
    pub emoji: String,
    pub label: String,
    pub completed: bool,
    /// Completed destinations cannot be edited.
    pub editable: bool,
}

impl Marker {
    pub fn of(rec: &DestinationRecord) -> Self {
        Self {
            id: rec.id.clone(),
            lat: rec.lat,
            lng: rec.lng,
            emoji: rec.emoji.clone(),
            label: label_or(&rec.title, MARKER_FALLBACK_TITLE),
            completed: rec.completed,
            editable: !rec.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: DestinationId,
    pub emoji: String,
    pub label: String,
    pub description: Option<String>,
    pub completed: bool,
    pub editable: bool,
    pub date_added: DateTime<Utc>,
}

impl ListEntry {
    pub fn of(rec: &DestinationRecord) -> Self {
        Self {
            id: rec.id.clone(),
            emoji: rec.emoji.clone(),
            label: label_or(&rec.title, LIST_FALLBACK_TITLE),
            description: (!rec.description.is_empty()).then(|| rec.description.clone()),
            completed: rec.completed,
            editable: !rec.completed,
            date_added: rec.date_added,
        }
    }
}

pub fn markers(records: &[DestinationRecord]) -> Vec<Marker> {
    records.iter().map(Marker::of).collect()
}

pub fn list_entries(records: &[DestinationRecord]) -> Vec<ListEntry> {
    records.iter().map(ListEntry::of).collect()
}

fn label_or(title: &str, fallback: &str) -> String {
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.to_string()
    }
}

/// Renders the collection as map markers.
pub trait MapView {
    fn render_markers(&mut self, markers: &[Marker], revision: Revision);
}

/// Renders the collection as a scrollable list.
pub trait ListView {
    fn render_list(&mut self, entries: &[ListEntry], revision: Revision);
}

/// Every view attached to one planner, re-rendered together from one snapshot.
#[derive(Default)]
pub struct ViewSet {
    maps: Vec<Box<dyn MapView + Send>>,
    lists: Vec<Box<dyn ListView + Send>>,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, view: impl MapView + Send + 'static) -> Self {
        self.maps.push(Box::new(view));
        self
    }

    pub fn with_list(mut self, view: impl ListView + Send + 'static) -> Self {
        self.lists.push(Box::new(view));
        self
    }

    pub fn render(&mut self, records: &[DestinationRecord], revision: Revision) {
        if !self.maps.is_empty() {
            let markers = markers(records);
            for view in &mut self.maps {
                view.render_markers(&markers, revision);
            }
        }
        if !self.lists.is_empty() {
            let entries = list_entries(records);
            for view in &mut self.lists {
                view.render_list(&entries, revision);
            }
        }
    }
}
