use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::indices::{PositionIndex, build_positions},
    destination::{DestinationDraft, DestinationPatch, DestinationRecord},
    op::{AppliedChange, Change},
    types::{DestinationId, Revision, default_emoji, latitude_in_range, wrap_longitude},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("coordinate out of range: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("duplicate destination id: {0}")]
    DuplicateId(DestinationId),
}

/// Persisted shape of a store: the ordered records and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreSnapshot {
    pub records: Vec<DestinationRecord>,
}

#[derive(Debug, Default)]
pub struct DestinationStore {
    records: Vec<DestinationRecord>,
    pos: PositionIndex,
    revision: Revision,
}

impl DestinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let pos = build_positions(&snapshot.records).map_err(StoreError::DuplicateId)?;
        Ok(Self {
            records: snapshot.records,
            pos,
            revision: 0,
        })
    }

    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            records: self.records.clone(),
        }
    }

    pub fn create(&mut self, draft: DestinationDraft) -> Result<(DestinationId, AppliedChange), StoreError> {
        let lng = wrap_longitude(draft.lng);
        if !latitude_in_range(draft.lat) || !lng.is_finite() {
            return Err(StoreError::InvalidCoordinate {
                lat: draft.lat,
                lng: draft.lng,
            });
        }

        let mut id = DestinationId::generate();
        while self.pos.contains_key(&id) {
            id = DestinationId::generate();
        }

        let rec = DestinationRecord {
            id: id.clone(),
            lat: draft.lat,
            lng,
            title: draft.title.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            emoji: draft.emoji.unwrap_or_else(default_emoji),
            completed: draft.completed.unwrap_or(false),
            date_added: Utc::now(),
        };

        self.pos.insert(id.clone(), self.records.len());
        self.records.push(rec);
        let applied = self.bump(Change::Created { id: id.clone() });
        Ok((id, applied))
    }

    /// Shallow-merges `patch` into the record with `id`; `None` when no record matches.
    pub fn update(&mut self, id: &DestinationId, patch: &DestinationPatch) -> Option<AppliedChange> {
        let idx = *self.pos.get(id)?;
        patch.apply_to(&mut self.records[idx]);
        Some(self.bump(Change::Updated { id: id.clone() }))
    }

    pub fn remove(&mut self, id: &DestinationId) -> Option<AppliedChange> {
        let idx = self.pos.remove(id)?;
        self.records.remove(idx);
        for (offset, rec) in self.records[idx..].iter().enumerate() {
            self.pos.insert(rec.id.clone(), idx + offset);
        }
        Some(self.bump(Change::Removed { id: id.clone() }))
    }

    /// Swaps in `records` wholesale. On error nothing changes.
    pub fn replace_all(&mut self, records: Vec<DestinationRecord>) -> Result<AppliedChange, StoreError> {
        let pos = build_positions(&records).map_err(StoreError::DuplicateId)?;
        let count = records.len();
        self.records = records;
        self.pos = pos;
        Ok(self.bump(Change::Replaced { count }))
    }

    pub fn get(&self, id: &DestinationId) -> Option<&DestinationRecord> {
        self.pos.get(id).map(|idx| &self.records[*idx])
    }

    pub fn get_cloned(&self, id: &DestinationId) -> Option<DestinationRecord> {
        self.get(id).cloned()
    }

    pub fn contains(&self, id: &DestinationId) -> bool {
        self.pos.contains_key(id)
    }

    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    fn bump(&mut self, change: Change) -> AppliedChange {
        self.revision += 1;
        AppliedChange {
            revision: self.revision,
            change,
        }
    }
}
