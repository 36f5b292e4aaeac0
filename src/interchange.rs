//! Export and import of the collection as JSON.
//!
//! Exports are a pretty-printed JSON array of records. Imports must be a JSON
//! array; anything else is rejected before the collection is touched.

use hashbrown::HashSet;
use serde_json::Value;
use thiserror::Error;

use crate::{destination::DestinationRecord, types::DestinationId};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("import must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
    #[error("entry {index} is not a destination: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry {index} has coordinates out of range")]
    InvalidCoordinate { index: usize },
    #[error("entry {index} repeats id {id}")]
    DuplicateId { index: usize, id: DestinationId },
}

/// Serializes `records` the way export files store them.
pub fn export_json(records: &[DestinationRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Parses an import file. `strict` adds coordinate and id uniqueness checks.
pub fn parse_import(text: &str, strict: bool) -> Result<Vec<DestinationRecord>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Json)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ImportError::NotAnArray {
                found: json_kind(&other),
            });
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let rec: DestinationRecord = serde_json::from_value(item)
            .map_err(|source| ImportError::InvalidEntry { index, source })?;
        records.push(rec);
    }

    if strict {
        validate(&records)?;
    }
    Ok(records)
}

fn validate(records: &[DestinationRecord]) -> Result<(), ImportError> {
    let mut seen: HashSet<&DestinationId> = HashSet::with_capacity(records.len());
    for (index, rec) in records.iter().enumerate() {
        if !rec.has_valid_coordinates() {
            return Err(ImportError::InvalidCoordinate { index });
        }
        if !seen.insert(&rec.id) {
            return Err(ImportError::DuplicateId {
                index,
                id: rec.id.clone(),
            });
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
