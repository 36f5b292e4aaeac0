use hashbrown::HashMap;

use crate::{destination::DestinationRecord, types::DestinationId};

/// Record id to position in the ordered collection.
pub type PositionIndex = HashMap<DestinationId, usize>;

/// Builds a position index, returning the first id seen twice on conflict.
pub fn build_positions(records: &[DestinationRecord]) -> Result<PositionIndex, DestinationId> {
    let mut pos = PositionIndex::with_capacity(records.len());
    for (idx, rec) in records.iter().enumerate() {
        if pos.insert(rec.id.clone(), idx).is_some() {
            return Err(rec.id.clone());
        }
    }
    Ok(pos)
}
