//! Applied-change model shared by the store, the planner and the runtime.

use crate::types::{DestinationId, Revision};

/// Description of one mutation that changed the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A record was appended.
    Created {
        /// New record id.
        id: DestinationId,
    },
    /// A record was merged with a patch.
    Updated {
        /// Patched record id.
        id: DestinationId,
    },
    /// A record was deleted.
    Removed {
        /// Deleted record id.
        id: DestinationId,
    },
    /// The whole collection was swapped.
    Replaced {
        /// Size of the new collection.
        count: usize,
    },
}

/// A [`Change`] tagged with the revision it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    /// Collection revision after the change.
    pub revision: Revision,
    /// What happened.
    pub change: Change,
}
