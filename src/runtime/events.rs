//! Runtime event stream payloads.

use crate::{op::AppliedChange, types::Revision};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    /// A mutation was applied. Followed by `PersistFailed` when its save failed.
    Changed(AppliedChange),
    /// A mutation was applied in memory but the storage write failed.
    PersistFailed {
        /// Revision that is not on storage.
        revision: Revision,
        /// Rendered storage error.
        message: String,
    },
}
