//! Planner and runtime settings.

use serde::Deserialize;

/// Storage slot the collection lives in unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "bucketList";
/// File name suggested for exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "bucket-list.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Slot key holding the serialized collection.
    pub storage_key: String,
    pub export_file_name: String,
    /// Check coordinates and id uniqueness of imported entries, not just the array shape.
    pub strict_import: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            strict_import: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub command_queue_bound: usize,
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}
