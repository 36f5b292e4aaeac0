//! Slot storage abstraction with in-memory and SQLite implementations.

pub mod memory;
pub mod sqlite;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Named slots holding whole serialized values, read and overwritten as a unit.
pub trait SlotStorage: Send {
    /// Returns the slot content, or `None` when the slot was never written.
    fn load(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites the slot with `value`.
    fn save(&mut self, key: &str, value: &str) -> PersistResult<()>;
    fn clear(&mut self, _key: &str) -> PersistResult<()> {
        Ok(())
    }
}
