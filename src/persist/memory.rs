//! Process-local slots, shared between clones.

use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;

use super::{PersistError, PersistResult, SlotStorage};

/// In-memory [`SlotStorage`]. Clones share the same slots, so a caller can keep
/// one handle to inspect what a planner wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with `value`.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl SlotStorage for MemorySlots {
    fn load(&self, key: &str) -> PersistResult<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| PersistError::Message("memory slots poisoned".to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| PersistError::Message("memory slots poisoned".to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> PersistResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| PersistError::Message("memory slots poisoned".to_string()))?;
        slots.remove(key);
        Ok(())
    }
}
