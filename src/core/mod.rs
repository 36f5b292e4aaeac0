//! In-memory authoritative store and derived views of it.

/// Position index helpers.
pub mod indices;
/// Completion progress and achievement tiers.
pub mod progress;
/// Authoritative destination store.
pub mod store;
