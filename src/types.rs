//! Shared primitive ids, counters and coordinate helpers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Glyph used when a destination has no emoji of its own.
pub const DEFAULT_EMOJI: &str = "📍";

/// Monotonic change counter of a collection.
pub type Revision = u64;

/// Opaque, immutable destination identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrows the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DestinationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DestinationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

/// True when `lat` is finite and within [-90, 90].
pub fn latitude_in_range(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// True when `lng` is finite and within [-180, 180].
pub fn longitude_in_range(lng: f64) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}

/// Folds a longitude picked on a wrapped map back into [-180, 180].
///
/// Values already in range are returned unchanged.
pub fn wrap_longitude(lng: f64) -> f64 {
    if !lng.is_finite() || longitude_in_range(lng) {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the sign of the input at the seam.
    if wrapped == -180.0 && lng > 0.0 { 180.0 } else { wrapped }
}
