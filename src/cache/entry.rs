// Cache entry with freshness metadata.
// The payload and its timestamp always travel together; a payload without a
// parseable timestamp is no entry at all.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Freshness window for the synchronous read path: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached settings payload and the time it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Serialized snapshot, exactly as received from the API.
    pub payload: String,
    /// When the payload was stored.
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            stored_at: Utc::now(),
        }
    }

    /// Check if this entry has outlived the freshness window.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }

    /// Check if this entry is still fresh.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        !self.is_expired(ttl)
    }

    /// Millisecond timestamp as written to the timestamp slot.
    pub fn stored_at_millis(&self) -> i64 {
        self.stored_at.timestamp_millis()
    }

    /// Rebuild an entry from the two storage slots.
    ///
    /// Returns None when the timestamp slot does not hold a valid integer
    /// millisecond timestamp.
    pub fn from_slots(payload: String, stored_at_millis: &str) -> Option<Self> {
        let millis: i64 = stored_at_millis.trim().parse().ok()?;
        let stored_at = DateTime::from_timestamp_millis(millis)?;
        Some(Self { payload, stored_at })
    }
}
