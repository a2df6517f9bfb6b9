// Settings cache service.
// Read-through with stale fallback on fetch, write-through on update, and a
// synchronous pre-hydration read gated by the freshness window.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::SettingsApi;
use crate::cache::{CacheEntry, DEFAULT_TTL, Storage};
use crate::error::Result;
use crate::snapshot::SettingsSnapshot;

/// Slot holding the serialized snapshot.
const PAYLOAD_KEY: &str = "caravan.settings";
/// Slot holding the stringified millisecond timestamp.
const STORED_AT_KEY: &str = "caravan.settings.stored_at";

/// Client-side cache for the platform's singleton settings resource.
///
/// Reads always revalidate against the API and fall back to the cached
/// snapshot, however old, when the API cannot be reached. Writes go to the
/// API first and only replace the cached snapshot once confirmed. The
/// freshness window applies solely to [`cached_snapshot`], the synchronous
/// pre-hydration path.
///
/// [`cached_snapshot`]: SettingsCache::cached_snapshot
pub struct SettingsCache {
    api: SettingsApi,
    storage: Box<dyn Storage>,
    ttl: Duration,
    // Serializes paired access to the payload and timestamp slots so the pair
    // is never observed torn. Never held across a network await.
    slots: Mutex<()>,
}

impl SettingsCache {
    /// Create a cache over the given API client and storage backend.
    pub fn new(api: SettingsApi, storage: Box<dyn Storage>) -> Self {
        Self {
            api,
            storage,
            ttl: DEFAULT_TTL,
            slots: Mutex::new(()),
        }
    }

    /// Override the freshness window used by [`cached_snapshot`].
    ///
    /// [`cached_snapshot`]: SettingsCache::cached_snapshot
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Get the current settings, revalidating against the API on every call.
    ///
    /// A successful fetch replaces the cached entry and is returned as-is; a
    /// failed fetch is served from the cache regardless of age, and only
    /// propagates when nothing usable has ever been cached.
    pub async fn get_settings(&self) -> Result<SettingsSnapshot> {
        let cached = self.read_entry();

        match self.api.fetch().await {
            Ok(snapshot) => {
                if let Err(err) = self.persist(&snapshot) {
                    warn!(error = %err, "failed to persist fetched settings, serving them uncached");
                }
                debug!("settings revalidated from the API");
                Ok(snapshot)
            }
            Err(err) => match cached {
                Some(entry) => match serde_json::from_str(&entry.payload) {
                    Ok(snapshot) => {
                        warn!(
                            error = %err,
                            stored_at = %entry.stored_at,
                            "settings fetch failed, serving cached snapshot"
                        );
                        Ok(snapshot)
                    }
                    Err(parse_err) => {
                        debug!(error = %parse_err, "cached settings payload is corrupt, no fallback");
                        Err(err)
                    }
                },
                None => Err(err),
            },
        }
    }

    /// Update the settings through the API.
    ///
    /// The cached entry is replaced with the canonical snapshot only once the
    /// remote write has succeeded; on failure both slots are left exactly as
    /// they were.
    pub async fn update_settings(&self, snapshot: &SettingsSnapshot) -> Result<SettingsSnapshot> {
        let canonical = self.api.update(snapshot).await?;

        if let Err(err) = self.persist(&canonical) {
            warn!(error = %err, "failed to persist updated settings, cache is behind the API");
        }

        Ok(canonical)
    }

    /// Last-known snapshot, without touching the network.
    ///
    /// Returns the stored payload only while the entry is within the
    /// freshness window. Missing slots, a corrupt payload, or a stale entry
    /// are all a miss, never an error.
    pub fn cached_snapshot(&self) -> Option<SettingsSnapshot> {
        let entry = self.read_entry()?;

        if !entry.is_fresh(self.ttl) {
            debug!(stored_at = %entry.stored_at, "cached settings are stale, skipping pre-hydration");
            return None;
        }

        match serde_json::from_str(&entry.payload) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                debug!(error = %err, "cached settings payload is corrupt, treating as miss");
                None
            }
        }
    }

    /// When the cached entry was stored, if one exists.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.read_entry().map(|entry| entry.stored_at)
    }

    /// Remove both cache slots. Clearing an empty cache is a no-op.
    pub fn clear_cache(&self) -> Result<()> {
        let _guard = self.lock_slots();
        self.storage.remove(PAYLOAD_KEY)?;
        self.storage.remove(STORED_AT_KEY)?;
        Ok(())
    }

    /// Read both slots as one entry. Either slot missing or unusable means no
    /// entry.
    fn read_entry(&self) -> Option<CacheEntry> {
        let _guard = self.lock_slots();
        let payload = self.storage.get(PAYLOAD_KEY)?;
        let stored_at = self.storage.get(STORED_AT_KEY)?;
        CacheEntry::from_slots(payload, &stored_at)
    }

    /// Write both slots from one snapshot, stamped with the current time.
    fn persist(&self, snapshot: &SettingsSnapshot) -> Result<()> {
        let payload = serde_json::to_string(snapshot)?;
        let entry = CacheEntry::new(payload);

        let _guard = self.lock_slots();
        self.storage.set(PAYLOAD_KEY, &entry.payload)?;
        self.storage
            .set(STORED_AT_KEY, &entry.stored_at_millis().to_string())?;
        Ok(())
    }

    fn lock_slots(&self) -> MutexGuard<'_, ()> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}
