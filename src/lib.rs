// Client-side settings cache for the Caravan travel platform.
// Revalidating reads with stale fallback, confirmed-write-only cache updates,
// and a synchronous pre-hydration read for first paint.

pub mod api;
pub mod cache;
pub mod error;
pub mod service;
pub mod snapshot;

pub use api::SettingsApi;
pub use cache::{CacheEntry, DEFAULT_TTL, FileStorage, MemoryStorage, Storage};
pub use error::{Result, SettingsError};
pub use service::SettingsCache;
pub use snapshot::SettingsSnapshot;
