// Settings API module.
// Provides the typed client for the platform's singleton settings resource.

pub mod client;

pub use client::SettingsApi;
