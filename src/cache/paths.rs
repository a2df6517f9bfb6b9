// Cache path utilities.
// Locates the on-disk home for persisted settings slots.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/caravan on macOS/Linux).
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "caravan").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Sanitize a slot key for use as a file name.
/// Replaces problematic characters with underscores.
pub(crate) fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
