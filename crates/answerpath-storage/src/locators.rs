//! Locator generation shared by storage backends.
//!
//! Locator format: `{unix_millis}-{hash}{extension}` where `hash` is the
//! first 32 hex chars of SHA-256 over `"{file_name}-{unix_millis}"`. The hash
//! only guards against accidental collisions between uploads landing in the
//! same millisecond; it carries no security meaning.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Generate a locator for the given original filename at the given timestamp.
pub fn generate_locator(file_name: &str, timestamp_millis: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}", file_name, timestamp_millis).as_bytes());
    let hash = hex::encode(hasher.finalize());

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    format!("{}-{}{}", timestamp_millis, &hash[..32], extension)
}
