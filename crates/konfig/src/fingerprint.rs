//! Cache-invalidation key for a generation pass.
//!
//! Hosts re-run generation when this digest changes. It covers the full
//! resolved input plus the generator version, so upgrading konfig alone
//! invalidates stale outputs.

use crate::VERSION;
use konfig_schema::resolve::Resolution;
use xxhash_rust::xxh3::Xxh3;

/// Digest a resolution together with the generator version.
#[must_use]
pub fn digest(resolution: &Resolution) -> String {
    let mut hasher = Xxh3::new();
    hasher.update(VERSION.as_bytes());

    // BTreeMap-backed structures serialize in one canonical order
    let bytes = serde_json::to_vec(resolution).unwrap_or_else(|e| {
        panic!("resolution failed to serialize: {e}");
    });
    hasher.update(&bytes);

    format!("{:016x}", hasher.digest())
}
