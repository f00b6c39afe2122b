// dedup-append — deduplicating append encoder with exact and lossy caches

pub mod config;
pub mod hash;
pub mod cache;
pub mod encoder;
pub mod workload;
pub mod bench;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use cache::{DedupCache, Emplace, ExactCache, LossyCache, NoDedup, UNSET_OFFSET};
pub use encoder::{encode, AppendEncoder, ByAddress, ByContent, EncodeError, Encoded, KeyScheme};
pub use hash::{Crc32, Crc32Shift, Fnv1aPy, HashStrategy, Identity, KeyHasher};
