//! Cache variants measured by the benchmark.
//!
//! A [`CacheVariant`] names one cache configuration at runtime. The lossy
//! cache's hasher and slot count are compile-time parameters, so
//! [`CacheVariant::run_pass`] maps each runtime pair onto a monomorphised
//! `LossyCache<H, N>` through a dispatch table:
//!
//! | Variant                 | Cache |
//! |-------------------------|-------|
//! | `NoDedup`               | [`NoDedup`] |
//! | `Exact`                 | [`ExactCache`] (SipHash) |
//! | `Lossy { hasher, slots }` | `LossyCache<hasher, slots>`, slots ∈ [`SLOT_COUNTS`] |

use std::fmt;
use std::io;

use crate::cache::{ExactCache, LossyCache, NoDedup};
use crate::config::SLOT_COUNTS;
use crate::encoder::{AppendEncoder, Encoded, KeyScheme};
use crate::hash::{Crc32, Crc32Shift, Fnv1aPy, HashStrategy, Identity, KeyHasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheVariant {
    NoDedup,
    Exact,
    Lossy { hasher: HashStrategy, slots: usize },
}

impl CacheVariant {
    /// Lossy variant, or `None` if `slots` is not one of [`SLOT_COUNTS`].
    pub fn lossy(hasher: HashStrategy, slots: usize) -> Option<Self> {
        SLOT_COUNTS
            .contains(&slots)
            .then_some(CacheVariant::Lossy { hasher, slots })
    }

    /// No-dedup, exact, then every hasher at every slot count.
    pub fn all() -> Vec<CacheVariant> {
        let mut v = vec![CacheVariant::NoDedup, CacheVariant::Exact];
        v.extend(Self::lossy_sweep(&HashStrategy::ALL, &SLOT_COUNTS));
        v
    }

    /// Lossy variants for each `slots` × `hashers` pair; unsupported slot counts are skipped.
    pub fn lossy_sweep(hashers: &[HashStrategy], slots: &[usize]) -> Vec<CacheVariant> {
        slots
            .iter()
            .flat_map(|&n| hashers.iter().filter_map(move |&h| Self::lossy(h, n)))
            .collect()
    }

    /// Run one encode pass over `values` with a fresh cache of this variant.
    ///
    /// When `cold` is set, lossy caches are flushed from the CPU caches first.
    pub fn run_pass<K: KeyScheme>(
        &self,
        encoder: &AppendEncoder<K>,
        values: &[&[u8]],
        cold: bool,
    ) -> io::Result<Encoded> {
        match *self {
            CacheVariant::NoDedup => encoder.encode(values, NoDedup::new()).map_err(io::Error::other),
            CacheVariant::Exact => encoder.encode(values, ExactCache::new()).map_err(io::Error::other),
            CacheVariant::Lossy { hasher, slots } => match hasher {
                HashStrategy::Identity => lossy_pass::<Identity, K>(encoder, values, slots, cold),
                HashStrategy::Crc32 => lossy_pass::<Crc32, K>(encoder, values, slots, cold),
                HashStrategy::Crc32Shift => lossy_pass::<Crc32Shift, K>(encoder, values, slots, cold),
                HashStrategy::Fnv1a => lossy_pass::<Fnv1aPy, K>(encoder, values, slots, cold),
            },
        }
    }
}

/// Bind `$cache` to a fresh `LossyCache<$H, N>` for the runtime slot count
/// `$slots` and evaluate `$body`.
macro_rules! with_lossy_cache {
    ($H:ty, $slots:expr, $cache:ident => $body:expr) => {
        match $slots {
            4 => { let $cache = LossyCache::<$H, 4>::new(); $body }
            8 => { let $cache = LossyCache::<$H, 8>::new(); $body }
            16 => { let $cache = LossyCache::<$H, 16>::new(); $body }
            32 => { let $cache = LossyCache::<$H, 32>::new(); $body }
            64 => { let $cache = LossyCache::<$H, 64>::new(); $body }
            128 => { let $cache = LossyCache::<$H, 128>::new(); $body }
            256 => { let $cache = LossyCache::<$H, 256>::new(); $body }
            512 => { let $cache = LossyCache::<$H, 512>::new(); $body }
            1024 => { let $cache = LossyCache::<$H, 1024>::new(); $body }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unsupported lossy slot count {}", other),
                ))
            }
        }
    };
}

fn lossy_pass<H, K>(
    encoder: &AppendEncoder<K>,
    values: &[&[u8]],
    slots: usize,
    cold: bool,
) -> io::Result<Encoded>
where
    H: KeyHasher,
    K: KeyScheme,
{
    let out = with_lossy_cache!(H, slots, cache => {
        if cold {
            encoder.encode_cold(values, cache)
        } else {
            encoder.encode(values, cache)
        }
    });
    out.map_err(io::Error::other)
}

impl fmt::Display for CacheVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheVariant::NoDedup => f.write_str("no-dedup"),
            CacheVariant::Exact => f.write_str("exact"),
            CacheVariant::Lossy { hasher, slots } => write!(f, "lossy<{}, {}>", hasher, slots),
        }
    }
}
