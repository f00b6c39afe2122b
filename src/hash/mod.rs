//! Hash strategies for deduplication-cache keys.
//!
//! A [`KeyHasher`] maps a 64-bit identity key to a hash code. The strategies
//! here are stateless, zero-sized and interchangeable; a cache picks one as a
//! generic parameter, so the choice is resolved at compile time.
//!
//! | Type           | Cost        | Distribution |
//! |----------------|-------------|--------------|
//! | [`Identity`]   | none        | poor: pointer alignment leaves the low bits constant |
//! | [`Crc32`]      | 1 instr.    | good avalanche in the low 32 bits |
//! | [`Crc32Shift`] | 1 instr.    | bits 16..32 of the checksum only |
//! | [`Fnv1aPy`]    | mul + folds | good; portable software baseline |
//!
//! [`HashStrategy`] names the same four strategies at runtime (CLI, reports),
//! and [`KeyBuildHasher`] adapts any of them to [`std::hash::BuildHasher`] so
//! they can also drive a standard `HashMap`.

pub mod crc32c;

use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::marker::PhantomData;

use self::crc32c::crc32c_u64;

// ── KeyHasher trait ───────────────────────────────────────────────────────────

/// A pure function from an identity key to a hash code.
pub trait KeyHasher: Copy + Default {
    /// Short label used in benchmark reports.
    const NAME: &'static str;

    /// Hash `key`. Must be deterministic and defined for every input.
    fn hash(&self, key: u64) -> u64;
}

/// Returns the key unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl KeyHasher for Identity {
    const NAME: &'static str = "identity";

    #[inline(always)]
    fn hash(&self, key: u64) -> u64 {
        key
    }
}

/// CRC-32C of the key (`_mm_crc32_u64(0, key)`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32;

impl KeyHasher for Crc32 {
    const NAME: &'static str = "crc32";

    #[inline(always)]
    fn hash(&self, key: u64) -> u64 {
        crc32c_u64(0, key) as u64
    }
}

/// CRC-32C of the key, shifted right by 16 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32Shift;

impl KeyHasher for Crc32Shift {
    const NAME: &'static str = "crc32-shift";

    #[inline(always)]
    fn hash(&self, key: u64) -> u64 {
        (crc32c_u64(0, key) >> 16) as u64
    }
}

/// FNV-1a style multiplicative mix with a 64→32 xor-fold and a final xor-shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aPy;

impl Fnv1aPy {
    const SEED: u64 = 0;
    const OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
    const PRIME: u32 = 591_798_841;
}

impl KeyHasher for Fnv1aPy {
    const NAME: &'static str = "fnv1a";

    #[inline(always)]
    fn hash(&self, key: u64) -> u64 {
        let mut h64 = Self::SEED ^ Self::OFFSET_BASIS;
        h64 = (h64 ^ key).wrapping_mul(Self::PRIME as u64);
        let h32 = (h64 ^ (h64 >> 32)) as u32;
        (h32 ^ (h32 >> 16)) as u64
    }
}

// ── Runtime selection ─────────────────────────────────────────────────────────

/// Runtime name for one of the four [`KeyHasher`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum HashStrategy {
    Identity,
    Crc32,
    Crc32Shift,
    Fnv1a,
}

impl HashStrategy {
    /// Every strategy, in report order.
    pub const ALL: [HashStrategy; 4] = [
        HashStrategy::Identity,
        HashStrategy::Crc32,
        HashStrategy::Crc32Shift,
        HashStrategy::Fnv1a,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HashStrategy::Identity => Identity::NAME,
            HashStrategy::Crc32 => Crc32::NAME,
            HashStrategy::Crc32Shift => Crc32Shift::NAME,
            HashStrategy::Fnv1a => Fnv1aPy::NAME,
        }
    }

    /// Hash `key` with the named strategy. Dynamic counterpart of [`KeyHasher::hash`].
    pub fn hash(self, key: u64) -> u64 {
        match self {
            HashStrategy::Identity => Identity.hash(key),
            HashStrategy::Crc32 => Crc32.hash(key),
            HashStrategy::Crc32Shift => Crc32Shift.hash(key),
            HashStrategy::Fnv1a => Fnv1aPy.hash(key),
        }
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── std::hash adapter ─────────────────────────────────────────────────────────

/// [`BuildHasher`] backed by a [`KeyHasher`].
///
/// Lets an [`ExactCache`](crate::cache::ExactCache) use the same strategies as
/// the lossy cache instead of SipHash.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyBuildHasher<H: KeyHasher> {
    _hasher: PhantomData<H>,
}

impl<H: KeyHasher> KeyBuildHasher<H> {
    pub fn new() -> Self {
        KeyBuildHasher { _hasher: PhantomData }
    }
}

impl<H: KeyHasher> BuildHasher for KeyBuildHasher<H> {
    type Hasher = KeyStreamHasher<H>;

    fn build_hasher(&self) -> Self::Hasher {
        KeyStreamHasher { state: 0, hasher: H::default() }
    }
}

/// Streaming [`Hasher`] produced by [`KeyBuildHasher`].
///
/// `u64` keys go through [`write_u64`](Hasher::write_u64) and are hashed in a
/// single step; other input is folded eight bytes at a time.
#[derive(Debug, Clone, Copy)]
pub struct KeyStreamHasher<H: KeyHasher> {
    state: u64,
    hasher: H,
}

impl<H: KeyHasher> Hasher for KeyStreamHasher<H> {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write_u64(&mut self, key: u64) {
        self.state = self.hasher.hash(self.state ^ key);
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.write_u64(u64::from_le_bytes(word));
        }
    }
}
