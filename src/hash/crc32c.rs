//! CRC-32C (Castagnoli) over a single 64-bit word.
//!
//! [`crc32c_u64`] computes the same raw update as the SSE4.2 `crc32`
//! instruction (`_mm_crc32_u64`): reflected polynomial `0x82F63B78`, the eight
//! bytes of the word consumed little-endian, no pre- or post-inversion.
//!
//! The instruction is called directly when the running CPU advertises it
//! (SSE4.2 on x86_64, the `crc` extension on aarch64). Everywhere else the
//! update goes through the `crc32c` crate, with bit-identical results.

/// Raw CRC-32C update of `crc` with the eight bytes of `word`, via the
/// `crc32c` crate.
///
/// `crc32c_append` inverts its state on entry and exit; inverting around the
/// call cancels that and leaves the bare instruction semantics.
#[inline]
pub fn crc32c_u64_soft(crc: u32, word: u64) -> u32 {
    !::crc32c::crc32c_append(!crc, &word.to_le_bytes())
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.2")]
unsafe fn crc32c_u64_sse42(crc: u32, word: u64) -> u32 {
    core::arch::x86_64::_mm_crc32_u64(crc as u64, word) as u32
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "crc")]
unsafe fn crc32c_u64_armv8(crc: u32, word: u64) -> u32 {
    core::arch::aarch64::__crc32cd(crc, word)
}

/// Returns `true` when [`crc32c_u64`] runs on a dedicated CPU instruction.
pub fn hardware_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::is_x86_feature_detected!("sse4.2")
    }
    #[cfg(target_arch = "aarch64")]
    {
        std::arch::is_aarch64_feature_detected!("crc")
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}

/// CRC-32C update of `crc` with `word`, hardware-accelerated when available.
///
/// Feature detection is cached by the standard library after the first call,
/// so the per-call overhead is one relaxed atomic load.
#[inline]
pub fn crc32c_u64(crc: u32, word: u64) -> u32 {
    #[cfg(target_arch = "x86_64")]
    {
        if std::is_x86_feature_detected!("sse4.2") {
            // SAFETY: SSE4.2 support was verified at runtime just above.
            return unsafe { crc32c_u64_sse42(crc, word) };
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("crc") {
            // SAFETY: the CRC extension was verified at runtime just above.
            return unsafe { crc32c_u64_armv8(crc, word) };
        }
    }
    crc32c_u64_soft(crc, word)
}
