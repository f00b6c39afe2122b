//! Benchmark runner: timed passes and variant sweeps over one value sequence.
//!
//! [`bench_variant`] measures a single cache variant: one untimed warm-up pass
//! that also yields the reported buffer size and counters, then timed passes
//! until [`BenchConfig::min_time`] has elapsed. [`bench_values`] sweeps a list
//! of variants over the same sequence and prints one result line per variant.

use std::hint::black_box;
use std::io;
use std::time::Instant;

use super::config::{BenchConfig, MAX_PASSES};
use super::variant::CacheVariant;
use crate::config::OUTPUT_RESERVE;
use crate::displayout;
use crate::encoder::{AppendEncoder, ByAddress, ByContent, EncodeStats, KeyScheme};

// ── Result type ───────────────────────────────────────────────────────────────

/// Measurement of one variant on one value sequence.
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Name of the value sequence (e.g. `unique=512`, a file name).
    pub dataset: String,
    pub variant: CacheVariant,
    /// Number of values per pass.
    pub values: usize,
    /// Number of timed passes.
    pub passes: u64,
    /// Mean wall-clock time per pass, in nanoseconds.
    pub ns_per_pass: f64,
    /// Output buffer length: the summary metric.
    pub size: usize,
    pub stats: EncodeStats,
}

impl BenchResult {
    /// Mean time per input value, in nanoseconds.
    pub fn ns_per_value(&self) -> f64 {
        if self.values == 0 {
            0.0
        } else {
            self.ns_per_pass / self.values as f64
        }
    }

    /// One report line: dataset, variant, time per pass, time per value, size.
    pub fn report_line(&self) -> String {
        format!(
            "{:<14} {:<26} {:>12.1} ns {:>8.2} ns/value  size={:<8} appends={} evictions={}",
            self.dataset,
            self.variant.to_string(),
            self.ns_per_pass,
            self.ns_per_value(),
            self.size,
            self.stats.appends,
            self.stats.evictions,
        )
    }
}

// ── Single variant ────────────────────────────────────────────────────────────

/// Measure `variant` on `values` with `encoder`.
///
/// # Errors
/// Returns `Err` if the variant cannot be instantiated or a pass fails.
pub fn bench_variant<K: KeyScheme>(
    encoder: &AppendEncoder<K>,
    values: &[&[u8]],
    variant: CacheVariant,
    dataset: &str,
    config: &BenchConfig,
) -> io::Result<BenchResult> {
    if config.display_level >= 3 {
        eprintln!("{}: {} ...", dataset, variant);
    }

    // Warm-up pass; also the source of the reported size and counters.
    let reference = variant.run_pass(encoder, values, config.cold_start)?;

    let start = Instant::now();
    let mut passes: u64 = 0;
    loop {
        let out = variant.run_pass(encoder, black_box(values), config.cold_start)?;
        black_box(out);
        passes += 1;
        if start.elapsed() >= config.min_time || passes >= MAX_PASSES {
            break;
        }
    }
    let elapsed_ns = start.elapsed().as_nanos() as f64;

    Ok(BenchResult {
        dataset: dataset.to_owned(),
        variant,
        values: values.len(),
        passes,
        ns_per_pass: elapsed_ns / passes as f64,
        size: reference.buffer_len(),
        stats: reference.stats,
    })
}

// ── Variant sweep ─────────────────────────────────────────────────────────────

/// Measure every variant in `variants` on `values`.
///
/// The key scheme follows [`BenchConfig::content_keys`]. Result lines are
/// printed to stdout at display level 2 and above. A failing variant is
/// reported on stderr and the sweep continues; the sweep then returns `Err`.
pub fn bench_values(
    values: &[&[u8]],
    dataset: &str,
    variants: &[CacheVariant],
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    if config.content_keys {
        let encoder = AppendEncoder::new(ByContent::default()).reserve(OUTPUT_RESERVE);
        sweep(&encoder, values, dataset, variants, config)
    } else {
        let encoder = AppendEncoder::new(ByAddress).reserve(OUTPUT_RESERVE);
        sweep(&encoder, values, dataset, variants, config)
    }
}

fn sweep<K: KeyScheme>(
    encoder: &AppendEncoder<K>,
    values: &[&[u8]],
    dataset: &str,
    variants: &[CacheVariant],
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    let mut results = Vec::with_capacity(variants.len());
    let mut bench_error = false;
    for &variant in variants {
        match bench_variant(encoder, values, variant, dataset, config) {
            Ok(r) => {
                if config.display_level >= 2 {
                    displayout!("{}\n", r.report_line());
                }
                results.push(r);
            }
            Err(e) => {
                if config.display_level >= 1 {
                    eprintln!("bench error for {} on {}: {}", variant, dataset, e);
                }
                bench_error = true;
            }
        }
    }

    if bench_error {
        Err(io::Error::other("benchmark reported errors"))
    } else {
        Ok(results)
    }
}
