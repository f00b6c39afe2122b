//! Command-line argument parsing for `dedup-bench`.
//!
//! [`Args`] is a `clap` derive parser. [`parse_args_from`] parses an explicit
//! argument list (suitable for unit tests); the binary uses `Args::parse()`.
//! The remaining methods turn raw flags into the harness inputs: display
//! level, seed, unique-pool sizes, cache variants and a [`BenchConfig`].
//!
//! Bad values that clap cannot reject on its own return an `Err` whose message
//! begins with `"bad usage: "`.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::{ArgAction, Parser, ValueEnum};

use crate::bench::config::MIN_TIME_MS;
use crate::bench::{BenchConfig, CacheVariant};
use crate::cli::constants::{ENV_SEED, PROGRAM_NAME};
use crate::config::{
    DEFAULT_CARDINALITY, DEFAULT_SEED, DEFAULT_UNIQUE_COUNTS, MAX_UNIQUE_COUNT, SLOT_COUNTS,
};
use crate::displaylevel;
use crate::hash::HashStrategy;

/// Which cache families to benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheKind {
    /// No-dedup baseline, exact cache and every lossy configuration.
    All,
    /// No-dedup baseline only.
    None,
    Exact,
    Lossy,
}

/// Measure deduplicating append encoders over synthetic or file-backed values.
#[derive(Debug, Clone, Parser)]
#[command(name = PROGRAM_NAME, version)]
pub struct Args {
    /// Unique-pool size of a synthetic workload (repeatable)
    #[arg(short = 'u', long = "unique", value_name = "N")]
    pub unique: Vec<usize>,

    /// Values per encode pass
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_CARDINALITY)]
    pub cardinality: usize,

    /// Workload seed [env: DEDUP_BENCH_SEED] [default: 1]
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Cache families to measure
    #[arg(short = 'c', long = "cache", value_enum, default_value_t = CacheKind::All)]
    pub cache: CacheKind,

    /// Lossy-cache hash strategy (repeatable; default: all)
    #[arg(long = "hasher", value_enum, value_name = "HASHER")]
    pub hashers: Vec<HashStrategy>,

    /// Lossy-cache slot count (repeatable; default: 4..=1024)
    #[arg(short = 's', long = "slots", value_name = "N")]
    pub slots: Vec<usize>,

    /// Key values by content instead of storage address
    #[arg(long)]
    pub content: bool,

    /// Flush lossy caches from CPU caches before every pass
    #[arg(long)]
    pub cold: bool,

    /// Minimum measuring time per variant, in milliseconds
    #[arg(long = "min-time-ms", value_name = "MS", default_value_t = MIN_TIME_MS)]
    pub min_time_ms: u64,

    /// Encode the lines of FILE instead of a synthetic workload
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

/// Parse an explicit argument list; `argv[0]` is the program name.
pub fn parse_args_from<I, T>(argv: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Args::try_parse_from(argv)?)
}

/// Resolve the workload seed: `--seed`, then the `DEDUP_BENCH_SEED` value,
/// then [`DEFAULT_SEED`]. A non-numeric environment value is ignored with a warning.
pub fn resolve_seed(arg: Option<u64>, env_val: Option<&str>) -> u64 {
    if let Some(seed) = arg {
        return seed;
    }
    if let Some(env) = env_val {
        match env.trim().parse::<u64>() {
            Ok(seed) => return seed,
            Err(_) => {
                displaylevel!(
                    2,
                    "Ignore environment variable setting {}={}: not a valid unsigned value \n",
                    ENV_SEED,
                    env
                );
            }
        }
    }
    DEFAULT_SEED
}

impl Args {
    /// Display level after `-v` / `-q`, clamped to 0..=4.
    pub fn display_level(&self) -> u32 {
        (2 + self.verbose as i32 - self.quiet as i32).clamp(0, 4) as u32
    }

    /// Workload seed, honouring `DEDUP_BENCH_SEED`.
    pub fn seed(&self) -> u64 {
        resolve_seed(self.seed, std::env::var(ENV_SEED).ok().as_deref())
    }

    /// Unique-pool sizes to sweep. Sizes above [`MAX_UNIQUE_COUNT`] are bad usage.
    pub fn uniques(&self) -> anyhow::Result<Vec<usize>> {
        if self.unique.is_empty() {
            return Ok(DEFAULT_UNIQUE_COUNTS.to_vec());
        }
        if let Some(&bad) = self.unique.iter().find(|&&n| n > MAX_UNIQUE_COUNT) {
            bail!("bad usage: unique count {} exceeds {}", bad, MAX_UNIQUE_COUNT);
        }
        Ok(self.unique.clone())
    }

    /// Cache variants selected by `--cache`, `--hasher` and `--slots`.
    pub fn variants(&self) -> anyhow::Result<Vec<CacheVariant>> {
        if let Some(&bad) = self.slots.iter().find(|n| !SLOT_COUNTS.contains(n)) {
            bail!(
                "bad usage: unsupported slot count {} (expected one of {:?})",
                bad,
                SLOT_COUNTS
            );
        }
        let hashers: &[HashStrategy] =
            if self.hashers.is_empty() { &HashStrategy::ALL[..] } else { &self.hashers[..] };
        let slots: &[usize] = if self.slots.is_empty() { &SLOT_COUNTS[..] } else { &self.slots[..] };

        let mut variants = Vec::new();
        if matches!(self.cache, CacheKind::All | CacheKind::None) {
            variants.push(CacheVariant::NoDedup);
        }
        if matches!(self.cache, CacheKind::All | CacheKind::Exact) {
            variants.push(CacheVariant::Exact);
        }
        if matches!(self.cache, CacheKind::All | CacheKind::Lossy) {
            variants.extend(CacheVariant::lossy_sweep(hashers, slots));
        }
        Ok(variants)
    }

    /// Benchmark configuration carried by the flags.
    pub fn bench_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default();
        config
            .set_notification_level(self.display_level())
            .set_min_time(Duration::from_millis(self.min_time_ms))
            .set_content_keys(self.content)
            .set_cold_start(self.cold);
        config
    }
}
