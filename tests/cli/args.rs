// Integration tests for cli/args.rs — clap parsing and flag conversion.
//
// Covers:
//   - Defaults: full sweep, default unique counts and cardinality
//   - --cache selects variant families
//   - --hasher / --slots narrow the lossy sweep
//   - Bad usage: unsupported slot counts, oversized unique counts, unknown enum values
//   - Seed precedence between flag, environment and default

use std::path::PathBuf;

use dedup_append::bench::CacheVariant;
use dedup_append::cli::args::{parse_args_from, resolve_seed, Args, CacheKind};
use dedup_append::config::{
    DEFAULT_CARDINALITY, DEFAULT_SEED, DEFAULT_UNIQUE_COUNTS, MAX_UNIQUE_COUNT, SLOT_COUNTS,
};
use dedup_append::HashStrategy;

fn parse(argv: &[&str]) -> Args {
    let full = std::iter::once("dedup-bench").chain(argv.iter().copied());
    parse_args_from(full).expect("parse should succeed")
}

fn parse_err(argv: &[&str]) -> String {
    let full = std::iter::once("dedup-bench").chain(argv.iter().copied());
    parse_args_from(full).expect_err("expected parse error").to_string()
}

#[test]
fn defaults_run_full_sweep() {
    let a = parse(&[]);
    assert_eq!(a.cache, CacheKind::All);
    assert_eq!(a.cardinality, DEFAULT_CARDINALITY);
    assert_eq!(a.uniques().unwrap(), DEFAULT_UNIQUE_COUNTS);
    assert_eq!(a.variants().unwrap(), CacheVariant::all());
    assert!(!a.content);
    assert!(!a.cold);
}

#[test]
fn repeated_unique_flags() {
    let a = parse(&["-u", "8", "--unique", "100", "-n", "50"]);
    assert_eq!(a.uniques().unwrap(), vec![8, 100]);
    assert_eq!(a.cardinality, 50);
}

#[test]
fn unique_count_past_limit_is_bad_usage() {
    // Would overflow the pool size on 32-bit targets and truncate as a u32 id.
    let huge = usize::MAX.to_string();
    let err = parse(&["-u", &huge]).uniques().unwrap_err();
    assert!(err.to_string().starts_with("bad usage: unique count"), "{err}");

    let just_over = (MAX_UNIQUE_COUNT + 1).to_string();
    assert!(parse(&["-u", "64", "-u", &just_over]).uniques().is_err());
}

#[test]
fn cache_none_is_baseline_only() {
    assert_eq!(parse(&["--cache", "none"]).variants().unwrap(), vec![CacheVariant::NoDedup]);
}

#[test]
fn cache_exact_only() {
    assert_eq!(parse(&["-c", "exact"]).variants().unwrap(), vec![CacheVariant::Exact]);
}

#[test]
fn lossy_defaults_cover_every_hasher_and_slot() {
    let v = parse(&["--cache", "lossy"]).variants().unwrap();
    assert_eq!(v.len(), HashStrategy::ALL.len() * SLOT_COUNTS.len());
    assert!(v.iter().all(|v| matches!(v, CacheVariant::Lossy { .. })));
}

#[test]
fn hasher_filter_applies_to_all_mode() {
    let v = parse(&["--hasher", "crc32-shift", "--slots", "1024"]).variants().unwrap();
    assert_eq!(
        v,
        vec![
            CacheVariant::NoDedup,
            CacheVariant::Exact,
            CacheVariant::Lossy { hasher: HashStrategy::Crc32Shift, slots: 1024 },
        ]
    );
}

#[test]
fn unsupported_slots_is_bad_usage() {
    let err = parse(&["--slots", "100"]).variants().unwrap_err().to_string();
    assert!(err.starts_with("bad usage: "), "{err}");
    assert!(err.contains("100"), "{err}");
}

#[test]
fn unknown_cache_kind_rejected() {
    let err = parse_err(&["--cache", "lru"]);
    assert!(err.contains("lru"), "{err}");
}

#[test]
fn non_numeric_cardinality_rejected() {
    parse_err(&["-n", "many"]);
}

#[test]
fn input_path_flag() {
    let a = parse(&["-i", "lines.txt", "--content"]);
    assert_eq!(a.input, Some(PathBuf::from("lines.txt")));
    assert!(a.bench_config().content_keys);
}

#[test]
fn explicit_seed_wins() {
    let a = parse(&["--seed", "77"]);
    assert_eq!(a.seed, Some(77));
    assert_eq!(resolve_seed(a.seed, Some("3")), 77);
}

#[test]
fn env_seed_used_without_flag() {
    assert_eq!(resolve_seed(None, Some(" 12 ")), 12);
    assert_eq!(resolve_seed(None, Some("-1")), DEFAULT_SEED);
}

#[test]
fn min_time_flag() {
    let c = parse(&["--min-time-ms", "25"]).bench_config();
    assert_eq!(c.min_time, std::time::Duration::from_millis(25));
}
