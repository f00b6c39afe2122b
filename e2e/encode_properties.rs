// e2e/encode_properties.rs — size ordering across the full default sweep.
//
// Drives bench_workloads with the default unique counts and every variant,
// then checks the relations every run must satisfy:
//   exact size <= every lossy size <= no-dedup size
// and that the exact and no-dedup sizes equal the workload's byte totals.

use std::collections::HashMap;
use std::time::Duration;

use dedup_append::bench::{bench_workloads, BenchConfig, BenchResult, CacheVariant};
use dedup_append::config::{DEFAULT_CARDINALITY, DEFAULT_UNIQUE_COUNTS};
use dedup_append::workload::Workload;

fn config(content: bool) -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_notification_level(0)
        .set_min_time(Duration::ZERO)
        .set_content_keys(content);
    c
}

fn by_dataset(results: Vec<BenchResult>) -> HashMap<String, Vec<BenchResult>> {
    let mut map: HashMap<String, Vec<BenchResult>> = HashMap::new();
    for r in results {
        map.entry(r.dataset.clone()).or_default().push(r);
    }
    map
}

fn check_ordering(group: &[BenchResult]) {
    let size = |v: CacheVariant| {
        group
            .iter()
            .find(|r| r.variant == v)
            .map(|r| r.size)
            .unwrap_or_else(|| panic!("missing {v}"))
    };
    let baseline = size(CacheVariant::NoDedup);
    let exact = size(CacheVariant::Exact);
    for r in group {
        assert!(r.size >= exact, "{} {}: {} < exact {}", r.dataset, r.variant, r.size, exact);
        assert!(r.size <= baseline, "{} {}: {} > no-dedup {}", r.dataset, r.variant, r.size, baseline);
    }
}

#[test]
fn address_keys_full_sweep() {
    for seed in [1u64, 2, 3] {
        let results = bench_workloads(
            &DEFAULT_UNIQUE_COUNTS,
            DEFAULT_CARDINALITY,
            seed,
            &CacheVariant::all(),
            &config(false),
        )
        .unwrap();
        assert_eq!(results.len(), DEFAULT_UNIQUE_COUNTS.len() * CacheVariant::all().len());

        let groups = by_dataset(results);
        for unique in DEFAULT_UNIQUE_COUNTS {
            let group = &groups[&format!("unique={unique}")];
            check_ordering(group);

            let w = Workload::generate(unique, DEFAULT_CARDINALITY, seed);
            let baseline = group.iter().find(|r| r.variant == CacheVariant::NoDedup).unwrap();
            let exact = group.iter().find(|r| r.variant == CacheVariant::Exact).unwrap();
            assert_eq!(baseline.size, w.total_bytes());
            assert_eq!(exact.size, w.distinct_bytes());
        }
    }
}

#[test]
fn content_keys_full_sweep() {
    let results = bench_workloads(
        &DEFAULT_UNIQUE_COUNTS,
        DEFAULT_CARDINALITY,
        1,
        &CacheVariant::all(),
        &config(true),
    )
    .unwrap();
    for group in by_dataset(results).values() {
        check_ordering(group);
        for r in group {
            assert_eq!(r.stats.rejected, 0, "{} {}", r.dataset, r.variant);
        }
    }
}

#[test]
fn larger_pools_dedup_less() {
    // With 1000 picks, an 8-value pool dedups to almost nothing while an
    // 8192-value pool leaves most values distinct.
    let results = bench_workloads(
        &[8, 8192],
        DEFAULT_CARDINALITY,
        1,
        &[CacheVariant::Exact],
        &config(false),
    )
    .unwrap();
    assert!(results[0].size < results[1].size);
    assert!(results[0].stats.hits > results[1].stats.hits);
}

#[test]
fn cold_start_sweep_matches_warm_sizes() {
    let variants = CacheVariant::all();
    let warm = bench_workloads(&[512], DEFAULT_CARDINALITY, 4, &variants, &config(false)).unwrap();
    let mut cold_config = config(false);
    cold_config.set_cold_start(true);
    let cold = bench_workloads(&[512], DEFAULT_CARDINALITY, 4, &variants, &cold_config).unwrap();
    let sizes = |rs: &[BenchResult]| rs.iter().map(|r| r.size).collect::<Vec<_>>();
    assert_eq!(sizes(&warm), sizes(&cold));
}
