//! Performance benchmarks for classification and aggregation
//!
//! Run with: cargo bench

use adspend::engine::{AggregateFilter, AggregationEngine};
use adspend::models::{AdRecord, RegionAllocation};
use adspend::parser::RecordParser;
use adspend::party::classify_party;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Write;
use tempfile::NamedTempFile;

const NAMES: &[&str] = &[
    "XYZ for Narendra Modi Campaign",
    "Youth Congress Bihar",
    "Trinamool Youth Wing",
    "Populus Empowerment Network Private Limited",
    "Local Trade Fair Committee",
    "Nitish Kumar Vikas Manch",
];

const REGIONS: &[&str] = &["Delhi", "Bihar", "Uttar Pradesh", "Kerala", "Maharashtra"];

fn build_records(count: usize) -> Vec<AdRecord> {
    (0..count)
        .map(|i| AdRecord {
            advertiser_id: format!("page-{}", i % 200),
            display_name: Some(NAMES[i % NAMES.len()].to_string()),
            spend_lower: Some(10_000.0 + (i % 100) as f64 * 1_000.0),
            spend_upper: Some(50_000.0 + (i % 100) as f64 * 1_000.0),
            impressions_lower: Some(1_000.0),
            impressions_upper: Some(9_000.0),
            start_time: Some(format!("2024-11-{:02}", 1 + i % 28)),
            stop_time: None,
            target_regions: vec![RegionAllocation {
                region: REGIONS[i % REGIONS.len()].to_string(),
                spend_percentage: Some(0.5 + (i % 5) as f64 * 0.1),
                impressions_percentage: None,
            }],
        })
        .collect()
}

fn benchmark_classification(c: &mut Criterion) {
    c.bench_function("classify_party", |b| {
        b.iter(|| {
            for name in NAMES {
                black_box(classify_party(black_box(Some("page-1")), Some(name)));
            }
        })
    });
}

fn benchmark_overall_stats(c: &mut Criterion) {
    let records = build_records(10_000);
    let engine = AggregationEngine::new();

    c.bench_function("overall_stats_10k_records", |b| {
        b.iter(|| {
            let stats = engine.overall_stats(black_box(&records), &AggregateFilter::default());
            black_box(stats)
        })
    });
}

fn benchmark_region_breakdown(c: &mut Criterion) {
    let records = build_records(10_000);
    let engine = AggregationEngine::new();

    c.bench_function("region_breakdown_10k_records", |b| {
        b.iter(|| {
            let report =
                engine.region_breakdown(black_box(&records), &AggregateFilter::default(), 10);
            black_box(report)
        })
    });
}

fn benchmark_jsonl_parsing(c: &mut Criterion) {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..1_000 {
        writeln!(
            file,
            r#"{{"advertiserId": "page-{}", "displayName": "{}", "spendLower": 1000, "spendUpper": 3000, "startTime": "2024-11-05"}}"#,
            i,
            NAMES[i % NAMES.len()]
        )
        .unwrap();
    }
    file.flush().unwrap();

    let parser = RecordParser::new();
    c.bench_function("parse_jsonl_1000_records", |b| {
        b.iter(|| {
            let parsed = parser.parse_jsonl_file(black_box(file.path())).unwrap();
            black_box(parsed)
        })
    });
}

criterion_group!(
    benches,
    benchmark_classification,
    benchmark_overall_stats,
    benchmark_region_breakdown,
    benchmark_jsonl_parsing
);
criterion_main!(benches);
