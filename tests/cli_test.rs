//! CLI end-to-end tests driving the binary over tempfile fixtures

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn fixture_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jsonl")
        .tempfile()
        .unwrap();
    let lines = [
        r#"{"advertiserId": "page-101", "displayName": "XYZ for Narendra Modi Campaign", "spendLower": 100000, "spendUpper": 300000, "startTime": "2024-11-02", "targetRegions": [{"region": "Delhi", "spendPercentage": 0.6}, {"region": "Punjab", "spendPercentage": 0.4}]}"#,
        r#"{"advertiserId": "page-102", "displayName": "Youth Congress Bihar", "spendLower": 50000, "spendUpper": 150000, "startTime": "2024-11-03", "targetRegions": [{"region": "Bihar"}]}"#,
        r#"{"advertiserId": "page-103", "displayName": "Local Trade Fair", "spendLower": 10000, "spendUpper": 10000, "startTime": "2024-11-04"}"#,
        "{malformed line}",
    ];
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_stats_json_output() {
    let file = fixture_file();
    let output = Command::cargo_bin("adspend")
        .unwrap()
        .args(["stats", "--json", "--data"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stats = &parsed["stats"];
    assert_eq!(stats["totalAds"], 3);
    assert_eq!(stats["totalAdvertisers"], 3);
    // 200,000 + 100,000 + 10,000 in lakhs
    assert_eq!(stats["totalSpendLakhs"], 3.1);
    assert_eq!(stats["partyBreakdown"]["BJP"]["count"], 1);
    assert_eq!(stats["partyBreakdown"]["INC"]["count"], 1);
    assert_eq!(stats["partyBreakdown"]["Others"]["count"], 1);
}

#[test]
fn test_regions_json_apportionment() {
    let file = fixture_file();
    let output = Command::cargo_bin("adspend")
        .unwrap()
        .args(["regions", "--json", "--data"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let regions = parsed["regions"]["regions"].as_array().unwrap();
    assert_eq!(regions[0]["region"], "Delhi");
    assert_eq!(regions[0]["spendRaw"], 120000.0);
}

#[test]
fn test_party_filter() {
    let file = fixture_file();
    let output = Command::cargo_bin("adspend")
        .unwrap()
        .args(["stats", "--json", "--party", "INC", "--data"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["stats"]["totalAds"], 1);
}

#[test]
fn test_human_readable_stats() {
    let file = fixture_file();
    Command::cargo_bin("adspend")
        .unwrap()
        .args(["stats", "--data"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped 1 malformed lines"))
        .stdout(predicate::str::contains("BJP"));
}

#[test]
fn test_unknown_region_fails() {
    let file = fixture_file();
    Command::cargo_bin("adspend")
        .unwrap()
        .args(["stats", "--region", "Atlantis", "--data"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown region"));
}

#[test]
fn test_missing_data_path_fails() {
    Command::cargo_bin("adspend")
        .unwrap()
        .args(["stats", "--data", "/no/such/path.jsonl"])
        .assert()
        .failure();
}
