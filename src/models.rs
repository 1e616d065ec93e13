//! Core Data Models
//!
//! Defines the data structures flowing through the analysis pipeline:
//!
//! 1. **Raw data**: [`AdRecord`] - one observed advertisement, as exported
//!    from the ad library (JSONL, camelCase field names), optionally carrying
//!    [`RegionAllocation`] apportionment weights from the region join.
//! 2. **Aggregation**: the engine's accumulator state, rebuilt per pass.
//! 3. **Output**: [`SpendStats`], [`AdvertiserReport`], [`RegionReport`],
//!    [`TrendSeries`], [`PersonReport`] - finalized views serialized for
//!    reports and JSON output.
//!
//! Spend and impression fields are lower/upper bounds; the pipeline works
//! with the midpoint (`avg_spend`, `avg_impressions`), with missing bounds
//! defaulting to 0. Every aggregate carries both the raw minor-unit total and
//! a lakh-converted total so callers pick their unit at the presentation
//! boundary.

use crate::geo::Zone;
use crate::party::Party;
use crate::timestamp::TimestampParser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observed advertisement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRecord {
    #[serde(rename = "advertiserId", default)]
    pub advertiser_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "spendLower", default)]
    pub spend_lower: Option<f64>,
    #[serde(rename = "spendUpper", default)]
    pub spend_upper: Option<f64>,
    #[serde(rename = "impressionsLower", default)]
    pub impressions_lower: Option<f64>,
    #[serde(rename = "impressionsUpper", default)]
    pub impressions_upper: Option<f64>,
    /// Start of the delivery window.
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
    /// End of the delivery window; absent means the ad is still running.
    #[serde(rename = "stopTime", default)]
    pub stop_time: Option<String>,
    #[serde(rename = "targetRegions", default)]
    pub target_regions: Vec<RegionAllocation>,
}

/// Links an ad to one target region with an apportionment weight.
///
/// Produced by the region-matching join upstream; consumed read-only here.
/// A missing weight means the full amount is attributed to the region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionAllocation {
    pub region: String,
    #[serde(rename = "spendPercentage", alias = "weight", default)]
    pub spend_percentage: Option<f64>,
    /// Present in exports but not used for apportionment: the spend weight is
    /// reused for impressions as well.
    #[serde(rename = "impressionsPercentage", default)]
    pub impressions_percentage: Option<f64>,
}

impl AdRecord {
    /// Midpoint of the spend bounds, missing bounds defaulting to 0.
    pub fn avg_spend(&self) -> f64 {
        (self.spend_lower.unwrap_or(0.0) + self.spend_upper.unwrap_or(0.0)) / 2.0
    }

    /// Midpoint of the impression bounds, missing bounds defaulting to 0.
    pub fn avg_impressions(&self) -> f64 {
        (self.impressions_lower.unwrap_or(0.0) + self.impressions_upper.unwrap_or(0.0)) / 2.0
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_time
            .as_deref()
            .and_then(|s| TimestampParser::parse(s).ok())
    }

    pub fn stop(&self) -> Option<DateTime<Utc>> {
        self.stop_time
            .as_deref()
            .and_then(|s| TimestampParser::parse(s).ok())
    }

    /// Apportionment weight for a canonical region name, if this ad targets
    /// it. Default weight is 1 when the join carries no explicit split.
    pub fn region_weight(&self, canonical_region: &str) -> Option<f64> {
        self.target_regions
            .iter()
            .find(|allocation| {
                crate::geo::normalize_region_name(&allocation.region)
                    .is_some_and(|name| name == canonical_region)
            })
            .map(|allocation| allocation.spend_percentage.unwrap_or(1.0))
    }
}

/// Counts of fields that degraded to defaults during an aggregation pass.
///
/// A single bad record never fails the batch; these counters tell the caller
/// how much was skipped.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct PassDiagnostics {
    #[serde(rename = "unknownRegions")]
    pub unknown_regions: u64,
    #[serde(rename = "missingTimestamps")]
    pub missing_timestamps: u64,
}

impl PassDiagnostics {
    pub fn merge(&mut self, other: &PassDiagnostics) {
        self.unknown_regions += other.unknown_regions;
        self.missing_timestamps += other.missing_timestamps;
    }
}

/// Per-party accumulated totals.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PartyStats {
    pub count: u64,
    #[serde(rename = "spendRaw")]
    pub spend_raw: f64,
    #[serde(rename = "spendLakhs")]
    pub spend_lakhs: f64,
    pub impressions: f64,
    /// Spend routed through known third-party agencies; zeroed at
    /// finalization when below the reporting floor.
    #[serde(rename = "unofficialSpendRaw")]
    pub unofficial_spend_raw: f64,
}

/// Overall totals plus the per-party breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct SpendStats {
    #[serde(rename = "totalAds")]
    pub total_ads: u64,
    #[serde(rename = "totalAdvertisers")]
    pub total_advertisers: u64,
    #[serde(rename = "totalSpendRaw")]
    pub total_spend_raw: f64,
    #[serde(rename = "totalSpendLakhs")]
    pub total_spend_lakhs: f64,
    #[serde(rename = "totalImpressions")]
    pub total_impressions: f64,
    #[serde(rename = "avgImpressionsPerAd")]
    pub avg_impressions_per_ad: f64,
    #[serde(rename = "partyBreakdown")]
    pub party_breakdown: BTreeMap<Party, PartyStats>,
    pub diagnostics: PassDiagnostics,
}

/// One ranked advertiser.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertiserEntry {
    #[serde(rename = "advertiserId")]
    pub advertiser_id: String,
    pub name: String,
    pub party: Party,
    #[serde(rename = "adCount")]
    pub ad_count: u64,
    #[serde(rename = "spendRaw")]
    pub spend_raw: f64,
    pub spend: String,
    pub impressions: f64,
    /// Share of the pre-truncation total, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvertiserReport {
    pub advertisers: Vec<AdvertiserEntry>,
    #[serde(rename = "totalSpendRaw")]
    pub total_spend_raw: f64,
    #[serde(rename = "totalSpend")]
    pub total_spend: String,
    pub diagnostics: PassDiagnostics,
}

/// One ranked region with its party breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RegionEntry {
    pub region: String,
    pub zone: Zone,
    #[serde(rename = "spendRaw")]
    pub spend_raw: f64,
    pub spend: String,
    pub impressions: f64,
    #[serde(rename = "adCount")]
    pub ad_count: u64,
    #[serde(rename = "dominantParty")]
    pub dominant_party: Party,
    #[serde(rename = "partyBreakdown")]
    pub party_breakdown: BTreeMap<Party, f64>,
    /// Share of the pre-truncation total, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    #[serde(rename = "topRegion")]
    pub top_region: String,
    #[serde(rename = "leastRegion")]
    pub least_region: String,
    #[serde(rename = "totalSpendRaw")]
    pub total_spend_raw: f64,
    #[serde(rename = "totalSpend")]
    pub total_spend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub regions: Vec<RegionEntry>,
    /// Ads contributing to three or more regions.
    #[serde(rename = "nationalCampaigns")]
    pub national_campaigns: u64,
    #[serde(rename = "totalAds")]
    pub total_ads: u64,
    pub summary: RegionSummary,
    pub diagnostics: PassDiagnostics,
}

/// One day of the spend time series. Days with no matching records are
/// omitted from the series, not zero-filled.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    /// ISO date, for sorting and machine consumption.
    pub date: String,
    /// Short display label, e.g. "Nov 5".
    pub label: String,
    #[serde(rename = "partySpendLakhs")]
    pub party_spend_lakhs: BTreeMap<Party, f64>,
    #[serde(rename = "totalSpendRaw")]
    pub total_spend_raw: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    pub diagnostics: PassDiagnostics,
}

impl TrendSeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }
}

/// Accumulated totals for one watched candidate (or Others).
#[derive(Debug, Clone, Serialize)]
pub struct PersonEntry {
    pub name: String,
    pub constituency: String,
    pub party: String,
    pub role: String,
    pub count: u64,
    #[serde(rename = "spendRaw")]
    pub spend_raw: f64,
    #[serde(rename = "spendLakhs")]
    pub spend_lakhs: f64,
    pub impressions: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonReport {
    pub persons: Vec<PersonEntry>,
    pub diagnostics: PassDiagnostics,
}
