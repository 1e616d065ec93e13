//! Aggregation Engine
//!
//! Consumes a sequence of [`AdRecord`]s, applies the party/person classifiers
//! and the region normalizer, and produces the five aggregate views: overall
//! stats, ranked advertisers, regional breakdown, per-day trends, and person
//! watch-list totals.
//!
//! Shared rules across all views:
//!
//! - **Apportionment**: with a region filter or region grouping active, a
//!   record contributes `avg_spend * weight` for that region (weight default
//!   1). The spend weight is reused for impressions; the separate impressions
//!   weight in the source data is deliberately not consulted.
//! - **Filtering order**: classification happens first, then the party filter
//!   keeps or drops the record. A region filter is satisfied by the presence
//!   of a matching region allocation, never by string-matching free text.
//! - **Double counting**: an ad targeting several regions contributes to each
//!   region's accumulator independently. It still counts exactly once in the
//!   overall and party-only totals.
//! - **Active window**: with a date range active, a record qualifies when
//!   `start <= until` and (`stop >= since` or stop is absent). An absent stop
//!   means the ad is still running and never counts as ended.
//! - **Ranking**: entries sort descending by spend; ties keep input-encounter
//!   order; truncation to the caller's limit happens after sorting.
//!   Percentage-of-total uses the pre-truncation total in every view.
//! - **Degradation**: malformed fields become neutral defaults and are
//!   counted in [`PassDiagnostics`]; a pass always completes.

use crate::currency::{format_currency, to_lakhs};
use crate::geo::{self, Zone};
use crate::models::*;
use crate::party::{classify_party, is_third_party_advertiser, Party};
use crate::person;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Per-party third-party-agency spend below this floor reports as zero.
/// Applied once at finalization, never per record.
pub const UNOFFICIAL_SPEND_FLOOR: f64 = 2_000_000.0;

/// An ad contributing to at least this many regions counts as a national
/// campaign in the regional view.
pub const NATIONAL_CAMPAIGN_REGION_THRESHOLD: usize = 3;

/// Filters shared by every aggregation operation.
#[derive(Debug, Clone, Default)]
pub struct AggregateFilter {
    /// Keep only records classified to this party.
    pub party: Option<Party>,
    /// Canonical region name; records without a matching allocation drop out
    /// and matching records are weight-apportioned.
    pub region: Option<String>,
    /// Keep only records classified to this watched candidate.
    pub person: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl AggregateFilter {
    fn has_date_bounds(&self) -> bool {
        self.since.is_some() || self.until.is_some()
    }
}

pub struct AggregationEngine;

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Overall totals with the per-party breakdown and unofficial spend.
    pub fn overall_stats(&self, records: &[AdRecord], filter: &AggregateFilter) -> SpendStats {
        let mut diagnostics = PassDiagnostics::default();
        let mut total_ads = 0u64;
        let mut advertisers: HashSet<&str> = HashSet::new();
        let mut total_spend = 0.0;
        let mut total_impressions = 0.0;
        let mut parties = empty_party_breakdown();

        for record in records {
            if !self.active_in_range(record, filter, &mut diagnostics) {
                continue;
            }
            let party = classify_party(
                Some(record.advertiser_id.as_str()),
                record.display_name.as_deref(),
            );
            if filter.party.is_some_and(|wanted| wanted != party) {
                continue;
            }
            let Some(weight) = self.region_scope_weight(record, filter) else {
                continue;
            };

            let spend = record.avg_spend() * weight;
            let impressions = record.avg_impressions() * weight;

            total_ads += 1;
            if !record.advertiser_id.is_empty() {
                advertisers.insert(record.advertiser_id.as_str());
            }
            total_spend += spend;
            total_impressions += impressions;

            let stats = parties.entry(party).or_default();
            stats.count += 1;
            stats.spend_raw += spend;
            stats.impressions += impressions;
            if is_third_party_advertiser(record.display_name.as_deref()) {
                stats.unofficial_spend_raw += spend;
            }
        }

        for stats in parties.values_mut() {
            if stats.unofficial_spend_raw < UNOFFICIAL_SPEND_FLOOR {
                stats.unofficial_spend_raw = 0.0;
            }
            stats.spend_lakhs = to_lakhs(stats.spend_raw);
        }

        debug!(
            total_ads,
            unknown_regions = diagnostics.unknown_regions,
            missing_timestamps = diagnostics.missing_timestamps,
            "overall stats pass complete"
        );

        SpendStats {
            total_ads,
            total_advertisers: advertisers.len() as u64,
            total_spend_raw: total_spend,
            total_spend_lakhs: to_lakhs(total_spend),
            total_impressions,
            avg_impressions_per_ad: if total_ads > 0 {
                total_impressions / total_ads as f64
            } else {
                0.0
            },
            party_breakdown: parties,
            diagnostics,
        }
    }

    /// Advertisers ranked by total spend, truncated to `limit` after sorting.
    pub fn top_advertisers(
        &self,
        records: &[AdRecord],
        filter: &AggregateFilter,
        limit: usize,
    ) -> AdvertiserReport {
        struct Acc {
            advertiser_id: String,
            name: Option<String>,
            party: Party,
            ad_count: u64,
            spend: f64,
            impressions: f64,
        }

        let mut diagnostics = PassDiagnostics::default();
        let mut accs: Vec<Acc> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            if !self.active_in_range(record, filter, &mut diagnostics) {
                continue;
            }
            let party = classify_party(
                Some(record.advertiser_id.as_str()),
                record.display_name.as_deref(),
            );
            if filter.party.is_some_and(|wanted| wanted != party) {
                continue;
            }
            let Some(weight) = self.region_scope_weight(record, filter) else {
                continue;
            };

            let slot = *index
                .entry(record.advertiser_id.clone())
                .or_insert_with(|| {
                    accs.push(Acc {
                        advertiser_id: record.advertiser_id.clone(),
                        name: None,
                        party,
                        ad_count: 0,
                        spend: 0.0,
                        impressions: 0.0,
                    });
                    accs.len() - 1
                });
            let acc = &mut accs[slot];
            if acc.name.is_none() {
                acc.name = record.display_name.clone();
            }
            acc.ad_count += 1;
            acc.spend += record.avg_spend() * weight;
            acc.impressions += record.avg_impressions() * weight;
        }

        // Zero-spend advertisers carry no ranking signal.
        accs.retain(|acc| acc.spend > 0.0);

        let total_spend: f64 = accs.iter().map(|acc| acc.spend).sum();

        // Stable sort keeps ties in input-encounter order.
        accs.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(std::cmp::Ordering::Equal));

        let advertisers: Vec<AdvertiserEntry> = accs
            .into_iter()
            .take(limit)
            .map(|acc| AdvertiserEntry {
                name: acc
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Page {}", acc.advertiser_id)),
                advertiser_id: acc.advertiser_id,
                party: acc.party,
                ad_count: acc.ad_count,
                spend: format_currency(acc.spend),
                spend_raw: acc.spend,
                impressions: acc.impressions,
                percentage: percentage_of(acc.spend, total_spend),
            })
            .collect();

        AdvertiserReport {
            advertisers,
            total_spend: format_currency(total_spend),
            total_spend_raw: total_spend,
            diagnostics,
        }
    }

    /// Per-region totals with party breakdown, ranked by spend.
    ///
    /// Each recognized region allocation contributes an independent weighted
    /// fragment, so an ad spanning regions is intentionally counted once per
    /// region here.
    pub fn region_breakdown(
        &self,
        records: &[AdRecord],
        filter: &AggregateFilter,
        limit: usize,
    ) -> RegionReport {
        struct Acc {
            region: &'static str,
            zone: Zone,
            spend: f64,
            impressions: f64,
            ad_count: u64,
            parties: BTreeMap<Party, f64>,
        }

        let mut diagnostics = PassDiagnostics::default();
        let mut accs: Vec<Acc> = Vec::new();
        let mut index: HashMap<&'static str, usize> = HashMap::new();
        let mut national_campaigns = 0u64;
        let mut total_ads = 0u64;

        for record in records {
            if !self.active_in_range(record, filter, &mut diagnostics) {
                continue;
            }
            let party = classify_party(
                Some(record.advertiser_id.as_str()),
                record.display_name.as_deref(),
            );
            if filter.party.is_some_and(|wanted| wanted != party) {
                continue;
            }

            let avg_spend = record.avg_spend();
            let avg_impressions = record.avg_impressions();
            let mut regions_hit: HashSet<&'static str> = HashSet::new();

            for allocation in &record.target_regions {
                let Some(canonical) = geo::normalize_region_name(&allocation.region) else {
                    diagnostics.unknown_regions += 1;
                    continue;
                };
                if filter
                    .region
                    .as_deref()
                    .is_some_and(|wanted| wanted != canonical)
                {
                    continue;
                }

                let weight = allocation.spend_percentage.unwrap_or(1.0);
                let slot = *index.entry(canonical).or_insert_with(|| {
                    accs.push(Acc {
                        region: canonical,
                        zone: geo::zone_of(canonical),
                        spend: 0.0,
                        impressions: 0.0,
                        ad_count: 0,
                        parties: BTreeMap::new(),
                    });
                    accs.len() - 1
                });
                let acc = &mut accs[slot];
                acc.spend += avg_spend * weight;
                acc.impressions += avg_impressions * weight;
                acc.ad_count += 1;
                *acc.parties.entry(party).or_insert(0.0) += avg_spend * weight;
                regions_hit.insert(canonical);
            }

            if !regions_hit.is_empty() {
                total_ads += 1;
            }
            if regions_hit.len() >= NATIONAL_CAMPAIGN_REGION_THRESHOLD {
                national_campaigns += 1;
            }
        }

        let total_spend: f64 = accs.iter().map(|acc| acc.spend).sum();

        accs.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(std::cmp::Ordering::Equal));

        let summary = RegionSummary {
            top_region: accs
                .first()
                .map(|acc| acc.region.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            least_region: accs
                .last()
                .map(|acc| acc.region.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            total_spend: format_currency(total_spend),
            total_spend_raw: total_spend,
        };

        let regions: Vec<RegionEntry> = accs
            .into_iter()
            .take(limit)
            .map(|acc| {
                let dominant_party = acc
                    .parties
                    .iter()
                    .fold((Party::Others, f64::MIN), |(best, max), (party, spend)| {
                        if *spend > max {
                            (*party, *spend)
                        } else {
                            (best, max)
                        }
                    })
                    .0;
                RegionEntry {
                    region: acc.region.to_string(),
                    zone: acc.zone,
                    spend: format_currency(acc.spend),
                    spend_raw: acc.spend,
                    impressions: acc.impressions,
                    ad_count: acc.ad_count,
                    dominant_party,
                    party_breakdown: acc.parties,
                    percentage: percentage_of(acc.spend, total_spend),
                }
            })
            .collect();

        RegionReport {
            regions,
            national_campaigns,
            total_ads,
            summary,
            diagnostics,
        }
    }

    /// Per-day per-party spend series, bucketed by the calendar day of
    /// `start_time`. Days without matching records are omitted.
    pub fn spend_trends(&self, records: &[AdRecord], filter: &AggregateFilter) -> TrendSeries {
        let mut diagnostics = PassDiagnostics::default();
        let mut buckets: BTreeMap<NaiveDate, (BTreeMap<Party, f64>, f64)> = BTreeMap::new();

        for record in records {
            let Some(start) = record.start() else {
                diagnostics.missing_timestamps += 1;
                continue;
            };
            if filter.since.is_some_and(|since| start < since) {
                continue;
            }
            if filter.until.is_some_and(|until| start > until) {
                continue;
            }
            let party = classify_party(
                Some(record.advertiser_id.as_str()),
                record.display_name.as_deref(),
            );
            if filter.party.is_some_and(|wanted| wanted != party) {
                continue;
            }
            let Some(weight) = self.region_scope_weight(record, filter) else {
                continue;
            };

            let spend = record.avg_spend() * weight;
            let (parties, total) = buckets.entry(start.date_naive()).or_default();
            *parties.entry(party).or_insert(0.0) += spend;
            *total += spend;
        }

        let points = buckets
            .into_iter()
            .map(|(date, (parties, total))| TrendPoint {
                date: date.format("%Y-%m-%d").to_string(),
                label: date.format("%b %-d").to_string(),
                party_spend_lakhs: parties
                    .into_iter()
                    .map(|(party, spend)| (party, to_lakhs(spend)))
                    .collect(),
                total_spend_raw: total,
            })
            .collect();

        TrendSeries {
            points,
            diagnostics,
        }
    }

    /// Totals for each watched candidate plus the Others bucket.
    pub fn person_spend(&self, records: &[AdRecord], filter: &AggregateFilter) -> PersonReport {
        #[derive(Default, Clone, Copy)]
        struct Acc {
            count: u64,
            spend: f64,
            impressions: f64,
        }

        let mut diagnostics = PassDiagnostics::default();
        let names: Vec<&'static str> = person::watch_list().chain([person::OTHERS]).collect();
        let mut accs: Vec<Acc> = vec![Acc::default(); names.len()];

        for record in records {
            if !self.active_in_range(record, filter, &mut diagnostics) {
                continue;
            }
            let name = person::classify_person(
                Some(record.advertiser_id.as_str()),
                record.display_name.as_deref(),
            );
            if filter
                .person
                .as_deref()
                .is_some_and(|wanted| wanted != name)
            {
                continue;
            }
            let Some(weight) = self.region_scope_weight(record, filter) else {
                continue;
            };

            // watch_list order is fixed, so the linear scan is fine.
            let slot = names.iter().position(|n| *n == name).unwrap_or(names.len() - 1);
            let acc = &mut accs[slot];
            acc.count += 1;
            acc.spend += record.avg_spend() * weight;
            acc.impressions += record.avg_impressions() * weight;
        }

        let persons = names
            .iter()
            .zip(accs)
            .map(|(name, acc)| {
                let details = person::person_details(name);
                PersonEntry {
                    name: name.to_string(),
                    constituency: details.map(|d| d.constituency).unwrap_or("Unknown").to_string(),
                    party: details.map(|d| d.party).unwrap_or("Unknown").to_string(),
                    role: details.map(|d| d.role).unwrap_or("Unknown").to_string(),
                    count: acc.count,
                    spend_raw: acc.spend,
                    spend_lakhs: to_lakhs(acc.spend),
                    impressions: acc.impressions,
                }
            })
            .collect();

        PersonReport {
            persons,
            diagnostics,
        }
    }

    /// Active-window check. With no date bounds every record qualifies; with
    /// bounds, records lacking a parseable start time are excluded and
    /// counted.
    fn active_in_range(
        &self,
        record: &AdRecord,
        filter: &AggregateFilter,
        diagnostics: &mut PassDiagnostics,
    ) -> bool {
        if !filter.has_date_bounds() {
            return true;
        }
        let Some(start) = record.start() else {
            diagnostics.missing_timestamps += 1;
            return false;
        };
        if filter.until.is_some_and(|until| start > until) {
            return false;
        }
        if let Some(since) = filter.since {
            // An absent stop time means the ad is still running.
            if let Some(stop) = record.stop() {
                if stop < since {
                    return false;
                }
            }
        }
        true
    }

    /// Weight a record contributes under the active region filter: 1 with no
    /// filter, the allocation weight when the record targets the region, and
    /// `None` (drop the record) otherwise.
    fn region_scope_weight(&self, record: &AdRecord, filter: &AggregateFilter) -> Option<f64> {
        match filter.region.as_deref() {
            None => Some(1.0),
            Some(region) => record.region_weight(region),
        }
    }
}

fn empty_party_breakdown() -> BTreeMap<Party, PartyStats> {
    Party::ALL
        .iter()
        .map(|party| (*party, PartyStats::default()))
        .collect()
}

fn percentage_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        (part / total * 100.0 * 10.0).round() / 10.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionAllocation;

    fn record(id: &str, name: &str, lower: f64, upper: f64) -> AdRecord {
        AdRecord {
            advertiser_id: id.to_string(),
            display_name: Some(name.to_string()),
            spend_lower: Some(lower),
            spend_upper: Some(upper),
            impressions_lower: Some(1_000.0),
            impressions_upper: Some(3_000.0),
            start_time: Some("2024-11-01".to_string()),
            stop_time: None,
            target_regions: Vec::new(),
        }
    }

    fn allocation(region: &str, weight: Option<f64>) -> RegionAllocation {
        RegionAllocation {
            region: region.to_string(),
            spend_percentage: weight,
            impressions_percentage: None,
        }
    }

    fn date(s: &str) -> DateTime<Utc> {
        crate::timestamp::TimestampParser::parse(s).unwrap()
    }

    #[test]
    fn test_overall_stats_counts_each_ad_once() {
        // An ad split across regions must not double-count in the overall
        // totals.
        let mut rec = record("p1", "BJP Maharashtra", 500.0, 1_500.0);
        rec.target_regions = vec![
            allocation("Delhi", Some(0.6)),
            allocation("Punjab", Some(0.4)),
        ];
        let engine = AggregationEngine::new();
        let stats = engine.overall_stats(&[rec], &AggregateFilter::default());

        assert_eq!(stats.total_ads, 1);
        assert_eq!(stats.total_spend_raw, 1_000.0);
        assert_eq!(stats.party_breakdown[&Party::Bjp].count, 1);
        assert_eq!(stats.party_breakdown[&Party::Bjp].spend_raw, 1_000.0);
    }

    #[test]
    fn test_region_apportionment_conservation() {
        let mut rec = record("p1", "BJP Maharashtra", 500.0, 1_500.0);
        rec.target_regions = vec![
            allocation("Delhi", Some(0.6)),
            allocation("Punjab", Some(0.4)),
        ];
        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[rec], &AggregateFilter::default(), 10);

        let delhi = report.regions.iter().find(|r| r.region == "Delhi").unwrap();
        let punjab = report.regions.iter().find(|r| r.region == "Punjab").unwrap();
        assert_eq!(delhi.spend_raw, 600.0);
        assert_eq!(punjab.spend_raw, 400.0);
        assert_eq!(delhi.zone, Zone::North);
        assert_eq!(report.total_ads, 1);
    }

    #[test]
    fn test_region_weight_defaults_to_full_attribution() {
        let mut rec = record("p1", "BJP Maharashtra", 1_000.0, 1_000.0);
        rec.target_regions = vec![allocation("Kerala", None)];
        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[rec], &AggregateFilter::default(), 10);
        assert_eq!(report.regions[0].spend_raw, 1_000.0);
    }

    #[test]
    fn test_unknown_regions_excluded_and_counted() {
        let mut rec = record("p1", "BJP Maharashtra", 1_000.0, 1_000.0);
        rec.target_regions = vec![allocation("Atlantis", None), allocation("Bihar", None)];
        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[rec], &AggregateFilter::default(), 10);
        assert_eq!(report.regions.len(), 1);
        assert_eq!(report.regions[0].region, "Bihar");
        assert_eq!(report.diagnostics.unknown_regions, 1);
    }

    #[test]
    fn test_region_filter_apportions_all_views() {
        let mut rec = record("p1", "BJP Maharashtra", 500.0, 1_500.0);
        rec.target_regions = vec![
            allocation("Delhi", Some(0.6)),
            allocation("Punjab", Some(0.4)),
        ];
        let other = record("p2", "Congress Sevadal", 2_000.0, 2_000.0);

        let engine = AggregationEngine::new();
        let filter = AggregateFilter {
            region: Some("Delhi".to_string()),
            ..Default::default()
        };
        let stats = engine.overall_stats(&[rec, other], &filter);

        // Only the Delhi-targeted ad survives, at 60% weight; impressions
        // reuse the spend weight.
        assert_eq!(stats.total_ads, 1);
        assert_eq!(stats.total_spend_raw, 600.0);
        assert_eq!(stats.total_impressions, 1_200.0);
    }

    #[test]
    fn test_party_filter_applied_after_classification() {
        let records = vec![
            record("p1", "BJP Karnataka", 1_000.0, 1_000.0),
            record("p2", "Congress Sevadal", 3_000.0, 3_000.0),
        ];
        let engine = AggregationEngine::new();
        let filter = AggregateFilter {
            party: Some(Party::Inc),
            ..Default::default()
        };
        let stats = engine.overall_stats(&records, &filter);
        assert_eq!(stats.total_ads, 1);
        assert_eq!(stats.total_spend_raw, 3_000.0);
    }

    #[test]
    fn test_unofficial_spend_floor_boundary() {
        let engine = AggregationEngine::new();

        // 1,999,999 total: below the floor, reports zero.
        let below = vec![record(
            "p1",
            "GIBBOUS FILMS PRIVATE LIMITED",
            1_999_999.0,
            1_999_999.0,
        )];
        let stats = engine.overall_stats(&below, &AggregateFilter::default());
        assert_eq!(stats.party_breakdown[&Party::Inc].unofficial_spend_raw, 0.0);

        // 2,000,000: at the floor, reports the accumulated value.
        let at = vec![record(
            "p1",
            "GIBBOUS FILMS PRIVATE LIMITED",
            2_000_000.0,
            2_000_000.0,
        )];
        let stats = engine.overall_stats(&at, &AggregateFilter::default());
        assert_eq!(
            stats.party_breakdown[&Party::Inc].unofficial_spend_raw,
            2_000_000.0
        );
    }

    #[test]
    fn test_active_window_null_stop_means_running() {
        let mut rec = record("p1", "BJP Karnataka", 1_000.0, 1_000.0);
        rec.start_time = Some("2020-01-01".to_string());
        rec.stop_time = None;

        let engine = AggregationEngine::new();
        let filter = AggregateFilter {
            since: Some(date("2024-11-01")),
            until: Some(date("2024-11-30")),
            ..Default::default()
        };
        let stats = engine.overall_stats(&[rec], &filter);
        // Started long before the range but never stopped: still active.
        assert_eq!(stats.total_ads, 1);
    }

    #[test]
    fn test_active_window_excludes_ended_and_future_ads() {
        let mut ended = record("p1", "BJP Karnataka", 1_000.0, 1_000.0);
        ended.start_time = Some("2024-01-01".to_string());
        ended.stop_time = Some("2024-06-01".to_string());

        let mut future = record("p2", "BJP Karnataka", 1_000.0, 1_000.0);
        future.start_time = Some("2025-01-01".to_string());

        let mut missing = record("p3", "BJP Karnataka", 1_000.0, 1_000.0);
        missing.start_time = None;

        let engine = AggregationEngine::new();
        let filter = AggregateFilter {
            since: Some(date("2024-11-01")),
            until: Some(date("2024-11-30")),
            ..Default::default()
        };
        let stats = engine.overall_stats(&[ended, future, missing], &filter);
        assert_eq!(stats.total_ads, 0);
        assert_eq!(stats.diagnostics.missing_timestamps, 1);
    }

    #[test]
    fn test_top_advertisers_ranking_and_truncation() {
        let records = vec![
            record("p1", "Small Spender", 100.0, 100.0),
            record("p2", "Big Spender", 10_000.0, 10_000.0),
            record("p2", "Big Spender", 10_000.0, 10_000.0),
            record("p3", "Mid Spender", 5_000.0, 5_000.0),
        ];
        let engine = AggregationEngine::new();
        let report = engine.top_advertisers(&records, &AggregateFilter::default(), 2);

        assert_eq!(report.advertisers.len(), 2);
        assert_eq!(report.advertisers[0].advertiser_id, "p2");
        assert_eq!(report.advertisers[0].spend_raw, 20_000.0);
        assert_eq!(report.advertisers[0].ad_count, 2);
        assert_eq!(report.advertisers[1].advertiser_id, "p3");
        // Percentage base is the pre-truncation total (25,100), not the
        // visible slice.
        assert_eq!(report.total_spend_raw, 25_100.0);
        assert_eq!(report.advertisers[0].percentage, 79.7);
    }

    #[test]
    fn test_top_advertisers_ties_keep_encounter_order() {
        let records = vec![
            record("a", "First Seen", 1_000.0, 1_000.0),
            record("b", "Second Seen", 1_000.0, 1_000.0),
        ];
        let engine = AggregationEngine::new();
        let report = engine.top_advertisers(&records, &AggregateFilter::default(), 10);
        assert_eq!(report.advertisers[0].advertiser_id, "a");
        assert_eq!(report.advertisers[1].advertiser_id, "b");
    }

    #[test]
    fn test_zero_spend_advertisers_dropped() {
        let records = vec![
            record("p1", "No Spend", 0.0, 0.0),
            record("p2", "Some Spend", 100.0, 100.0),
        ];
        let engine = AggregationEngine::new();
        let report = engine.top_advertisers(&records, &AggregateFilter::default(), 10);
        assert_eq!(report.advertisers.len(), 1);
        assert_eq!(report.advertisers[0].advertiser_id, "p2");
    }

    #[test]
    fn test_trends_sparse_buckets_sorted() {
        let mut nov5 = record("p1", "BJP Karnataka", 200_000.0, 200_000.0);
        nov5.start_time = Some("2024-11-05".to_string());
        let mut nov3 = record("p2", "Congress Sevadal", 100_000.0, 100_000.0);
        nov3.start_time = Some("2024-11-03".to_string());
        let mut no_start = record("p3", "BJP Karnataka", 50_000.0, 50_000.0);
        no_start.start_time = None;

        let engine = AggregationEngine::new();
        let series = engine.spend_trends(&[nov5, nov3, no_start], &AggregateFilter::default());

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].date, "2024-11-03");
        assert_eq!(series.points[0].label, "Nov 3");
        assert_eq!(series.points[1].label, "Nov 5");
        assert_eq!(series.points[0].party_spend_lakhs[&Party::Inc], 1.0);
        assert_eq!(series.points[1].party_spend_lakhs[&Party::Bjp], 2.0);
        assert_eq!(series.diagnostics.missing_timestamps, 1);
    }

    #[test]
    fn test_national_campaign_threshold() {
        let mut national = record("p1", "BJP Karnataka", 1_000.0, 1_000.0);
        national.target_regions = vec![
            allocation("Delhi", None),
            allocation("Kerala", None),
            allocation("Bihar", None),
        ];
        let mut local = record("p2", "Congress Sevadal", 1_000.0, 1_000.0);
        local.target_regions = vec![allocation("Punjab", None)];

        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[national, local], &AggregateFilter::default(), 10);
        assert_eq!(report.national_campaigns, 1);
        assert_eq!(report.total_ads, 2);
    }

    #[test]
    fn test_region_summary_uses_full_set() {
        let mut rec = record("p1", "BJP Karnataka", 1_000.0, 1_000.0);
        rec.target_regions = vec![
            allocation("Delhi", Some(0.5)),
            allocation("Kerala", Some(0.3)),
            allocation("Bihar", Some(0.2)),
        ];
        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[rec], &AggregateFilter::default(), 1);

        assert_eq!(report.regions.len(), 1);
        assert_eq!(report.summary.top_region, "Delhi");
        // Least region comes from the full ranking, not the truncated slice.
        assert_eq!(report.summary.least_region, "Bihar");
        assert_eq!(report.summary.total_spend_raw, 1_000.0);
    }

    #[test]
    fn test_dominant_party_per_region() {
        let mut bjp = record("p1", "BJP Karnataka", 3_000.0, 3_000.0);
        bjp.target_regions = vec![allocation("Delhi", None)];
        let mut inc = record("p2", "Congress Sevadal", 1_000.0, 1_000.0);
        inc.target_regions = vec![allocation("Delhi", None)];

        let engine = AggregationEngine::new();
        let report = engine.region_breakdown(&[bjp, inc], &AggregateFilter::default(), 10);
        assert_eq!(report.regions[0].dominant_party, Party::Bjp);
        assert_eq!(report.regions[0].ad_count, 2);
    }

    #[test]
    fn test_person_spend_watch_list_and_others() {
        let records = vec![
            record("p1", "Vote Maithili Thakur", 200_000.0, 200_000.0),
            record("p2", "Unrelated Advertiser", 100_000.0, 100_000.0),
        ];
        let engine = AggregationEngine::new();
        let report = engine.person_spend(&records, &AggregateFilter::default());

        assert_eq!(report.persons.len(), 4);
        let maithili = report
            .persons
            .iter()
            .find(|p| p.name == "Maithili Thakur")
            .unwrap();
        assert_eq!(maithili.count, 1);
        assert_eq!(maithili.spend_lakhs, 2.0);
        assert_eq!(maithili.constituency, "Alinagar");
        let others = report.persons.iter().find(|p| p.name == "Others").unwrap();
        assert_eq!(others.count, 1);
        assert_eq!(others.constituency, "Unknown");
    }
}
