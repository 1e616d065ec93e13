//! Analysis Orchestration
//!
//! [`AdSpendAnalyzer`] is the entry point wiring the pipeline together: it
//! loads ad records from disk, builds the aggregation filter from the CLI
//! options, runs the requested view on the [`AggregationEngine`], and hands
//! the finalized aggregate to the [`DisplayManager`].
//!
//! The analyzer owns no state between runs; every command loads a fresh
//! record sequence and builds a fresh aggregate, so concurrent invocations
//! need no coordination.

use crate::config::get_config;
use crate::display::DisplayManager;
use crate::engine::{AggregateFilter, AggregationEngine};
use crate::models::AdRecord;
use crate::parser::RecordParser;
use crate::party::Party;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

/// Options shared by every report command.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub json_output: bool,
    pub limit: Option<usize>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub party: Option<Party>,
    /// Raw region name as typed; normalized before filtering.
    pub region: Option<String>,
    pub person: Option<String>,
    /// Data file or directory; defaults to the configured data directory.
    pub data_path: Option<PathBuf>,
}

pub struct AdSpendAnalyzer {
    engine: AggregationEngine,
    display: DisplayManager,
}

impl Default for AdSpendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AdSpendAnalyzer {
    pub fn new() -> Self {
        Self {
            engine: AggregationEngine::new(),
            display: DisplayManager::new(),
        }
    }

    /// Load records and run one report command.
    pub fn run_command(&self, command: &str, options: ReportOptions) -> Result<()> {
        let records = self.load_records(&options)?;

        if records.is_empty() {
            warn!("No ad records found");
            if options.json_output {
                println!("[]");
            } else {
                println!("No ad records found.");
            }
            return Ok(());
        }

        let filter = self.build_filter(&options)?;
        let limit = options.limit.unwrap_or(get_config().report.default_limit);

        match command {
            "stats" => {
                let stats = self.engine.overall_stats(&records, &filter);
                self.display.display_stats(&stats, options.json_output);
            }
            "advertisers" => {
                let report = self.engine.top_advertisers(&records, &filter, limit);
                self.display.display_advertisers(&report, options.json_output);
            }
            "regions" => {
                let report = self.engine.region_breakdown(&records, &filter, limit);
                self.display.display_regions(&report, options.json_output);
            }
            "trends" => {
                let filter = self.trend_filter(filter);
                let series = self.engine.spend_trends(&records, &filter);
                self.display.display_trends(&series, options.json_output);
            }
            "persons" => {
                let report = self.engine.person_spend(&records, &filter);
                self.display.display_persons(&report, options.json_output);
            }
            "dashboard" => {
                let stats = self.engine.overall_stats(&records, &filter);
                let advertisers = self.engine.top_advertisers(&records, &filter, limit);
                let regions = self.engine.region_breakdown(&records, &filter, limit);
                let trends = self
                    .engine
                    .spend_trends(&records, &self.trend_filter(filter));
                self.display.display_dashboard(
                    &stats,
                    &advertisers,
                    &regions,
                    &trends,
                    options.json_output,
                );
            }
            _ => {
                anyhow::bail!("Unknown command: {}", command);
            }
        }

        Ok(())
    }

    fn load_records(&self, options: &ReportOptions) -> Result<Vec<AdRecord>> {
        let path = options
            .data_path
            .clone()
            .unwrap_or_else(|| get_config().paths.data_directory.clone());

        let parser = RecordParser::new();
        let result = parser
            .load(&path)
            .with_context(|| format!("Failed to load ad records from {}", path.display()))?;

        info!(
            files = result.files,
            records = result.records.len(),
            skipped_lines = result.skipped_lines,
            "loaded ad records"
        );
        if result.skipped_lines > 0 && !options.json_output {
            println!(
                "📊 Loaded {} records, skipped {} malformed lines",
                result.records.len(),
                result.skipped_lines
            );
        }

        Ok(result.records)
    }

    fn build_filter(&self, options: &ReportOptions) -> Result<AggregateFilter> {
        let region = match options.region.as_deref() {
            Some(raw) => Some(
                crate::geo::normalize_region_name(raw)
                    .map(str::to_string)
                    .with_context(|| format!("Unknown region: {}", raw))?,
            ),
            None => None,
        };

        Ok(AggregateFilter {
            party: options.party,
            region,
            person: options.person.clone(),
            since: options.since,
            until: options.until,
        })
    }

    /// Trends default to the configured trailing window when the caller gave
    /// no explicit range.
    fn trend_filter(&self, mut filter: AggregateFilter) -> AggregateFilter {
        if filter.since.is_none() && filter.until.is_none() {
            filter.since =
                Some(Utc::now() - Duration::days(get_config().report.trend_window_days));
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_region_is_an_error() {
        let analyzer = AdSpendAnalyzer::new();
        let options = ReportOptions {
            region: Some("Atlantis".to_string()),
            ..Default::default()
        };
        assert!(analyzer.build_filter(&options).is_err());
    }

    #[test]
    fn test_region_filter_is_normalized() {
        let analyzer = AdSpendAnalyzer::new();
        let options = ReportOptions {
            region: Some("NCT of Delhi".to_string()),
            ..Default::default()
        };
        let filter = analyzer.build_filter(&options).unwrap();
        assert_eq!(filter.region.as_deref(), Some("Delhi"));
    }

    #[test]
    fn test_trend_filter_defaults_to_trailing_window() {
        let analyzer = AdSpendAnalyzer::new();
        let filter = analyzer.trend_filter(AggregateFilter::default());
        assert!(filter.since.is_some());

        let explicit = AggregateFilter {
            until: Some(Utc::now()),
            ..Default::default()
        };
        let filter = analyzer.trend_filter(explicit);
        assert!(filter.since.is_none());
    }
}
