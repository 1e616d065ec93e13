//! Output Formatting and Display Management
//!
//! Handles all output formatting for the analysis results: human-readable
//! colored terminal reports, and structured JSON for programmatic
//! consumption. Every view renders from the finalized aggregate structures;
//! no aggregation happens here.

use crate::currency::{format_compact_currency, format_currency, lakhs_to_crores};
use crate::models::*;
use colored::Colorize;

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_stats(&self, stats: &SpendStats, json_output: bool) {
        if json_output {
            self.print_json(&serde_json::json!({ "stats": stats }));
            return;
        }

        self.print_header("Political Ad Spend Report - Overview");

        println!(
            "\n{} {} ads • {} advertisers • {} total\n",
            "📊".bright_yellow(),
            stats.total_ads.to_string().bright_white().bold(),
            stats.total_advertisers.to_string().bright_white().bold(),
            format_currency(stats.total_spend_raw).bright_green().bold()
        );
        println!(
            "   Impressions: {} total, {} per ad",
            format!("{:.0}", stats.total_impressions).bright_white(),
            format!("{:.0}", stats.avg_impressions_per_ad).bright_white()
        );

        println!("\n{} Party breakdown:", "🗳️".bright_blue());
        for (party, party_stats) in &stats.party_breakdown {
            if party_stats.count == 0 {
                continue;
            }
            let unofficial = if party_stats.unofficial_spend_raw > 0.0 {
                format!(
                    ", unofficial {}",
                    format_currency(party_stats.unofficial_spend_raw)
                )
            } else {
                String::new()
            };
            println!(
                "   {}: {} ({} ads{})",
                party.code().bright_cyan(),
                format_currency(party_stats.spend_raw).bright_green(),
                party_stats.count.to_string().bright_white(),
                unofficial
            );
        }

        self.print_diagnostics(&stats.diagnostics);
    }

    pub fn display_advertisers(&self, report: &AdvertiserReport, json_output: bool) {
        if json_output {
            self.print_json(&serde_json::json!({ "advertisers": report }));
            return;
        }

        self.print_header("Political Ad Spend Report - Top Advertisers");

        println!(
            "\n{} {} advertisers shown • {} total\n",
            "📊".bright_yellow(),
            report.advertisers.len().to_string().bright_white().bold(),
            report.total_spend.bright_green().bold()
        );

        for (rank, advertiser) in report.advertisers.iter().enumerate() {
            println!(
                "{:>3}. {} [{}] — {} ({}%, {} ads)",
                (rank + 1).to_string().bright_white(),
                advertiser.name.bright_cyan(),
                advertiser.party.code().bright_magenta(),
                advertiser.spend.bright_green(),
                format!("{:.1}", advertiser.percentage).bright_yellow(),
                advertiser.ad_count.to_string().bright_white()
            );
        }

        self.print_diagnostics(&report.diagnostics);
    }

    pub fn display_regions(&self, report: &RegionReport, json_output: bool) {
        if json_output {
            self.print_json(&serde_json::json!({ "regions": report }));
            return;
        }

        self.print_header("Political Ad Spend Report - Regional Breakdown");

        println!(
            "\n{} {} regions • {} national campaigns • {} total\n",
            "📊".bright_yellow(),
            report.regions.len().to_string().bright_white().bold(),
            report.national_campaigns.to_string().bright_white().bold(),
            report.summary.total_spend.bright_green().bold()
        );

        for region in &report.regions {
            println!(
                "{} {} ({}) — {} ({}%, {} ads, dominant: {})",
                "📍".bright_blue(),
                region.region.bright_white().bold(),
                region.zone,
                region.spend.bright_green(),
                format!("{:.1}", region.percentage).bright_yellow(),
                region.ad_count.to_string().bright_white(),
                region.dominant_party.code().bright_magenta()
            );
        }

        println!(
            "\n   Top region: {} • Least: {}",
            report.summary.top_region.bright_white().bold(),
            report.summary.least_region.bright_white()
        );

        self.print_diagnostics(&report.diagnostics);
    }

    pub fn display_trends(&self, series: &TrendSeries, json_output: bool) {
        if json_output {
            self.print_json(&serde_json::json!({ "trends": series }));
            return;
        }

        self.print_header("Political Ad Spend Report - Daily Trends");

        if series.points.is_empty() {
            println!("\nNo spend recorded in the selected window.");
            return;
        }

        println!();
        for point in &series.points {
            println!(
                "{} {} — {}",
                "📅".bright_blue(),
                point.label.bright_white().bold(),
                format_currency(point.total_spend_raw).bright_green().bold()
            );

            for (party, lakhs) in &point.party_spend_lakhs {
                if *lakhs == 0.0 {
                    continue;
                }
                let line = if *lakhs >= 100.0 {
                    format!("₹{:.2} Cr", lakhs_to_crores(*lakhs))
                } else {
                    format!("₹{:.2} L", lakhs)
                };
                println!("   {}: {}", party.code().bright_cyan(), line.bright_green());
            }
        }

        self.print_diagnostics(&series.diagnostics);
    }

    pub fn display_persons(&self, report: &PersonReport, json_output: bool) {
        if json_output {
            self.print_json(&serde_json::json!({ "persons": report }));
            return;
        }

        self.print_header("Political Ad Spend Report - Candidate Watch-List");

        println!();
        for person in &report.persons {
            println!(
                "{} {} ({}, {}) — {} ({} ads)",
                "👤".bright_blue(),
                person.name.bright_white().bold(),
                person.constituency.bright_white(),
                person.party.bright_magenta(),
                format_compact_currency(person.spend_raw).bright_green().bold(),
                person.count.to_string().bright_white()
            );
        }

        self.print_diagnostics(&report.diagnostics);
    }

    /// Combined report: stats, top advertisers, regions, and trends.
    pub fn display_dashboard(
        &self,
        stats: &SpendStats,
        advertisers: &AdvertiserReport,
        regions: &RegionReport,
        trends: &TrendSeries,
        json_output: bool,
    ) {
        if json_output {
            self.print_json(&serde_json::json!({
                "stats": stats,
                "topAdvertisers": advertisers.advertisers,
                "geography": regions.regions,
                "trends": trends,
            }));
            return;
        }

        self.display_stats(stats, false);
        self.display_advertisers(advertisers, false);
        self.display_regions(regions, false);
        self.display_trends(trends, false);
    }

    fn print_header(&self, title: &str) {
        println!("\n{}", "=".repeat(80).bright_cyan());
        println!("{}", title.bright_white().bold());
        println!("{}", "=".repeat(80).bright_cyan());
    }

    fn print_json(&self, value: &serde_json::Value) {
        match serde_json::to_string_pretty(value) {
            Ok(json_str) => println!("{}", json_str),
            Err(e) => eprintln!("Error serializing report to JSON: {}", e),
        }
    }

    fn print_diagnostics(&self, diagnostics: &PassDiagnostics) {
        if diagnostics.unknown_regions > 0 || diagnostics.missing_timestamps > 0 {
            println!(
                "\n   {} skipped fields: {} unknown regions, {} missing timestamps",
                "⚠️".bright_yellow(),
                diagnostics.unknown_regions,
                diagnostics.missing_timestamps
            );
        }
    }
}
