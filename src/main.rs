use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use adspend::analyzer::{AdSpendAnalyzer, ReportOptions};
use adspend::party::Party;

#[derive(Parser)]
#[command(name = "adspend")]
#[command(about = "Political ad spend analytics: classification and aggregation of ad library exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct CommonArgs {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
    /// Show top N entries in ranked views
    #[arg(long)]
    limit: Option<usize>,
    /// Start date filter (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,
    /// End date filter (YYYY-MM-DD)
    #[arg(long)]
    until: Option<String>,
    /// Keep only ads classified to this party (e.g. BJP, INC, RJD)
    #[arg(long)]
    party: Option<String>,
    /// Keep only ads targeting this state/UT (apportioned by region weight)
    #[arg(long)]
    region: Option<String>,
    /// Data file or directory of JSONL exports
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall totals with per-party breakdown and unofficial spend
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Advertisers ranked by total spend
    Advertisers {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Per-region totals with party breakdown
    Regions {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Daily per-party spend series
    Trends {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Candidate watch-list totals
    Persons {
        #[command(flatten)]
        common: CommonArgs,
        /// Keep only ads classified to this candidate
        #[arg(long)]
        person: Option<String>,
    },
    /// Combined report: stats, advertisers, regions, and trends
    Dashboard {
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() -> Result<()> {
    adspend::logging::init_logging();

    let cli = Cli::parse();

    let (command, common, person) = match cli.command.unwrap_or(Commands::Dashboard {
        common: CommonArgs {
            json: false,
            limit: None,
            since: None,
            until: None,
            party: None,
            region: None,
            data: None,
        },
    }) {
        Commands::Stats { common } => ("stats", common, None),
        Commands::Advertisers { common } => ("advertisers", common, None),
        Commands::Regions { common } => ("regions", common, None),
        Commands::Trends { common } => ("trends", common, None),
        Commands::Persons { common, person } => ("persons", common, person),
        Commands::Dashboard { common } => ("dashboard", common, None),
    };

    let options = build_options(&common, person);
    let analyzer = AdSpendAnalyzer::new();

    match analyzer.run_command(command, options) {
        Ok(()) => Ok(()),
        Err(e) => handle_error(e, common.json),
    }
}

fn build_options(common: &CommonArgs, person: Option<String>) -> ReportOptions {
    // Parse date filters
    let since = common.since.as_deref().map(|since_str| {
        match chrono::NaiveDate::parse_from_str(since_str, "%Y-%m-%d") {
            Ok(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .unwrap_or_else(chrono::Utc::now),
            Err(_) => {
                if !common.json {
                    eprintln!("❌ Invalid since date format: {}. Use YYYY-MM-DD", since_str);
                }
                process::exit(1);
            }
        }
    });

    let until = common.until.as_deref().map(|until_str| {
        match chrono::NaiveDate::parse_from_str(until_str, "%Y-%m-%d") {
            Ok(date) => date
                .and_hms_opt(23, 59, 59)
                .map(|dt| dt.and_utc())
                .unwrap_or_else(chrono::Utc::now),
            Err(_) => {
                if !common.json {
                    eprintln!("❌ Invalid until date format: {}. Use YYYY-MM-DD", until_str);
                }
                process::exit(1);
            }
        }
    });

    let party = common.party.as_deref().map(|code| match Party::from_code(code) {
        Some(party) => party,
        None => {
            if !common.json {
                eprintln!("❌ Unknown party code: {}", code);
            }
            process::exit(1);
        }
    });

    ReportOptions {
        json_output: common.json,
        limit: common.limit,
        since,
        until,
        party,
        region: common.region.clone(),
        person,
        data_path: common.data.clone(),
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}
