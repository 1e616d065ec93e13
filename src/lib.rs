//! Political Ad Spend Analytics
//!
//! A library and CLI for analyzing political advertising spend from ad
//! library exports. The pipeline classifies each ad's sponsor into a
//! political party or watched candidate via ordered keyword matching, and
//! aggregates the records into spend/impression rollups by party, advertiser,
//! region, day, and person.
//!
//! ## Core Features
//!
//! - **Entity classification**: ordered substring rules map advertiser
//!   identities to a fixed set of party labels, with an advertiser-override
//!   table for known third-party agencies and an `Others` sentinel
//! - **Region normalization**: alias-aware canonicalization of Indian
//!   states/UTs, coarse zone assignment, and national-campaign detection
//! - **Five aggregate views**: overall stats, ranked advertisers, regional
//!   breakdown with apportionment weights, per-day trends, and a candidate
//!   watch-list, all sharing the same filtering and rounding rules
//! - **Tolerant ingestion**: JSONL/JSON exports parsed with malformed-line
//!   recovery and skipped-field reporting
//!
//! ## Architecture Overview
//!
//! The library is organized around several key modules:
//!
//! - [`models`] - Record and aggregate data structures
//! - [`party`] / [`person`] - Keyword classifiers over fixed tables
//! - [`geo`] - Region normalizer and location classification
//! - [`engine`] - The aggregation passes producing the five views
//! - [`currency`] - Lakh/crore display formatting
//! - [`parser`] - Data file discovery and tolerant JSONL parsing
//! - [`analyzer`] - Command orchestration tying the pipeline together
//! - [`display`] - Terminal and JSON report rendering
//! - [`config`] - Configuration management with environment variable support
//! - [`logging`] - Structured logging with JSON and pretty-print formats
//!
//! ## Main Entry Point
//!
//! The primary interface is [`AdSpendAnalyzer`] for CLI-style use, or the
//! [`engine::AggregationEngine`] directly for in-process aggregation:
//!
//! ```rust
//! use adspend::engine::{AggregateFilter, AggregationEngine};
//! use adspend::models::AdRecord;
//!
//! let records: Vec<AdRecord> = Vec::new();
//! let engine = AggregationEngine::new();
//! let stats = engine.overall_stats(&records, &AggregateFilter::default());
//! assert_eq!(stats.total_ads, 0);
//! ```
//!
//! ## Key Types
//!
//! - [`models::AdRecord`] - One observed advertisement
//! - [`party::Party`] - Closed set of party labels plus `Others`
//! - [`engine::AggregateFilter`] - Party/region/person/date filters
//! - [`analyzer::ReportOptions`] - Configuration for report commands

pub mod analyzer;
pub mod config;
pub mod currency;
pub mod display;
pub mod engine;
pub mod geo;
pub mod logging;
pub mod models;
pub mod parser;
pub mod party;
pub mod person;
pub mod timestamp;

pub use analyzer::AdSpendAnalyzer;
pub use models::*;
pub use party::Party;
