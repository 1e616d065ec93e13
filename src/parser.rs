//! Record Ingestion
//!
//! Loads [`AdRecord`]s from disk exports. Two layouts are supported:
//!
//! - **JSONL** (one record per line) - the primary export format. Malformed
//!   lines are skipped and counted; a bad line never fails the file.
//! - **JSON** - a whole-file array, either bare or wrapped under an `"ads"`
//!   key.
//!
//! A data path may be a single file or a directory; directories are scanned
//! with a configurable glob pattern and the matched files are parsed in
//! parallel, then concatenated in path order so downstream aggregation sees a
//! deterministic sequence.

use crate::config::get_config;
use crate::models::AdRecord;
use anyhow::{Context, Result};
use glob::glob;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of loading one or more data files.
#[derive(Debug, Default)]
pub struct LoadResult {
    pub records: Vec<AdRecord>,
    /// Number of files parsed.
    pub files: usize,
    /// Lines that failed to parse and were skipped.
    pub skipped_lines: usize,
}

pub struct RecordParser;

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Load records from a file or a directory of data files.
    pub fn load(&self, path: &Path) -> Result<LoadResult> {
        if path.is_dir() {
            self.load_directory(path)
        } else {
            let (records, skipped_lines) = self.parse_file(path)?;
            Ok(LoadResult {
                records,
                files: 1,
                skipped_lines,
            })
        }
    }

    /// Find data files under a directory using the configured glob pattern.
    pub fn discover_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let pattern = dir.join(&get_config().ingest.file_pattern);
        let mut files: Vec<PathBuf> = glob(&pattern.to_string_lossy())
            .with_context(|| format!("Invalid data file pattern: {}", pattern.display()))?
            .flatten()
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn load_directory(&self, dir: &Path) -> Result<LoadResult> {
        let files = self.discover_files(dir)?;
        if files.is_empty() {
            anyhow::bail!(
                "No data files matching '{}' under {}",
                get_config().ingest.file_pattern,
                dir.display()
            );
        }

        debug!(files = files.len(), dir = %dir.display(), "loading data files");

        // Parse in parallel, keep path order for a deterministic sequence.
        let parsed: Vec<(Vec<AdRecord>, usize)> = files
            .par_iter()
            .map(|file| self.parse_file(file))
            .collect::<Result<Vec<_>>>()?;

        let mut result = LoadResult {
            files: files.len(),
            ..Default::default()
        };
        for (records, skipped) in parsed {
            result.records.extend(records);
            result.skipped_lines += skipped;
        }
        Ok(result)
    }

    /// Parse a single file, dispatching on extension.
    pub fn parse_file(&self, path: &Path) -> Result<(Vec<AdRecord>, usize)> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.parse_json_file(path).map(|records| (records, 0)),
            _ => self.parse_jsonl_file(path),
        }
    }

    /// Parse a JSONL file. Returns the records plus the count of skipped
    /// lines.
    pub fn parse_jsonl_file(&self, path: &Path) -> Result<(Vec<AdRecord>, usize)> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open data file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut line_number = 0usize;

        for line in reader.lines() {
            line_number += 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<AdRecord>(line) {
                Ok(record) => records.push(record),
                Err(error) => {
                    skipped += 1;
                    debug!(
                        file = %path.display(),
                        line = line_number,
                        %error,
                        "skipping malformed record"
                    );
                }
            }
        }

        if skipped > 0 {
            warn!(
                file = %path.display(),
                skipped,
                parsed = records.len(),
                "data file contained malformed lines"
            );
        }

        Ok((records, skipped))
    }

    /// Parse a whole-file JSON export: a bare array, or an object wrapping
    /// the array under `"ads"`.
    pub fn parse_json_file(&self, path: &Path) -> Result<Vec<AdRecord>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        let data: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;

        let records = if data.is_array() {
            serde_json::from_value::<Vec<AdRecord>>(data)?
        } else if let Some(ads) = data.get("ads") {
            serde_json::from_value::<Vec<AdRecord>>(ads.clone())?
        } else {
            anyhow::bail!(
                "Expected a JSON array of ad records in {}",
                path.display()
            );
        };

        Ok(records)
    }
}
