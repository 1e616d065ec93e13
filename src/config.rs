//! Production configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Ingestion configuration
    pub ingest: IngestConfig,

    /// Report configuration
    pub report: ReportConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Glob pattern for data files when the data path is a directory.
    pub file_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default number of entries in ranked views.
    pub default_limit: usize,
    /// Default trends window when no date range is given, in days.
    pub trend_window_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub data_directory: PathBuf,
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            ingest: IngestConfig {
                file_pattern: "*.jsonl".to_string(),
            },
            report: ReportConfig {
                default_limit: 10,
                trend_window_days: 30,
            },
            paths: PathsConfig {
                data_directory: PathBuf::from("data"),
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file if it exists
        let config_paths = [
            PathBuf::from("adspend.toml"),
            PathBuf::from(".adspend.toml"),
            dirs::config_dir()
                .map(|d| d.join("adspend").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // Ingest overrides
        if let Ok(val) = env::var("ADSPEND_FILE_PATTERN") {
            self.ingest.file_pattern = val;
        }

        // Report overrides
        if let Ok(val) = env::var("ADSPEND_DEFAULT_LIMIT") {
            self.report.default_limit = val.parse().context("Invalid ADSPEND_DEFAULT_LIMIT")?;
        }
        if let Ok(val) = env::var("ADSPEND_TREND_WINDOW_DAYS") {
            self.report.trend_window_days =
                val.parse().context("Invalid ADSPEND_TREND_WINDOW_DAYS")?;
        }

        // Path overrides
        if let Ok(val) = env::var("ADSPEND_DATA_DIR") {
            self.paths.data_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("ADSPEND_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ingest.file_pattern.is_empty() {
            return Err(anyhow::anyhow!("Data file pattern cannot be empty"));
        }

        if self.report.default_limit == 0 {
            return Err(anyhow::anyhow!("Default limit must be greater than 0"));
        }

        if self.report.trend_window_days <= 0 {
            return Err(anyhow::anyhow!("Trend window must be at least one day"));
        }

        // File logging needs the log directory to exist
        if matches!(self.logging.output.as_str(), "file" | "both")
            && !self.paths.log_directory.exists()
        {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }

    /// Save current configuration to file
    #[allow(dead_code)]
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Configuration saved to file");

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_else(|_| Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "ERROR");
        assert_eq!(config.ingest.file_pattern, "*.jsonl");
        assert_eq!(config.report.default_limit, 10);
        assert_eq!(config.report.trend_window_days, 30);
    }

    #[test]
    fn test_env_override() {
        env::set_var("ADSPEND_DEFAULT_LIMIT", "25");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.report.default_limit, 25);
        env::remove_var("ADSPEND_DEFAULT_LIMIT");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.report.default_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ingest.file_pattern = String::new();
        assert!(config.validate().is_err());
    }
}
