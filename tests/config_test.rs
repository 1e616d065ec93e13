use std::env;

#[cfg(test)]
mod config_tests {
    use super::*;
    use adspend::config::Config;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        // Test logging defaults
        assert_eq!(config.logging.level, "ERROR");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.output, "console");

        // Test ingest defaults
        assert_eq!(config.ingest.file_pattern, "*.jsonl");

        // Test report defaults
        assert_eq!(config.report.default_limit, 10);
        assert_eq!(config.report.trend_window_days, 30);
    }

    #[test]
    fn test_env_variable_override() {
        env::set_var("ADSPEND_DEFAULT_LIMIT", "25");
        env::set_var("ADSPEND_FILE_PATTERN", "*.json");
        env::set_var("LOG_LEVEL", "DEBUG");

        let mut config = Config::default();
        config
            .apply_env_overrides()
            .expect("Failed to apply env overrides");

        assert_eq!(config.report.default_limit, 25);
        assert_eq!(config.ingest.file_pattern, "*.json");
        assert_eq!(config.logging.level, "DEBUG");

        // Cleanup
        env::remove_var("ADSPEND_DEFAULT_LIMIT");
        env::remove_var("ADSPEND_FILE_PATTERN");
        env::remove_var("LOG_LEVEL");
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        env::set_var("ADSPEND_TREND_WINDOW_DAYS", "not-a-number");
        let mut config = Config::default();
        assert!(config.apply_env_overrides().is_err());
        env::remove_var("ADSPEND_TREND_WINDOW_DAYS");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.report.default_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.trend_window_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adspend.toml");

        let mut config = Config::default();
        config.report.default_limit = 42;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.report.default_limit, 42);
        assert_eq!(loaded.ingest.file_pattern, "*.jsonl");
    }
}
