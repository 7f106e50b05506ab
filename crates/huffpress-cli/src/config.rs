//! CLI configuration.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use tracing::Level;

/// Command-line configuration, loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Lowercase letters while filtering input text
    #[serde(default = "default_fold_case")]
    pub fold_case: bool,

    /// Extension used to suggest a code table path in the interactive menu
    #[serde(default = "default_table_extension")]
    pub table_extension: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fold_case: default_fold_case(),
            table_extension: default_table_extension(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a JSON file; missing fields take defaults.
    pub fn load(path: &Path) -> huffpress_core::Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| huffpress_core::Error::Serialization(e.to_string()))
    }

    /// Tracing level for `log_level`; unknown names fall back to INFO.
    pub fn tracing_level(&self) -> Level {
        parse_level(&self.log_level)
    }
}

/// Parse a log level name.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fold_case() -> bool {
    true
}

fn default_table_extension() -> String {
    "huffcodes".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.fold_case);
        assert_eq!(config.table_extension, "huffcodes");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: CliConfig = serde_json::from_str(r#"{"fold_case": false}"#).unwrap();
        assert!(!config.fold_case);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.table_extension, "huffcodes");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huffpress.json");
        fs::write(&path, r#"{"log_level": "debug", "table_extension": "codes"}"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.tracing_level(), Level::DEBUG);
        assert_eq!(config.table_extension, "codes");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ log_level: ").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
