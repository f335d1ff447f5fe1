//! Configuration loading and typed config structures for the FizzBuzz ticker.
//!
//! The configuration lives in `fizzbuzz-config.yaml` next to the binary's
//! working directory. Only ambient behaviour is configurable (logging and
//! the console front-end); the sequence bounds and tick interval are fixed
//! constants in [`crate::sequence`].

use std::path::Path;

use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "FIZZBUZZ_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level demo configuration.
///
/// Mirrors the structure of `fizzbuzz-config.yaml`. Every field has a
/// default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Console front-end configuration.
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl DemoConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FIZZBUZZ_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.is_empty() {
                self.level = level;
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// How the console renders each published snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// One human-readable line per new row.
    #[default]
    Text,
    /// The full snapshot as one JSON line.
    Json,
}

/// Console front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsoleConfig {
    /// Start the sequence as soon as the console attaches to the engine.
    #[serde(default = "default_true")]
    pub autostart: bool,

    /// Output format for snapshots.
    #[serde(default)]
    pub render: RenderFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            render: RenderFormat::Text,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DemoConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.console.autostart);
        assert_eq!(config.console.render, RenderFormat::Text);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
logging:
  level: "debug"
  json: true

console:
  autostart: false
  render: json
"#;

        let config = DemoConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(!config.console.autostart);
        assert_eq!(config.console.render, RenderFormat::Json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "console:\n  render: json\n";
        let config = DemoConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.console.render, RenderFormat::Json);
        // Everything else uses defaults
        assert!(config.console.autostart);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = DemoConfig::parse("");
        assert!(config.is_ok());
        assert_eq!(config.ok(), Some(DemoConfig::default()));
    }

    #[test]
    fn unknown_render_format_is_rejected() {
        let yaml = "console:\n  render: html\n";
        let config = DemoConfig::parse(yaml);
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("fizzbuzz-config.yaml");
        if path.exists() {
            let config = DemoConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
