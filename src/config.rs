//! Configuration management for `TripWeaver`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted when no model API key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure for the `TripWeaver` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripWeaverConfig {
    /// Language-model endpoint configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// HTTP service configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default trip settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Language-model endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,
    /// Model name, e.g. `gemini-1.5-flash`
    #[serde(default = "default_model_name")]
    pub model: String,
    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_model_max_retries")]
    pub max_retries: u32,
}

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default trip settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Currency shown next to budget totals
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Trip length used when a request leaves it out
    #[serde(default = "default_no_of_days")]
    pub no_of_days: u32,
}

// Default value functions
fn default_model_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model_name() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_model_timeout() -> u32 {
    60
}

fn default_model_max_retries() -> u32 {
    3
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_currency() -> String {
    crate::normalize::DEFAULT_CURRENCY.to_string()
}

fn default_no_of_days() -> u32 {
    3
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            model: default_model_name(),
            api_key: None,
            timeout_seconds: default_model_timeout(),
            max_retries: default_model_max_retries(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            no_of_days: default_no_of_days(),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl TripWeaverConfig {
    /// Load configuration from `config_path` (or the default location) and
    /// `TRIPWEAVER_` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPWEAVER_MODEL__API_KEY overrides model.api_key
        builder = builder.add_source(
            Environment::with_prefix("TRIPWEAVER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripWeaverConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripweaver").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.model.endpoint.is_empty() {
            self.model.endpoint = default_model_endpoint();
        }
        if self.model.model.is_empty() {
            self.model.model = default_model_name();
        }
        if self.model.api_key.is_none() {
            self.model.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        if self.model.timeout_seconds == 0 {
            self.model.timeout_seconds = default_model_timeout();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.currency.is_empty() {
            self.defaults.currency = default_currency();
        }
        if self.defaults.no_of_days == 0 {
            self.defaults.no_of_days = default_no_of_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the model API key when one is set.
    ///
    /// A missing key is allowed: normalizing saved responses needs no model.
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.model.api_key {
            if api_key.trim().is_empty() {
                return Err(TripError::config(
                    "Model API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(TripError::config(
                    "Model API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.model.timeout_seconds > 300 {
            return Err(TripError::config("Model API timeout cannot exceed 300 seconds").into());
        }

        if self.model.max_retries > 10 {
            return Err(TripError::config("Model API max retries cannot exceed 10").into());
        }

        if self.defaults.no_of_days > crate::prompts::MAX_DAYS {
            return Err(TripError::config(format!(
                "Default trip length cannot exceed {} days",
                crate::prompts::MAX_DAYS
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.model.endpoint.starts_with("http://")
            && !self.model.endpoint.starts_with("https://")
        {
            return Err(
                TripError::config("Model endpoint must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripWeaverConfig::default();
        assert_eq!(config.model.endpoint, "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(config.model.model, "gemini-1.5-flash");
        assert_eq!(config.model.timeout_seconds, 60);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.currency, "INR");
        assert!(config.model.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = TripWeaverConfig::default();
        config.model.api_key = Some("short".to_string());
        let result = config.validate_api_key();
        assert!(result.unwrap_err().to_string().contains("too short"));

        config.model.api_key = Some("valid_api_key_123".to_string());
        assert!(config.validate_api_key().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripWeaverConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripWeaverConfig::default();
        config.model.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = TripWeaverConfig::default();
        config.defaults.no_of_days = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_endpoint_scheme() {
        let mut config = TripWeaverConfig::default();
        config.model.endpoint = "generativelanguage.googleapis.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = TripWeaverConfig::default();
        config.model.endpoint.clear();
        config.logging.format.clear();
        config.server.port = 0;
        config.apply_defaults();
        assert_eq!(config.model.endpoint, default_model_endpoint());
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir()
            .join(format!("tripweaver-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[model]\nmodel = \"gemini-2.0-flash\"\napi_key = \"test_key_from_file\"\n\n[server]\nport = 9090\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = TripWeaverConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.model.api_key.as_deref(), Some("test_key_from_file"));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.no_of_days, 3);
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripWeaverConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripweaver"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
