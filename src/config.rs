//! Configuration management for the walk programme
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WalksError;
use crate::sort::{MAX_SORT_KEYS, SortCriterion};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalksConfig {
    /// Default walk ordering
    #[serde(default)]
    pub sorting: SortingConfig,
    /// Postcode proximity bands
    #[serde(default)]
    pub postcode: PostcodeConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Walk ordering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortingConfig {
    /// Criterion names, primary key first
    #[serde(default = "default_sort_criteria")]
    pub criteria: Vec<String>,
}

/// Postcode proximity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostcodeConfig {
    /// Below this many metres a postcode counts as the location itself
    #[serde(default = "default_close_metres")]
    pub close_metres: u32,
    /// Below this many metres a postcode counts as near
    #[serde(default = "default_near_metres")]
    pub near_metres: u32,
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

// Default value functions
fn default_sort_criteria() -> Vec<String> {
    ["date", "time", "distance"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_close_metres() -> u32 {
    100
}

fn default_near_metres() -> u32 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            criteria: default_sort_criteria(),
        }
    }
}

impl Default for PostcodeConfig {
    fn default() -> Self {
        Self {
            close_metres: default_close_metres(),
            near_metres: default_near_metres(),
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

impl SortingConfig {
    /// Parsed criteria, primary key first
    pub fn criteria(&self) -> crate::Result<Vec<SortCriterion>> {
        self.criteria.iter().map(|name| name.parse()).collect()
    }
}

impl WalksConfig {
    /// Load configuration from specified path
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

        // WALKS_LOGGING__LEVEL=debug overrides logging.level,
        // WALKS_SORTING__CRITERIA=distance,date overrides the sort keys
        builder = builder.add_source(
            Environment::with_prefix("WALKS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sorting.criteria"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WalksConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("walk-programme").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.sorting.criteria.is_empty() {
            self.sorting.criteria = default_sort_criteria();
        }
        if self.postcode.close_metres == 0 {
            self.postcode.close_metres = default_close_metres();
        }
        if self.postcode.near_metres == 0 {
            self.postcode.near_metres = default_near_metres();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_sorting()?;
        self.validate_postcode()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_sorting(&self) -> Result<()> {
        if self.sorting.criteria.len() > MAX_SORT_KEYS {
            return Err(WalksError::config(format!(
                "At most {MAX_SORT_KEYS} sort criteria can be configured, got {}",
                self.sorting.criteria.len()
            ))
            .into());
        }

        self.sorting
            .criteria()
            .map_err(|e| WalksError::config(e.to_string()))?;

        Ok(())
    }

    fn validate_postcode(&self) -> Result<()> {
        if self.postcode.close_metres >= self.postcode.near_metres {
            return Err(WalksError::config(
                "Postcode close distance must be less than the near distance",
            )
            .into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WalksError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WalksError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
