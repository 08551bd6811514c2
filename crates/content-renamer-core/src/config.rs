use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when a generated name sanitizes down to nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyNamePolicy {
    /// Leave the file untouched and report it as failed
    Fail,

    /// Use the given base name instead (still collision-resolved)
    Fallback(String),
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for a renaming run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether to run without making changes
    pub dry_run: bool,

    /// Maximum directory depth for scanning
    pub max_depth: Option<usize>,

    /// Token budget for document text handed to the text describer
    pub max_tokens: usize,

    /// Fraction of characters kept on each truncation step
    pub shrink_ratio: f64,

    /// Handling of names that sanitize to an empty string
    pub empty_name_policy: EmptyNamePolicy,

    /// Compute placement for the description models, passed through untouched
    pub device: String,

    /// Base URL of the OpenAI-compatible description service
    pub endpoint: String,

    /// Model used to name documents
    pub text_model: String,

    /// Model used to caption images
    pub image_model: String,

    /// Environment variable holding the API key, if the service needs one
    pub api_key_env: Option<String>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_depth: None,
            max_tokens: 5000,
            shrink_ratio: 0.90,
            empty_name_policy: EmptyNamePolicy::Fail,
            device: "cuda".to_string(),
            endpoint: "http://localhost:11434/v1".to_string(),
            text_model: "qwen1.5:1.8b-chat".to_string(),
            image_model: "llava".to_string(),
            api_key_env: None,
            log_level: LogLevel::Warn,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Truncation has to shrink the text or it never terminates
        if !(self.shrink_ratio > 0.0 && self.shrink_ratio < 1.0) {
            return Err(Error::Configuration(format!(
                "Shrink ratio must be strictly between 0 and 1, got {}",
                self.shrink_ratio
            )));
        }

        if self.max_tokens == 0 {
            return Err(Error::Configuration(
                "Token budget must be greater than zero".to_string(),
            ));
        }

        if let EmptyNamePolicy::Fallback(name) = &self.empty_name_policy {
            if crate::naming::sanitize(name).is_empty() {
                return Err(Error::Configuration(
                    "Fallback name must not be empty after sanitizing".to_string(),
                ));
            }
        }

        if self.endpoint.trim().is_empty() {
            return Err(Error::Configuration(
                "Description endpoint must be set".to_string(),
            ));
        }

        Ok(())
    }
}
