//! Settings loading and validation.
//!
//! Settings are read once at startup from `config.toml` (or a `.yaml`/`.yml`
//! or `.json` file with the same keys) and never mutated afterwards. Every key is required:
//! a missing key is a fatal error, there are no silent defaults.
//!
//! ```toml
//! company_name = "Acme Freight"
//! base_rate = 2.00
//! surcharge_threshold = 100
//! high_surcharge_rate = 0.10
//! low_surcharge_rate = 0.05
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Company and pricing settings shared (read-only) by every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Printed in the agreement title.
    pub company_name: String,
    /// Default rate per mile offered by the form.
    pub base_rate: f64,
    /// Mileage strictly above this uses `high_surcharge_rate`.
    pub surcharge_threshold: f64,
    pub high_surcharge_rate: f64,
    pub low_surcharge_rate: f64,
}

/// Errors raised while loading settings. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse {origin}: {reason}")]
    Parse { origin: String, reason: String },

    #[error(
        "unsupported config format for {} (expected .toml, .yaml or .json)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// On-disk encodings the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension. No extension means TOML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(_) => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl Settings {
    /// Load and validate settings from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings = Self::parse(&content, format, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            company = %settings.company_name,
            base_rate = settings.base_rate,
            threshold = settings.surcharge_threshold,
            "loaded settings"
        );
        Ok(settings)
    }

    /// Parse and validate settings from an in-memory document.
    ///
    /// `origin` only labels error messages (usually the file path).
    pub fn parse(content: &str, format: ConfigFormat, origin: &str) -> Result<Self, ConfigError> {
        let parse_err = |reason: String| ConfigError::Parse {
            origin: origin.to_string(),
            reason,
        };
        let settings: Self = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check numeric invariants: every value finite, rates non-negative,
    /// base rate and threshold strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("base_rate", self.base_rate),
            ("surcharge_threshold", self.surcharge_threshold),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a positive number (got {value})"
                )));
            }
        }

        let non_negative = [
            ("high_surcharge_rate", self.high_surcharge_rate),
            ("low_surcharge_rate", self.low_surcharge_rate),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a non-negative number (got {value})"
                )));
            }
        }

        Ok(())
    }
}
