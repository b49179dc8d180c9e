use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;
use crate::logging::LogConfig;
use crate::models::SexAdjustment;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Terminal output settings
    pub display: DisplaySettings,

    /// Defaults applied when a computation does not say otherwise
    pub defaults: DefaultSettings,

    /// History export preferences
    pub export: ExportSettings,

    /// Logging configuration
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Colorize categories and the gauge
    pub color: bool,

    /// Gauge bar width in characters
    pub gauge_width: usize,

    /// strftime format for history dates
    pub date_format: String,

    /// Play the gauge marker animation in interactive mode
    pub animate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Sex adjustment used when none is given
    pub sex: SexAdjustment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Format used when the output path has no recognised extension
    pub default_format: ExportFormat,

    /// Directory for relative export paths
    pub directory: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            display: DisplaySettings::default(),
            defaults: DefaultSettings::default(),
            export: ExportSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            color: true,
            gauge_width: 40,
            date_format: "%Y-%m-%d".to_string(),
            animate: true,
        }
    }
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings {
            sex: SexAdjustment::None,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            default_format: ExportFormat::Csv,
            directory: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    /// Resolve an export path against the configured directory
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }

    /// Format implied by the path, falling back to the default
    pub fn format_for<P: AsRef<Path>>(&self, path: P) -> ExportFormat {
        ExportFormat::from_path(path).unwrap_or(self.default_format)
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        // Update modification timestamp
        self.metadata.updated_at = Utc::now();

        // Create directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bmirs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(path = %config_path.display(), error = %err, "using default configuration");
                Self::default()
            }
        }
    }

    /// Save configuration to default location
    pub fn save_default(&mut self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to_file(config_path)
    }

    /// Reject values the shell cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.display.gauge_width < 2 {
            anyhow::bail!(
                "display.gauge_width must be at least 2, got {}",
                self.display.gauge_width
            );
        }
        if self.display.date_format.trim().is_empty() {
            anyhow::bail!("display.date_format must not be empty");
        }
        Ok(())
    }
}
