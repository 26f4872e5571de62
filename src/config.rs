//! Configuration management for the keyword matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the bundled linguistic model, relative to the program.
pub const DEFAULT_MODEL_PATH: &str = "resources/en_lexicon";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub report: ReportConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding `config.toml` and the lexicon. Relative paths are
    /// resolved against the executable's directory, then the working directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub missing_display_cap: usize,
    pub suggestion_cap: usize,
    pub good_threshold: f64,
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            missing_display_cap: 10,
            suggestion_cap: 7,
            good_threshold: 75.0,
            medium_threshold: 50.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                path: PathBuf::from(DEFAULT_MODEL_PATH),
            },
            report: ReportConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, falling back to defaults when no file exists.
    /// Nothing is written to disk here.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-keyword-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let report = &self.report;
        if report.medium_threshold > report.good_threshold {
            return Err(ResumeMatcherError::Configuration(format!(
                "medium_threshold ({}) must not exceed good_threshold ({})",
                report.medium_threshold, report.good_threshold
            )));
        }
        if !(0.0..=100.0).contains(&report.good_threshold)
            || !(0.0..=100.0).contains(&report.medium_threshold)
        {
            return Err(ResumeMatcherError::Configuration(
                "score thresholds must lie within 0..=100".to_string(),
            ));
        }
        Ok(())
    }
}
