//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub quality: QualityConfig,
    pub vulnerability: VulnerabilityConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// Code-quality service configuration (SonarQube-compatible API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub base_url: String,
    pub token: Option<String>,
    /// Project key passed to the search, quality-gate, and measures endpoints.
    pub project_key: String,
    /// Branch label printed in the report. The upstream API used here does not
    /// expose the analyzed branch, so it is configuration.
    pub branch: String,
    pub timeout_seconds: u64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            token: None,
            project_key: String::new(),
            branch: "master".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Dependency vulnerability scanner configuration (Snyk-compatible API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub org_id: String,
    pub project_id: String,
    /// Language tag that marks a finding as dependency-derived (SCA);
    /// everything else is grouped as SAST.
    pub ecosystem: String,
    pub timeout_seconds: u64,
}

impl Default for VulnerabilityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.snyk.io/v1".to_string(),
            token: None,
            org_id: String::new(),
            project_id: String::new(),
            ecosystem: "npm".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Output format for the generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Html,
    Json,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title shown in the page header template.
    pub title: String,
    pub output_path: PathBuf,
    pub format: ReportFormat,
    /// Optional PNG logo embedded into the header template.
    pub logo_path: Option<PathBuf>,
    /// Optional PNG logo embedded into the footer template.
    pub footer_logo_path: Option<PathBuf>,
    /// Print scale applied by the PDF collaborator.
    pub scale: f64,
    /// Upper bound for the whole render/export step.
    pub render_timeout_seconds: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Security Report".to_string(),
            output_path: PathBuf::from("security-report.pdf"),
            format: ReportFormat::Pdf,
            logo_path: None,
            footer_logo_path: None,
            scale: 0.8,
            render_timeout_seconds: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.quality.validate()?;
        self.vulnerability.validate()?;
        self.report.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SECGATE").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
