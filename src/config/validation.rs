//! Configuration validation module

use crate::config::{QualityConfig, ReportConfig, VulnerabilityConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Quality service configuration error: {message}")]
    Quality { message: String },

    #[error("Vulnerability service configuration error: {message}")]
    Vulnerability { message: String },

    #[error("Report configuration error: {message}")]
    Report { message: String },
}

impl ValidationError {
    pub fn quality(message: impl Into<String>) -> Self {
        Self::Quality {
            message: message.into(),
        }
    }

    pub fn vulnerability(message: impl Into<String>) -> Self {
        Self::Vulnerability {
            message: message.into(),
        }
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}

impl Validate for QualityConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // Validate URL format
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::quality(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.project_key.is_empty() {
            return Err(ValidationError::quality(
                "project_key cannot be empty".to_string(),
            ));
        }

        // Validate timeout > 0
        if self.timeout_seconds == 0 {
            return Err(ValidationError::quality(
                "timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for VulnerabilityConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // Validate URL format
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::vulnerability(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.org_id.is_empty() {
            return Err(ValidationError::vulnerability(
                "org_id cannot be empty".to_string(),
            ));
        }

        if self.project_id.is_empty() {
            return Err(ValidationError::vulnerability(
                "project_id cannot be empty".to_string(),
            ));
        }

        // Validate timeout > 0
        if self.timeout_seconds == 0 {
            return Err(ValidationError::vulnerability(
                "timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::report("title cannot be empty".to_string()));
        }

        // Chromium accepts print scales between 0.1 and 2.0
        if !(0.1..=2.0).contains(&self.scale) {
            return Err(ValidationError::report(format!(
                "scale must be between 0.1 and 2.0, got {}",
                self.scale
            )));
        }

        if self.render_timeout_seconds == 0 {
            return Err(ValidationError::report(
                "render timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}
