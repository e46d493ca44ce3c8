//! Error taxonomy for the report pipeline
//!
//! There is no local recovery anywhere in the pipeline: every variant
//! aborts the full run and propagates to the caller. No retry, no
//! partial or degraded report.

use thiserror::Error;

/// Errors raised by the report pipeline
#[derive(Debug, Error)]
pub enum ReportError {
    /// Non-2xx HTTP response from either upstream service.
    #[error("Upstream API returned status {status}: {message}")]
    UpstreamFetch { status: u16, message: String },

    /// Project-search endpoint returned an empty component list.
    #[error("No project matches key '{key}'")]
    ProjectNotFound { key: String },

    /// Metrics response is missing the component or measures list.
    #[error("Metrics response for '{component}' is missing the measures list")]
    InvalidMetricsShape { component: String },

    /// Rating metric outside the 1-5 range the grade formula is defined on.
    #[error("Rating metric '{metric}' has value '{value}' outside the 1-5 range")]
    InvalidRating { metric: String, value: String },

    /// Collaborator rendering/export failure, including render timeouts.
    #[error("Report rendering failed: {0}")]
    Render(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
