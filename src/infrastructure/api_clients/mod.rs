//! HTTP clients for the upstream quality and vulnerability services

pub mod quality;
pub mod vulnerability;

pub use quality::QualityClient;
pub use vulnerability::VulnerabilityClient;

use crate::application::errors::ReportError;

/// Map a non-2xx response into an upstream-fetch error carrying the
/// status code and the response body.
pub(crate) async fn error_for_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ReportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ReportError::UpstreamFetch {
        status: status.as_u16(),
        message,
    })
}
