//! Client for the code-quality service (SonarQube-compatible API)
//!
//! Three read-only endpoints: project search, quality-gate status, and
//! the measures list. Authentication is an optional bearer token.

use std::time::Duration;

use serde::Deserialize;

use super::error_for_status;
use crate::application::errors::ReportError;

/// The fixed metric set requested from the measures endpoint.
pub const METRIC_KEYS: &str = "ncloc,bugs,vulnerabilities,security_hotspots,code_smells,\
coverage,duplicated_blocks,sqale_debt_ratio,reliability_rating,security_rating,sqale_rating";

/// Project identity as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectSearchResponse {
    #[serde(default)]
    components: Vec<ProjectMeta>,
}

#[derive(Debug, Deserialize)]
struct QualityGateResponse {
    #[serde(rename = "projectStatus")]
    project_status: ProjectStatus,
}

#[derive(Debug, Deserialize)]
struct ProjectStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct MeasuresResponse {
    component: Option<ComponentMeasures>,
}

#[derive(Debug, Deserialize)]
struct ComponentMeasures {
    measures: Option<Vec<Measure>>,
}

/// One metric value from the measures endpoint. Values arrive as strings
/// regardless of the metric's numeric type.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub metric: String,
    pub value: String,
}

/// Find a metric value by key, defaulting to "0".
///
/// A missing metric and a genuinely zero metric are indistinguishable to
/// callers. The measures endpoint omits metrics it has no data for, so
/// the default keeps the downstream parsing uniform.
pub fn lookup_metric<'a>(measures: &'a [Measure], key: &str) -> &'a str {
    measures
        .iter()
        .find(|m| m.metric == key)
        .map(|m| m.value.as_str())
        .unwrap_or("0")
}

/// HTTP client for the quality service.
pub struct QualityClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl QualityClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("secgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Look up the project by key. An empty component list is a hard
    /// error, not an empty report.
    pub async fn fetch_project_meta(&self, project_key: &str) -> Result<ProjectMeta, ReportError> {
        let url = format!(
            "{}/api/projects/search?projects={}",
            self.base_url, project_key
        );
        let response = error_for_status(self.get(&url).send().await?).await?;
        let body: ProjectSearchResponse = response.json().await?;

        body.components
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::ProjectNotFound {
                key: project_key.to_string(),
            })
    }

    /// Fetch the pass/fail quality-gate status ("OK" = pass).
    pub async fn fetch_quality_gate(&self, project_key: &str) -> Result<String, ReportError> {
        let url = format!(
            "{}/api/qualitygates/project_status?projectKey={}",
            self.base_url, project_key
        );
        let response = error_for_status(self.get(&url).send().await?).await?;
        let body: QualityGateResponse = response.json().await?;

        Ok(body.project_status.status)
    }

    /// Fetch the fixed metric set for the project.
    pub async fn fetch_metrics(&self, project_key: &str) -> Result<Vec<Measure>, ReportError> {
        let url = format!(
            "{}/api/measures/component?component={}&metricKeys={}",
            self.base_url, project_key, METRIC_KEYS
        );
        let response = error_for_status(self.get(&url).send().await?).await?;
        let body: MeasuresResponse = response.json().await?;

        body.component
            .and_then(|c| c.measures)
            .ok_or_else(|| ReportError::InvalidMetricsShape {
                component: project_key.to_string(),
            })
    }
}
