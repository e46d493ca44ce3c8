//! Client for the dependency vulnerability scanner (Snyk-compatible API)
//!
//! Single endpoint: the aggregated-issues POST, filtered to open
//! vulnerability-type issues. The response order is preserved all the way
//! into the rendered report.

use std::time::Duration;

use serde::Deserialize;

use super::error_for_status;
use crate::application::errors::ReportError;
use crate::domain::report::VulnerabilityFinding;

#[derive(Debug, Deserialize)]
struct AggregatedIssuesResponse {
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Issue {
    id: String,
    pkg_name: String,
    #[serde(default)]
    pkg_versions: Vec<String>,
    issue_data: IssueData,
    #[serde(default)]
    fix_info: FixInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    identifiers: Identifiers,
    #[serde(default)]
    exploit_maturity: String,
    #[serde(default)]
    cvss_score: f64,
    #[serde(default)]
    language: String,
}

#[derive(Debug, Default, Deserialize)]
struct Identifiers {
    #[serde(rename = "CVE", default)]
    cve: Vec<String>,
    #[serde(rename = "CWE", default)]
    cwe: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixInfo {
    #[serde(default)]
    is_fixable: bool,
    #[serde(default)]
    fixed_in: Vec<String>,
}

impl From<Issue> for VulnerabilityFinding {
    fn from(issue: Issue) -> Self {
        VulnerabilityFinding {
            id: issue.id,
            package_name: issue.pkg_name,
            package_versions: issue.pkg_versions,
            title: issue.issue_data.title,
            severity: issue.issue_data.severity,
            cvss_score: issue.issue_data.cvss_score,
            cves: issue.issue_data.identifiers.cve,
            cwes: issue.issue_data.identifiers.cwe,
            url: issue.issue_data.url,
            fixable: issue.fix_info.is_fixable,
            fixed_in: issue.fix_info.fixed_in,
            exploit_maturity: issue.issue_data.exploit_maturity,
            language: issue.issue_data.language,
        }
    }
}

/// HTTP client for the vulnerability scanner.
pub struct VulnerabilityClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    org_id: String,
}

impl VulnerabilityClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        org_id: &str,
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
            org_id: org_id.to_string(),
        })
    }

    /// Fetch open vulnerability issues for the project, in upstream order.
    pub async fn fetch_vulnerabilities(
        &self,
        project_id: &str,
    ) -> Result<Vec<VulnerabilityFinding>, ReportError> {
        let url = format!(
            "{}/org/{}/project/{}/aggregated-issues",
            self.base_url, self.org_id, project_id
        );

        let mut request = self.client.post(&url).json(&serde_json::json!({
            "filters": {
                "types": ["vuln"],
                "ignored": false
            }
        }));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = error_for_status(request.send().await?).await?;
        let body: AggregatedIssuesResponse = response.json().await?;

        Ok(body.issues.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server) -> VulnerabilityClient {
        VulnerabilityClient::new(
            &server.url(),
            Some("snyk-token".to_string()),
            "org-1",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_vulnerabilities_maps_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/org/org-1/project/proj-1/aggregated-issues")
            .match_header("authorization", "token snyk-token")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "filters": {"types": ["vuln"], "ignored": false}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"issues": [
                    {
                        "id": "SNYK-JS-LODASH-567746",
                        "pkgName": "lodash",
                        "pkgVersions": ["4.17.15"],
                        "issueData": {
                            "title": "Prototype Pollution",
                            "severity": "high",
                            "url": "https://snyk.io/vuln/SNYK-JS-LODASH-567746",
                            "identifiers": {"CVE": ["CVE-2020-8203"], "CWE": ["1321"]},
                            "exploitMaturity": "proof-of-concept",
                            "cvssScore": 7.4,
                            "language": "js"
                        },
                        "fixInfo": {"isFixable": true, "fixedIn": ["4.17.16"]}
                    },
                    {
                        "id": "SNYK-JS-MINIMIST-559764",
                        "pkgName": "minimist",
                        "issueData": {"title": "Prototype Pollution", "severity": "medium"}
                    }
                ]}"#,
            )
            .create_async()
            .await;

        let findings = client(&server)
            .fetch_vulnerabilities("proj-1")
            .await
            .unwrap();

        assert_eq!(findings.len(), 2);

        let first = &findings[0];
        assert_eq!(first.id, "SNYK-JS-LODASH-567746");
        assert_eq!(first.package_name, "lodash");
        assert_eq!(first.package_versions, vec!["4.17.15"]);
        assert_eq!(first.severity, "high");
        assert_eq!(first.cvss_score, 7.4);
        assert_eq!(first.cves, vec!["CVE-2020-8203"]);
        assert_eq!(first.cwes, vec!["1321"]);
        assert_eq!(first.exploit_maturity, "proof-of-concept");
        assert_eq!(first.language, "js");
        assert!(first.fixable);
        assert_eq!(first.fixed_in, vec!["4.17.16"]);

        // Sparse issue falls back to defaults instead of failing.
        let second = &findings[1];
        assert_eq!(second.package_name, "minimist");
        assert!(second.cves.is_empty());
        assert!(!second.fixable);
        assert_eq!(second.cvss_score, 0.0);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_absent_issues_list_yields_empty_findings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/org/org-1/project/proj-1/aggregated-issues")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let findings = client(&server)
            .fetch_vulnerabilities("proj-1")
            .await
            .unwrap();

        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_upstream_fetch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/org/org-1/project/proj-1/aggregated-issues")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let result = client(&server).fetch_vulnerabilities("proj-1").await;

        assert!(matches!(
            result,
            Err(ReportError::UpstreamFetch { status: 401, message }) if message == "unauthorized"
        ));
    }
}
