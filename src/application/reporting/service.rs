//! Report generation service
//!
//! `ReportGenerator` owns the two upstream clients and the PDF exporter,
//! fans out the four fetches concurrently, merges the results into the
//! unified report, and renders the configured output format.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tracing::{info, warn};

use crate::application::errors::ReportError;
use crate::application::reporting::formats;
use crate::config::{Config, ReportFormat};
use crate::domain::report::{
    Coverage, Duplications, Grade, Maintainability, Reliability, SecurityMetrics, UnifiedReport,
    VulnerabilityFinding, VulnerabilitySummary, size_rating,
};
use crate::infrastructure::api_clients::quality::{
    Measure, ProjectMeta, QualityClient, lookup_metric,
};
use crate::infrastructure::api_clients::vulnerability::VulnerabilityClient;

/// Per-export parameters handed to the PDF collaborator.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub header_template: String,
    pub footer_template: String,
    pub scale: f64,
    /// Upper bound for the whole export, browser launch included.
    pub timeout: Duration,
}

/// Renders an HTML document into A4 PDF bytes.
#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn export(&self, html: &str, options: &ExportOptions) -> Result<Vec<u8>, ReportError>;
}

/// Orchestrates one report run end to end.
pub struct ReportGenerator {
    quality: QualityClient,
    vulnerability: VulnerabilityClient,
    exporter: Arc<dyn PdfExporter>,
    config: Config,
}

impl ReportGenerator {
    pub fn new(config: Config, exporter: Arc<dyn PdfExporter>) -> Result<Self, ReportError> {
        let quality = QualityClient::new(
            &config.quality.base_url,
            config.quality.token.clone(),
            Duration::from_secs(config.quality.timeout_seconds),
        )?;
        let vulnerability = VulnerabilityClient::new(
            &config.vulnerability.base_url,
            config.vulnerability.token.clone(),
            &config.vulnerability.org_id,
            Duration::from_secs(config.vulnerability.timeout_seconds),
        )?;

        Ok(Self {
            quality,
            vulnerability,
            exporter,
            config,
        })
    }

    /// Run all four upstream fetches concurrently and merge the results.
    /// The first failure aborts the whole run.
    pub async fn build_report(
        &self,
    ) -> Result<(UnifiedReport, Vec<VulnerabilityFinding>), ReportError> {
        let project_key = &self.config.quality.project_key;

        let (meta, quality_gate, measures, findings) = tokio::try_join!(
            self.quality.fetch_project_meta(project_key),
            self.quality.fetch_quality_gate(project_key),
            self.quality.fetch_metrics(project_key),
            self.vulnerability
                .fetch_vulnerabilities(&self.config.vulnerability.project_id),
        )?;

        let report = assemble_report(
            meta,
            quality_gate,
            &measures,
            &self.config.quality.branch,
            &today(),
        )?;

        Ok((report, findings))
    }

    /// Produce the report bytes in the configured output format.
    pub async fn generate(&self) -> Result<Vec<u8>, ReportError> {
        let (report, findings) = self.build_report().await?;
        let summary =
            VulnerabilitySummary::from_findings(&findings, &self.config.vulnerability.ecosystem);

        info!(
            project = %report.project_name,
            quality_gate = %report.quality_gate,
            findings = findings.len(),
            "assembled unified report"
        );

        match self.config.report.format {
            ReportFormat::Json => {
                Ok(formats::json::render(&report, &summary, &findings)?.into_bytes())
            }
            ReportFormat::Html => Ok(render_html(&report, &summary, &findings).into_bytes()),
            ReportFormat::Pdf => {
                let document = render_html(&report, &summary, &findings);
                let header_logo = load_logo(self.config.report.logo_path.as_deref());
                let footer_logo = load_logo(self.config.report.footer_logo_path.as_deref());

                let options = ExportOptions {
                    header_template: formats::html::header_template(
                        &self.config.report.title,
                        &report.report_date,
                        header_logo.as_deref(),
                    ),
                    footer_template: formats::html::footer_template(footer_logo.as_deref()),
                    scale: self.config.report.scale,
                    timeout: Duration::from_secs(self.config.report.render_timeout_seconds),
                };

                self.exporter.export(&document, &options).await
            }
        }
    }

    /// Generate the report and write it to the configured output path.
    pub async fn run(&self) -> Result<PathBuf, ReportError> {
        let bytes = self.generate().await?;
        let path = self.config.report.output_path.clone();
        tokio::fs::write(&path, &bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "report written");
        Ok(path)
    }
}

fn render_html(
    report: &UnifiedReport,
    summary: &VulnerabilitySummary,
    findings: &[VulnerabilityFinding],
) -> String {
    let mut content = formats::html::render_summary_section(report);
    content.push_str(&formats::html::render_findings_section(summary, findings));
    formats::html::render_document(&content)
}

/// Merge the three quality fetches into the unified report.
///
/// The upstream metric set carries no new-code or unit-test figures, so
/// those fields are structural placeholders fixed at zero. The
/// duplications percentage is built from the duplicated-block count; the
/// metric set requests no real duplication percentage.
fn assemble_report(
    meta: ProjectMeta,
    quality_gate: String,
    measures: &[Measure],
    branch: &str,
    report_date: &str,
) -> Result<UnifiedReport, ReportError> {
    let grade = |metric: &str| -> Result<Grade, ReportError> {
        let value = lookup_metric(measures, metric);
        value
            .parse::<f64>()
            .ok()
            .map(|v| v as u8)
            .and_then(Grade::from_rating)
            .ok_or_else(|| ReportError::InvalidRating {
                metric: metric.to_string(),
                value: value.to_string(),
            })
    };

    let lines_of_code = parse_count(lookup_metric(measures, "ncloc"));
    let duplicated_blocks = parse_count(lookup_metric(measures, "duplicated_blocks"));

    Ok(UnifiedReport {
        project_name: meta.name,
        branch: branch.to_string(),
        report_date: report_date.to_string(),
        size_rating: size_rating(lines_of_code).to_string(),
        lines_of_code,
        quality_gate,
        reliability: Reliability {
            grade: grade("reliability_rating")?,
            bugs: parse_count(lookup_metric(measures, "bugs")),
            new_bugs: 0,
        },
        security: SecurityMetrics {
            grade: grade("security_rating")?,
            vulnerabilities: parse_count(lookup_metric(measures, "vulnerabilities")),
            security_hotspots: parse_count(lookup_metric(measures, "security_hotspots")),
            new_vulnerabilities: 0,
            new_security_hotspots: 0,
        },
        maintainability: Maintainability {
            grade: grade("sqale_rating")?,
            code_smells: parse_count(lookup_metric(measures, "code_smells")),
            debt_ratio: format!("{}%", lookup_metric(measures, "sqale_debt_ratio")),
            new_code_smells: 0,
            debt_ratio_on_new_code: "0%".to_string(),
        },
        coverage: Coverage {
            percentage: format!("{}%", lookup_metric(measures, "coverage")),
            unit_tests: 0,
            new_coverage: 0,
        },
        duplications: Duplications {
            percentage: format!("{duplicated_blocks}%"),
            duplicated_blocks,
            new_duplications: 0,
        },
    })
}

/// Parse an upstream count value. Counts arrive as strings and may carry
/// a decimal point; anything unparseable or negative collapses to zero.
fn parse_count(value: &str) -> u64 {
    value
        .parse::<f64>()
        .map(|v| v.max(0.0) as u64)
        .unwrap_or(0)
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Read and base64-encode a logo file. A missing or unreadable logo is
/// logged and omitted, never fatal.
fn load_logo(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match std::fs::read(path) {
        Ok(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read logo, omitting it");
            None
        }
    }
}
