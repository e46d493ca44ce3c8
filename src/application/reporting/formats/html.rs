//! HTML report format implementation
//!
//! Pure string substitution: the functions here turn the unified report
//! and its findings into a self-contained dark-themed document. No I/O,
//! no control flow beyond color/class selection.

use crate::domain::report::{UnifiedReport, VulnerabilityFinding, VulnerabilitySummary};

pub const CRITICAL_COLOR: &str = "#F9208B";
pub const HIGH_COLOR: &str = "#E07B16";
pub const MEDIUM_COLOR: &str = "#FCD202";
pub const LOW_COLOR: &str = "#06C0FD";
/// Color used for any severity label outside the four known buckets.
pub const FALLBACK_SEVERITY_COLOR: &str = "#06C0FD";

pub const GATE_PASS_COLOR: &str = "#04BE6B";
pub const GATE_FAIL_COLOR: &str = "#F9208B";

const PAGE_BACKGROUND: &str = "#020618";

/// Fixed page styling shared by every report document.
const PAGE_CSS: &str = r#"
    @page {
      size: A4;
      margin: 0;
      margin-top: 120px;
      margin-bottom: 120px;
      background-color: #020618;
    }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    html, body {
      background-color: #020618;
      color: white;
      font-family: Arial, sans-serif;
      min-height: 100vh;
      -webkit-print-color-adjust: exact;
    }
    .section { padding: 40px; max-width: 100%; }
    .page-break { break-before: page; }
    .metric-card {
      border: 1px solid rgba(255,255,255,0.1);
      background: rgba(255,255,255,0.1);
      border-radius: 8px;
      padding: 20px;
      margin-top: 20px;
      break-inside: avoid;
      page-break-inside: avoid;
    }
    .metrics-grid {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 20px;
      margin-top: 20px;
    }
    .metrics-grid-2 { grid-template-columns: repeat(2, 1fr); }
    .info-grid {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 20px;
      margin-top: 20px;
    }
    .label { color: #888; font-size: 14px; }
    .value { color: #fff; font-size: 16px; margin-top: 4px; }
    .badge {
      display: inline-flex;
      align-items: center;
      justify-content: center;
      background: #23263a;
      color: #fff;
      font-size: 14px;
      margin-top: 4px;
      padding: 2px 8px;
      border-radius: 4px;
    }
    .stat-row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: #23263a;
      border-radius: 6px;
      padding: 8px 14px;
      margin-top: 8px;
    }
    .stat-value { font-weight: bold; }
    .card-title { text-align: center; }
    .grade {
      font-size: 32px;
      font-weight: bold;
      margin: 20px auto;
      width: 60px;
      height: 60px;
      display: flex;
      align-items: center;
      justify-content: center;
      border-radius: 50%;
      background: rgba(255,255,255,0.1);
    }
    .grade-A { color: #04BE6B; }
    .grade-B { color: #FCD202; }
    .grade-C { color: #E07B16; }
    .grade-D { color: #cd3d3d; }
    .grade-E { color: #F9208B; }
    .ring { position: relative; width: 100px; height: 100px; margin: 20px auto; }
    .ring svg { transform: rotate(-90deg); width: 100%; height: 100%; }
    .ring-value {
      position: absolute;
      top: 50%;
      left: 50%;
      transform: translate(-50%, -50%);
      font-size: 24px;
      font-weight: bold;
    }
    .finding { margin-top: 10px; padding: 15px; }
    .finding h4 {
      padding: 10px;
      border-bottom: 1px solid rgba(255,255,255,0.1);
      margin-bottom: 16px;
    }
    .finding-columns {
      display: flex;
      flex-direction: row;
      gap: 32px;
      font-size: 12px;
      color: #aaa;
    }
    .finding-columns > div {
      flex: 1;
      display: flex;
      flex-direction: column;
      gap: 6px;
    }
    .finding a { color: #4A9EFF; }
"#;

/// Color for a quality-gate status: "OK" passes, anything else fails.
pub fn quality_gate_color(status: &str) -> &'static str {
    if status == "OK" {
        GATE_PASS_COLOR
    } else {
        GATE_FAIL_COLOR
    }
}

/// Color-code a severity label. The match is case-sensitive; anything
/// outside the four known buckets gets the fallback color.
pub fn severity_color(severity: &str) -> &'static str {
    match severity {
        "critical" => CRITICAL_COLOR,
        "high" => HIGH_COLOR,
        "medium" => MEDIUM_COLOR,
        "low" => LOW_COLOR,
        _ => FALLBACK_SEVERITY_COLOR,
    }
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

fn svg_ring(percentage: &str, color: &str) -> String {
    format!(
        r##"<div class="ring">
            <svg viewBox="0 0 36 36">
              <path d="M18 2.0845 a 15.9155 15.9155 0 0 1 0 31.831 a 15.9155 15.9155 0 0 1 0 -31.831"
                fill="none" stroke="rgba(255,255,255,0.1)" stroke-width="2" stroke-linecap="round"/>
              <path d="M18 2.0845 a 15.9155 15.9155 0 0 1 0 31.831 a 15.9155 15.9155 0 0 1 0 -31.831"
                fill="none" stroke="{color}" stroke-width="2" stroke-linecap="round"
                stroke-dasharray="{percentage}, 100"/>
            </svg>
            <div class="ring-value" style="color: {color};">{percentage}</div>
          </div>"##
    )
}

/// Render the scalar summary section of the report.
pub fn render_summary_section(report: &UnifiedReport) -> String {
    let gate_color = quality_gate_color(&report.quality_gate);
    let coverage_ring = svg_ring(&report.coverage.percentage, GATE_PASS_COLOR);
    let duplications_ring = svg_ring(&report.duplications.percentage, GATE_FAIL_COLOR);

    format!(
        r##"<div class="section">
        <h2>Code Quality Analysis</h2>
        <div class="metric-card">
          <div class="info-grid">
            <div><div class="label">Project Name</div><div class="value">{project_name}</div></div>
            <div><div class="label">Branch</div><div class="value"># {branch}</div></div>
            <div><div class="label">Report date</div><div class="value">{report_date}</div></div>
          </div>
          <div class="info-grid">
            <div><div class="label">Size Rating</div><div class="badge">{size_rating}</div></div>
            <div><div class="label">Lines of Code</div><div class="value">{lines_of_code}</div></div>
            <div><div class="label">Quality Gate</div><div class="badge" style="background: {gate_color};">{quality_gate}</div></div>
          </div>
        </div>
        <div class="metrics-grid">
          <div class="metric-card">
            <h2 class="card-title">Reliability</h2>
            <p class="grade grade-{reliability_grade}">{reliability_grade}</p>
            <div class="stat-row"><span>Bugs:</span><span class="stat-value">{bugs}</span></div>
            <div class="stat-row"><span>New Bugs:</span><span class="stat-value">{new_bugs}</span></div>
          </div>
          <div class="metric-card">
            <h2 class="card-title">Security</h2>
            <p class="grade grade-{security_grade}">{security_grade}</p>
            <div class="stat-row"><span>Vulnerabilities:</span><span class="stat-value">{vulnerabilities}</span></div>
            <div class="stat-row"><span>Security Hotspots:</span><span class="stat-value">{security_hotspots}</span></div>
          </div>
          <div class="metric-card">
            <h2 class="card-title">Maintainability</h2>
            <p class="grade grade-{maintainability_grade}">{maintainability_grade}</p>
            <div class="stat-row"><span>Code Smells:</span><span class="stat-value">{code_smells}</span></div>
            <div class="stat-row"><span>Debt Ratio:</span><span class="stat-value">{debt_ratio}</span></div>
          </div>
        </div>
        <div class="metrics-grid metrics-grid-2">
          <div class="metric-card">
            <h2 class="card-title">Coverage</h2>
            {coverage_ring}
            <div class="stat-row"><span>Unit Tests:</span><span class="stat-value">{unit_tests}</span></div>
          </div>
          <div class="metric-card">
            <h2 class="card-title">Duplications</h2>
            {duplications_ring}
            <div class="stat-row"><span>Duplicated Blocks:</span><span class="stat-value">{duplicated_blocks}</span></div>
          </div>
        </div>
      </div>"##,
        project_name = report.project_name,
        branch = report.branch,
        report_date = report.report_date,
        size_rating = report.size_rating,
        lines_of_code = report.lines_of_code,
        quality_gate = report.quality_gate,
        reliability_grade = report.reliability.grade,
        bugs = report.reliability.bugs,
        new_bugs = report.reliability.new_bugs,
        security_grade = report.security.grade,
        vulnerabilities = report.security.vulnerabilities,
        security_hotspots = report.security.security_hotspots,
        maintainability_grade = report.maintainability.grade,
        code_smells = report.maintainability.code_smells,
        debt_ratio = report.maintainability.debt_ratio,
        unit_tests = report.coverage.unit_tests,
        duplicated_blocks = report.duplications.duplicated_blocks,
    )
}

fn render_finding(finding: &VulnerabilityFinding) -> String {
    let color = severity_color(&finding.severity);
    let cwes = if finding.cwes.is_empty() {
        "N/A".to_string()
    } else {
        finding
            .cwes
            .iter()
            .map(|cwe| format!("CWE-{cwe}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let fix_status = if finding.fixable {
        "Fixable"
    } else {
        "Not Fixable"
    };

    format!(
        r##"<div class="metric-card finding" style="border-top: 2px solid {color};">
          <h4 style="color: {color};">{title}</h4>
          <div class="finding-columns">
            <div>
              <p><span style="color: {color};">Package:</span> {package_name} ({package_versions})</p>
              <p><span class="label">CVEs:</span> {cves}</p>
              <p><span class="label">Exploit Maturity:</span> <span style="color: {color};">{exploit_maturity}</span></p>
              <p><span class="label">Fixed in Versions:</span> {fixed_in}</p>
            </div>
            <div>
              <p><span class="label">Severity:</span> <span style="color: {color}; font-weight: bold;">{severity} (CVSS: {cvss_score})</span></p>
              <p><span class="label">CWEs:</span> {cwes}</p>
              <p><span class="label">Fix Status:</span> <span style="color: {color};">{fix_status}</span></p>
              <p><span class="label">More Info:</span> <a href="{url}">View advisory</a></p>
            </div>
          </div>
        </div>"##,
        title = finding.title,
        package_name = finding.package_name,
        package_versions = finding.package_versions.join(", "),
        cves = join_or_na(&finding.cves),
        exploit_maturity = finding.exploit_maturity,
        fixed_in = join_or_na(&finding.fixed_in),
        severity = finding.severity,
        cvss_score = finding.cvss_score,
        url = finding.url,
    )
}

/// Render the SAST/SCA summary cards and one block per finding, in input
/// order. Findings with unknown severities are kept, not dropped.
pub fn render_findings_section(
    summary: &VulnerabilitySummary,
    findings: &[VulnerabilityFinding],
) -> String {
    let blocks: String = findings.iter().map(render_finding).collect();

    format!(
        r##"<div class="section page-break">
        <h2>Dependency Security Analysis</h2>
        <div class="metric-card">
          <h3>SAST Analysis</h3>
          <div class="stat-row"><span>Total Vulnerabilities:</span><span class="stat-value">{sast_total}</span></div>
          <div class="stat-row"><span>Critical Issues:</span><span class="stat-value" style="color: {critical_color};">{sast_critical}</span></div>
          <div class="stat-row"><span>High Issues:</span><span class="stat-value" style="color: {high_color};">{sast_high}</span></div>
          <div class="stat-row"><span>Medium Issues:</span><span class="stat-value" style="color: {medium_color};">{sast_medium}</span></div>
          <div class="stat-row"><span>Low Issues:</span><span class="stat-value" style="color: {low_color};">{sast_low}</span></div>
        </div>
        <div class="metric-card">
          <h3>SCA Analysis</h3>
          <div class="stat-row"><span>Total Vulnerabilities:</span><span class="stat-value">{sca_total}</span></div>
          <div class="stat-row"><span>Critical Dependencies:</span><span class="stat-value" style="color: {critical_color};">{sca_critical}</span></div>
          <div class="stat-row"><span>High Dependencies:</span><span class="stat-value" style="color: {high_color};">{sca_high}</span></div>
          <div class="stat-row"><span>Medium Dependencies:</span><span class="stat-value" style="color: {medium_color};">{sca_medium}</span></div>
          <div class="stat-row"><span>Low Dependencies:</span><span class="stat-value" style="color: {low_color};">{sca_low}</span></div>
          <div class="stat-row"><span>Fixable Issues:</span><span class="stat-value">{sca_fixable}</span></div>
        </div>
        <div style="margin-top: 20px;">
          <h3>Detailed Vulnerability Analysis</h3>
          {blocks}
        </div>
      </div>"##,
        sast_total = summary.sast.vulnerabilities,
        sast_critical = summary.sast.critical_issues,
        sast_high = summary.sast.high_issues,
        sast_medium = summary.sast.medium_issues,
        sast_low = summary.sast.low_issues,
        sca_total = summary.sca.vulnerabilities,
        sca_critical = summary.sca.critical_dependencies,
        sca_high = summary.sca.high_dependencies,
        sca_medium = summary.sca.medium_dependencies,
        sca_low = summary.sca.low_dependencies,
        sca_fixable = summary.sca.fixable_issues,
        critical_color = CRITICAL_COLOR,
        high_color = HIGH_COLOR,
        medium_color = MEDIUM_COLOR,
        low_color = LOW_COLOR,
    )
}

/// Wrap the rendered sections in the fixed page styling.
pub fn render_document(content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html style="background-color: {background};">
<head>
  <meta charset="UTF-8">
  <style>{css}</style>
</head>
<body style="background: {background};">
{content}
</body>
</html>"##,
        background = PAGE_BACKGROUND,
        css = PAGE_CSS,
    )
}

/// Header template injected by the PDF collaborator on every page.
pub fn header_template(title: &str, date: &str, logo: Option<&str>) -> String {
    let logo_img = logo
        .map(|b64| format!(r#"<img src="data:image/png;base64,{b64}" width="127" height="23" />"#))
        .unwrap_or_default();

    format!(
        r##"<div style="width: 100%; font-size: 10px; color: white; display: flex; justify-content: space-between; align-items: center; padding: 20px; border-bottom: 1px solid rgba(255,255,255,0.1);">
        <div style="flex: 1;">{logo_img}</div>
        <div style="flex: 1; text-align: center;"><span style="font-size: 16px;">{title}</span></div>
        <div style="flex: 1; text-align: right;">Date: {date}</div>
      </div>"##
    )
}

/// Footer template with page-number placeholders understood by the
/// PDF collaborator.
pub fn footer_template(logo: Option<&str>) -> String {
    let logo_img = logo
        .map(|b64| format!(r#"<img src="data:image/png;base64,{b64}" width="200" height="60" />"#))
        .unwrap_or_default();

    format!(
        r##"<div style="width: 100%; font-size: 10px; color: white; display: flex; justify-content: space-between; align-items: center; padding: 0 20px; border-top: 1px solid rgba(255,255,255,0.1);">
        <div style="flex: 1; text-align: center;">{logo_img}</div>
        <div style="flex: 1; text-align: right;">
          <span>Page <span class="pageNumber"></span> of <span class="totalPages"></span></span>
        </div>
      </div>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{
        Coverage, Duplications, Grade, Maintainability, Reliability, SecurityMetrics,
    };

    fn sample_report(quality_gate: &str) -> UnifiedReport {
        UnifiedReport {
            project_name: "payments-gateway".to_string(),
            branch: "master".to_string(),
            report_date: "2026-08-30".to_string(),
            size_rating: "M".to_string(),
            lines_of_code: 45231,
            quality_gate: quality_gate.to_string(),
            reliability: Reliability {
                grade: Grade::A,
                bugs: 7,
                new_bugs: 0,
            },
            security: SecurityMetrics {
                grade: Grade::B,
                vulnerabilities: 3,
                security_hotspots: 11,
                new_vulnerabilities: 0,
                new_security_hotspots: 0,
            },
            maintainability: Maintainability {
                grade: Grade::C,
                code_smells: 142,
                debt_ratio: "1.8%".to_string(),
                new_code_smells: 0,
                debt_ratio_on_new_code: "0%".to_string(),
            },
            coverage: Coverage {
                percentage: "83.4%".to_string(),
                unit_tests: 0,
                new_coverage: 0,
            },
            duplications: Duplications {
                percentage: "12%".to_string(),
                duplicated_blocks: 12,
                new_duplications: 0,
            },
        }
    }

    fn sample_finding(severity: &str) -> VulnerabilityFinding {
        VulnerabilityFinding {
            id: "SNYK-JS-LODASH-567746".to_string(),
            package_name: "lodash".to_string(),
            package_versions: vec!["4.17.15".to_string()],
            title: "Prototype Pollution".to_string(),
            severity: severity.to_string(),
            cvss_score: 7.4,
            cves: vec!["CVE-2020-8203".to_string()],
            cwes: vec!["1321".to_string()],
            url: "https://snyk.io/vuln/SNYK-JS-LODASH-567746".to_string(),
            fixable: true,
            fixed_in: vec!["4.17.16".to_string()],
            exploit_maturity: "proof-of-concept".to_string(),
            language: "npm".to_string(),
        }
    }

    #[test]
    fn test_quality_gate_ok_uses_pass_color() {
        let markup = render_summary_section(&sample_report("OK"));
        assert!(markup.contains(&format!("background: {};", GATE_PASS_COLOR)));
    }

    #[test]
    fn test_quality_gate_error_uses_fail_color() {
        let markup = render_summary_section(&sample_report("ERROR"));
        assert!(markup.contains(&format!("background: {};", GATE_FAIL_COLOR)));
        assert!(!markup.contains(&format!("background: {};", GATE_PASS_COLOR)));
    }

    #[test]
    fn test_summary_round_trips_scalar_values() {
        let report = sample_report("OK");
        let markup = render_summary_section(&report);

        assert!(markup.contains("payments-gateway"));
        assert!(markup.contains("# master"));
        assert!(markup.contains("2026-08-30"));
        assert!(markup.contains("45231"));
        assert!(markup.contains(">OK<"));
        assert!(markup.contains("grade-A"));
        assert!(markup.contains("grade-B"));
        assert!(markup.contains("grade-C"));
        assert!(markup.contains(">7<")); // bugs
        assert!(markup.contains(">3<")); // vulnerabilities
        assert!(markup.contains(">11<")); // hotspots
        assert!(markup.contains(">142<")); // code smells
        assert!(markup.contains("1.8%"));
        assert!(markup.contains("83.4%"));
        assert!(markup.contains(">12<")); // duplicated blocks
    }

    #[test]
    fn test_severity_color_lookup() {
        assert_eq!(severity_color("critical"), CRITICAL_COLOR);
        assert_eq!(severity_color("high"), HIGH_COLOR);
        assert_eq!(severity_color("medium"), MEDIUM_COLOR);
        assert_eq!(severity_color("low"), LOW_COLOR);
        assert_eq!(severity_color("unknown"), FALLBACK_SEVERITY_COLOR);
        // Case-sensitive: "Critical" is not a known bucket
        assert_eq!(severity_color("Critical"), FALLBACK_SEVERITY_COLOR);
    }

    #[test]
    fn test_critical_finding_uses_critical_color() {
        let findings = vec![sample_finding("critical")];
        let summary = VulnerabilitySummary::from_findings(&findings, "npm");
        let markup = render_findings_section(&summary, &findings);
        assert!(markup.contains(&format!("border-top: 2px solid {};", CRITICAL_COLOR)));
    }

    #[test]
    fn test_unknown_severity_gets_fallback_color_and_is_kept() {
        let findings = vec![sample_finding("unknown")];
        let summary = VulnerabilitySummary::from_findings(&findings, "npm");
        let markup = render_findings_section(&summary, &findings);

        // Still rendered, with the fallback color
        assert!(markup.contains("Prototype Pollution"));
        assert!(markup.contains(&format!(
            "border-top: 2px solid {};",
            FALLBACK_SEVERITY_COLOR
        )));
    }

    #[test]
    fn test_zero_findings_render_empty_block_sequence() {
        let summary = VulnerabilitySummary::default();
        let markup = render_findings_section(&summary, &[]);
        assert!(!markup.contains("metric-card finding"));
        // The summary cards are still present
        assert!(markup.contains("SAST Analysis"));
        assert!(markup.contains("SCA Analysis"));
    }

    #[test]
    fn test_finding_fields_rendered() {
        let findings = vec![sample_finding("high")];
        let summary = VulnerabilitySummary::from_findings(&findings, "npm");
        let markup = render_findings_section(&summary, &findings);

        assert!(markup.contains("lodash (4.17.15)"));
        assert!(markup.contains("CVE-2020-8203"));
        assert!(markup.contains("CWE-1321"));
        assert!(markup.contains("proof-of-concept"));
        assert!(markup.contains("4.17.16"));
        assert!(markup.contains("high (CVSS: 7.4)"));
        assert!(markup.contains("Fixable"));
        assert!(markup.contains("https://snyk.io/vuln/SNYK-JS-LODASH-567746"));
    }

    #[test]
    fn test_empty_identifier_lists_render_na() {
        let mut finding = sample_finding("low");
        finding.cves.clear();
        finding.cwes.clear();
        finding.fixed_in.clear();
        let findings = vec![finding];
        let summary = VulnerabilitySummary::from_findings(&findings, "npm");
        let markup = render_findings_section(&summary, &findings);
        assert!(markup.contains("N/A"));
    }

    #[test]
    fn test_document_wraps_content_with_page_css() {
        let doc = render_document("<p>hello</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("size: A4"));
        assert!(doc.contains("<p>hello</p>"));
    }

    #[test]
    fn test_footer_has_page_number_placeholders() {
        let footer = footer_template(None);
        assert!(footer.contains(r#"class="pageNumber""#));
        assert!(footer.contains(r#"class="totalPages""#));
    }
}
