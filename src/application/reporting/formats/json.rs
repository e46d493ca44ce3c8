//! JSON report format implementation
//!
//! Serializes the unified report together with the findings and their
//! severity summary. The field names are the domain field names; nothing
//! upstream-specific leaks through.

use serde::Serialize;

use crate::application::errors::ReportError;
use crate::domain::report::{UnifiedReport, VulnerabilityFinding, VulnerabilitySummary};

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a UnifiedReport,
    summary: &'a VulnerabilitySummary,
    findings: &'a [VulnerabilityFinding],
}

/// Render the report as a pretty-printed JSON document.
pub fn render(
    report: &UnifiedReport,
    summary: &VulnerabilitySummary,
    findings: &[VulnerabilityFinding],
) -> Result<String, ReportError> {
    let document = JsonReport {
        report,
        summary,
        findings,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{
        Coverage, Duplications, Grade, Maintainability, Reliability, SecurityMetrics,
    };

    #[test]
    fn test_json_output_contains_all_three_roots() {
        let report = UnifiedReport {
            project_name: "demo".to_string(),
            branch: "master".to_string(),
            report_date: "2026-08-30".to_string(),
            size_rating: "S".to_string(),
            lines_of_code: 1234,
            quality_gate: "OK".to_string(),
            reliability: Reliability {
                grade: Grade::A,
                bugs: 0,
                new_bugs: 0,
            },
            security: SecurityMetrics {
                grade: Grade::A,
                vulnerabilities: 0,
                security_hotspots: 0,
                new_vulnerabilities: 0,
                new_security_hotspots: 0,
            },
            maintainability: Maintainability {
                grade: Grade::A,
                code_smells: 0,
                debt_ratio: "0%".to_string(),
                new_code_smells: 0,
                debt_ratio_on_new_code: "0%".to_string(),
            },
            coverage: Coverage {
                percentage: "0%".to_string(),
                unit_tests: 0,
                new_coverage: 0,
            },
            duplications: Duplications {
                percentage: "0%".to_string(),
                duplicated_blocks: 0,
                new_duplications: 0,
            },
        };
        let summary = VulnerabilitySummary::default();

        let json = render(&report, &summary, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["report"]["project_name"], "demo");
        assert_eq!(value["report"]["lines_of_code"], 1234);
        assert_eq!(value["summary"]["sast"]["vulnerabilities"], 0);
        assert!(value["findings"].as_array().unwrap().is_empty());
    }
}
