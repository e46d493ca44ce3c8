//! Report entities
//!
//! `UnifiedReport` is constructed once per run from the upstream fetches,
//! consumed by the rendering step, and discarded. It is never mutated after
//! construction and nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::value_objects::Grade;

/// The merged, rendering-ready record for one project snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedReport {
    pub project_name: String,
    pub branch: String,
    /// ISO date string (YYYY-MM-DD).
    pub report_date: String,
    pub size_rating: String,
    pub lines_of_code: u64,
    /// Pass/fail label as reported by the upstream quality gate ("OK" = pass).
    pub quality_gate: String,
    pub reliability: Reliability,
    pub security: SecurityMetrics,
    pub maintainability: Maintainability,
    pub coverage: Coverage,
    pub duplications: Duplications,
}

/// Reliability section of the report.
///
/// The upstream metric set used here carries no new-code figures, so
/// `new_bugs` is a structural placeholder and always zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reliability {
    pub grade: Grade,
    pub bugs: u64,
    pub new_bugs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityMetrics {
    pub grade: Grade,
    pub vulnerabilities: u64,
    pub security_hotspots: u64,
    pub new_vulnerabilities: u64,
    pub new_security_hotspots: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maintainability {
    pub grade: Grade,
    pub code_smells: u64,
    /// Technical-debt ratio as a percentage string, e.g. "1.5%".
    pub debt_ratio: String,
    pub new_code_smells: u64,
    pub debt_ratio_on_new_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    pub percentage: String,
    pub unit_tests: u64,
    pub new_coverage: u64,
}

/// Duplication section. The percentage field is built from the
/// duplicated-block count because the upstream metric set carries no real
/// duplication percentage; see DESIGN.md before changing this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duplications {
    pub percentage: String,
    pub duplicated_blocks: u64,
    pub new_duplications: u64,
}

/// A single reported vulnerability, in upstream order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    pub id: String,
    pub package_name: String,
    pub package_versions: Vec<String>,
    pub title: String,
    /// Severity label matched case-sensitively against the literal strings
    /// "critical", "high", "medium", "low". Unknown labels are kept as-is.
    pub severity: String,
    pub cvss_score: f64,
    pub cves: Vec<String>,
    /// Bare CWE numbers; the renderer adds the "CWE-" prefix.
    pub cwes: Vec<String>,
    pub url: String,
    pub fixable: bool,
    pub fixed_in: Vec<String>,
    pub exploit_maturity: String,
    /// Upstream language tag used for the SAST/SCA split.
    pub language: String,
}

/// SAST-grouped findings: everything whose language tag is not the
/// package-manager ecosystem tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SastSummary {
    pub vulnerabilities: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
}

/// SCA-grouped findings: language tag equals the ecosystem tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaSummary {
    pub vulnerabilities: usize,
    pub critical_dependencies: usize,
    pub high_dependencies: usize,
    pub medium_dependencies: usize,
    pub low_dependencies: usize,
    pub fixable_issues: usize,
}

/// Two parallel severity breakdowns over the findings list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilitySummary {
    pub sast: SastSummary,
    pub sca: ScaSummary,
}

impl VulnerabilitySummary {
    /// Partition findings into SAST/SCA by language tag and count severities.
    ///
    /// Severity matching is case-sensitive against the four literal labels;
    /// anything else contributes to the group totals but to no severity
    /// bucket.
    pub fn from_findings(findings: &[VulnerabilityFinding], ecosystem: &str) -> Self {
        let (sca, sast): (Vec<&VulnerabilityFinding>, Vec<&VulnerabilityFinding>) =
            findings.iter().partition(|f| f.language == ecosystem);

        fn by_severity(group: &[&VulnerabilityFinding], severity: &str) -> usize {
            group.iter().filter(|f| f.severity == severity).count()
        }

        Self {
            sast: SastSummary {
                vulnerabilities: sast.len(),
                critical_issues: by_severity(&sast, "critical"),
                high_issues: by_severity(&sast, "high"),
                medium_issues: by_severity(&sast, "medium"),
                low_issues: by_severity(&sast, "low"),
            },
            sca: ScaSummary {
                vulnerabilities: sca.len(),
                critical_dependencies: by_severity(&sca, "critical"),
                high_dependencies: by_severity(&sca, "high"),
                medium_dependencies: by_severity(&sca, "medium"),
                low_dependencies: by_severity(&sca, "low"),
                fixable_issues: sca.iter().filter(|f| f.fixable).count(),
            },
        }
    }
}
