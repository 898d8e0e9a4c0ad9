use chrono::Utc;
use log::info;

use crate::parser::RawFinding;
use crate::report::{AuditFindingsReport, ComplianceFramework, Finding, RemediationStep};
use crate::severity::{classify, Severity};
use crate::summary::generate_executive_summary;

const DEFAULT_TIMELINE: &str = "30 days";

/// Convert parsed raw findings into a complete report: canonical
/// findings, per-severity counts, compliance score and narratives.
pub fn aggregate(
    raw_findings: Vec<RawFinding>,
    document_name: &str,
    framework: &ComplianceFramework,
) -> AuditFindingsReport {
    let findings: Vec<Finding> = raw_findings.into_iter().map(to_finding).collect();

    let critical_count = count_level(&findings, Severity::Critical);
    let high_count = count_level(&findings, Severity::High);
    let medium_count = count_level(&findings, Severity::Medium);
    let low_count = count_level(&findings, Severity::Low);
    let total = findings.len();

    let executive_summary = generate_executive_summary(
        total,
        critical_count,
        high_count,
        medium_count,
        low_count,
        &findings,
    );

    info!(
        "Aggregated {} findings: {} critical, {} high, {} medium, {} low",
        total, critical_count, high_count, medium_count, low_count
    );

    AuditFindingsReport {
        document_id: None,
        document_name: document_name.to_string(),
        compliance_framework: framework.name().to_string(),
        total_findings: total,
        critical_count,
        high_count,
        medium_count,
        low_count,
        total_high_priority: critical_count + high_count,
        compliance_percentage: compliance_percentage(critical_count, high_count),
        executive_summary,
        risk_summary: risk_summary(critical_count, high_count),
        generated_at: Utc::now(),
        fallback: None,
        findings,
    }
}

fn to_finding(raw: RawFinding) -> Finding {
    let (severity, impact_score) = classify(&raw.severity, raw.impact_score);

    let remediation_steps = raw
        .remediation_steps
        .into_iter()
        .enumerate()
        .map(|(i, action)| RemediationStep::new(i as u32 + 1, action))
        .collect();

    Finding {
        title: raw.title,
        description: raw.description,
        severity,
        impact_score,
        evidence: raw.evidence,
        affected_controls: raw.affected_controls,
        remediation_steps,
        recommended_timeline: raw
            .recommended_timeline
            .unwrap_or_else(|| DEFAULT_TIMELINE.to_string()),
        best_practices: raw.best_practices,
    }
}

fn count_level(findings: &[Finding], level: Severity) -> usize {
    findings.iter().filter(|f| f.severity.level == level).count()
}

/// Penalty model: each critical costs 10 points, each high 5, floored
/// at zero. Medium and low findings do not reduce the score.
pub fn compliance_percentage(critical_count: usize, high_count: usize) -> f64 {
    let penalty = (critical_count * 10 + high_count * 5) as i64;
    (100 - penalty).max(0) as f64
}

/// Strict precedence: critical over high over everything else.
pub fn risk_summary(critical_count: usize, high_count: usize) -> String {
    if critical_count > 0 {
        format!(
            "Critical Risk: {} critical findings require immediate attention",
            critical_count
        )
    } else if high_count > 0 {
        format!(
            "High Risk: {} high-priority findings need urgent remediation",
            high_count
        )
    } else {
        "Moderate Risk: Focus on medium-priority improvements".to_string()
    }
}
