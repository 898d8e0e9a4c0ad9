use crate::report::Finding;
use crate::severity::Severity;

const MAX_CRITICAL_CALLOUTS: usize = 3;

/// Render the fixed-structure executive narrative: header, count
/// breakdown per severity, and an immediate-action callout only when
/// critical findings exist.
pub fn generate_executive_summary(
    total: usize,
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
    findings: &[Finding],
) -> String {
    let mut summary = String::new();
    summary.push_str("Compliance Assessment Summary\n\n");
    summary.push_str(&format!("Total Findings: {}\n", total));
    summary.push_str(&format!("- Critical: {} (immediate action required)\n", critical));
    summary.push_str(&format!("- High: {} (urgent attention needed)\n", high));
    summary.push_str(&format!("- Medium: {} (plan remediation)\n", medium));
    summary.push_str(&format!("- Low: {} (improvement opportunities)\n\n", low));

    if critical > 0 {
        summary.push_str(&format!(
            "IMMEDIATE ACTION REQUIRED: {} critical finding(s) pose significant compliance and security risks.\n\n",
            critical
        ));
        summary.push_str("Critical Findings:\n");
        for finding in findings
            .iter()
            .filter(|f| f.severity.level == Severity::Critical)
            .take(MAX_CRITICAL_CALLOUTS)
        {
            summary.push_str(&format!("- {}\n", finding.title));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    fn finding(title: &str, level: Severity) -> Finding {
        Finding {
            title: title.to_string(),
            description: String::new(),
            severity: level.descriptor(),
            impact_score: level.default_impact_score(),
            evidence: String::new(),
            affected_controls: Vec::new(),
            remediation_steps: Vec::new(),
            recommended_timeline: "30 days".to_string(),
            best_practices: String::new(),
        }
    }

    #[test]
    fn test_summary_contains_count_breakdown() {
        let summary = generate_executive_summary(4, 0, 1, 2, 1, &[]);
        assert!(summary.contains("Total Findings: 4"));
        assert!(summary.contains("- High: 1 (urgent attention needed)"));
        assert!(summary.contains("- Medium: 2 (plan remediation)"));
        assert!(summary.contains("- Low: 1 (improvement opportunities)"));
    }

    #[test]
    fn test_callout_only_when_critical_present() {
        let no_critical = generate_executive_summary(2, 0, 2, 0, 0, &[]);
        assert!(!no_critical.contains("IMMEDIATE ACTION REQUIRED"));

        let findings = vec![finding("Broken access control", Severity::Critical)];
        let with_critical = generate_executive_summary(1, 1, 0, 0, 0, &findings);
        assert!(with_critical.contains("IMMEDIATE ACTION REQUIRED"));
        assert!(with_critical.contains("- Broken access control"));
    }

    #[test]
    fn test_callout_lists_at_most_three_titles_in_order() {
        let findings = vec![
            finding("first", Severity::Critical),
            finding("skip-me", Severity::High),
            finding("second", Severity::Critical),
            finding("third", Severity::Critical),
            finding("fourth", Severity::Critical),
        ];
        let summary = generate_executive_summary(5, 4, 1, 0, 0, &findings);

        assert!(summary.contains("- first\n"));
        assert!(summary.contains("- second\n"));
        assert!(summary.contains("- third\n"));
        assert!(!summary.contains("- fourth"));
        assert!(!summary.contains("- skip-me"));

        let first = summary.find("- first").unwrap();
        let second = summary.find("- second").unwrap();
        let third = summary.find("- third").unwrap();
        assert!(first < second && second < third);
    }
}
