use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fallback::FallbackAssessment;
use crate::severity::SeverityDescriptor;

/// Named compliance standards the pipeline understands. Anything else
/// is preserved verbatim and resolves to the generic fallback content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComplianceFramework {
    Iso27001,
    Gdpr,
    Hipaa,
    Other(String),
}

impl ComplianceFramework {
    /// Lenient parsing: "ISO_27001", "ISO 27001", "ISO_27001:2022" and
    /// "iso27001" all resolve to the same framework.
    pub fn parse(input: &str) -> Self {
        let normalized: String = input
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        if normalized.starts_with("ISO27001") {
            ComplianceFramework::Iso27001
        } else {
            match normalized.as_str() {
                "GDPR" => ComplianceFramework::Gdpr,
                "HIPAA" => ComplianceFramework::Hipaa,
                _ => ComplianceFramework::Other(input.trim().to_string()),
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ComplianceFramework::Iso27001 => "ISO 27001",
            ComplianceFramework::Gdpr => "GDPR",
            ComplianceFramework::Hipaa => "HIPAA",
            ComplianceFramework::Other(name) => name,
        }
    }
}

impl fmt::Display for ComplianceFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemediationStatus {
    Pending,
    InProgress,
    Completed,
}

/// One action in a finding's remediation plan. Owner, deadline and
/// resources are assigned later by an external workflow, never here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemediationStep {
    pub step_number: u32,
    pub action: String,
    pub status: RemediationStatus,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub resources: Option<String>,
}

impl RemediationStep {
    pub fn new(step_number: u32, action: String) -> Self {
        Self {
            step_number,
            action,
            status: RemediationStatus::Pending,
            owner: None,
            deadline: None,
            resources: None,
        }
    }
}

/// One identified compliance issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub title: String,
    pub description: String,
    pub severity: SeverityDescriptor,
    pub impact_score: u8,
    pub evidence: String,
    pub affected_controls: Vec<String>,
    pub remediation_steps: Vec<RemediationStep>,
    pub recommended_timeline: String,
    pub best_practices: String,
}

/// Output artifact of one analysis invocation. Constructed once and
/// immutable thereafter; persistence is a caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFindingsReport {
    pub document_id: Option<String>,
    pub document_name: String,
    pub compliance_framework: String,
    pub findings: Vec<Finding>,
    pub total_findings: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub total_high_priority: usize,
    pub compliance_percentage: f64,
    pub executive_summary: String,
    pub risk_summary: String,
    pub generated_at: DateTime<Utc>,
    /// Populated only on the fallback path so callers can render the
    /// knowledge-base gaps, improvements and risk areas.
    pub fallback: Option<FallbackAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_parsing_variants() {
        assert_eq!(
            ComplianceFramework::parse("ISO_27001"),
            ComplianceFramework::Iso27001
        );
        assert_eq!(
            ComplianceFramework::parse("ISO 27001"),
            ComplianceFramework::Iso27001
        );
        assert_eq!(
            ComplianceFramework::parse("ISO_27001:2022"),
            ComplianceFramework::Iso27001
        );
        assert_eq!(
            ComplianceFramework::parse("iso27001"),
            ComplianceFramework::Iso27001
        );
        assert_eq!(ComplianceFramework::parse("gdpr"), ComplianceFramework::Gdpr);
        assert_eq!(
            ComplianceFramework::parse("HIPAA"),
            ComplianceFramework::Hipaa
        );
    }

    #[test]
    fn test_unknown_framework_is_preserved() {
        let framework = ComplianceFramework::parse("SOC 2");
        assert_eq!(
            framework,
            ComplianceFramework::Other("SOC 2".to_string())
        );
        assert_eq!(framework.name(), "SOC 2");
    }

    #[test]
    fn test_remediation_step_starts_pending() {
        let step = RemediationStep::new(1, "Define encryption requirements".to_string());
        assert_eq!(step.status, RemediationStatus::Pending);
        assert!(step.owner.is_none());
        assert!(step.deadline.is_none());
        assert!(step.resources.is_none());
    }
}
