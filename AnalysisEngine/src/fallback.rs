use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::info;
use serde::{Deserialize, Serialize};

use crate::report::ComplianceFramework;

/// A blocking issue the knowledge base flags for a framework
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriticalFlag {
    pub id: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub recommendation: String,
    pub related_controls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImprovementSuggestion {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub benefit: String,
    pub effort: String,
    pub priority: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceGap {
    pub control_id: String,
    pub control_name: String,
    pub requirement: String,
    pub current_state: String,
    pub expected_state: String,
    pub gap_description: String,
    pub remediation_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskArea {
    pub id: String,
    pub risk_level: String,
    pub title: String,
    pub description: String,
    pub potential_impact: String,
    pub likelihood: String,
    pub mitigations: Vec<String>,
}

/// Fixed placeholder scoring attached to every fallback assessment.
/// Intentionally not derived from document content, since no content
/// was analyzed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallAssessment {
    pub score: String,
    pub rating: String,
    pub summary: String,
    pub critical_issues: u32,
    pub warnings: u32,
    pub recommendations: u32,
}

impl Default for OverallAssessment {
    fn default() -> Self {
        Self {
            score: "65/100".to_string(),
            rating: "Needs Improvement".to_string(),
            summary: "The document covers basic security requirements but lacks several \
                      critical controls and detailed implementation guidance."
                .to_string(),
            critical_issues: 3,
            warnings: 7,
            recommendations: 12,
        }
    }
}

/// Deterministic assessment produced when no live model response is
/// available
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackAssessment {
    pub document_id: String,
    pub document_name: String,
    pub framework: String,
    pub analyzed_at: DateTime<Utc>,
    pub overall: OverallAssessment,
    pub critical_flags: Vec<CriticalFlag>,
    pub improvements: Vec<ImprovementSuggestion>,
    pub compliance_gaps: Vec<ComplianceGap>,
    pub risk_areas: Vec<RiskArea>,
}

/// Static knowledge for one framework
pub struct FrameworkKnowledge {
    pub critical_flags: Vec<CriticalFlag>,
    pub improvements: Vec<ImprovementSuggestion>,
    pub compliance_gaps: Vec<ComplianceGap>,
    pub risk_areas: Vec<RiskArea>,
}

lazy_static! {
    static ref ISO_27001: FrameworkKnowledge = iso27001_knowledge();
    static ref GDPR: FrameworkKnowledge = gdpr_knowledge();
    static ref HIPAA: FrameworkKnowledge = hipaa_knowledge();
    static ref GENERIC: FrameworkKnowledge = generic_knowledge();
}

/// Resolve the knowledge table for a framework. Unknown frameworks get
/// the generic table.
pub fn knowledge_for(framework: &ComplianceFramework) -> &'static FrameworkKnowledge {
    match framework {
        ComplianceFramework::Iso27001 => &ISO_27001,
        ComplianceFramework::Gdpr => &GDPR,
        ComplianceFramework::Hipaa => &HIPAA,
        ComplianceFramework::Other(_) => &GENERIC,
    }
}

/// Build the deterministic fallback assessment. The document id carries
/// a generation timestamp for traceability only; content selection
/// depends solely on the framework.
pub fn generate_fallback_assessment(
    document_name: &str,
    framework: &ComplianceFramework,
) -> FallbackAssessment {
    info!(
        "Generating fallback analysis for: {} ({})",
        document_name,
        framework.name()
    );

    let now = Utc::now();
    let knowledge = knowledge_for(framework);

    FallbackAssessment {
        document_id: format!("fallback-{}", now.timestamp_millis()),
        document_name: document_name.to_string(),
        framework: framework.name().to_string(),
        analyzed_at: now,
        overall: OverallAssessment::default(),
        critical_flags: knowledge.critical_flags.clone(),
        improvements: knowledge.improvements.clone(),
        compliance_gaps: knowledge.compliance_gaps.clone(),
        risk_areas: knowledge.risk_areas.clone(),
    }
}

fn flag(
    id: &str,
    severity: &str,
    title: &str,
    description: &str,
    location: &str,
    recommendation: &str,
    related_controls: &[&str],
) -> CriticalFlag {
    CriticalFlag {
        id: id.to_string(),
        severity: severity.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        recommendation: recommendation.to_string(),
        related_controls: related_controls.iter().map(|s| s.to_string()).collect(),
    }
}

fn improvement(
    id: &str,
    category: &str,
    title: &str,
    description: &str,
    benefit: &str,
    effort: &str,
    priority: u8,
) -> ImprovementSuggestion {
    ImprovementSuggestion {
        id: id.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        benefit: benefit.to_string(),
        effort: effort.to_string(),
        priority,
    }
}

fn gap(
    control_id: &str,
    control_name: &str,
    requirement: &str,
    current_state: &str,
    expected_state: &str,
    gap_description: &str,
    remediation_actions: &[&str],
) -> ComplianceGap {
    ComplianceGap {
        control_id: control_id.to_string(),
        control_name: control_name.to_string(),
        requirement: requirement.to_string(),
        current_state: current_state.to_string(),
        expected_state: expected_state.to_string(),
        gap_description: gap_description.to_string(),
        remediation_actions: remediation_actions.iter().map(|s| s.to_string()).collect(),
    }
}

fn risk(
    id: &str,
    risk_level: &str,
    title: &str,
    description: &str,
    potential_impact: &str,
    likelihood: &str,
    mitigations: &[&str],
) -> RiskArea {
    RiskArea {
        id: id.to_string(),
        risk_level: risk_level.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        potential_impact: potential_impact.to_string(),
        likelihood: likelihood.to_string(),
        mitigations: mitigations.iter().map(|s| s.to_string()).collect(),
    }
}

fn iso27001_knowledge() -> FrameworkKnowledge {
    FrameworkKnowledge {
        critical_flags: vec![
            flag(
                "CF-001",
                "HIGH",
                "Missing Encryption Policy",
                "Document lacks specific requirements for data encryption at rest and in transit.",
                "Section 5.2 - Data Protection",
                "Add detailed encryption requirements including approved algorithms (AES-256, TLS 1.3), key management procedures, and encryption scope.",
                &["A.8.24 - Use of Cryptography", "A.10.1 - Cryptographic Controls"],
            ),
            flag(
                "CF-002",
                "HIGH",
                "Incomplete Access Control Matrix",
                "Role-based access control definitions are vague and lack segregation of duties requirements.",
                "Section 3.4 - Access Management",
                "Define specific roles, permissions matrix, approval workflows, and regular access review procedures.",
                &["A.9.1 - Access Control Policy", "A.9.2 - User Access Management"],
            ),
            flag(
                "CF-003",
                "MEDIUM",
                "Insufficient Incident Response Procedures",
                "Incident response plan lacks clear escalation paths and specific timelines for different incident types.",
                "Section 6.1 - Incident Management",
                "Specify incident classification criteria, response timelines (15 min for critical, 1 hour for high), escalation matrix, and communication templates.",
                &["A.16.1 - Management of Information Security Incidents"],
            ),
        ],
        improvements: vec![
            improvement(
                "IMP-001",
                "Documentation",
                "Add Risk Assessment Matrix",
                "Include a standardized risk assessment matrix with likelihood and impact ratings (1-5 scale) and risk acceptance criteria.",
                "Enables consistent risk evaluation across the organization and supports audit evidence requirements.",
                "LOW",
                1,
            ),
            improvement(
                "IMP-002",
                "Training",
                "Enhance Security Awareness Training Requirements",
                "Specify mandatory annual training, phishing simulation frequency, and role-specific training for privileged users.",
                "Reduces human error, the leading cause of security incidents, and demonstrates due diligence.",
                "MEDIUM",
                2,
            ),
            improvement(
                "IMP-003",
                "Technical Controls",
                "Define Multi-Factor Authentication Requirements",
                "Mandate MFA for all remote access, privileged accounts, and sensitive system access.",
                "Significantly reduces risk of unauthorized access even if credentials are compromised.",
                "LOW",
                1,
            ),
        ],
        compliance_gaps: vec![
            gap(
                "A.8.8",
                "Management of Technical Vulnerabilities",
                "Technical vulnerabilities must be identified, evaluated, and appropriate measures taken.",
                "Policy mentions vulnerability scanning but lacks specific requirements.",
                "Automated vulnerability scanning weekly, patch management SLA (critical: 48hrs, high: 7 days), vulnerability disclosure process.",
                "Missing detailed vulnerability management procedures and timelines.",
                &[
                    "Implement automated vulnerability scanning tools",
                    "Define patch management SLAs by severity",
                    "Establish vulnerability disclosure and coordination process",
                    "Create exception and compensating control procedures",
                ],
            ),
            gap(
                "A.12.1",
                "Backup",
                "Backup copies of information and software should be taken and tested regularly.",
                "Document mentions backups but doesn't specify frequency, retention, or testing.",
                "Daily incremental backups, weekly full backups, 30-day retention, quarterly restore testing, encrypted backups stored offsite.",
                "Insufficient backup strategy details and no testing requirements.",
                &[
                    "Define backup frequency and retention periods",
                    "Specify backup encryption requirements",
                    "Mandate quarterly restore testing",
                    "Document offsite/cloud backup procedures",
                ],
            ),
        ],
        risk_areas: vec![
            risk(
                "RISK-001",
                "HIGH",
                "Third-Party Vendor Risk Management",
                "Policy lacks comprehensive third-party risk assessment and ongoing monitoring requirements.",
                "Security incidents from third-party vendors can expose sensitive data and disrupt operations.",
                "High - Many organizations rely heavily on third-party services",
                &[
                    "Implement vendor risk assessment questionnaire",
                    "Require SOC 2/ISO 27001 certifications for critical vendors",
                    "Establish vendor security requirements in contracts",
                    "Conduct annual vendor security reviews",
                ],
            ),
            risk(
                "RISK-002",
                "MEDIUM",
                "Cloud Security Configuration",
                "Insufficient guidance on cloud service security configurations and monitoring.",
                "Misconfigured cloud services are a leading cause of data breaches.",
                "Medium - Depends on cloud service usage",
                &[
                    "Define cloud security baseline configurations",
                    "Implement cloud security posture management (CSPM)",
                    "Enable cloud audit logging and monitoring",
                    "Establish cloud access governance procedures",
                ],
            ),
        ],
    }
}

fn gdpr_knowledge() -> FrameworkKnowledge {
    FrameworkKnowledge {
        critical_flags: vec![
            flag(
                "CF-001",
                "HIGH",
                "Missing Data Subject Rights Procedures",
                "Policy lacks detailed procedures for handling data subject access requests (DSAR) within 30-day requirement.",
                "Section 4 - Individual Rights",
                "Define DSAR intake process, identity verification steps, data collection procedures, response templates, and timeline tracking.",
                &["Article 15 - Right of Access", "Article 12 - Transparent Information"],
            ),
            flag(
                "CF-002",
                "HIGH",
                "Incomplete Data Breach Notification Process",
                "72-hour breach notification requirement not adequately addressed with specific workflows.",
                "Section 7 - Security & Breach",
                "Create breach classification criteria, notification decision tree, reporting templates for DPA and individuals, and 72-hour timeline management.",
                &["Article 33 - Breach Notification to Authority", "Article 34 - Communication to Data Subject"],
            ),
        ],
        improvements: vec![
            improvement(
                "IMP-001",
                "Documentation",
                "Enhance Record of Processing Activities (ROPA)",
                "Expand ROPA template to include all Article 30 requirements: processing purposes, data categories, recipients, transfers, retention periods.",
                "Demonstrates compliance and facilitates DPA audits.",
                "LOW",
                1,
            ),
            improvement(
                "IMP-002",
                "Privacy by Design",
                "Implement Data Protection Impact Assessment (DPIA) Framework",
                "Create DPIA template and triggers for high-risk processing activities.",
                "Identifies and mitigates privacy risks before processing begins.",
                "MEDIUM",
                2,
            ),
        ],
        compliance_gaps: vec![gap(
            "Art. 32",
            "Security of Processing",
            "Appropriate technical and organizational measures must ensure security appropriate to risk.",
            "General security requirements mentioned but lacks specific measures.",
            "Encryption, pseudonymization, access controls, security testing, incident response capabilities explicitly required.",
            "Insufficient detail on required security measures.",
            &[
                "Specify encryption requirements for personal data",
                "Define pseudonymization use cases and methods",
                "Detail access control implementation",
                "Establish security testing schedule",
            ],
        )],
        risk_areas: vec![risk(
            "RISK-001",
            "CRITICAL",
            "International Data Transfer Compliance",
            "Policy doesn't address data transfers outside EU/EEA and required safeguards.",
            "Illegal data transfers can result in DPA enforcement action and significant fines.",
            "High - Many organizations use global cloud services",
            &[
                "Identify all international data transfers",
                "Implement Standard Contractual Clauses (SCCs)",
                "Conduct Transfer Impact Assessments (TIAs)",
                "Document transfer mechanisms and safeguards",
            ],
        )],
    }
}

fn hipaa_knowledge() -> FrameworkKnowledge {
    FrameworkKnowledge {
        critical_flags: vec![
            flag(
                "CF-001",
                "HIGH",
                "Insufficient Business Associate Agreement Requirements",
                "BAA requirements not comprehensively defined per \u{a7}164.308(b).",
                "Section 5 - Third Party Management",
                "Specify all required BAA provisions: permitted uses, safeguard implementation, breach notification, termination conditions, and subcontractor requirements.",
                &["\u{a7}164.308(b)(1) - Business Associate Contracts", "\u{a7}164.314(a) - BAA Requirements"],
            ),
            flag(
                "CF-002",
                "HIGH",
                "Missing Minimum Necessary Standard Implementation",
                "Policy doesn't adequately address minimum necessary use and disclosure requirements.",
                "Section 3 - Access Controls",
                "Define role-based access aligned with minimum necessary principle, routine vs non-routine disclosures, and documentation requirements.",
                &["\u{a7}164.502(b) - Minimum Necessary", "\u{a7}164.514(d) - Minimum Necessary Determination"],
            ),
        ],
        improvements: vec![improvement(
            "IMP-001",
            "Training",
            "Enhance HIPAA Training Program",
            "Specify initial training within 30 days, annual refresher training, role-specific training for security officers.",
            "Demonstrates workforce awareness and reduces risk of inadvertent violations.",
            "LOW",
            1,
        )],
        compliance_gaps: vec![gap(
            "\u{a7}164.312(a)(2)(i)",
            "Unique User Identification",
            "Assign unique user ID for tracking identity and establishing accountability.",
            "Policy mentions user accounts but doesn't explicitly prohibit shared accounts.",
            "All users must have unique identifiers; shared accounts prohibited except in emergency documented circumstances.",
            "Insufficient detail on unique user identification requirements.",
            &[
                "Prohibit shared accounts explicitly",
                "Define emergency access procedures",
                "Establish audit logging tied to user IDs",
                "Create user provisioning/deprovisioning workflow",
            ],
        )],
        risk_areas: vec![risk(
            "RISK-001",
            "HIGH",
            "Mobile Device and BYOD Security",
            "Policy lacks comprehensive mobile device management and BYOD requirements.",
            "Lost or stolen devices with ePHI can result in reportable breaches.",
            "High - Healthcare workers increasingly use mobile devices",
            &[
                "Implement mobile device management (MDM) solution",
                "Require device encryption and remote wipe capability",
                "Define acceptable BYOD use cases and requirements",
                "Establish mobile device security baseline",
            ],
        )],
    }
}

fn generic_knowledge() -> FrameworkKnowledge {
    FrameworkKnowledge {
        critical_flags: vec![flag(
            "CF-001",
            "MEDIUM",
            "General Security Control Gaps",
            "Document could benefit from more specific security control requirements.",
            "Throughout document",
            "Add detailed security requirements aligned with your compliance framework.",
            &["General Security Controls"],
        )],
        improvements: vec![improvement(
            "IMP-001",
            "Documentation",
            "Enhance Policy Structure",
            "Consider adding more specific requirements and implementation guidance.",
            "Improves clarity and facilitates compliance.",
            "LOW",
            2,
        )],
        compliance_gaps: vec![gap(
            "GEN-001",
            "Security Controls",
            "Implement appropriate security controls",
            "General security requirements",
            "Specific security controls based on risk assessment",
            "Needs more specific requirements",
            &["Conduct risk assessment", "Define specific security controls"],
        )],
        risk_areas: vec![risk(
            "RISK-001",
            "MEDIUM",
            "Policy Implementation Risk",
            "Ensure policies are effectively implemented and monitored.",
            "Policies without implementation provide no actual security benefit.",
            "Medium",
            &["Create implementation plan", "Establish monitoring procedures"],
        )],
    }
}
