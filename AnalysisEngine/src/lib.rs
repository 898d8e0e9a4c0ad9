//! AI-assisted compliance document analysis pipeline.
//!
//! The pipeline builds an audit prompt, sends it through a model
//! gateway, leniently parses the nominally-JSON response, classifies
//! severities and aggregates findings into a report. When the gateway
//! is unreachable or its output unusable, a deterministic fallback
//! knowledge base produces the report instead; the pipeline never
//! fails to yield output except on empty input.

pub mod aggregator;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod report;
pub mod severity;
pub mod summary;

pub use aggregator::{aggregate, compliance_percentage, risk_summary};
pub use error::AnalysisError;
pub use fallback::{
    generate_fallback_assessment, knowledge_for, ComplianceGap, CriticalFlag, FallbackAssessment,
    ImprovementSuggestion, OverallAssessment, RiskArea,
};
pub use gateway::{GatewayConfig, GatewayError, HttpModelGateway, ModelGateway};
pub use orchestrator::{AnalysisOrchestrator, AnalysisState};
pub use parser::{parse_findings, RawFinding};
pub use prompt::{build_audit_prompt, build_remediation_prompt};
pub use report::{
    AuditFindingsReport, ComplianceFramework, Finding, RemediationStatus, RemediationStep,
};
pub use severity::{classify, Severity, SeverityDescriptor};
pub use summary::generate_executive_summary;

#[cfg(test)]
mod tests;
