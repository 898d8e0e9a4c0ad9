use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical severity levels for audit findings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Parse a severity label, case-insensitive. Anything unrecognized
    /// maps to Medium so a noisy upstream can never produce an
    /// unclassified finding.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    pub fn default_impact_score(&self) -> u8 {
        match self {
            Severity::Critical => 9,
            Severity::High => 7,
            Severity::Medium => 5,
            Severity::Low => 3,
        }
    }

    pub fn remediation_timeframe(&self) -> &'static str {
        match self {
            Severity::Critical => "24 hours",
            Severity::High => "7 days",
            Severity::Medium => "30 days",
            Severity::Low => "90 days",
        }
    }

    pub fn business_impact(&self) -> &'static str {
        match self {
            Severity::Critical => "Severe - Immediate business risk",
            Severity::High => "High - Significant risk",
            Severity::Medium => "Moderate - Requires attention",
            Severity::Low => "Low - Improvement opportunity",
        }
    }

    pub fn technical_impact(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical system vulnerability",
            Severity::High => "Major security concern",
            Severity::Medium => "Notable security gap",
            Severity::Low => "Minor enhancement needed",
        }
    }

    /// Display color. This is a compatibility contract with UI
    /// consumers and must not drift per-call.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Critical => "#DC2626",
            Severity::High => "#F59E0B",
            Severity::Medium => "#3B82F6",
            Severity::Low => "#10B981",
        }
    }

    pub fn descriptor(&self) -> SeverityDescriptor {
        SeverityDescriptor {
            level: *self,
            default_impact_score: self.default_impact_score(),
            remediation_timeframe: self.remediation_timeframe().to_string(),
            business_impact: self.business_impact().to_string(),
            technical_impact: self.technical_impact().to_string(),
            color: self.color().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully-resolved severity record attached to each finding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityDescriptor {
    pub level: Severity,
    pub default_impact_score: u8,
    pub remediation_timeframe: String,
    pub business_impact: String,
    pub technical_impact: String,
    pub color: String,
}

/// Resolve a raw severity label and an optional upstream impact score
/// into a descriptor plus the effective impact score. The upstream
/// value is carried as-is when present; the level default applies only
/// when it is absent.
pub fn classify(label: &str, impact_score: Option<u8>) -> (SeverityDescriptor, u8) {
    let level = Severity::parse(label);
    let effective = impact_score.unwrap_or_else(|| level.default_impact_score());
    (level.descriptor(), effective)
}
