use log::warn;
use serde_json::Value;

/// Partially-typed finding as extracted from the model response.
/// Every field has an explicit default so the aggregator never has to
/// touch raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFinding {
    pub title: String,
    pub description: String,
    pub severity: String,
    /// None when the upstream omitted the score or supplied something
    /// non-numeric; the classifier then applies the level default.
    pub impact_score: Option<u8>,
    pub evidence: String,
    pub affected_controls: Vec<String>,
    pub remediation_steps: Vec<String>,
    pub recommended_timeline: Option<String>,
    pub best_practices: String,
}

impl RawFinding {
    /// Single degraded finding carrying the unparseable response body.
    /// Returned instead of an error so malformed model output can
    /// never crash the pipeline.
    pub fn synthetic(raw_response: &str) -> Self {
        Self {
            title: "Analysis Complete".to_string(),
            description: raw_response.to_string(),
            severity: "MEDIUM".to_string(),
            impact_score: Some(5),
            evidence: String::new(),
            affected_controls: Vec::new(),
            remediation_steps: Vec::new(),
            recommended_timeline: None,
            best_practices: String::new(),
        }
    }
}

/// Parse a model response that is expected to be JSON but may be
/// fenced, truncated or plain prose. Total: always returns a result.
pub fn parse_findings(raw: &str) -> Vec<RawFinding> {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    let cleaned = cleaned.trim();

    let root: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!("Model response is not valid JSON ({}), degrading to synthetic finding", e);
            return vec![RawFinding::synthetic(raw)];
        }
    };

    let findings = match root.get("findings").and_then(Value::as_array) {
        Some(list) => list,
        None => {
            warn!("No findings array in model response, returning empty list");
            return Vec::new();
        }
    };

    findings.iter().map(extract_finding).collect()
}

fn extract_finding(node: &Value) -> RawFinding {
    let severity = text_field(node, "severity");
    RawFinding {
        title: text_field(node, "title"),
        description: text_field(node, "description"),
        severity: if severity.is_empty() {
            "MEDIUM".to_string()
        } else {
            severity
        },
        impact_score: node
            .get("impactScore")
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok()),
        evidence: text_field(node, "evidence"),
        affected_controls: array_field(node, "affectedControls"),
        remediation_steps: array_field(node, "remediationSteps"),
        recommended_timeline: {
            let timeline = text_field(node, "recommendedTimeline");
            if timeline.is_empty() {
                None
            } else {
                Some(timeline)
            }
        },
        best_practices: text_field(node, "bestPractices"),
    }
}

fn text_field(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn array_field(node: &Value, field: &str) -> Vec<String> {
    node.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
