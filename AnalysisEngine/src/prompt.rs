use crate::report::ComplianceFramework;

/// Render the audit analysis instruction for the model. The schema
/// here is the only wire contract the parser relies on, so the
/// instructions insist on bare JSON with no fences or preamble.
pub fn build_audit_prompt(document_text: &str, framework: &ComplianceFramework) -> String {
    format!(
        r#"You are an expert compliance auditor specializing in {framework}. Analyze the following document and provide audit findings in STRICT JSON format.

CRITICAL INSTRUCTIONS:
1. Return ONLY valid JSON - no markdown, no explanations, no preamble
2. Each finding must be a complete, actionable item
3. Do NOT split findings into fragments

Required JSON structure:
{{
  "findings": [
    {{
      "title": "Clear, concise finding title (50 chars max)",
      "description": "Detailed description of the gap or issue",
      "severity": "CRITICAL|HIGH|MEDIUM|LOW",
      "impactScore": 1-10,
      "evidence": "Specific evidence from the document",
      "affectedControls": ["Control A.1", "Control A.2"],
      "remediationSteps": [
        "Step 1: Specific action",
        "Step 2: Next action"
      ],
      "recommendedTimeline": "Timeline for remediation",
      "bestPractices": "Industry best practices"
    }}
  ],
  "executiveSummary": "Brief summary of findings"
}}

Document to analyze:
{document_text}

Framework: {framework}

Return ONLY the JSON object. No additional text."#,
        framework = framework.name(),
        document_text = document_text,
    )
}

/// Render the free-text remediation guidance instruction for a single
/// finding.
pub fn build_remediation_prompt(finding_description: &str, document_context: &str) -> String {
    format!(
        r#"You are a compliance remediation expert. Provide detailed, actionable guidance for addressing this audit finding.

Finding:
{finding_description}

Document Context:
{document_context}

Provide:
1. Root cause analysis
2. Step-by-step remediation plan
3. Resource requirements
4. Timeline estimates
5. Success metrics
6. Best practices to prevent recurrence

Be specific and actionable."#,
    )
}
