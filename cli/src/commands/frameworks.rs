use prettytable::{Cell, Row, Table};

use analysis_engine::{knowledge_for, ComplianceFramework, Severity};

use super::CommandResult;

pub fn run() -> CommandResult<()> {
    let named = [
        ComplianceFramework::Iso27001,
        ComplianceFramework::Gdpr,
        ComplianceFramework::Hipaa,
    ];

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Framework").style_spec("Fb"),
        Cell::new("Critical Flags").style_spec("Fb"),
        Cell::new("Improvements").style_spec("Fb"),
        Cell::new("Gaps").style_spec("Fb"),
        Cell::new("Risk Areas").style_spec("Fb"),
    ]));

    for framework in &named {
        let knowledge = knowledge_for(framework);
        table.add_row(Row::new(vec![
            Cell::new(framework.name()),
            Cell::new(&knowledge.critical_flags.len().to_string()),
            Cell::new(&knowledge.improvements.len().to_string()),
            Cell::new(&knowledge.compliance_gaps.len().to_string()),
            Cell::new(&knowledge.risk_areas.len().to_string()),
        ]));
    }

    table.printstd();
    println!("Any other framework name falls back to generic guidance.");

    println!("\nSeverity levels:");
    let mut severities = Table::new();
    severities.add_row(Row::new(vec![
        Cell::new("Severity").style_spec("Fb"),
        Cell::new("Default Impact").style_spec("Fb"),
        Cell::new("Remediation Window").style_spec("Fb"),
    ]));
    for level in Severity::ALL {
        severities.add_row(Row::new(vec![
            Cell::new(level.as_str()),
            Cell::new(&level.default_impact_score().to_string()),
            Cell::new(level.remediation_timeframe()),
        ]));
    }
    severities.printstd();
    Ok(())
}
