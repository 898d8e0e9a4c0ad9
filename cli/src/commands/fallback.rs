use colored::*;
use prettytable::{Cell, Row, Table};

use analysis_engine::{generate_fallback_assessment, ComplianceFramework};

use super::CommandResult;

pub fn run(framework: &str, json: bool) -> CommandResult<()> {
    let framework = ComplianceFramework::parse(framework);
    let assessment = generate_fallback_assessment("Offline Preview", &framework);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!(
        "\n{} {}",
        "Baseline Assessment:".bold(),
        assessment.framework
    );
    println!(
        "Overall: {} ({})\n{}\n",
        assessment.overall.rating, assessment.overall.score, assessment.overall.summary
    );

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Type").style_spec("Fb"),
        Cell::new("Title").style_spec("Fb"),
        Cell::new("Detail").style_spec("Fb"),
    ]));

    for flag in &assessment.critical_flags {
        table.add_row(Row::new(vec![
            Cell::new(&"Critical Flag".red().to_string()),
            Cell::new(&flag.title),
            Cell::new(&flag.recommendation),
        ]));
    }
    for gap in &assessment.compliance_gaps {
        table.add_row(Row::new(vec![
            Cell::new(&"Gap".yellow().to_string()),
            Cell::new(&gap.control_name),
            Cell::new(&gap.gap_description),
        ]));
    }
    for risk in &assessment.risk_areas {
        table.add_row(Row::new(vec![
            Cell::new(&"Risk Area".yellow().to_string()),
            Cell::new(&risk.title),
            Cell::new(&risk.potential_impact),
        ]));
    }
    for improvement in &assessment.improvements {
        table.add_row(Row::new(vec![
            Cell::new(&"Improvement".blue().to_string()),
            Cell::new(&improvement.title),
            Cell::new(&improvement.benefit),
        ]));
    }

    table.printstd();
    Ok(())
}
