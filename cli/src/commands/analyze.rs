use std::path::Path;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use prettytable::{Cell, Row, Table};

use analysis_engine::{
    AnalysisOrchestrator, AuditFindingsReport, ComplianceFramework, GatewayConfig,
    HttpModelGateway, Severity,
};

use super::{CommandError, CommandResult};

pub async fn run(
    file: Option<&Path>,
    text: Option<&str>,
    framework: &str,
    json: bool,
    config_path: Option<&Path>,
) -> CommandResult<()> {
    let (document_text, document_name) = match (file, text) {
        (Some(path), _) => {
            let contents = std::fs::read_to_string(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (contents, name)
        }
        (None, Some(text)) => (text.to_string(), "Pasted Text".to_string()),
        (None, None) => {
            return Err(CommandError::Usage(
                "Provide a document via --file or --text".to_string(),
            ))
        }
    };

    let framework = ComplianceFramework::parse(framework);
    info!(
        "Analyzing {} against {}",
        document_name,
        framework.name()
    );

    let config = match config_path {
        Some(path) => GatewayConfig::from_file(path)?,
        None => {
            let mut config = GatewayConfig::default();
            config.apply_env_overrides();
            config
        }
    };

    let gateway = HttpModelGateway::new(config)?;
    let orchestrator = AnalysisOrchestrator::new(Box::new(gateway));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {}...", document_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = orchestrator
        .analyze(&document_text, &framework, &document_name)
        .await;
    spinner.finish_and_clear();

    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &AuditFindingsReport) {
    println!(
        "\n{} {} ({})",
        "Compliance Report:".bold(),
        report.document_name,
        report.compliance_framework
    );
    if report.fallback.is_some() {
        println!(
            "{}",
            "Model unavailable, showing framework baseline assessment".yellow()
        );
    }
    println!(
        "Compliance score: {:.0}%  |  Findings: {} ({} high priority)",
        report.compliance_percentage, report.total_findings, report.total_high_priority
    );
    println!("{}\n", report.risk_summary);

    if !report.findings.is_empty() {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Severity").style_spec("Fb"),
            Cell::new("Finding").style_spec("Fb"),
            Cell::new("Timeline").style_spec("Fb"),
            Cell::new("Impact").style_spec("Fb"),
        ]));

        for finding in &report.findings {
            table.add_row(Row::new(vec![
                Cell::new(&severity_label(finding.severity.level)),
                Cell::new(&finding.title),
                Cell::new(&finding.recommended_timeline),
                Cell::new(&finding.impact_score.to_string()),
            ]));
        }

        table.printstd();
    }

    println!("\n{}", report.executive_summary);
}

fn severity_label(level: Severity) -> String {
    match level {
        Severity::Critical => level.as_str().red().bold().to_string(),
        Severity::High => level.as_str().yellow().to_string(),
        Severity::Medium => level.as_str().blue().to_string(),
        Severity::Low => level.as_str().green().to_string(),
    }
}
