use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;
use commands::{analyze, fallback, frameworks};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gateway configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a compliance document against a framework
    Analyze {
        /// Document to analyze
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
        /// Inline document text instead of a file
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Compliance framework, e.g. "ISO 27001", "GDPR", "HIPAA"
        #[arg(long, default_value = "ISO 27001")]
        framework: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the compliance frameworks with dedicated knowledge tables
    Frameworks,
    /// Show the offline assessment used when the model is unreachable
    Fallback {
        /// Compliance framework, e.g. "ISO 27001", "GDPR", "HIPAA"
        #[arg(long, default_value = "ISO 27001")]
        framework: String,
        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Analyze {
            file,
            text,
            framework,
            json,
        } => {
            analyze::run(
                file.as_deref(),
                text.as_deref(),
                framework,
                *json,
                cli.config.as_deref(),
            )
            .await
        }
        Commands::Frameworks => frameworks::run(),
        Commands::Fallback { framework, json } => fallback::run(framework, *json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// Example usage:
/*
$ audit-cli analyze --file policy.pdf.txt --framework "ISO 27001"
$ audit-cli --config gateway.json analyze --text "..." --framework GDPR --json
$ audit-cli fallback --framework HIPAA
$ audit-cli frameworks
*/
