use analysis_engine::{AnalysisError, GatewayError};
use thiserror::Error;

pub mod analyze;
pub mod fallback;
pub mod frameworks;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] GatewayError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

pub type CommandResult<T> = Result<T, CommandError>;
