use thiserror::Error;

use crate::gateway::GatewayError;

/// Pipeline errors surfaced to callers. Anything degradable is
/// recovered internally and never appears here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Document has no extractable text content")]
    EmptyDocument,

    #[error("Finding description is empty")]
    EmptyFinding,

    #[error("Model gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
