use bitcoin::Txid;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Graph traversal, extraction and weight errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The tree builder could not produce a well-formed graph
    #[error("Tree construction failed: {0}")]
    Construction(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors raised while querying a transaction graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Identifier is not present in the graph
    #[error("Transaction not found in graph: {txid}")]
    NotFound { txid: Txid },

    /// Node lacks the data needed to compute its weight
    #[error("Invalid node {txid}: {reason}")]
    InvalidNode { txid: Txid, reason: String },

    /// A traversal visitor reported a failure
    #[error("Visitor failed at {txid}: {reason}")]
    VisitorFailure { txid: Txid, reason: String },
}

impl GraphError {
    pub fn invalid_node(txid: Txid, reason: impl Into<String>) -> Self {
        GraphError::InvalidNode {
            txid,
            reason: reason.into(),
        }
    }

    pub fn visitor_failure(txid: Txid, reason: impl Into<String>) -> Self {
        GraphError::VisitorFailure {
            txid,
            reason: reason.into(),
        }
    }
}

/// Errors reading cosigner metadata from a PSBT input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CosignerError {
    #[error("input carries no cosigner keys")]
    Missing,

    #[error("malformed cosigner key at position {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
