use thiserror::Error;

/// Top-level error type for the floor plan engine.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the corner/wall graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("corner not found: {0}")]
    CornerNotFound(String),

    #[error("wall not found: {0}")]
    WallNotFound(String),

    #[error("opening not found: {0}")]
    OpeningNotFound(String),
}

/// Errors related to floor plan operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
