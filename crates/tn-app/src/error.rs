//! Error types for the tn-app service layer.

use std::path::PathBuf;

use tn_check::Violation;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to load {what}: {message}")]
    Load { what: &'static str, message: String },

    #[error("Failed to write solution file: {path}")]
    SolutionWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] tn_graph::GraphError),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Solution is not feasible: {0}")]
    Infeasible(#[from] Violation),

    #[error("Tube not found: {0}")]
    TubeNotFound(String),

    #[error("City not found: {0}")]
    CityNotFound(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<tn_format::FormatError> for AppError {
    fn from(err: tn_format::FormatError) -> Self {
        AppError::Format(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
