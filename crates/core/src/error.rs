use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum FabError {
    #[error("config error: {0}")]
    Config(String),

    #[error("insight error: {0}")]
    Insight(String),

    #[error("report error: {0}")]
    Report(String),
}

pub type Result<T, E = FabError> = std::result::Result<T, E>;
