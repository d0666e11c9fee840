use fabwatch_core::FabError;
use thiserror::Error;

/// Failures talking to the text-generation service.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("API key not found in ${0}")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("cannot decode reply: {0}")]
    Decode(String),
}

impl InsightError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey(_) | Self::Decode(_) => false,
        }
    }
}

impl From<InsightError> for FabError {
    fn from(e: InsightError) -> Self {
        FabError::Insight(e.to_string())
    }
}
