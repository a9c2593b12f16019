use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Status source unavailable: {reason}")]
    SourceUnavailable {
        reason: String,
        #[source]
        cause: Option<std::io::Error>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

impl ExporterError {
    /// Source failure without an underlying I/O cause (bad exit status, timeout, ...)
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
            cause: None,
        }
    }

    /// Source failure caused by an I/O error (spawn failure, unreadable file, ...)
    pub fn source_io(reason: impl Into<String>, cause: std::io::Error) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
            cause: Some(cause),
        }
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
