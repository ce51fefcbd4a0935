use std::time::Duration;

use thiserror::Error;

use crate::session::Lane;

/// Input rejected locally, before any network activity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type '{content_type}': upload a PDF or Word document")]
    UnsupportedFileType { content_type: String },

    #[error("File is {size} bytes; the maximum is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Job description is empty")]
    EmptyJobDescription,

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),
}

/// Failure talking to the parsing/matching service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Backend did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The service answered successfully but the body is an `{"error": ...}` envelope.
    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

impl BackendError {
    /// True when the response arrived but could not be understood.
    pub fn is_malformed(&self) -> bool {
        matches!(self, BackendError::Malformed(_))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Malformed(e.to_string())
    }
}

/// Session-level error type returned by every controller operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No file selected")]
    NoFileSelected,

    #[error("No parsed resume available")]
    NoParsedResume,

    #[error("A {0} request is already in flight")]
    Busy(Lane),

    /// A newer file selection replaced the one this request was made for.
    #[error("The {0} request was superseded by a newer selection")]
    Superseded(Lane),

    #[error("Processing failed: {0}")]
    Processing(#[source] BackendError),

    #[error("Match analysis failed: {0}")]
    Match(#[source] BackendError),

    #[error("Sample job description failed: {0}")]
    SampleJobDescription(#[source] BackendError),
}

impl SessionError {
    /// The backend failure behind this error, if any.
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            SessionError::Processing(e)
            | SessionError::Match(e)
            | SessionError::SampleJobDescription(e) => Some(e),
            _ => None,
        }
    }
}
