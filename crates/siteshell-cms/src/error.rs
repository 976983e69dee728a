//! Content repository errors.

use siteshell_core::CoreError;
use thiserror::Error;

/// Result type for content repository operations.
pub type Result<T> = std::result::Result<T, CmsError>;

/// Errors raised while fetching or decoding content documents.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport failure or non-success response from the backend.
    #[error("fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested singleton document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document field was required but absent, or had the wrong shape.
    #[error("malformed {document} document: {message}")]
    Malformed { document: String, message: String },
}

impl CmsError {
    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            source: None,
        }
    }

    /// Create a fetch error with an underlying cause.
    pub fn fetch_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error for a document type.
    pub fn not_found(document: impl Into<String>) -> Self {
        Self::NotFound(document.into())
    }

    /// Create a malformed-field error.
    pub fn malformed(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            document: document.into(),
            message: message.into(),
        }
    }
}

impl From<CoreError> for CmsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Document { document, message } => Self::Malformed { document, message },
            other => Self::fetch_with_source("content error", other),
        }
    }
}
