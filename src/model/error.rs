//! Error types for foldlog.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`DocumentError`] - Lifecycle and sink failures of a [`crate::document::Document`]
//!   - `Concluded` - a write was attempted after the document was concluded
//!   - `SinkOpen` - a sink could not be opened while building the document
//! - [`TransactionError`] - Failures while capturing or executing an HTTP transaction
//!
//! # Recovery Strategy
//!
//! `Concluded` is **non-fatal**: it is always handed back to the caller, who decides
//! whether to ignore it. Sink-open failures are fatal at construction time, there is no
//! degraded mode for a sink that could not be opened. Write failures on an already-open
//! sink are logged through `tracing` and never fail the entry.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two outputs of a document a sink feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// The HTML artifact.
    Html,
    /// The plain-text companion stream.
    Text,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Html => f.write_str("HTML"),
            SinkKind::Text => f.write_str("plain-text"),
        }
    }
}

/// Errors raised by a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An entry was written to a document that has already been concluded.
    ///
    /// Once concluded a document is read-only. Embedding a document in another one
    /// concludes it as a side effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldlog::model::error::DocumentError;
    ///
    /// let err = DocumentError::Concluded { title: "setup".to_string() };
    /// assert!(err.to_string().contains("setup"));
    /// ```
    #[error("Document \"{title}\" was already concluded; a concluded document can no longer be written to")]
    Concluded {
        /// Title of the concluded document.
        title: String,
    },

    /// A sink could not be opened while building the document.
    #[error("Failed to open {kind} sink at {path}: {source}")]
    SinkOpen {
        /// Which output the sink was meant for.
        kind: SinkKind,
        /// Path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// True for the `Concluded` variant.
    pub fn is_concluded(&self) -> bool {
        matches!(self, DocumentError::Concluded { .. })
    }
}

/// Errors raised while rendering or executing an HTTP transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The HTTP client failed to deliver the request or receive a response.
    #[error("HTTP transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reading a one-shot body into memory failed.
    #[error("Failed to buffer message body: {0}")]
    Body(#[from] std::io::Error),

    /// The request could not be turned into something the client can send.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The document refused the rendered entry.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl From<reqwest::Error> for TransactionError {
    fn from(err: reqwest::Error) -> Self {
        TransactionError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concluded_message_names_the_document() {
        let err = DocumentError::Concluded {
            title: "Nightly run".to_string(),
        };
        assert!(err.to_string().contains("\"Nightly run\""));
        assert!(err.is_concluded());
    }

    #[test]
    fn sink_open_exposes_io_source() {
        use std::error::Error as _;

        let err = DocumentError::SinkOpen {
            kind: SinkKind::Html,
            path: PathBuf::from("/nope/out.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_concluded());
        assert!(err.to_string().contains("HTML sink"));
        assert!(err.to_string().contains("/nope/out.html"));
        assert!(err.source().is_some());
    }

    #[test]
    fn document_error_converts_into_transaction_error() {
        let err: TransactionError = DocumentError::Concluded {
            title: "t".to_string(),
        }
        .into();
        assert!(matches!(err, TransactionError::Document(_)));
    }
}
