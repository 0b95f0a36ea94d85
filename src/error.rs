//! Error handling for the resume ranker

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from '{file}': {reason}")]
    Extraction { file: String, reason: String },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction of '{file}' exceeded the {timeout:?} time budget")]
    ExtractionTimeout { file: String, timeout: Duration },

    #[error("Vectorization error: {0}")]
    Vectorization(String),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;

impl RankerError {
    pub fn extraction(file: impl Into<String>, reason: impl ToString) -> Self {
        RankerError::Extraction {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures that only concern one document. The ranker skips
    /// the document and carries on with the rest of the batch.
    pub fn is_document_local(&self) -> bool {
        matches!(
            self,
            RankerError::Io(_)
                | RankerError::Extraction { .. }
                | RankerError::UnsupportedFormat(_)
                | RankerError::ExtractionTimeout { .. }
                | RankerError::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_local_classification() {
        assert!(RankerError::extraction("a.pdf", "bad xref").is_document_local());
        assert!(RankerError::UnsupportedFormat("doc".into()).is_document_local());
        assert!(RankerError::ExtractionTimeout { file: "a.pdf".into(), timeout: Duration::from_secs(5) }.is_document_local());
        assert!(!RankerError::Configuration("bad".into()).is_document_local());
        assert!(!RankerError::Vectorization("empty".into()).is_document_local());
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_budgets() {
        let err = RankerError::ExtractionTimeout {
            file: "cv.pdf".into(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "Extraction of 'cv.pdf' exceeded the 250ms time budget");
    }

    #[test]
    fn test_extraction_message() {
        let err = RankerError::extraction("cv.docx", "missing word/document.xml");
        assert_eq!(
            err.to_string(),
            "Failed to extract text from 'cv.docx': missing word/document.xml"
        );
    }
}
