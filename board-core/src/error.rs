//! Error types for board operations.
//!
//! The layout engine itself never fails; these cover the board state layer
//! and document loading.

use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur in board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Element not found on the board.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Document content is structurally invalid.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Document was written by a newer format version.
    #[error("Unsupported document version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::ElementNotFound("symbol_3".to_string());
        assert_eq!(err.to_string(), "Element not found: symbol_3");

        let err = BoardError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert!(err.to_string().contains("version 9"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<u32>("nope").expect_err("should fail");
        let err: BoardError = parse_err.into();
        assert!(matches!(err, BoardError::Serialization(_)));
    }
}
