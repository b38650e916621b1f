/// Error type for the bookmark-parser library
///
/// Store, input and validation failures each get their own variant so callers can
/// tell a rolled-back transaction from an unreadable file.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    /// Database-related errors (SQLite). Fatal to the current transaction.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (report and export files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bookmark document could not be read or decoded
    #[error("Cannot read bookmark document {path}: {reason}")]
    Input { path: String, reason: String },

    /// A stored row could not be read while validating
    #[error("Validation aborted, failed to read bookmark row: {0}")]
    ValidationScan(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using BookmarkError
pub type Result<T> = std::result::Result<T, BookmarkError>;

impl From<String> for BookmarkError {
    fn from(s: String) -> Self {
        BookmarkError::Other(s)
    }
}

impl From<&str> for BookmarkError {
    fn from(s: &str) -> Self {
        BookmarkError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for BookmarkError {
    fn from(err: serde_yaml::Error) -> Self {
        BookmarkError::Yaml(err.to_string())
    }
}

impl From<tl::ParseError> for BookmarkError {
    fn from(err: tl::ParseError) -> Self {
        BookmarkError::HtmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_message() {
        let err = BookmarkError::Input {
            path: "missing.html".to_string(),
            reason: "No such file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read bookmark document missing.html: No such file"
        );
    }

    #[test]
    fn test_from_str_is_other() {
        let err: BookmarkError = "boom".into();
        assert!(matches!(err, BookmarkError::Other(ref s) if s == "boom"));
    }

    #[test]
    fn test_database_error_conversion() {
        let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.to_string().starts_with("Database error"));
    }
}
