//! Error types for the ingestion library.

use thiserror::Error;

/// Main error type for load and report operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upload targeted a table the registry does not know.
    #[error("Unknown table name: {0}")]
    UnknownTable(String),

    /// Every row in the upload failed validation (or the file was empty).
    #[error("No valid data to insert")]
    NoValidRows,

    /// Identifier failed validation before SQL generation.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// Statement execution or commit error
    #[error("Database error: {0}")]
    Database(#[from] mysql_async::Error),

    /// CSV parse error (malformed quoting, invalid UTF-8 in a record)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl ToString, context: impl Into<String>) -> Self {
        LoadError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Whether the failure was caused by the request content rather than a
    /// dependency. Client errors map to 400, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LoadError::UnknownTable(_) | LoadError::NoValidRows | LoadError::Csv(_)
        )
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for the server binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::Config(_) | LoadError::Yaml(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_error_carries_context() {
        let err = LoadError::pool("connection refused", "acquiring connection for upload");
        let msg = err.to_string();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("acquiring connection for upload"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(LoadError::UnknownTable("widgets".into()).is_client_error());
        assert!(LoadError::NoValidRows.is_client_error());
        assert!(!LoadError::pool("down", "ctx").is_client_error());
        assert!(!LoadError::Config("bad".into()).is_client_error());
    }

    #[test]
    fn test_config_errors_exit_with_usage_code() {
        assert_eq!(LoadError::Config("bad".into()).exit_code(), 2);
        assert_eq!(LoadError::NoValidRows.exit_code(), 1);
    }
}
