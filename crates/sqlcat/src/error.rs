//! Error types for sqlcat

use thiserror::Error;

/// Result type alias for sqlcat operations
pub type SqlcatResult<T> = Result<T, SqlcatError>;

/// Errors raised at the fallible edges of sqlcat.
///
/// Building and rendering a statement never fails; only loading query
/// templates and converting their argument values can.
#[derive(Debug, Error)]
pub enum SqlcatError {
    /// Query template could not be parsed
    #[error("Template error: {0}")]
    Template(String),

    /// Argument value has no parameter mapping
    #[error("Unsupported value in condition '{condition}': {message}")]
    Value { condition: String, message: String },

    /// I/O error while reading a template
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqlcatError {
    /// Create a value error for a specific condition fragment
    pub fn value(condition: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Value {
            condition: condition.into(),
            message: message.into(),
        }
    }

    /// Check if this is a template parse error
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }
}

impl From<toml::de::Error> for SqlcatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Template(err.to_string())
    }
}
