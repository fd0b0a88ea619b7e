//! Error types for the Daytrip application.

use crate::completion::CompletionError;
use crate::itinerary::ParseError;
use thiserror::Error;

/// A shared error type for the Daytrip workspace.
///
/// Collaborator-specific errors ([`ParseError`], [`CompletionError`]) keep
/// their own enums and convert into this one via `From` at layer boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaytripError {
    /// The submitted preference was empty after trimming.
    #[error("Please enter some preferences to get recommendations.")]
    EmptyPreference,

    /// No API key is available for the session.
    #[error("Please enter your API key to proceed.")]
    MissingCredential,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template rendering error (prompt or page)
    #[error("Template error: {0}")]
    Template(String),

    /// The completion provider call failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The completion could not be decomposed into an itinerary.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl DaytripError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// True for the two input problems that are shown as warnings, not errors.
    pub fn is_user_warning(&self) -> bool {
        matches!(self, Self::EmptyPreference | Self::MissingCredential)
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<std::io::Error> for DaytripError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DaytripError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DaytripError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DaytripError>`.
pub type Result<T> = std::result::Result<T, DaytripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: DaytripError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        match err {
            DaytripError::Io { message } => {
                assert!(message.contains("missing"));
                assert!(message.contains("NotFound"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_converts_transparently() {
        let err: DaytripError = ParseError::malformed("Itinerary 2:").into();
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "Malformed completion: anchor 'Itinerary 2:' not found"
        );
    }

    #[test]
    fn test_user_warnings() {
        assert!(DaytripError::EmptyPreference.is_user_warning());
        assert!(DaytripError::MissingCredential.is_user_warning());
        assert!(!DaytripError::config("bad").is_user_warning());
    }
}
