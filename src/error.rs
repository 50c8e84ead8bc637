//! Error types for fiar operations.
//!
//! Provides rich error context for library consumers. `FiarError` is the
//! single error surface callers see; validation, encoding, and model-state
//! failures are variants of it.

use std::fmt;

/// Main error type for fiar operations.
///
/// # Examples
///
/// ```
/// use fiar::error::FiarError;
///
/// let err = FiarError::Validation {
///     field: "age".to_string(),
///     message: "must be between 18 and 100".to_string(),
/// };
/// assert!(err.to_string().contains("age"));
/// ```
#[derive(Debug)]
pub enum FiarError {
    /// An applicant field is malformed or out of range. Raised before any
    /// feature encoding happens.
    Validation {
        /// Name of the offending field
        field: String,
        /// Constraint description
        message: String,
    },

    /// A categorical value is not known to the fitted encoder and no
    /// fallback mapping is configured.
    Encoding {
        /// The unrecognized value
        value: String,
        /// Known values at the time of the failure
        known: Vec<String>,
    },

    /// Prediction was attempted before a model was trained or loaded.
    /// Not retryable; train or load an artifact first.
    ModelNotReady,

    /// Model training failed (insufficient or malformed synthetic data).
    Training {
        /// Failure description
        message: String,
    },

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// I/O error (artifact file missing, permission denied, etc.).
    Io(std::io::Error),

    /// Artifact serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for FiarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiarError::Validation { field, message } => {
                write!(f, "Invalid applicant field: {field} {message}")
            }
            FiarError::Encoding { value, known } => {
                write!(
                    f,
                    "Unrecognized categorical value {value:?}, known values: {known:?}"
                )
            }
            FiarError::ModelNotReady => {
                write!(
                    f,
                    "Model not trained or loaded. Train or load an artifact before predicting"
                )
            }
            FiarError::Training { message } => write!(f, "Training failed: {message}"),
            FiarError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            FiarError::Io(e) => write!(f, "I/O error: {e}"),
            FiarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            FiarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FiarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FiarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FiarError {
    fn from(err: std::io::Error) -> Self {
        FiarError::Io(err)
    }
}

impl From<&str> for FiarError {
    fn from(msg: &str) -> Self {
        FiarError::Other(msg.to_string())
    }
}

impl From<String> for FiarError {
    fn from(msg: String) -> Self {
        FiarError::Other(msg)
    }
}

impl FiarError {
    /// Create a validation error for one applicant field.
    #[must_use]
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, FiarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = FiarError::validation("education_level", "must be between 1 and 5");
        let msg = err.to_string();
        assert!(msg.contains("education_level"));
        assert!(msg.contains("between 1 and 5"));
    }

    #[test]
    fn test_encoding_display() {
        let err = FiarError::Encoding {
            value: "ultra".to_string(),
            known: vec!["high".to_string(), "low".to_string(), "medium".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("ultra"));
        assert!(msg.contains("medium"));
    }

    #[test]
    fn test_model_not_ready_display() {
        let err = FiarError::ModelNotReady;
        assert!(err.to_string().contains("not trained or loaded"));
    }

    #[test]
    fn test_training_display() {
        let err = FiarError::Training {
            message: "zero samples".to_string(),
        };
        assert!(err.to_string().contains("Training failed"));
        assert!(err.to_string().contains("zero samples"));
    }

    #[test]
    fn test_from_str() {
        let err: FiarError = "test error".into();
        assert!(matches!(err, FiarError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no artifact");
        let err: FiarError = io_err.into();
        assert!(matches!(err, FiarError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no artifact");
        let err = FiarError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = FiarError::ModelNotReady;
        assert!(err.source().is_none());
    }
}
