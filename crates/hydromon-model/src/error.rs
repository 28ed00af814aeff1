//! Error types for model training, scoring, and persistence.

use thiserror::Error;

/// Anomaly-model operation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Training was attempted with fewer feature rows than a fit needs.
    #[error("insufficient training data: {rows} rows, need at least {required}")]
    InsufficientData {
        /// Feature rows actually available.
        rows: usize,
        /// Minimum rows required for a fit.
        required: usize,
    },

    /// A feature row did not match the fitted dimensionality.
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensions the model was fitted with.
        expected: usize,
        /// Dimensions of the offending row.
        actual: usize,
    },

    /// Model configuration failed validation.
    #[error("invalid model configuration: {0}")]
    Configuration(&'static str),

    /// Synthetic corpus distribution parameters were rejected.
    #[error("corpus distribution error: {0}")]
    Distribution(String),

    /// Snapshot I/O failure.
    #[error("model persistence error: {0}")]
    Persistence(String),

    /// Snapshot encode/decode failure.
    #[error("model snapshot format error: {0}")]
    Format(String),

    /// Snapshot written by a format this build does not understand.
    #[error("unsupported model snapshot version: {0}")]
    UnsupportedVersion(u32),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Format(err.to_string())
    }
}

impl From<rand_distr::NormalError> for ModelError {
    fn from(err: rand_distr::NormalError) -> Self {
        ModelError::Distribution(err.to_string())
    }
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_names_both_counts() {
        let err = ModelError::InsufficientData {
            rows: 3,
            required: 10,
        };
        let text = err.to_string();
        assert!(text.contains('3'));
        assert!(text.contains("10"));
    }

    #[test]
    fn io_errors_become_persistence_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err = ModelError::from(io);
        assert!(matches!(err, ModelError::Persistence(_)));
    }
}
