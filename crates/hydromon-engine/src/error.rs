//! Engine-level error aggregation.

use hydromon_model::ModelError;
use hydromon_types::ParseFaultTypeError;

/// Everything that can go wrong inside the engine.
///
/// Nothing here is fatal to the process: scoring failures degrade to
/// the threshold classifier, persistence failures to "no prior model",
/// and training failures leave the previous fit in place. The variants
/// exist so callers can tell those degradations apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Anomaly model failures: training, scoring, persistence.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Rejected fault name at the user-facing boundary.
    #[error(transparent)]
    InvalidFaultType(#[from] ParseFaultTypeError),
    /// Rejected engine configuration.
    #[error("invalid engine configuration: {0}")]
    Configuration(&'static str),
}

impl EngineError {
    /// Stable category name for logs and structured output.
    pub fn category(&self) -> &'static str {
        match self {
            EngineError::Model(ModelError::InsufficientData { .. }) => "insufficient_data",
            EngineError::Model(
                ModelError::Persistence(_)
                | ModelError::Format(_)
                | ModelError::UnsupportedVersion(_),
            ) => "persistence_failure",
            EngineError::Model(_) => "model_unavailable",
            EngineError::InvalidFaultType(_) => "invalid_fault_type",
            EngineError::Configuration(_) => "configuration",
        }
    }

    /// True when the engine keeps running usefully after this error.
    ///
    /// Only configuration errors require intervention; every other
    /// failure degrades to a deterministic fallback.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::Configuration(_))
    }
}
