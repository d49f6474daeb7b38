//! Error types for sortviz.
//!
//! The engine itself cannot fail: every algorithm completes for any input.
//! Errors come from the ambient layers (configuration, trace files, CLI) and
//! from trace guard checks, which report logic defects instead of panicking.

use thiserror::Error;

/// Result type alias for sortviz operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortviz operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Invariant Violations =====
    /// A trace broke one of the engine postconditions.
    #[error("Invariant violation at step {step:?}: {message}")]
    InvariantViolation {
        /// Index of the offending step, if the violation is step-local.
        step: Option<usize>,
        /// Description of the violated invariant.
        message: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Algorithm name not present in the registry.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    // ===== Playback Errors =====
    /// Operation refused while a trace is being played.
    #[error("Playback busy: cannot {0} while running")]
    Busy(&'static str),

    /// Operation needs a computed trace.
    #[error("No trace available: start playback first")]
    NoTrace,

    /// Seek target beyond the end of the trace.
    #[error("Seek target {target} out of range (trace has {len} steps)")]
    SeekOutOfRange {
        /// Requested cursor position.
        target: usize,
        /// Number of steps in the trace.
        len: usize,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SortError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invariant violation, optionally tied to a step index.
    #[must_use]
    pub fn invariant(step: Option<usize>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            step,
            message: message.into(),
        }
    }

    /// Check if this error reports a logic defect rather than bad input.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_detection() {
        let err = SortError::invariant(Some(3), "index 9 out of range");
        assert!(err.is_invariant_violation());

        let config = SortError::config("invalid");
        assert!(!config.is_invariant_violation());
    }

    #[test]
    fn test_error_invariant_display() {
        let err = SortError::invariant(Some(7), "snapshot length 3, expected 4");
        let msg = err.to_string();
        assert!(msg.contains("Invariant violation"));
        assert!(msg.contains("Some(7)"));
        assert!(msg.contains("snapshot length"));
    }

    #[test]
    fn test_error_config() {
        let err = SortError::config("invalid parameter");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("invalid parameter"));
    }

    #[test]
    fn test_error_serialization() {
        let err = SortError::serialization("failed to serialize");
        assert!(!err.is_invariant_violation());
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_unknown_algorithm() {
        let err = SortError::UnknownAlgorithm("bogo".to_string());
        assert_eq!(err.to_string(), "Unknown algorithm 'bogo'");
    }

    #[test]
    fn test_error_busy() {
        let err = SortError::Busy("change algorithm");
        assert!(err.to_string().contains("cannot change algorithm while running"));
    }

    #[test]
    fn test_error_seek_out_of_range() {
        let err = SortError::SeekOutOfRange { target: 12, len: 10 };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("10 steps"));
    }

    #[test]
    fn test_error_from_io() {
        let err: SortError = std::io::Error::other("disk gone").into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json");
        let err: SortError = match json_err {
            Err(e) => e.into(),
            Ok(_) => return,
        };
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_debug() {
        let err = SortError::NoTrace;
        let debug = format!("{err:?}");
        assert!(debug.contains("NoTrace"));
    }
}
