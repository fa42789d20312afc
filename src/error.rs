//! Error handling for archsim
//!
//! Centralized error types using thiserror. All fallible paths in the
//! application use these for consistency.

#![allow(dead_code)] // Error variants and helpers are available for future use

use thiserror::Error;

/// Main error type for archsim
#[derive(Error, Debug)]
pub enum ArchSimError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input, config values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// State errors (invalid worker or session state)
    #[error("State error: {0}")]
    State(String),

    /// Phase state machine transition errors
    #[error("Phase transition error: {0}")]
    PhaseTransition(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for archsim operations
pub type Result<T> = std::result::Result<T, ArchSimError>;

// Convenient error constructors
impl ArchSimError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchSimError::config("invalid hostname");
        assert_eq!(err.to_string(), "Configuration error: invalid hostname");

        let err = ArchSimError::validation("speed must be non-negative");
        assert_eq!(
            err.to_string(),
            "Validation error: speed must be non-negative"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchSimError = io_err.into();
        assert!(matches!(err, ArchSimError::Io(_)));
    }

    #[test]
    fn test_transition_error_conversion() {
        use crate::phase::InstallPhase;
        use crate::session::PhaseTransitionError;

        let transition = PhaseTransitionError::FromTerminalPhase {
            from: InstallPhase::Complete,
        };
        let err: ArchSimError = transition.into();
        assert!(matches!(err, ArchSimError::PhaseTransition(_)));
    }
}
