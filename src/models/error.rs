//! Custom error types for the voice greeter.
//!
//! Every failure in this crate is recoverable: the resolver falls back to a
//! local template, the speech adapter swallows engine failures, and the
//! preference store reads missing state as "light". These variants exist so
//! the recovery sites can log a precise cause.

use std::fmt;

/// Custom error type for the application.
#[derive(Debug)]
pub enum AppError {
    /// The remote greeting endpoint could not produce a usable message
    RemoteGreetingError(String),
    /// The platform speech synthesizer rejected an utterance
    SpeechError(String),
    /// Voice capture failed or timed out
    RecognitionError(String),
    /// Reading or writing the preference file failed
    PreferenceError(String),
    /// Invalid startup configuration
    ConfigError(String),
    /// Generic error for other cases
    GenericError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteGreetingError(msg) => write!(f, "Remote greeting unavailable: {msg}"),
            Self::SpeechError(msg) => write!(f, "Speech synthesis error: {msg}"),
            Self::RecognitionError(msg) => write!(f, "Speech recognition error: {msg}"),
            Self::PreferenceError(msg) => write!(f, "Preference store error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::GenericError(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::GenericError(format!("{error:#}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::RemoteGreetingError(error.to_string())
    }
}

impl From<confy::ConfyError> for AppError {
    fn from(error: confy::ConfyError) -> Self {
        Self::PreferenceError(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::GenericError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_error_class() {
        let err = AppError::RemoteGreetingError("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Remote greeting unavailable: HTTP 500");

        let err = AppError::GenericError("plain".to_string());
        assert_eq!(err.to_string(), "plain");
    }

    #[test]
    fn test_from_anyhow_keeps_context_chain() {
        let source = anyhow::anyhow!("root cause").context("outer");
        let err = AppError::from(source);
        assert_eq!(err.to_string(), "outer: root cause");
    }
}
