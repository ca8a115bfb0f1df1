//! Single-shot voice capture.
//!
//! A listen session yields at most one final transcript. There is no
//! start/stop pairing: `listen` returns once the capture ends.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::models::AppError;

/// Speech-to-text capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether voice capture is possible at all.
    fn is_available(&self) -> bool;

    /// Runs one listen session.
    ///
    /// Returns `Ok(None)` when the session ended without a transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if capture fails or times out.
    async fn listen(&self) -> Result<Option<String>, AppError>;
}

/// Recognizer that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRecognizer;

#[async_trait]
impl SpeechRecognizer for NoRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&self) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}

/// Recognizer backed by an external speech-to-text command.
///
/// The command is expected to listen once and print the transcript to stdout.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRecognizer {
    /// Parses a command line using shell quoting rules.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the command line is empty or badly quoted.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut words = shlex::split(command_line)
            .ok_or_else(|| AppError::ConfigError(format!("Invalid quoting in recognizer command: {command_line}")))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| AppError::ConfigError("Recognizer command is empty".to_string()))?;

        Ok(Self {
            program,
            args: words.collect(),
            timeout,
        })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    async fn listen(&self) -> Result<Option<String>, AppError> {
        info!(program = %self.program, "Listening...");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::RecognitionError(format!("Failed to start {}: {e}", self.program)))?;

        // dropping the future on timeout kills the child
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| AppError::RecognitionError(e.to_string()))?,
            Err(_) => {
                return Err(AppError::RecognitionError(format!(
                    "No transcript within {}s",
                    self.timeout.as_secs_f32()
                )));
            }
        };

        if !output.status.success() {
            return Err(AppError::RecognitionError(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        let transcript = final_transcript(&String::from_utf8_lossy(&output.stdout));
        debug!(captured = transcript.is_some(), "Listen session finished");
        Ok(transcript)
    }
}

/// Picks the first non-empty line of recognizer output.
fn final_transcript(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_transcript_first_non_empty_line() {
        assert_eq!(final_transcript("\n  Ada Lovelace \nnoise\n"), Some("Ada Lovelace".to_string()));
        assert_eq!(final_transcript("   \n\n"), None);
        assert_eq!(final_transcript(""), None);
    }

    #[test]
    fn test_from_command_line_splits_quoted_words() -> Result<(), AppError> {
        let recognizer =
            CommandRecognizer::from_command_line("stt --model 'base en' --once", Duration::from_secs(1))?;
        assert_eq!(recognizer.program, "stt");
        assert_eq!(recognizer.args, vec!["--model", "base en", "--once"]);
        Ok(())
    }

    #[test]
    fn test_from_command_line_rejects_empty_and_bad_quoting() {
        assert!(matches!(
            CommandRecognizer::from_command_line("   ", Duration::from_secs(1)),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            CommandRecognizer::from_command_line("stt 'unterminated", Duration::from_secs(1)),
            Err(AppError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_no_recognizer_captures_nothing() -> Result<(), AppError> {
        let recognizer = NoRecognizer;
        assert!(!recognizer.is_available());
        assert_eq!(recognizer.listen().await?, None);
        Ok(())
    }
}
