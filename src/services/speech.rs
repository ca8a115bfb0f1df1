//! Speech output: cancel whatever is playing, then submit the new utterance.
//!
//! The adapter is fire-and-forget. It never waits for an utterance to finish
//! and never reports synthesis failures to its caller.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

use crate::models::{AppError, Utterance, VoiceParameters};
use crate::utils::find_on_path;

/// Language tag attached to every utterance unless configured otherwise
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Platform speech synthesis capability.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechEngine: Send {
    /// Whether the platform can synthesize speech at all.
    fn is_available(&self) -> bool;

    /// Stops any utterance currently queued or playing.
    fn cancel(&mut self);

    /// Enqueues an utterance without waiting for it to play.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses the utterance.
    fn submit(&mut self, utterance: &Utterance) -> Result<(), AppError>;
}

/// Speech Output Adapter.
pub struct SpeechOutput<E: SpeechEngine> {
    engine: E,
    language: String,
}

impl<E: SpeechEngine> SpeechOutput<E> {
    pub fn new(engine: E, language: impl Into<String>) -> Self {
        Self {
            engine,
            language: language.into(),
        }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Speaks `text`, replacing whatever is currently audible.
    ///
    /// A no-op when the engine is unavailable. Repeating the same text still
    /// cancels and restarts it. Voice parameters are passed through as given.
    pub fn speak(&mut self, text: &str, voice: VoiceParameters) {
        if !self.engine.is_available() {
            debug!("Speech synthesis unavailable, skipping utterance");
            return;
        }

        self.engine.cancel();

        let utterance = Utterance::new(text, self.language.as_str(), voice);
        if let Err(e) = self.engine.submit(&utterance) {
            warn!(error = %e, "Speech synthesis failed");
        }
    }
}

/// Synthesizer program driven by [`ProcessEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Synthesizer {
    /// `espeak-ng` (Linux)
    EspeakNg,
    /// `say` (macOS)
    Say,
    /// Speech disabled
    None,
}

impl Synthesizer {
    #[must_use]
    pub const fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Say
        } else {
            Self::EspeakNg
        }
    }

    #[must_use]
    pub const fn program(self) -> Option<&'static str> {
        match self {
            Self::EspeakNg => Some("espeak-ng"),
            Self::Say => Some("say"),
            Self::None => None,
        }
    }

    /// Command line arguments for one utterance.
    ///
    /// Rate 1.0 maps to 175 words per minute for both programs. `say` has
    /// no pitch or language flag. The text always follows `--` so a leading
    /// dash is spoken instead of parsed as an option.
    #[must_use]
    pub fn args(self, utterance: &Utterance) -> Vec<String> {
        let words_per_minute = words_per_minute(utterance.rate);
        match self {
            Self::EspeakNg => vec![
                "-v".to_string(),
                utterance.language.to_ascii_lowercase(),
                "-s".to_string(),
                words_per_minute.to_string(),
                "-p".to_string(),
                espeak_pitch(utterance.pitch).to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
            Self::Say => vec![
                "-r".to_string(),
                words_per_minute.to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
            Self::None => Vec::new(),
        }
    }
}

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_ESPEAK_PITCH: f32 = 50.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate).round().max(1.0) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn espeak_pitch(pitch: f32) -> u32 {
    (BASE_ESPEAK_PITCH * pitch).round().clamp(0.0, 99.0) as u32
}

/// Speech engine that spawns one synthesizer process per utterance.
pub struct ProcessEngine {
    synthesizer: Synthesizer,
    program: Option<PathBuf>,
    current: Option<Child>,
}

impl ProcessEngine {
    /// Locates the synthesizer on `PATH`. A missing program leaves the
    /// engine unavailable rather than failing.
    #[must_use]
    pub fn new(synthesizer: Synthesizer) -> Self {
        let program = synthesizer.program().and_then(find_on_path);
        match (&program, synthesizer.program()) {
            (Some(path), _) => info!(program = %path.display(), "Speech synthesis enabled"),
            (None, Some(name)) => info!(program = name, "Synthesizer not found, speech disabled"),
            (None, None) => info!("Speech synthesis disabled"),
        }
        Self {
            synthesizer,
            program,
            current: None,
        }
    }

    #[must_use]
    pub const fn synthesizer(&self) -> Synthesizer {
        self.synthesizer
    }
}

impl SpeechEngine for ProcessEngine {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn cancel(&mut self) {
        let Some(mut child) = self.current.take() else {
            return;
        };
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        if let Err(e) = child.kill() {
            debug!(error = %e, "Failed to stop previous utterance");
        }
        if let Err(e) = child.wait() {
            debug!(error = %e, "Failed to reap cancelled utterance");
        }
        debug!("Cancelled previous utterance");
    }

    fn submit(&mut self, utterance: &Utterance) -> Result<(), AppError> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| AppError::SpeechError("No synthesizer available".to_string()))?;

        let child = Command::new(program)
            .args(self.synthesizer.args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::SpeechError(format!("Failed to start {}: {e}", program.display())))?;

        debug!(pid = child.id(), chars = utterance.text.chars().count(), "Submitted utterance");
        self.current = Some(child);
        Ok(())
    }
}
