//! Interactive greeting session.
//!
//! The session owns the widget state explicitly and hands it to the services
//! as plain input. Each input line is split with shell quoting rules and
//! parsed as a session command.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::models::{GreetingRequest, GreetingResult, GreetingStyle, VoiceParameters};
use crate::services::{
    GreetingResolver, PreferenceStore, SpeechEngine, SpeechOutput, SpeechRecognizer,
    deliver_greeting,
};

const PROMPT: &str = "> ";

/// Everything the presentation layer shows or edits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetState {
    pub name: String,
    pub style: GreetingStyle,
    pub voice: VoiceParameters,
    pub message: Option<GreetingResult>,
    pub dark_mode: bool,
}

impl WidgetState {
    #[must_use]
    pub fn request(&self) -> GreetingRequest {
        GreetingRequest::new(self.name.as_str(), self.style)
    }

    #[must_use]
    pub const fn theme_label(&self) -> &'static str {
        if self.dark_mode { "dark" } else { "light" }
    }
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Set the name to greet (empty clears it)
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Capture the name by voice
    Listen,
    /// Choose the greeting style, or list the styles
    Style { selector: Option<String> },
    /// Set the voice speed
    Rate {
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Set the voice pitch
    Pitch {
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Fetch a greeting and speak it
    Greet,
    /// Speak the current greeting again
    Repeat,
    /// Toggle between light and dark theme
    Theme,
    /// Show the current state
    Show,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<E: SpeechEngine> {
    state: WidgetState,
    resolver: GreetingResolver,
    speech: SpeechOutput<E>,
    recognizer: Box<dyn SpeechRecognizer>,
    preferences: PreferenceStore,
}

impl<E: SpeechEngine> Session<E> {
    /// Starts a session with the persisted theme.
    #[must_use]
    pub fn new(
        resolver: GreetingResolver,
        speech: SpeechOutput<E>,
        recognizer: Box<dyn SpeechRecognizer>,
        preferences: PreferenceStore,
    ) -> Self {
        let state = WidgetState {
            dark_mode: preferences.theme(),
            ..WidgetState::default()
        };
        Self {
            state,
            resolver,
            speech,
            recognizer,
            preferences,
        }
    }

    pub const fn state(&self) -> &WidgetState {
        &self.state
    }

    pub const fn speech(&self) -> &SpeechOutput<E> {
        &self.speech
    }

    /// Handles one input line.
    ///
    /// Unparseable lines print the parser's message and keep the session going.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub async fn respond<W: Write + Send>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let Some(words) = shlex::split(line) else {
            writeln!(out, "error: Invalid quoting")?;
            return Ok(Flow::Continue);
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        match SessionLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command, out).await,
            Err(e) => {
                write!(out, "{e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Routes a command to the services and renders the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub async fn execute<W: Write + Send>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing session command");
        match command {
            SessionCommand::Name { words } => {
                self.state.name = words.join(" ");
                writeln!(out, "Name: {}", self.state.name)?;
            }
            SessionCommand::Listen => self.listen(out).await?,
            SessionCommand::Style { selector: Some(selector) } => {
                self.state.style = GreetingStyle::from(selector.as_str());
                writeln!(out, "Style: {}", self.state.style)?;
            }
            SessionCommand::Style { selector: None } => {
                for style in GreetingStyle::ALL {
                    let marker = if style == self.state.style { '*' } else { ' ' };
                    writeln!(out, "{marker} {style}")?;
                }
            }
            SessionCommand::Rate { value } => {
                self.state.voice = VoiceParameters::bounded(value, self.state.voice.pitch);
                self.render_voice(out)?;
            }
            SessionCommand::Pitch { value } => {
                self.state.voice = VoiceParameters::bounded(self.state.voice.rate, value);
                self.render_voice(out)?;
            }
            SessionCommand::Greet => {
                let result = deliver_greeting(
                    &self.resolver,
                    &mut self.speech,
                    &self.state.request(),
                    self.state.voice,
                )
                .await;
                writeln!(out, "{}", result.text)?;
                self.state.message = Some(result);
            }
            SessionCommand::Repeat => match &self.state.message {
                Some(message) => self.speech.speak(&message.text, self.state.voice),
                None => writeln!(out, "Nothing to repeat yet")?,
            },
            SessionCommand::Theme => {
                self.state.dark_mode = !self.state.dark_mode;
                if let Err(e) = self.preferences.set_theme(self.state.dark_mode) {
                    warn!(error = %e, "Theme change not persisted");
                }
                writeln!(out, "Theme: {}", self.state.theme_label())?;
            }
            SessionCommand::Show => self.render_state(out)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn listen<W: Write + Send>(&mut self, out: &mut W) -> Result<()> {
        if !self.recognizer.is_available() {
            debug!("Speech recognition unavailable");
            return Ok(());
        }
        match self.recognizer.listen().await {
            Ok(Some(transcript)) => {
                info!("Captured name by voice");
                self.state.name = transcript;
                writeln!(out, "Name: {}", self.state.name)?;
            }
            Ok(None) => debug!("Listen session ended without a transcript"),
            Err(e) => warn!(error = %e, "Voice capture failed"),
        }
        Ok(())
    }

    fn render_voice<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Voice: rate {:.1}, pitch {:.1}",
            self.state.voice.rate, self.state.voice.pitch
        )?;
        Ok(())
    }

    fn render_state<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Name: {}", self.state.name)?;
        writeln!(out, "Style: {}", self.state.style)?;
        self.render_voice(out)?;
        writeln!(out, "Theme: {}", self.state.theme_label())?;
        if let Some(message) = &self.state.message {
            writeln!(out, "Greeting: {}", message.text)?;
        }
        Ok(())
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run_session<E, R, W>(session: &mut Session<E>, input: R, out: &mut W) -> Result<()>
where
    E: SpeechEngine,
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    writeln!(out, "Greeting App")?;
    writeln!(out, "Enter or speak your name to get a personalized greeting!")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if session.respond(line.trim(), out).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
