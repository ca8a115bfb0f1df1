use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use tokio::io::BufReader;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{GreetingRequest, GreetingStyle, VoiceParameters};
use crate::services::{
    PreferenceStore, ProcessEngine, SpeechOutput, Synthesizer, deliver_greeting,
};
use crate::session::{Session, run_session};

#[derive(Parser, Debug)]
#[command(version, about = "Greets you by name, out loud")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve one greeting, speak it and print it
    Greet {
        /// Name to greet
        #[arg(long, default_value = "")]
        name: String,
        /// Greeting style: default, funny, motivational or friendly
        #[arg(long)]
        style: Option<String>,
        /// Voice speed
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        rate: f32,
        /// Voice pitch
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        pitch: f32,
        /// Capture the name by voice first
        #[arg(long)]
        listen: bool,
        /// Do not speak
        #[arg(long)]
        quiet: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the persisted theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// Interactive session (default)
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Dark,
    Light,
    Toggle,
}

/// Runs the parsed command line against stdin/stdout.
///
/// # Errors
///
/// Returns an error if a service cannot be built from the configuration or
/// if terminal I/O fails.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.config;
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Session) {
        Command::Greet {
            name,
            style,
            rate,
            pitch,
            listen,
            quiet,
            json,
        } => {
            let options = GreetOptions {
                request: GreetingRequest::new(name, GreetingStyle::from_selector(style.as_deref())),
                voice: VoiceParameters::bounded(rate, pitch),
                listen,
                quiet,
                json,
            };
            run_greet(&config, options, &mut stdout).await
        }
        Command::Theme { action } => {
            let store = config.preference_store()?;
            run_theme(&store, action, &mut stdout)
        }
        Command::Session => {
            let mut session = Session::new(
                config.resolver()?,
                config.speech_output(),
                config.recognizer()?,
                config.preference_store()?,
            );
            info!(endpoint = %config.endpoint, "Starting interactive session");
            let input = BufReader::new(tokio::io::stdin());
            run_session(&mut session, input, &mut stdout).await
        }
    }
}

pub struct GreetOptions {
    pub request: GreetingRequest,
    pub voice: VoiceParameters,
    pub listen: bool,
    pub quiet: bool,
    pub json: bool,
}

/// One-shot greeting delivery.
///
/// # Errors
///
/// Returns an error if a service cannot be built or output fails.
pub async fn run_greet<W: Write + Send>(config: &Config, options: GreetOptions, out: &mut W) -> Result<()> {
    let mut request = options.request;
    if options.listen {
        let recognizer = config.recognizer()?;
        if recognizer.is_available() {
            match recognizer.listen().await {
                Ok(Some(transcript)) => request.name = transcript,
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Voice capture failed, keeping typed name"),
            }
        }
    }

    let resolver = config.resolver()?;
    let synthesizer = if options.quiet {
        Synthesizer::None
    } else {
        config.synthesizer()
    };
    let mut speech = SpeechOutput::new(ProcessEngine::new(synthesizer), config.lang.as_str());

    let result = deliver_greeting(&resolver, &mut speech, &request, options.voice).await;
    if options.json {
        let rendered = serde_json::to_string(&result).context("Failed to serialize greeting")?;
        writeln!(out, "{rendered}")?;
    } else {
        writeln!(out, "{}", result.text)?;
    }
    Ok(())
}

/// Shows or changes the persisted theme, printing the resulting value.
///
/// # Errors
///
/// Returns an error if the preference file cannot be written.
pub fn run_theme<W: Write>(store: &PreferenceStore, action: ThemeAction, out: &mut W) -> Result<()> {
    let dark = match action {
        ThemeAction::Show => store.theme(),
        ThemeAction::Dark => {
            store.set_theme(true)?;
            true
        }
        ThemeAction::Light => {
            store.set_theme(false)?;
            false
        }
        ThemeAction::Toggle => store.toggle_theme()?,
    };
    writeln!(out, "{}", if dark { "dark" } else { "light" })?;
    Ok(())
}
