//! Startup configuration.
//!
//! Every option can be given as a flag or through a `GREETER_*` environment
//! variable. Values are read once at startup.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::http::ReqwestClient;
use crate::models::AppError;
use crate::services::resolver::DEFAULT_ENDPOINT;
use crate::services::speech::DEFAULT_LANGUAGE;
use crate::services::{
    CommandRecognizer, GreetingResolver, NoRecognizer, PreferenceStore, ProcessEngine,
    SpeechOutput, SpeechRecognizer, Synthesizer,
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LISTEN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Remote greeting endpoint
    #[arg(long, env = "GREETER_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Give up on the remote greeting after this many seconds
    #[arg(long, env = "GREETER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Language tag attached to every utterance
    #[arg(long, env = "GREETER_LANG", default_value = DEFAULT_LANGUAGE, global = true)]
    pub lang: String,

    /// Speech synthesizer (defaults to the platform's)
    #[arg(long, env = "GREETER_SYNTHESIZER", value_enum, global = true)]
    pub synthesizer: Option<Synthesizer>,

    /// Speech-to-text command printing one transcript to stdout
    #[arg(long, env = "GREETER_RECOGNIZER_CMD", global = true)]
    pub recognizer_cmd: Option<String>,

    /// Give up on voice capture after this many seconds
    #[arg(long, env = "GREETER_LISTEN_TIMEOUT_SECS", default_value_t = DEFAULT_LISTEN_TIMEOUT_SECS, global = true)]
    pub listen_timeout_secs: u64,

    /// Preference file (defaults to the platform config directory)
    #[arg(long, env = "GREETER_PREFERENCES", global = true)]
    pub preferences: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, env = "GREETER_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            lang: DEFAULT_LANGUAGE.to_string(),
            synthesizer: None,
            recognizer_cmd: None,
            listen_timeout_secs: DEFAULT_LISTEN_TIMEOUT_SECS,
            preferences: None,
            log_file: None,
        }
    }
}

impl Config {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs)
    }

    #[must_use]
    pub fn synthesizer(&self) -> Synthesizer {
        self.synthesizer.unwrap_or_else(Synthesizer::platform_default)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn resolver(&self) -> Result<GreetingResolver, AppError> {
        let client = ReqwestClient::with_timeout(self.request_timeout())?;
        Ok(GreetingResolver::new(Arc::new(client), self.endpoint.as_str()))
    }

    #[must_use]
    pub fn speech_output(&self) -> SpeechOutput<ProcessEngine> {
        SpeechOutput::new(ProcessEngine::new(self.synthesizer()), self.lang.as_str())
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if the recognizer command line is invalid.
    pub fn recognizer(&self) -> Result<Box<dyn SpeechRecognizer>, AppError> {
        match self.recognizer_cmd.as_deref() {
            Some(command_line) => Ok(Box::new(CommandRecognizer::from_command_line(
                command_line,
                self.listen_timeout(),
            )?)),
            None => Ok(Box::new(NoRecognizer)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if no preference path was given and the platform
    /// config directory cannot be determined.
    pub fn preference_store(&self) -> Result<PreferenceStore, AppError> {
        match &self.preferences {
            Some(path) => Ok(PreferenceStore::at(path)),
            None => PreferenceStore::default_location(),
        }
    }
}
