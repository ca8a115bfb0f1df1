use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::substitute_name;

/// Selectable greeting template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreetingStyle {
    #[default]
    Default,
    Funny,
    Motivational,
    Friendly,
}

impl GreetingStyle {
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::Funny,
        Self::Motivational,
        Self::Friendly,
    ];

    /// Resolves a style selector, falling back to `Default` when the
    /// selector is absent or unrecognized. Matching is exact.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("funny") => Self::Funny,
            Some("motivational") => Self::Motivational,
            Some("friendly") => Self::Friendly,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Funny => "funny",
            Self::Motivational => "motivational",
            Self::Friendly => "friendly",
        }
    }

    /// The template for this style, containing exactly one `{name}` placeholder.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Default => "Hello, {name}! Have an amazing day! 🎉",
            Self::Funny => "Hey {name}, you're awesome! Now go take over the world! 😆",
            Self::Motivational => "{name}, you're doing great! Keep pushing forward! 🚀",
            Self::Friendly => "Welcome, {name}! Stay awesome! 💖",
        }
    }

    #[must_use]
    pub fn render(self, name: &str) -> String {
        substitute_name(self.template(), name)
    }
}

impl From<&str> for GreetingStyle {
    fn from(selector: &str) -> Self {
        Self::from_selector(Some(selector))
    }
}

impl fmt::Display for GreetingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of one resolution: a possibly empty name plus a style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GreetingRequest {
    pub name: String,
    pub style: GreetingStyle,
}

impl GreetingRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, style: GreetingStyle) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }
}

/// Where a greeting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GreetingSource {
    Remote,
    Local,
}

/// Output of one resolution. Consumed by the speech adapter and the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingResult {
    pub text: String,
    pub source: GreetingSource,
}

impl GreetingResult {
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            source: GreetingSource::Remote,
        }
    }

    /// Builds the local fallback for a request from the template table.
    #[must_use]
    pub fn local(request: &GreetingRequest) -> Self {
        Self {
            text: request.style.render(&request.name),
            source: GreetingSource::Local,
        }
    }
}

// Success body of the remote greeting endpoint
#[derive(Debug, Deserialize)]
pub struct RemoteGreeting {
    pub message: String,
}
