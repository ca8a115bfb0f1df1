use serde::{Deserialize, Serialize};

/// Voice parameters passed to the speech adapter.
///
/// Nominal range for both fields is [`VoiceParameters::MIN`, `VoiceParameters::MAX`].
/// The adapter does not validate them; front ends bound their inputs with
/// [`VoiceParameters::bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceParameters {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceParameters {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl VoiceParameters {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 2.0;
    pub const STEP: f32 = 0.1;

    #[must_use]
    pub const fn new(rate: f32, pitch: f32) -> Self {
        Self { rate, pitch }
    }

    /// Builds parameters the way a slider would: clamped to the nominal
    /// range and snapped to the slider step.
    #[must_use]
    pub fn bounded(rate: f32, pitch: f32) -> Self {
        Self {
            rate: snap(rate),
            pitch: snap(pitch),
        }
    }

    #[must_use]
    pub fn in_range(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.rate) && (Self::MIN..=Self::MAX).contains(&self.pitch)
    }
}

fn snap(value: f32) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    let clamped = value.clamp(VoiceParameters::MIN, VoiceParameters::MAX);
    (clamped / VoiceParameters::STEP).round() * VoiceParameters::STEP
}

/// A single unit of synthesized speech submitted to a speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>, language: impl Into<String>, voice: VoiceParameters) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            rate: voice.rate,
            pitch: voice.pitch,
        }
    }
}
