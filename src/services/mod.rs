pub mod preferences;
pub mod recognition;
pub mod resolver;
pub mod speech;

pub use preferences::PreferenceStore;
pub use recognition::{CommandRecognizer, NoRecognizer, SpeechRecognizer};
pub use resolver::GreetingResolver;
pub use speech::{ProcessEngine, SpeechEngine, SpeechOutput, Synthesizer};

use crate::models::{GreetingRequest, GreetingResult, VoiceParameters};

/// Greeting resolution and delivery: resolve, speak, and hand the result
/// back for display.
pub async fn deliver_greeting<E: SpeechEngine>(
    resolver: &GreetingResolver,
    speech: &mut SpeechOutput<E>,
    request: &GreetingRequest,
    voice: VoiceParameters,
) -> GreetingResult {
    let result = resolver.resolve(request).await;
    speech.speak(&result.text, voice);
    result
}
