// Tests for the speech output adapter using a recording engine.
// Each event is recorded so cancellation order can be checked.
#![allow(clippy::unwrap_used)]

use voice_greeter::models::{AppError, Utterance, VoiceParameters};
use voice_greeter::services::{SpeechEngine, SpeechOutput};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Cancel,
    Submit(String),
}

/// Fake engine that tracks which utterance would be audible.
#[derive(Default)]
struct RecordingEngine {
    available: bool,
    fail_submit: bool,
    events: Vec<Event>,
    audible: Option<Utterance>,
}

impl RecordingEngine {
    fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }
}

impl SpeechEngine for RecordingEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn cancel(&mut self) {
        self.events.push(Event::Cancel);
        self.audible = None;
    }

    fn submit(&mut self, utterance: &Utterance) -> Result<(), AppError> {
        if self.fail_submit {
            return Err(AppError::SpeechError("engine crashed".to_string()));
        }
        assert!(self.audible.is_none(), "Previous utterance must be cancelled first");
        self.events.push(Event::Submit(utterance.text.clone()));
        self.audible = Some(utterance.clone());
        Ok(())
    }
}

#[test]
fn test_second_call_wins() {
    let mut output = SpeechOutput::new(RecordingEngine::available(), "en-US");

    output.speak("first", VoiceParameters::default());
    output.speak("second", VoiceParameters::default());

    let engine = output.engine();
    assert_eq!(
        engine.events,
        vec![
            Event::Cancel,
            Event::Submit("first".to_string()),
            Event::Cancel,
            Event::Submit("second".to_string()),
        ]
    );
    assert_eq!(engine.audible.as_ref().unwrap().text, "second");
}

#[test]
fn test_repeat_of_same_text_restarts_it() {
    let mut output = SpeechOutput::new(RecordingEngine::available(), "en-US");

    output.speak("again", VoiceParameters::default());
    output.speak("again", VoiceParameters::default());

    let submits = output
        .engine()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Submit(_)))
        .count();
    let cancels = output
        .engine()
        .events
        .iter()
        .filter(|e| **e == Event::Cancel)
        .count();
    assert_eq!(submits, 2);
    assert_eq!(cancels, 2);
}

#[test]
fn test_utterance_carries_language_and_voice() {
    let mut output = SpeechOutput::new(RecordingEngine::available(), "en-US");

    output.speak("Hello", VoiceParameters::new(1.4, 0.7));

    let utterance = output.engine().audible.clone().unwrap();
    assert_eq!(utterance.language, "en-US");
    assert!((utterance.rate - 1.4).abs() < f32::EPSILON);
    assert!((utterance.pitch - 0.7).abs() < f32::EPSILON);
}

#[test]
fn test_out_of_range_parameters_are_accepted_unchanged() {
    let mut output = SpeechOutput::new(RecordingEngine::available(), "en-US");

    output.speak("Whoa", VoiceParameters::new(9.0, 0.0));

    let utterance = output.engine().audible.clone().unwrap();
    assert!((utterance.rate - 9.0).abs() < f32::EPSILON);
    assert!(utterance.pitch.abs() < f32::EPSILON);
}

#[test]
fn test_unavailable_engine_is_left_untouched() {
    let mut output = SpeechOutput::new(RecordingEngine::default(), "en-US");

    output.speak("Hello", VoiceParameters::default());

    assert!(output.engine().events.is_empty());
}

#[test]
fn test_failed_submit_is_not_reported() {
    let engine = RecordingEngine {
        available: true,
        fail_submit: true,
        ..RecordingEngine::default()
    };
    let mut output = SpeechOutput::new(engine, "en-US");

    output.speak("Hello", VoiceParameters::default());

    assert_eq!(output.engine().events, vec![Event::Cancel]);
    assert!(output.engine().audible.is_none());
}
