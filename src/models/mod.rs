pub mod error;
pub mod greeting;
pub mod voice;

pub use error::AppError;
pub use greeting::*;
pub use voice::{Utterance, VoiceParameters};
