//! Speech capability provider implementations
//!
//! Contains concrete implementations of the `ContinuousRecognizer` and
//! `SpeechOutput` traits.

pub mod console_recognizer;
pub mod console_speaker;

pub use console_recognizer::ConsoleRecognizer;
pub use console_speaker::{ConsoleSpeaker, WORDS_PER_MINUTE, speaking_time};
