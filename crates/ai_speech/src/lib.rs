//! AI Speech - Continuous recognition and speech output
//!
//! Provides traits and implementations for the two audio capabilities an
//! interview needs:
//! - `ContinuousRecognizer` - streams cumulative transcripts while active
//! - `SpeechOutput` - speaks a line and can be cut off
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `voice_selection` picks a voice from a catalog by explicit preference
//!
//! # Supported Providers
//!
//! - Console: typed lines stand in for the microphone, printed lines for
//!   the speaker
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{ConsoleSpeaker, SpeechConfig, SpeechOutput};
//!
//! let config = SpeechConfig::default();
//! let speaker = ConsoleSpeaker::stdout(config.voices.clone());
//! speaker.speak("Tell me about yourself.", &config.utterance_settings(None)).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;
pub mod voice_selection;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{ContinuousRecognizer, SpeechOutput};
pub use providers::{ConsoleRecognizer, ConsoleSpeaker};
pub use types::{RecognitionUpdate, UtteranceSettings, VoiceGender, VoiceInfo};
pub use voice_selection::{VoicePreference, score_voice, select_voice};
