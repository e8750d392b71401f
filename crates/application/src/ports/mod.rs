//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod recognition_port;
mod response_generator_port;
mod session_bootstrap_port;
mod speech_player_port;

#[cfg(test)]
pub use recognition_port::MockRecognitionPort;
pub use recognition_port::{
    RecognitionErrorKind, RecognitionEvent, RecognitionPort, RecognitionSink,
};
#[cfg(test)]
pub use response_generator_port::MockResponseGeneratorPort;
pub use response_generator_port::{GenerationRequest, ResponseGeneratorPort};
#[cfg(test)]
pub use session_bootstrap_port::MockSessionBootstrapPort;
pub use session_bootstrap_port::SessionBootstrapPort;
#[cfg(test)]
pub use speech_player_port::MockSpeechPlayerPort;
pub use speech_player_port::SpeechPlayerPort;
