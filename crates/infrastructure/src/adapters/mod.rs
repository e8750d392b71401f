//! Adapters implementing application ports

mod interviewer_adapter;
mod recognition_adapter;
mod session_bootstrap_adapter;
mod speech_player_adapter;

pub use interviewer_adapter::InterviewerAdapter;
pub use recognition_adapter::RecognitionAdapter;
pub use session_bootstrap_adapter::StaticSessionBootstrap;
pub use speech_player_adapter::SpeechPlayerAdapter;
