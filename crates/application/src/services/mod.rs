//! Application services
//!
//! Services orchestrate domain objects and ports to implement use cases.

pub mod silence_endpointer;
pub mod transcript_accumulator;
pub mod turn_controller;

pub use silence_endpointer::{DEFAULT_QUIET_INTERVAL, SilenceEndpointer};
pub use transcript_accumulator::TranscriptAccumulator;
pub use turn_controller::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_GREETING, DEFAULT_REARM_DELAY_MS, DEFAULT_SILENCE_TIMEOUT_MS,
    SessionSnapshot, TurnController, TurnControllerConfig, TurnControllerHandle,
    TurnControllerPorts,
};
