//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! interviewer engines in `ai_core` and the speech providers in `ai_speech`.
//! Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::AppConfig;
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
