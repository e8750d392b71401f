//! Logging infrastructure
//!
//! Installs the `tracing` subscriber used by the binary.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
