//! # Ghostline Common
//!
//! Pieces shared by every ghostline crate:
//!
//! - **Status reporting**: the push interface the completion pipeline uses to
//!   publish backend status and cache hit/miss counters ([`StatusSink`]).
//! - **Logging**: one-call `tracing` subscriber setup for binaries ([`logging`]).

pub mod logging;
pub mod status;

pub use logging::{init_logging, parse_level, LoggingError};
pub use status::{
    NoopStatusSink, StatusBoard, StatusSink, TracingStatusSink, STATUS_OK, STATUS_UNREACHABLE,
    STATUS_WAITING,
};
