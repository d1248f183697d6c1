//! # Relay Logger
//!
//! A dual-sink Rust logger: severity-filtered lines go to a local sink, and
//! every record is forwarded to a remote HTTP collector by a single
//! background sender.
//!
//! ## Features
//!
//! - **Non-blocking remote delivery**: a bounded queue of 10 records absorbs
//!   bursts; the collector's latency never reaches the caller until it fills
//! - **Ordered, best-effort**: records reach the collector in the order they
//!   were logged; failed deliveries are reported once and dropped
//! - **Clean shutdown**: [`Log::shutdown`] drains the queue before returning
//! - **Syslog severities**: eight levels from `Emergency` to `Debug`

pub mod core;
pub mod macros;
pub mod sinks;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        LocalEntry, LocalSink, Log, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, NoopLogger, OverflowPolicy, Record, Result, Severity, Transport,
        DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::transports::HttpTransport;
}

pub use core::{
    LocalEntry, LocalSink, Log, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    NoopLogger, OverflowPolicy, Record, Result, Severity, Transport, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use transports::HttpTransport;
