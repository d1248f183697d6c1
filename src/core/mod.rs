//! Core logger types and traits

pub mod config;
pub mod error;
pub mod local_entry;
pub mod local_sink;
pub mod log;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod record;
pub mod sender;
pub mod severity;
pub mod transport;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use local_entry::LocalEntry;
pub use local_sink::LocalSink;
pub use log::{Log, NoopLogger};
pub use logger::{Logger, LoggerBuilder, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use record::{Record, WireRecord};
pub use sender::{Diagnostics, SENDER_THREAD_NAME};
pub use severity::Severity;
pub use transport::Transport;
