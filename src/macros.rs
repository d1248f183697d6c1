//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and pass the result to
//! the logger. They work with anything implementing [`Log`](crate::Log),
//! including references and smart pointers to a logger.
//!
//! # Examples
//!
//! ```
//! use relay_logger::prelude::*;
//! use relay_logger::{info, warning};
//!
//! let logger = Logger::builder().prefix("server").build().unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! warning!(logger, "Port {} is already bound, retrying", port);
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use relay_logger::prelude::*;
/// # let logger = NoopLogger;
/// use relay_logger::log_at;
/// log_at!(logger, Severity::Notice, "Simple message");
/// log_at!(logger, Severity::Critical, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        ($logger).log_at($level, format!($($arg)+))
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use relay_logger::prelude::*;
/// # let logger = NoopLogger;
/// use relay_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Notice, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use relay_logger::prelude::*;
/// # let logger = NoopLogger;
/// use relay_logger::err;
/// err!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! err {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Critical, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Emergency, $($arg)+)
    };
}
