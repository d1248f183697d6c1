//! The logging capability shared by every logger implementation

use super::severity::Severity;
use std::error::Error;

/// Operations a dual-sink logger offers to call sites.
///
/// The per-severity methods all funnel into [`Log::log_at`]. The error
/// reporting methods are generic over the error type so the type name can be
/// recorded; this makes the trait unusable as `dyn Log`, so accept
/// `&impl Log` instead.
///
/// # Example
///
/// ```
/// use relay_logger::{Log, NoopLogger};
///
/// fn connect(logger: &impl Log) {
///     logger.info("connecting");
///     let err = std::io::Error::other("refused");
///     logger.report_error("db.Connect", &err);
/// }
///
/// connect(&NoopLogger);
/// ```
pub trait Log {
    /// Write `message` locally if `level` passes the threshold, and queue it
    /// for the remote collector if one is configured.
    #[track_caller]
    fn log_at(&self, level: Severity, message: String);

    /// Report `err` at [`Severity::Error`]. `origin` names where it happened.
    ///
    /// The recorded type is the static type of `E`. Pass the concrete error:
    /// a trait object (a `&dyn Error`, or `&*boxed` for a `Box<dyn Error>`)
    /// is recorded as `dyn core::error::Error`, not as the error inside it.
    /// The same applies to the fatal and critical reports.
    #[track_caller]
    fn report_error<E: Error + ?Sized>(&self, origin: &str, err: &E);

    /// Report `err` at [`Severity::Alert`], shut down, then panic with `err`
    /// as the panic payload.
    #[track_caller]
    fn report_error_fatal<E: Error + Send + 'static>(&self, origin: &str, err: E) -> !;

    /// Report `err` at [`Severity::Emergency`], shut down, then exit the
    /// process with status 1.
    #[track_caller]
    fn report_error_critical<E: Error + ?Sized>(&self, origin: &str, err: &E) -> !;

    /// Close the outbound queue and wait until everything queued so far has
    /// been handed to the transport.
    fn shutdown(&self);

    #[inline]
    #[track_caller]
    fn debug(&self, message: impl Into<String>) {
        self.log_at(Severity::Debug, message.into());
    }

    #[inline]
    #[track_caller]
    fn info(&self, message: impl Into<String>) {
        self.log_at(Severity::Info, message.into());
    }

    #[inline]
    #[track_caller]
    fn warning(&self, message: impl Into<String>) {
        self.log_at(Severity::Warning, message.into());
    }

    #[inline]
    #[track_caller]
    fn notice(&self, message: impl Into<String>) {
        self.log_at(Severity::Notice, message.into());
    }

    #[inline]
    #[track_caller]
    fn err(&self, message: impl Into<String>) {
        self.log_at(Severity::Error, message.into());
    }

    #[inline]
    #[track_caller]
    fn critical(&self, message: impl Into<String>) {
        self.log_at(Severity::Critical, message.into());
    }

    #[inline]
    #[track_caller]
    fn alert(&self, message: impl Into<String>) {
        self.log_at(Severity::Alert, message.into());
    }

    #[inline]
    #[track_caller]
    fn emergency(&self, message: impl Into<String>) {
        self.log_at(Severity::Emergency, message.into());
    }
}

/// Text written to the local sink for a reported error
pub(crate) fn error_line<E: Error + ?Sized>(origin: &str, err: &E) -> String {
    format!("{}:{}:{}", std::any::type_name::<E>(), origin, err)
}

/// A logger that discards everything.
///
/// The terminating operations still terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Log for NoopLogger {
    #[inline]
    fn log_at(&self, _level: Severity, _message: String) {}

    #[inline]
    fn report_error<E: Error + ?Sized>(&self, _origin: &str, _err: &E) {}

    fn report_error_fatal<E: Error + Send + 'static>(&self, _origin: &str, err: E) -> ! {
        std::panic::panic_any(err)
    }

    fn report_error_critical<E: Error + ?Sized>(&self, _origin: &str, _err: &E) -> ! {
        std::process::exit(1)
    }

    #[inline]
    fn shutdown(&self) {}
}
