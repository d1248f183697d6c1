//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    local_entry::LocalEntry,
    local_sink::LocalSink,
    log::{error_line, Log},
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
    record::Record,
    sender::{Diagnostics, SenderWorker},
    severity::Severity,
    transport::Transport,
};
use crate::transports::HttpTransport;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default capacity of the outbound queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Default shutdown timeout used when the logger is dropped (5 seconds)
///
/// Explicit [`Log::shutdown`] waits without a limit; use
/// [`Logger::shutdown_timeout`] for a custom bound.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Handshake state owned by the logger while a sender thread is alive
struct Completion {
    done: Receiver<()>,
    handle: thread::JoinHandle<()>,
}

/// Dual-sink logger: a synchronous local sink plus an optional remote
/// collector fed by a single background sender.
pub struct Logger {
    prefix: String,
    threshold: RwLock<Severity>,
    local: Mutex<Box<dyn LocalSink>>,
    /// Producer side of the outbound queue; `None` once closed or when the
    /// remote sink is disabled.
    queue: RwLock<Option<Sender<Record>>>,
    completion: Mutex<Option<Completion>>,
    overflow_policy: OverflowPolicy,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger the simple way.
    ///
    /// An empty `endpoint` disables the remote sink. Local output goes to
    /// stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an http(s) URL or the sender
    /// thread cannot be spawned.
    pub fn new_endpoint(endpoint: &str, prefix: &str, threshold: Severity) -> Result<Self> {
        Self::builder()
            .endpoint(endpoint)
            .prefix(prefix)
            .threshold(threshold)
            .build()
    }

    /// Create a logger from a deserialized [`LoggerConfig`].
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.to_builder().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use relay_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .prefix("billing")
    ///     .threshold(Severity::Warning)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(!logger.is_remote_enabled());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The bracketed origin label, e.g. `[billing]`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn threshold(&self) -> Severity {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, threshold: Severity) {
        *self.threshold.write() = threshold;
    }

    /// True while records are still being forwarded to the collector
    pub fn is_remote_enabled(&self) -> bool {
        self.queue.read().is_some()
    }

    /// Number of records waiting in the outbound queue
    pub fn pending(&self) -> usize {
        self.queue.read().as_ref().map_or(0, Sender::len)
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use relay_logger::Logger;
    ///
    /// let logger = Logger::builder().build().unwrap();
    /// let metrics = logger.metrics();
    /// println!("Delivered: {}", metrics.delivered());
    /// println!("Failure rate: {:.2}%", metrics.failure_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.local.lock().flush()
    }

    fn write_local(&self, level: Severity, message: &str, location: &Location<'_>) {
        if !level.passes(self.threshold()) {
            return;
        }

        let entry = LocalEntry::new(level, &self.prefix, message)
            .with_location(location.file(), location.line());
        let mut sink = self.local.lock();
        if let Err(e) = sink.append(&entry) {
            eprintln!("[LOGGER ERROR] Local sink '{}' failed: {}", sink.name(), e);
        }
    }

    fn enqueue(&self, record: impl FnOnce() -> Record) {
        // The guard must be released before any blocking send, or a full
        // queue would stall shutdown on the write lock. The cloned handle
        // keeps the queue open until this send completes.
        let Some(queue) = self.queue.read().clone() else {
            return;
        };
        let record = record();

        let record = match queue.try_send(record) {
            Ok(()) => {
                self.metrics.record_enqueued();
                return;
            }
            Err(TrySendError::Full(record)) => record,
            Err(TrySendError::Disconnected(_)) => {
                self.alert_and_drop("sender thread is gone");
                return;
            }
        };

        match self.overflow_policy {
            OverflowPolicy::Block => {
                self.metrics.record_block();
                match queue.send(record) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                    }
                    Err(_) => self.alert_and_drop("sender thread is gone"),
                }
            }
            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match queue.send_timeout(record, timeout) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                    }
                    Err(SendTimeoutError::Timeout(_)) => {
                        self.alert_and_drop("queue full after waiting")
                    }
                    Err(SendTimeoutError::Disconnected(_)) => {
                        self.alert_and_drop("sender thread is gone")
                    }
                }
            }
            OverflowPolicy::DropNewest => self.alert_and_drop("queue full"),
        }
    }

    /// Drop a record with a warning on the first drop and every 1000th after
    fn alert_and_drop(&self, reason: &str) {
        let dropped_count = self.metrics.record_dropped_on_overflow();

        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] {}: {} remote log records dropped.",
                reason,
                dropped_count + 1
            );
        }
    }

    #[track_caller]
    fn report_error_at<E: Error + ?Sized>(&self, level: Severity, origin: &str, err: &E) {
        let location = Location::caller();
        self.write_local(level, &error_line(origin, err), location);
        self.enqueue(|| Record::error(level, std::any::type_name::<E>(), err.to_string()));
    }

    /// Run the shutdown protocol, giving up after `timeout`.
    ///
    /// Returns `true` if the sender drained the queue in time. On timeout the
    /// queue stays closed and a later call can wait again.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use relay_logger::prelude::*;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new_endpoint("http://127.0.0.1:8080/logs", "app", Severity::Info)?;
    /// logger.info("Important message");
    ///
    /// if !logger.shutdown_timeout(Duration::from_secs(10)) {
    ///     eprintln!("Warning: collector did not drain in time");
    /// }
    /// # Ok::<(), relay_logger::LoggerError>(())
    /// ```
    pub fn shutdown_timeout(&self, timeout: Duration) -> bool {
        self.close_and_wait(Some(timeout))
    }

    fn close_and_wait(&self, timeout: Option<Duration>) -> bool {
        // Dropping the stored producer handle closes the queue once any
        // in-flight sends finish; the sender keeps receiving until it is
        // empty.
        drop(self.queue.write().take());

        // Held for the whole wait so concurrent callers return only after
        // the drain is complete.
        let mut slot = self.completion.lock();
        let mut drained = true;

        if let Some(completion) = slot.take() {
            let signalled = match timeout {
                None => completion.done.recv().is_ok(),
                Some(timeout) => match completion.done.recv_timeout(timeout) {
                    Ok(()) => true,
                    Err(RecvTimeoutError::Timeout) => {
                        eprintln!(
                            "[LOGGER WARNING] Sender did not drain within {:?}. \
                             Some remote records may be lost.",
                            timeout
                        );
                        *slot = Some(completion);
                        return false;
                    }
                    Err(RecvTimeoutError::Disconnected) => false,
                },
            };

            if let Err(e) = completion.handle.join() {
                eprintln!("[LOGGER ERROR] Sender thread panicked during shutdown: {:?}", e);
            }
            drained = signalled;
        }

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            drained = false;
        }

        drained
    }
}

impl Log for Logger {
    #[track_caller]
    fn log_at(&self, level: Severity, message: String) {
        let location = Location::caller();
        self.write_local(level, &message, location);
        self.enqueue(move || Record::new(level, message));
    }

    #[track_caller]
    fn report_error<E: Error + ?Sized>(&self, origin: &str, err: &E) {
        self.report_error_at(Severity::Error, origin, err);
    }

    #[track_caller]
    fn report_error_fatal<E: Error + Send + 'static>(&self, origin: &str, err: E) -> ! {
        self.report_error_at(Severity::Alert, origin, &err);
        self.shutdown();
        std::panic::panic_any(err)
    }

    #[track_caller]
    fn report_error_critical<E: Error + ?Sized>(&self, origin: &str, err: &E) -> ! {
        self.report_error_at(Severity::Emergency, origin, err);
        self.shutdown();
        std::process::exit(1)
    }

    /// Safe to call more than once: later calls find the queue already
    /// closed and return immediately.
    fn shutdown(&self) {
        self.close_and_wait(None);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close_and_wait(Some(DEFAULT_SHUTDOWN_TIMEOUT));

        let failed = self.metrics.failed() + self.metrics.dropped_on_overflow();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} undelivered remote records \
                 (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use relay_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .prefix("api")
///     .threshold(Severity::Notice)
///     .local_sink(ConsoleSink::with_colors(false))
///     .queue_capacity(32)
///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    endpoint: String,
    prefix: String,
    threshold: Severity,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    request_timeout: Option<Duration>,
    local_sink: Option<Box<dyn LocalSink>>,
    transport: Option<Box<dyn Transport>>,
    diagnostics: Option<Diagnostics>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            endpoint: String::new(),
            prefix: String::new(),
            threshold: Severity::Info,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::Block,
            request_timeout: None,
            local_sink: None,
            transport: None,
            diagnostics: None,
        }
    }

    /// Collector URL; empty disables the remote sink
    #[must_use = "builder methods return a new value"]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Origin label, written as `[prefix]` locally and in every record
    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Least urgent severity still written to the local sink
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Deadline for each HTTP delivery attempt. Ignored with a custom
    /// transport.
    #[must_use = "builder methods return a new value"]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Replace the default stderr console sink
    #[must_use = "builder methods return a new value"]
    pub fn local_sink<S: LocalSink + 'static>(mut self, sink: S) -> Self {
        self.local_sink = Some(Box::new(sink));
        self
    }

    /// Deliver records through `transport` instead of HTTP.
    ///
    /// Enables the remote sink even without an endpoint.
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Where the sender reports failed deliveries (default: stderr)
    #[must_use = "builder methods return a new value"]
    pub fn diagnostics<W: std::io::Write + Send + 'static>(mut self, writer: W) -> Self {
        self.diagnostics = Some(Box::new(writer));
        self
    }

    fn remote_transport(&mut self) -> Result<Option<Box<dyn Transport>>> {
        if let Some(transport) = self.transport.take() {
            return Ok(Some(transport));
        }
        if self.endpoint.is_empty() {
            return Ok(None);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(LoggerError::config(
                "endpoint",
                format!("'{}' is not an http(s) URL", self.endpoint),
            ));
        }
        Ok(Some(Box::new(HttpTransport::with_timeout(
            self.endpoint.clone(),
            self.request_timeout,
        ))))
    }

    /// Build the Logger, starting the sender thread if a remote sink is
    /// configured.
    pub fn build(mut self) -> Result<Logger> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "queue capacity must be at least 1",
            ));
        }

        let prefix = format!("[{}]", self.prefix);
        let metrics = Arc::new(LoggerMetrics::new());
        let local = self
            .local_sink
            .take()
            .unwrap_or_else(default_local_sink);

        let (queue, completion) = match self.remote_transport()? {
            Some(transport) => {
                let diagnostics = self
                    .diagnostics
                    .take()
                    .unwrap_or_else(|| Box::new(std::io::stderr()));
                let (queue_tx, queue_rx) = bounded(self.queue_capacity);
                let (done_tx, done_rx) = bounded(1);
                let handle = SenderWorker::new(
                    prefix.clone(),
                    transport,
                    diagnostics,
                    Arc::clone(&metrics),
                )
                .spawn(queue_rx, done_tx)?;

                (
                    Some(queue_tx),
                    Some(Completion {
                        done: done_rx,
                        handle,
                    }),
                )
            }
            None => (None, None),
        };

        Ok(Logger {
            prefix,
            threshold: RwLock::new(self.threshold),
            local: Mutex::new(local),
            queue: RwLock::new(queue),
            completion: Mutex::new(completion),
            overflow_policy: self.overflow_policy,
            metrics,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_local_sink() -> Box<dyn LocalSink> {
    Box::new(crate::sinks::ConsoleSink::new())
}
