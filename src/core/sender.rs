//! Background sender for the remote collector
//!
//! Exactly one sender thread is bound to an outbound queue. It takes records
//! in FIFO order, stamps the origin label, encodes them as JSON and makes one
//! delivery attempt per record. Failures are written to the diagnostic stream
//! and the record is dropped. When the queue is closed and empty the sender
//! signals completion once and exits.

use super::{metrics::LoggerMetrics, record::Record, transport::Transport};
use crossbeam_channel::{Receiver, Sender};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::thread;

/// Thread name of the sender worker
pub const SENDER_THREAD_NAME: &str = "relay-logger-sender";

/// Destination for the sender's own failure reports
pub type Diagnostics = Box<dyn Write + Send>;

pub(crate) struct SenderWorker {
    prefix: String,
    transport: Box<dyn Transport>,
    diagnostics: Diagnostics,
    metrics: Arc<LoggerMetrics>,
    buffer: Vec<u8>,
}

impl SenderWorker {
    pub(crate) fn new(
        prefix: String,
        transport: Box<dyn Transport>,
        diagnostics: Diagnostics,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            prefix,
            transport,
            diagnostics,
            metrics,
            buffer: Vec::with_capacity(256),
        }
    }

    /// Start the worker on its own thread.
    ///
    /// `done` receives exactly one message, after `queue` is closed and
    /// drained.
    pub(crate) fn spawn(
        self,
        queue: Receiver<Record>,
        done: Sender<()>,
    ) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name(SENDER_THREAD_NAME.to_string())
            .spawn(move || self.run(queue, done))
    }

    fn run(mut self, queue: Receiver<Record>, done: Sender<()>) {
        // recv() only fails once every producer handle is gone and the
        // queue is empty.
        while let Ok(record) = queue.recv() {
            self.process(record);
        }

        // Capacity 1 and a single send: never blocks.
        let _ = done.send(());
    }

    fn process(&mut self, record: Record) {
        self.buffer.clear();
        // Every field of a record is a string or an integer, so this only
        // fails if the writer does.
        if let Err(e) = serde_json::to_writer(&mut self.buffer, &record.stamped(&self.prefix)) {
            self.encode_failed(&e);
            return;
        }
        drop(record);

        let transport = &mut self.transport;
        let body = &self.buffer;
        let attempt = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            transport.deliver(body)
        }));

        match attempt {
            Ok(Ok(())) => {
                self.metrics.record_delivered();
            }
            Ok(Err(e)) => {
                self.metrics.record_transport_failure();
                if e.is_status() {
                    self.diagnose(format_args!(
                        "Error posting log message to remote collector! {}",
                        e
                    ));
                } else {
                    self.diagnose(format_args!(
                        "Unable to post log message to remote collector! {}",
                        e
                    ));
                }
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                let name = self.transport.name().to_string();
                self.metrics.record_transport_failure();
                self.diagnose(format_args!("Transport '{}' panicked: {}", name, panic_msg));
            }
        }
    }

    fn encode_failed(&mut self, e: &serde_json::Error) {
        self.metrics.record_encode_failure();
        self.diagnose(format_args!(
            "Unable to encode message for remote collector! {}",
            e
        ));
    }

    fn diagnose(&mut self, message: fmt::Arguments<'_>) {
        let _ = writeln!(self.diagnostics, "[LOGGER ERROR] {}", message);
        let _ = self.diagnostics.flush();
    }
}
