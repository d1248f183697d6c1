//! Shared test doubles for the integration tests

#![allow(dead_code)]

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use relay_logger::{LocalEntry, LocalSink, Result, Transport};
use std::io::Write;
use std::sync::Arc;

/// Local sink that keeps every entry in memory
#[derive(Clone, Default)]
pub struct CaptureSink(pub Arc<Mutex<Vec<LocalEntry>>>);

impl CaptureSink {
    pub fn entries(&self) -> Vec<LocalEntry> {
        self.0.lock().clone()
    }
}

impl LocalSink for CaptureSink {
    fn append(&mut self, entry: &LocalEntry) -> Result<()> {
        self.0.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Diagnostic stream backed by a shared buffer
#[derive(Clone, Default)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Transport that accepts everything and remembers each body
#[derive(Clone, Default)]
pub struct RecordingTransport(pub Arc<Mutex<Vec<serde_json::Value>>>);

impl RecordingTransport {
    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.0.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .map(|body| body["message"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn deliver(&mut self, body: &[u8]) -> Result<()> {
        self.0.lock().push(serde_json::from_slice(body)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Transport that announces each attempt and then waits for a permit
pub struct GateTransport {
    pub inner: RecordingTransport,
    pub entered: Sender<()>,
    pub permits: Receiver<()>,
}

impl Transport for GateTransport {
    fn deliver(&mut self, body: &[u8]) -> Result<()> {
        let _ = self.entered.send(());
        let _ = self.permits.recv();
        self.inner.deliver(body)
    }

    fn name(&self) -> &str {
        "gate"
    }
}
