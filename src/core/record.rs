//! Remote log record
//!
//! A [`Record`] is what call sites push onto the outbound queue. The origin
//! label is not part of it: the sender stamps that when it encodes the record
//! for the collector, so every record shares one label.

use super::severity::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    level: Severity,
    kind: String,
    message: String,
}

impl Record {
    /// A plain message record (empty `kind`)
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            kind: String::new(),
            message: message.into(),
        }
    }

    /// A record describing an error; `kind` is the error's type name
    pub fn error(level: Severity, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Borrow this record together with the sender's origin label.
    pub fn stamped<'a>(&'a self, prefix: &'a str) -> WireRecord<'a> {
        WireRecord {
            prefix,
            level: self.level,
            kind: &self.kind,
            message: &self.message,
        }
    }
}

/// JSON body posted to the collector
#[derive(Debug, Serialize)]
pub struct WireRecord<'a> {
    pub prefix: &'a str,
    pub level: Severity,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub message: &'a str,
}
