//! Local log entry structure

use super::severity::Severity;
use chrono::{DateTime, Utc};
use std::path::Path;

/// One line destined for the local sink.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    pub level: Severity,
    pub prefix: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl LocalEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Severity, prefix: &str, message: &str) -> Self {
        Self {
            level,
            prefix: prefix.to_string(),
            message: Self::sanitize_message(message),
            timestamp: Utc::now(),
            file: None,
            line: None,
        }
    }

    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self
    }

    /// `file:line` using only the file name, or `None` without a location
    pub fn short_location(&self) -> Option<String> {
        let file = self.file.as_deref()?;
        let short = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        Some(format!("{}:{}", short, self.line.unwrap_or(0)))
    }

    /// `[prefix] file:line: message`, the text shared by every local sink
    pub fn body(&self) -> String {
        match self.short_location() {
            Some(location) => format!("{} {}: {}", self.prefix, location, self.message),
            None => format!("{} {}", self.prefix, self.message),
        }
    }
}
