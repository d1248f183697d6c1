//! Console sink implementation

use crate::core::{LocalEntry, LocalSink, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes local lines to stderr
#[cfg_attr(not(feature = "console"), allow(dead_code))]
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: String,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_colors(cfg!(feature = "console"))
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }

    /// Set a strftime-compatible timestamp format
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new().with_timestamp_format("%d/%b/%Y:%H:%M:%S %z");
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format_str: &str) -> Self {
        self.timestamp_format = format_str.to_string();
        self
    }

    fn format_line(&self, entry: &LocalEntry) -> String {
        let level = format!("{:9}", entry.level.to_str());
        #[cfg(feature = "console")]
        let level = if self.use_colors {
            level.color(entry.level.color_code()).to_string()
        } else {
            level
        };

        format!(
            "{} {} {}",
            entry.timestamp.format(&self.timestamp_format),
            level,
            entry.body()
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSink for ConsoleSink {
    fn append(&mut self, entry: &LocalEntry) -> Result<()> {
        let line = self.format_line(entry);
        // One locked write per line keeps concurrent lines whole.
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_plain_format() {
        let sink = ConsoleSink::with_colors(false).with_timestamp_format("TS");
        let entry = LocalEntry::new(Severity::Warning, "[app]", "low disk")
            .with_location("src/main.rs", 7);

        assert_eq!(sink.format_line(&entry), "TS WARNING   [app] main.rs:7: low disk");
    }

    #[test]
    fn test_append_and_flush() {
        let mut sink = ConsoleSink::with_colors(false);
        let entry = LocalEntry::new(Severity::Info, "[app]", "console sink test");
        assert!(sink.append(&entry).is_ok());
        assert!(sink.flush().is_ok());
    }
}
