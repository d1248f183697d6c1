//! Serializable logger configuration

use super::{
    logger::{LoggerBuilder, DEFAULT_QUEUE_CAPACITY},
    overflow_policy::OverflowPolicy,
    severity::Severity,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Construction parameters, typically embedded in an application's own
/// configuration file.
///
/// # Example
///
/// ```
/// use relay_logger::{LoggerConfig, Severity};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{ "endpoint": "", "prefix": "worker", "threshold": "warning" }"#,
/// ).unwrap();
///
/// assert_eq!(config.threshold, Severity::Warning);
/// assert_eq!(config.queue_capacity, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Collector URL; empty disables the remote sink
    pub endpoint: String,
    pub prefix: String,
    pub threshold: Severity,
    pub queue_capacity: usize,
    pub overflow_policy: OverflowPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            prefix: String::new(),
            threshold: Severity::Info,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::Block,
            request_timeout_ms: None,
        }
    }
}

impl LoggerConfig {
    pub fn to_builder(&self) -> LoggerBuilder {
        let builder = LoggerBuilder::new()
            .endpoint(self.endpoint.clone())
            .prefix(self.prefix.clone())
            .threshold(self.threshold)
            .queue_capacity(self.queue_capacity)
            .overflow_policy(self.overflow_policy);

        match self.request_timeout_ms {
            Some(ms) => builder.request_timeout(Duration::from_millis(ms)),
            None => builder,
        }
    }
}
