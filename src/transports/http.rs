//! HTTP transport for the remote collector
//!
//! Posts each encoded record as `application/json`. Anything other than a
//! `200 OK` answer counts as a failed delivery.

use crate::core::{LoggerError, Result, Transport};
use std::time::Duration;
use ureq::Agent;

/// Transport that posts one JSON record per request
///
/// # Example
///
/// ```no_run
/// use relay_logger::prelude::*;
/// use relay_logger::transports::HttpTransport;
/// use std::time::Duration;
///
/// let transport = HttpTransport::with_timeout(
///     "http://127.0.0.1:8080/logs",
///     Some(Duration::from_secs(2)),
/// );
///
/// let logger = Logger::builder()
///     .prefix("api")
///     .transport(transport)
///     .build()?;
/// logger.info("This record is posted to 127.0.0.1:8080");
/// # Ok::<(), relay_logger::LoggerError>(())
/// ```
pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport without a request deadline
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, None)
    }

    /// Create a transport whose requests give up after `timeout`
    ///
    /// Without a deadline an unresponsive collector stalls the sender, and
    /// once the queue fills, the producers.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Self {
            agent: Agent::new_with_config(config),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn deliver(&mut self, body: &[u8]) -> Result<()> {
        let response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|e| LoggerError::transport(&self.endpoint, e.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(LoggerError::unexpected_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
