//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Record could not be encoded for the collector
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network-level failure talking to the collector
    #[error("Transport error posting to '{endpoint}': {message}")]
    TransportError { endpoint: String, message: String },

    /// Collector answered with something other than 200
    #[error("{status} {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Local sink failure
    #[error("Local sink '{sink}' failed: {message}")]
    SinkError { sink: String, message: String },
}

impl LoggerError {
    /// Create a transport error for `endpoint`
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected-status error
    pub fn unexpected_status(status: u16, reason: impl Into<String>) -> Self {
        LoggerError::UnexpectedStatus {
            status,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a local sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// True for failures reported by the collector rather than the network
    pub fn is_status(&self) -> bool {
        matches!(self, LoggerError::UnexpectedStatus { .. })
    }
}
