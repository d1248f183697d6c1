//! Transport trait for the remote collector

use super::error::Result;

/// A single best-effort delivery attempt of an encoded record.
///
/// Implementations must not retry: a failed attempt is reported once and the
/// record is dropped by the sender. [`LoggerError::UnexpectedStatus`] marks a
/// collector rejection, any other error a network-level failure.
///
/// [`LoggerError::UnexpectedStatus`]: super::LoggerError::UnexpectedStatus
pub trait Transport: Send {
    /// Deliver one JSON-encoded record
    fn deliver(&mut self, body: &[u8]) -> Result<()>;

    fn name(&self) -> &str;
}
