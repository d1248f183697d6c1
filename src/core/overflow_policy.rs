//! Overflow policies for the outbound queue
//!
//! The outbound queue is bounded. These policies decide what a producer does
//! when it finds the queue full.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Policy for a full outbound queue
///
/// # Example
///
/// ```
/// use relay_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: wait for the sender to free a slot
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Block until the sender frees a slot
    ///
    /// A stalled collector eventually stalls producers too.
    #[default]
    Block,

    /// Block with timeout, then drop the record
    BlockWithTimeout(Duration),

    /// Drop the record immediately
    ///
    /// Remote delivery is best-effort; the local sink is unaffected.
    DropNewest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}
