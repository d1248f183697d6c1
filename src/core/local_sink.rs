//! Local sink trait for the synchronous output destination

use super::{error::Result, local_entry::LocalEntry};

pub trait LocalSink: Send {
    fn append(&mut self, entry: &LocalEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
