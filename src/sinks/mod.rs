//! Local sink implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;

pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;

pub use crate::core::LocalSink;
