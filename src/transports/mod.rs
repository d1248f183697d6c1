//! Transport implementations for the remote collector

pub mod http;

pub use http::HttpTransport;

pub use crate::core::Transport;
