//! HTTP client setup and retry logic

pub mod http;
pub mod retry;

pub use http::*;
pub use retry::*;
