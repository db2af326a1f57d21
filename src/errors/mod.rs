//! Error types for the scanner

pub mod feed_error;

pub use feed_error::*;
