//! Core data types and structures

pub mod tokens;
pub mod venues;
pub mod opportunity;

pub use tokens::*;
pub use venues::*;
pub use opportunity::*;
