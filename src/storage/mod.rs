//! Persistence of scan results

pub mod opportunities;

pub use opportunities::*;
