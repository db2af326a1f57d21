//! Price resolution engine

pub mod history;
pub mod resolver;

pub use resolver::PriceResolver;
