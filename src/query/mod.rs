//! Paginated balance accumulation and sufficiency checking

pub mod accumulator;
pub mod sufficiency;

pub use accumulator::*;
pub use sufficiency::*;
