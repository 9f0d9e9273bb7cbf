//! Workflow orchestration for minting and issuing tokens

pub mod core;
pub mod issue;
pub mod mint;

pub use core::*;
pub use issue::*;
pub use mint::*;
