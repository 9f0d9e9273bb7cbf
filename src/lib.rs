//! # Token Mint Core
//!
//! Core workflows for a fungible fiat-currency token: minting new units and
//! issuing them to a recipient, built on a paginated balance-sufficiency
//! check against an abstract vault service.
//!
//! ## Features
//!
//! - **Paginated sufficiency checks**: page-by-page balance accumulation
//!   with early exit as soon as a target quantity is proven covered
//! - **Mint workflow**: create new token units owned by the node's own
//!   identity
//! - **Issue workflow**: pre-check the balance, mint any shortfall, re-check,
//!   then move tokens to the recipient
//! - **Vault abstraction**: ledger-runtime-agnostic design with a
//!   trait-based vault boundary and an in-memory implementation for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use token_mint_core::utils::MemoryVault;
//! use token_mint_core::{Identity, TokenMint};
//!
//! // The vault handle would normally wrap your ledger runtime's client.
//! // let vault = MemoryVault::new();
//! // let mut mint = TokenMint::new(vault, Identity::new("O=Mint,L=London,C=GB"));
//! // let tx = mint.issue_fixed_token("USD", 10_000, recipient).await?;
//! ```

pub mod flows;
pub mod query;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use flows::*;
pub use query::*;
pub use traits::*;
pub use types::*;
