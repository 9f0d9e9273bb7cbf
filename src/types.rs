//! Core types and data structures for the token workflows

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A fungible asset class, identified by its currency code.
///
/// Token types are immutable values; two holdings are fungible exactly when
/// their token types are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenType {
    /// ISO 4217 style currency code (e.g. "USD")
    pub code: String,
    /// Number of minor-unit digits in one major unit
    pub fraction_digits: u32,
}

impl TokenType {
    /// Look up a fiat currency by code.
    ///
    /// The code must be three ASCII uppercase letters. Fraction digits follow
    /// the common ISO 4217 assignments.
    pub fn fiat(code: &str) -> FlowResult<Self> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(LedgerError::Validation(format!(
                "Currency code must be three uppercase letters, got '{}'",
                code
            )));
        }

        let fraction_digits = match code {
            "JPY" | "KRW" => 0,
            "BHD" | "KWD" | "OMR" => 3,
            _ => 2,
        };

        Ok(Self {
            code: code.to_string(),
            fraction_digits,
        })
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// A party on the ledger, such as the mint or a token recipient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from its ledger name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The ledger name of this identity
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A quantity of a token type, counted in the token's minor unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// Quantity in minor units
    pub quantity: u64,
    /// The asset class this quantity is denominated in
    pub token_type: TokenType,
}

impl Amount {
    /// Create a new amount in minor units
    pub fn new(quantity: u64, token_type: TokenType) -> Self {
        Self {
            quantity,
            token_type,
        }
    }

    /// The amount in major units, scaled by the token's fraction digits
    pub fn to_decimal(&self) -> BigDecimal {
        BigDecimal::from(self.quantity)
            / BigDecimal::from(10u64.pow(self.token_type.fraction_digits))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.token_type)
    }
}

/// One on-ledger bundle of fungible token units.
///
/// Holdings are immutable once created; a move consumes its input holdings
/// and produces new ones for the new owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier of this holding
    pub id: Uuid,
    /// The party owning these units
    pub owner: Identity,
    /// The asset class of the units
    pub token_type: TokenType,
    /// Quantity in minor units
    pub quantity: u64,
    /// When the holding was created
    pub created_at: NaiveDateTime,
}

impl Holding {
    /// Create a new holding
    pub fn new(owner: Identity, token_type: TokenType, quantity: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            token_type,
            quantity,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Predicate selecting the holdings of one token type held by one identity.
/// Built once per check and reused across pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingFilter {
    pub token_type: TokenType,
    pub owner: Identity,
}

impl HoldingFilter {
    /// Filter for holdings of `token_type` held by `owner`
    pub fn held_by(token_type: TokenType, owner: Identity) -> Self {
        Self { token_type, owner }
    }

    /// Whether a holding matches this filter
    pub fn matches(&self, holding: &Holding) -> bool {
        holding.token_type == self.token_type && holding.owner == self.owner
    }
}

/// One page of a holdings query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed position of this page in the result set
    pub page_index: usize,
    /// Holdings on this page, at most the requested page size
    pub items: Vec<Holding>,
    /// Total matching records across all pages at the time of the query.
    /// May change between calls when the ledger mutates concurrently.
    pub total_available: u64,
}

impl Page {
    /// Sum of the holding quantities on this page
    pub fn page_total(&self) -> u64 {
        self.items.iter().map(|h| h.quantity).sum()
    }
}

/// Outcome of a sufficiency check.
///
/// `amount_observed` is the accumulated total at the moment of decision:
/// when the check short-circuits early, it is the partial sum that proved
/// sufficiency, not the full balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SufficiencyResult {
    pub met: bool,
    pub amount_observed: u64,
}

impl SufficiencyResult {
    /// A check that proved the target covered
    pub fn met(amount_observed: u64) -> Self {
        Self {
            met: true,
            amount_observed,
        }
    }

    /// A check that did not reach the target
    pub fn not_met(amount_observed: u64) -> Self {
        Self {
            met: false,
            amount_observed,
        }
    }
}

/// One output leg of a move submission: an amount and its new owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub recipient: Identity,
    pub amount: Amount,
}

impl TransferLeg {
    /// Create a new transfer leg
    pub fn new(recipient: Identity, amount: Amount) -> Self {
        Self { recipient, amount }
    }
}

/// Handle to a transaction the ledger has committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedTransaction {
    /// Unique identifier of the transaction
    pub id: Uuid,
    /// Ids of the holdings consumed as inputs
    pub consumed: Vec<Uuid>,
    /// Holdings produced as outputs
    pub produced: Vec<Holding>,
    /// When the ledger recorded the transaction
    pub recorded_at: NaiveDateTime,
}

impl CommittedTransaction {
    /// Create a committed transaction handle
    pub fn new(consumed: Vec<Uuid>, produced: Vec<Holding>) -> Self {
        Self {
            id: Uuid::new_v4(),
            consumed,
            produced,
            recorded_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Errors raised while querying the vault
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Vault query failed: {0}")]
    Unreachable(String),
    #[error("Malformed holding filter: {0}")]
    MalformedFilter(String),
    #[error("Invalid page specification: {0}")]
    InvalidPageSpec(String),
}

/// Errors raised while submitting state changes to the ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for vault queries
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for workflow operations
pub type FlowResult<T> = Result<T, LedgerError>;
