//! Vault service abstraction over the external ledger runtime

use async_trait::async_trait;

use crate::types::*;

/// Narrow boundary to the distributed-ledger runtime that holds the vault.
///
/// Consensus, transaction signing, and notarization all live behind this
/// trait; the workflows in this crate only query holdings and submit state
/// changes. Implementations are handles onto shared ledger state: a clone of
/// a vault handle must observe the same ledger as the original.
#[async_trait]
pub trait VaultService: Send + Sync {
    /// Fetch one page of holdings matching `filter`.
    ///
    /// Zero matches is a valid result (`items` empty, `total_available` 0),
    /// not an error. `Ok(None)` covers backends that can produce no result
    /// set at all; callers treat it as an empty vault. `total_available`
    /// reflects the total matching records at the time of the call and may
    /// change between calls when the ledger mutates concurrently.
    async fn query_holdings(
        &self,
        filter: &HoldingFilter,
        page_index: usize,
        page_size: usize,
    ) -> QueryResult<Option<Page>>;

    /// Submit a transaction creating `quantity` new units of `token_type`
    /// owned by `owner`. The transaction either fully commits or fails;
    /// there is no partial success.
    async fn submit_mint(
        &mut self,
        token_type: TokenType,
        quantity: u64,
        owner: Identity,
    ) -> FlowResult<CommittedTransaction>;

    /// Submit a transaction consuming holdings selected by `input_filter`
    /// and producing one output per transfer leg, with any remainder owned
    /// by `change_owner`. The transaction either fully commits or fails.
    async fn submit_move(
        &mut self,
        transfers: Vec<TransferLeg>,
        input_filter: &HoldingFilter,
        change_owner: Identity,
    ) -> FlowResult<CommittedTransaction>;
}
