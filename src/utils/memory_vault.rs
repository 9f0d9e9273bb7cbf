//! In-memory vault implementation for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::VaultService;
use crate::types::*;
use crate::utils::validation::validate_page_spec;

/// In-memory `VaultService` for tests and development.
///
/// Clones share the same underlying vault state, so a handle cloned into a
/// workflow manager observes every mutation made through any other handle.
/// Holdings are kept in insertion order, which makes pagination stable for a
/// fixed filter.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    inner: Arc<RwLock<VaultState>>,
}

#[derive(Debug, Default)]
struct VaultState {
    holdings: Vec<Holding>,
    transactions: HashMap<Uuid, CommittedTransaction>,
    queries_until_fault: Option<u32>,
}

impl MemoryVault {
    /// Create a new empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a holding directly, bypassing any transaction. Test support.
    pub fn seed_holding(&self, owner: Identity, token_type: TokenType, quantity: u64) -> Holding {
        let holding = Holding::new(owner, token_type, quantity);
        self.inner.write().unwrap().holdings.push(holding.clone());
        holding
    }

    /// Make queries fail with `QueryError::Unreachable` once `n` more
    /// queries have succeeded. Simulates a connectivity fault mid-flow.
    pub fn fail_queries_after(&self, n: u32) {
        self.inner.write().unwrap().queries_until_fault = Some(n);
    }

    /// Sum of all holdings matching `filter`, bypassing pagination
    pub fn balance_of(&self, filter: &HoldingFilter) -> u64 {
        self.inner
            .read()
            .unwrap()
            .holdings
            .iter()
            .filter(|h| filter.matches(h))
            .map(|h| h.quantity)
            .sum()
    }

    /// All holdings matching `filter`, in vault order
    pub fn holdings_of(&self, filter: &HoldingFilter) -> Vec<Holding> {
        self.inner
            .read()
            .unwrap()
            .holdings
            .iter()
            .filter(|h| filter.matches(h))
            .cloned()
            .collect()
    }

    /// Look up a committed transaction by id
    pub fn transaction(&self, id: &Uuid) -> Option<CommittedTransaction> {
        self.inner.read().unwrap().transactions.get(id).cloned()
    }

    /// Number of transactions committed so far
    pub fn transaction_count(&self) -> usize {
        self.inner.read().unwrap().transactions.len()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap();
        state.holdings.clear();
        state.transactions.clear();
        state.queries_until_fault = None;
    }
}

#[async_trait]
impl VaultService for MemoryVault {
    async fn query_holdings(
        &self,
        filter: &HoldingFilter,
        page_index: usize,
        page_size: usize,
    ) -> QueryResult<Option<Page>> {
        validate_page_spec(page_index, page_size)?;

        let mut state = self.inner.write().unwrap();
        if let Some(remaining) = state.queries_until_fault {
            if remaining == 0 {
                return Err(QueryError::Unreachable(
                    "Vault connection lost".to_string(),
                ));
            }
            state.queries_until_fault = Some(remaining - 1);
        }

        let matches: Vec<Holding> = state
            .holdings
            .iter()
            .filter(|h| filter.matches(h))
            .cloned()
            .collect();
        let total_available = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip((page_index - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Ok(Some(Page {
            page_index,
            items,
            total_available,
        }))
    }

    async fn submit_mint(
        &mut self,
        token_type: TokenType,
        quantity: u64,
        owner: Identity,
    ) -> FlowResult<CommittedTransaction> {
        if quantity == 0 {
            return Err(LedgerError::Rejected(
                "Mint of zero quantity".to_string(),
            ));
        }

        let mut state = self.inner.write().unwrap();
        let holding = Holding::new(owner, token_type, quantity);
        state.holdings.push(holding.clone());

        let tx = CommittedTransaction::new(Vec::new(), vec![holding]);
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn submit_move(
        &mut self,
        transfers: Vec<TransferLeg>,
        input_filter: &HoldingFilter,
        change_owner: Identity,
    ) -> FlowResult<CommittedTransaction> {
        if transfers.is_empty() {
            return Err(LedgerError::Rejected(
                "Move with no transfer legs".to_string(),
            ));
        }
        for leg in &transfers {
            if leg.amount.quantity == 0 {
                return Err(LedgerError::Rejected(
                    "Transfer leg of zero quantity".to_string(),
                ));
            }
            if leg.amount.token_type != input_filter.token_type {
                return Err(LedgerError::Rejected(format!(
                    "Transfer leg in {} does not match input filter for {}",
                    leg.amount.token_type, input_filter.token_type
                )));
            }
        }
        let needed: u64 = transfers.iter().map(|leg| leg.amount.quantity).sum();

        let mut state = self.inner.write().unwrap();

        // Greedy input selection in vault order.
        let mut selected = Vec::new();
        let mut selected_total = 0u64;
        for holding in state.holdings.iter().filter(|h| input_filter.matches(h)) {
            if selected_total >= needed {
                break;
            }
            selected_total += holding.quantity;
            selected.push(holding.id);
        }
        if selected_total < needed {
            return Err(LedgerError::Rejected(format!(
                "Holdings cover {} of requested {}",
                selected_total, needed
            )));
        }

        state.holdings.retain(|h| !selected.contains(&h.id));

        let mut produced = Vec::new();
        for leg in transfers {
            produced.push(Holding::new(
                leg.recipient,
                leg.amount.token_type,
                leg.amount.quantity,
            ));
        }
        let change = selected_total - needed;
        if change > 0 {
            produced.push(Holding::new(
                change_owner,
                input_filter.token_type.clone(),
                change,
            ));
        }
        state.holdings.extend(produced.iter().cloned());

        let tx = CommittedTransaction::new(selected, produced);
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }
}
