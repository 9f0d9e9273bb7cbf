//! Mint workflow issuing new token units to the node's own identity

use crate::traits::VaultService;
use crate::types::*;
use crate::utils::validation::validate_quantity;

/// Mints new holdings for the identity it was constructed with.
///
/// Self-issuance model: the mint creates units owned by itself and transfers
/// them onward through the issue workflow.
pub struct MintManager<S: VaultService> {
    vault: S,
    identity: Identity,
}

impl<S: VaultService> MintManager<S> {
    /// Create a mint manager over a vault handle
    pub fn new(vault: S, identity: Identity) -> Self {
        Self { vault, identity }
    }

    /// Create `quantity` new units of `token_type` owned by this identity.
    ///
    /// Nothing is submitted to the ledger when the quantity fails
    /// validation. Either the mint transaction fully commits or the error is
    /// surfaced; there is no partial success.
    pub async fn mint(
        &mut self,
        token_type: TokenType,
        quantity: u64,
    ) -> FlowResult<CommittedTransaction> {
        validate_quantity(quantity)?;

        let amount = Amount::new(quantity, token_type.clone());
        tracing::debug!("minting {} to {}", amount, self.identity);
        let tx = self
            .vault
            .submit_mint(token_type, quantity, self.identity.clone())
            .await?;
        tracing::info!("mint of {} committed as {}", amount, tx.id);
        Ok(tx)
    }
}
