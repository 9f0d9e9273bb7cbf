//! Top-level entry points for the token workflows

use crate::flows::issue::IssueManager;
use crate::flows::mint::MintManager;
use crate::query::sufficiency::SufficiencyChecker;
use crate::traits::VaultService;
use crate::types::*;

/// Facade over the mint and issue workflows for one node identity.
///
/// Constructed from a vault handle and the identity the node acts as; the
/// handle is cloned into each workflow manager, and all clones observe the
/// same ledger.
pub struct TokenMint<S: VaultService> {
    mint_manager: MintManager<S>,
    issue_manager: IssueManager<S>,
    checker: SufficiencyChecker<S>,
    identity: Identity,
}

impl<S: VaultService + Clone> TokenMint<S> {
    /// Create the workflow facade over a vault handle
    pub fn new(vault: S, identity: Identity) -> Self {
        let mint_manager = MintManager::new(vault.clone(), identity.clone());
        let issue_manager = IssueManager::new(vault.clone(), identity.clone());
        let checker = SufficiencyChecker::new(vault);
        Self {
            mint_manager,
            issue_manager,
            checker,
            identity,
        }
    }

    /// Mint `quantity` minor units of the fiat currency `currency` into this
    /// identity's own vault.
    pub async fn mint_fixed_token(
        &mut self,
        currency: &str,
        quantity: u64,
    ) -> FlowResult<CommittedTransaction> {
        let token_type = TokenType::fiat(currency)?;
        self.mint_manager.mint(token_type, quantity).await
    }

    /// Issue `quantity` minor units of `currency` to `recipient`, minting
    /// any shortfall in this identity's holdings first.
    pub async fn issue_fixed_token(
        &mut self,
        currency: &str,
        quantity: u64,
        recipient: Identity,
    ) -> FlowResult<CommittedTransaction> {
        let token_type = TokenType::fiat(currency)?;
        self.issue_manager.issue(token_type, quantity, recipient).await
    }

    /// Check whether this identity's current holdings of `currency` cover
    /// `target` minor units, reading the vault page by page.
    pub async fn held_balance_meets(
        &self,
        currency: &str,
        target: u64,
    ) -> FlowResult<SufficiencyResult> {
        let token_type = TokenType::fiat(currency)?;
        let filter = HoldingFilter::held_by(token_type, self.identity.clone());
        Ok(self.checker.check_sufficiency(&filter, target).await?)
    }
}
