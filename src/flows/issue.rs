//! Issue workflow: check the balance, mint any shortfall, move to recipient

use std::fmt;

use crate::flows::mint::MintManager;
use crate::query::sufficiency::SufficiencyChecker;
use crate::traits::VaultService;
use crate::types::*;
use crate::utils::validation::validate_quantity;

/// Steps of the issue workflow, in order. `Failed` is reachable from every
/// other phase; a failing step aborts the flow and surfaces its error
/// without rollback, leaving atomicity to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuePhase {
    Start,
    PreCheck,
    MintIfShort,
    PostCheck,
    Move,
    Done,
    Failed,
}

impl fmt::Display for IssuePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssuePhase::Start => "start",
            IssuePhase::PreCheck => "pre-check",
            IssuePhase::MintIfShort => "mint-if-short",
            IssuePhase::PostCheck => "post-check",
            IssuePhase::Move => "move",
            IssuePhase::Done => "done",
            IssuePhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Drives one issue orchestration per call: a pre-check of the mint's own
/// holdings, a mint covering any shortfall, a post-check, and the move of
/// the requested quantity to the recipient.
pub struct IssueManager<S: VaultService> {
    vault: S,
    minter: MintManager<S>,
    checker: SufficiencyChecker<S>,
    identity: Identity,
}

impl<S: VaultService + Clone> IssueManager<S> {
    /// Create an issue manager over a vault handle
    pub fn new(vault: S, identity: Identity) -> Self {
        let minter = MintManager::new(vault.clone(), identity.clone());
        let checker = SufficiencyChecker::new(vault.clone());
        Self {
            vault,
            minter,
            checker,
            identity,
        }
    }

    /// Move `quantity` units of `token_type` from this identity to
    /// `recipient`, minting beforehand whenever current holdings fall short.
    ///
    /// Holdings already covering the request are spent as they are; only the
    /// shortfall is minted, so the flow never inflates supply beyond what
    /// the move needs.
    pub async fn issue(
        &mut self,
        token_type: TokenType,
        quantity: u64,
        recipient: Identity,
    ) -> FlowResult<CommittedTransaction> {
        validate_quantity(quantity)?;
        tracing::debug!(
            "{}: issue of {} {} from {} to {}",
            IssuePhase::Start,
            quantity,
            token_type,
            self.identity,
            recipient
        );

        let filter = HoldingFilter::held_by(token_type.clone(), self.identity.clone());

        let before = self
            .checker
            .check_sufficiency(&filter, quantity)
            .await
            .map_err(|e| fail(IssuePhase::PreCheck, e.into()))?;
        tracing::debug!(
            "{}: observed {} of {} required",
            IssuePhase::PreCheck,
            before.amount_observed,
            quantity
        );

        let shortfall = quantity.saturating_sub(before.amount_observed);
        if shortfall > 0 {
            tracing::debug!(
                "{}: minting shortfall of {} {}",
                IssuePhase::MintIfShort,
                shortfall,
                token_type
            );
            self.minter
                .mint(token_type.clone(), shortfall)
                .await
                .map_err(|e| fail(IssuePhase::MintIfShort, e))?;
        } else {
            tracing::debug!(
                "{}: holdings already cover {} {}, nothing minted",
                IssuePhase::MintIfShort,
                quantity,
                token_type
            );
        }

        let after = self
            .checker
            .check_sufficiency(&filter, quantity)
            .await
            .map_err(|e| fail(IssuePhase::PostCheck, e.into()))?;
        if !after.met {
            return Err(fail(
                IssuePhase::PostCheck,
                LedgerError::Rejected(format!(
                    "Holdings cover {} of requested {} {}",
                    after.amount_observed, quantity, token_type
                )),
            ));
        }

        tracing::debug!(
            "{}: moving {} {} to {}",
            IssuePhase::Move,
            quantity,
            token_type,
            recipient
        );
        let leg = TransferLeg::new(recipient, Amount::new(quantity, token_type));
        let tx = self
            .vault
            .submit_move(vec![leg], &filter, self.identity.clone())
            .await
            .map_err(|e| fail(IssuePhase::Move, e))?;

        tracing::info!("{}: issue committed as {}", IssuePhase::Done, tx.id);
        Ok(tx)
    }
}

fn fail(phase: IssuePhase, err: LedgerError) -> LedgerError {
    tracing::warn!(
        "issue entered {} during {}: {}",
        IssuePhase::Failed,
        phase,
        err
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_vault::MemoryVault;
    use async_trait::async_trait;

    fn usd() -> TokenType {
        TokenType::fiat("USD").unwrap()
    }

    fn mint() -> Identity {
        Identity::new("Mint")
    }

    fn wallet() -> Identity {
        Identity::new("Wallet")
    }

    /// A vault whose mints claim to commit but write nothing, so the
    /// post-check observes no new holdings.
    #[derive(Clone)]
    struct LyingMintVault(MemoryVault);

    #[async_trait]
    impl VaultService for LyingMintVault {
        async fn query_holdings(
            &self,
            filter: &HoldingFilter,
            page_index: usize,
            page_size: usize,
        ) -> QueryResult<Option<Page>> {
            self.0.query_holdings(filter, page_index, page_size).await
        }

        async fn submit_mint(
            &mut self,
            _token_type: TokenType,
            _quantity: u64,
            _owner: Identity,
        ) -> FlowResult<CommittedTransaction> {
            Ok(CommittedTransaction::new(Vec::new(), Vec::new()))
        }

        async fn submit_move(
            &mut self,
            transfers: Vec<TransferLeg>,
            input_filter: &HoldingFilter,
            change_owner: Identity,
        ) -> FlowResult<CommittedTransaction> {
            self.0.submit_move(transfers, input_filter, change_owner).await
        }
    }

    #[tokio::test]
    async fn issue_mints_shortfall_and_moves_to_recipient() {
        let vault = MemoryVault::new();
        let mut manager = IssueManager::new(vault.clone(), mint());

        let tx = manager.issue(usd(), 100, wallet()).await.unwrap();

        assert_eq!(tx.produced.len(), 1);
        assert_eq!(tx.produced[0].owner, wallet());
        assert_eq!(vault.balance_of(&HoldingFilter::held_by(usd(), wallet())), 100);
        assert_eq!(vault.balance_of(&HoldingFilter::held_by(usd(), mint())), 0);
    }

    #[tokio::test]
    async fn sufficient_balance_skips_the_mint_submission() {
        let vault = MemoryVault::new();
        vault.seed_holding(mint(), usd(), 500);
        let mut manager = IssueManager::new(vault.clone(), mint());

        manager.issue(usd(), 200, wallet()).await.unwrap();

        // only the move was submitted, and total supply is unchanged
        assert_eq!(vault.transaction_count(), 1);
        assert_eq!(vault.balance_of(&HoldingFilter::held_by(usd(), wallet())), 200);
        assert_eq!(vault.balance_of(&HoldingFilter::held_by(usd(), mint())), 300);
    }

    #[tokio::test]
    async fn failed_post_check_refuses_the_move() {
        let vault = LyingMintVault(MemoryVault::new());
        let mut manager = IssueManager::new(vault.clone(), mint());

        let err = manager.issue(usd(), 100, wallet()).await.unwrap_err();

        assert!(matches!(err, LedgerError::Rejected(_)));
        assert_eq!(vault.0.transaction_count(), 0);
    }

    #[tokio::test]
    async fn zero_quantity_issue_is_rejected_up_front() {
        let vault = MemoryVault::new();
        let mut manager = IssueManager::new(vault.clone(), mint());

        let err = manager.issue(usd(), 0, wallet()).await.unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(vault.transaction_count(), 0);
    }
}
