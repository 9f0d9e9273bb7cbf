//! Threshold-satisfaction checks composed from paginated accumulation

use crate::query::accumulator::{accumulate_until, DEFAULT_PAGE_SIZE};
use crate::traits::VaultService;
use crate::types::*;

/// Answers whether the holdings matched by a filter cover a target quantity,
/// reading the vault page by page.
///
/// The checker carries no state between calls: every check reflects the
/// vault at the moment it runs, so two calls straddling a ledger mutation
/// may answer differently.
pub struct SufficiencyChecker<S: VaultService> {
    vault: S,
    page_size: usize,
}

impl<S: VaultService> SufficiencyChecker<S> {
    /// Create a checker reading the vault with the default page size
    pub fn new(vault: S) -> Self {
        Self {
            vault,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a checker with an explicit page size
    pub fn with_page_size(vault: S, page_size: usize) -> Self {
        Self { vault, page_size }
    }

    /// Check whether the holdings selected by `filter` cover `target` minor
    /// units, stopping as soon as sufficiency is proven.
    pub async fn check_sufficiency(
        &self,
        filter: &HoldingFilter,
        target: u64,
    ) -> QueryResult<SufficiencyResult> {
        accumulate_until(&self.vault, filter, target, self.page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_vault::MemoryVault;

    fn usd() -> TokenType {
        TokenType::fiat("USD").unwrap()
    }

    fn mint() -> Identity {
        Identity::new("Mint")
    }

    #[tokio::test]
    async fn repeated_checks_against_unchanged_vault_agree() {
        let vault = MemoryVault::new();
        vault.seed_holding(mint(), usd(), 75);
        let checker = SufficiencyChecker::new(vault);
        let filter = HoldingFilter::held_by(usd(), mint());

        let first = checker.check_sufficiency(&filter, 100).await.unwrap();
        let second = checker.check_sufficiency(&filter, 100).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, SufficiencyResult::not_met(75));
    }

    #[tokio::test]
    async fn checks_reflect_mutations_between_calls() {
        let vault = MemoryVault::new();
        let checker = SufficiencyChecker::new(vault.clone());
        let filter = HoldingFilter::held_by(usd(), mint());

        let before = checker.check_sufficiency(&filter, 50).await.unwrap();
        vault.seed_holding(mint(), usd(), 60);
        let after = checker.check_sufficiency(&filter, 50).await.unwrap();

        assert!(!before.met);
        assert_eq!(after, SufficiencyResult::met(60));
    }

    #[tokio::test]
    async fn small_page_size_walks_every_page() {
        let vault = MemoryVault::new();
        for _ in 0..9 {
            vault.seed_holding(mint(), usd(), 2);
        }
        let checker = SufficiencyChecker::with_page_size(vault, 4);
        let filter = HoldingFilter::held_by(usd(), mint());

        let result = checker.check_sufficiency(&filter, 100).await.unwrap();

        assert_eq!(result, SufficiencyResult::not_met(18));
    }
}
