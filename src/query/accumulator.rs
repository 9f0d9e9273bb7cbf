//! Page-by-page balance accumulation over vault holdings

use crate::traits::VaultService;
use crate::types::*;

/// Vault pages are 1-indexed.
pub const FIRST_PAGE: usize = 1;

/// Holdings fetched per vault query.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Transient accumulation state threaded through successive page fetches.
/// Lives only for the duration of one sufficiency check; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulationState {
    /// Sum of all quantities absorbed so far; never decreases
    pub running_total: u64,
    /// Number of pages absorbed so far
    pub pages_consumed: usize,
    /// Whether every page implied by the last known total was requested
    pub exhausted: bool,
}

impl AccumulationState {
    /// State before any page has been fetched
    pub fn empty() -> Self {
        Self {
            running_total: 0,
            pages_consumed: 0,
            exhausted: false,
        }
    }

    /// Fold one page into the state
    pub fn absorb(self, page: &Page) -> Self {
        Self {
            running_total: self.running_total + page.page_total(),
            pages_consumed: self.pages_consumed + 1,
            exhausted: self.exhausted,
        }
    }

    /// Whether another page is implied by the last known total.
    ///
    /// The `<=` bound matches the vault query convention: a total that is an
    /// exact multiple of the page size costs one trailing empty fetch.
    pub fn has_more_pages(&self, page_size: usize, total_available: u64) -> bool {
        (page_size as u64).saturating_mul(self.pages_consumed as u64) <= total_available
    }

    /// State after the final page was requested
    pub fn mark_exhausted(self) -> Self {
        Self {
            exhausted: true,
            ..self
        }
    }
}

/// Sum holding quantities page by page until the running total reaches
/// `target` or every page has been consumed.
///
/// Whole pages are absorbed before the threshold is checked, so the check
/// short-circuits at page granularity: `amount_observed` on a met result is
/// the partial sum at that exact point, not the full vault balance, and no
/// further pages are fetched. An absent result set and a reported total of
/// zero both yield a not-met result with zero observed, without further
/// fetches.
pub async fn accumulate_until<S>(
    vault: &S,
    filter: &HoldingFilter,
    target: u64,
    page_size: usize,
) -> QueryResult<SufficiencyResult>
where
    S: VaultService + ?Sized,
{
    let mut state = AccumulationState::empty();
    let mut page_index = FIRST_PAGE;

    loop {
        let page = match vault.query_holdings(filter, page_index, page_size).await? {
            Some(page) => page,
            None => return Ok(SufficiencyResult::not_met(0)),
        };
        if page.total_available == 0 {
            return Ok(SufficiencyResult::not_met(0));
        }

        state = state.absorb(&page);
        if state.running_total >= target {
            return Ok(SufficiencyResult::met(state.running_total));
        }
        if !state.has_more_pages(page_size, page.total_available) {
            state = state.mark_exhausted();
            break;
        }
        page_index += 1;
    }

    if state.running_total < target {
        Ok(SufficiencyResult::not_met(state.running_total))
    } else {
        Ok(SufficiencyResult::met(state.running_total))
    }
}
