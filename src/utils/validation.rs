//! Validation utilities

use crate::query::accumulator::FIRST_PAGE;
use crate::types::*;

/// Validate that a quantity of token units is positive
pub fn validate_quantity(quantity: u64) -> FlowResult<()> {
    if quantity == 0 {
        Err(LedgerError::Validation(
            "Quantity must be greater than zero".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate a page request before it reaches the vault
pub fn validate_page_spec(page_index: usize, page_size: usize) -> QueryResult<()> {
    if page_index < FIRST_PAGE {
        return Err(QueryError::InvalidPageSpec(format!(
            "Page index must be at least {}, got {}",
            FIRST_PAGE, page_index
        )));
    }

    if page_size == 0 {
        return Err(QueryError::InvalidPageSpec(
            "Page size must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
