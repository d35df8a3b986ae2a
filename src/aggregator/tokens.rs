//! Merge token holdings that refer to the same token.
//!
//! The analysis service can report one token several times (once per
//! transfer source). Rows are grouped by identity key (contract
//! address, else symbol) and their balances summed.

use crate::parser::schema::{AggregatedHolding, TokenHolding};
use indexmap::IndexMap;
use log::{debug, warn};

/// Aggregate holdings by identity key
///
/// **Public** - main entry point for token aggregation
///
/// # Arguments
/// * `holdings` - Decoded holding rows, in API order
///
/// # Returns
/// One record per distinct identity key, ordered by first appearance.
/// Metadata (symbol, address, passthrough fields) comes from the first
/// row seen for the key.
///
/// Values that cannot be read as numbers are left out of the sum and
/// counted in `rejected_values`. A key with no readable value at all has
/// `value: None`.
pub fn aggregate_holdings(holdings: &[TokenHolding]) -> Vec<AggregatedHolding> {
    let mut grouped: IndexMap<Option<&str>, AggregatedHolding> = IndexMap::new();

    for holding in holdings {
        let key = holding.identity_key();
        let entry = grouped
            .entry(key)
            .or_insert_with(|| first_seen(holding, key));

        entry.holdings += 1;
        match holding.value.to_f64() {
            Some(value) => entry.value = Some(entry.value.unwrap_or(0.0) + value),
            None => entry.rejected_values += 1,
        }
    }

    let aggregated: Vec<AggregatedHolding> = grouped.into_values().collect();

    let rejected: usize = aggregated.iter().map(|a| a.rejected_values).sum();
    if rejected > 0 {
        warn!("{} token values could not be parsed and were left out", rejected);
    }
    debug!(
        "Aggregated {} holdings into {} tokens",
        holdings.len(),
        aggregated.len()
    );

    aggregated
}

/// Start an aggregate from the first row of its key
fn first_seen(holding: &TokenHolding, key: Option<&str>) -> AggregatedHolding {
    AggregatedHolding {
        identity_key: key.map(str::to_string),
        contract_address: holding.contract_address.clone(),
        token_symbol: holding.token_symbol.clone(),
        value: None,
        holdings: 0,
        rejected_values: 0,
        metadata: holding.metadata.clone(),
    }
}
