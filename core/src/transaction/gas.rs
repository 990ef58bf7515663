//! Intrinsic gas: what a transaction costs before any contract code runs.

use super::types::Clause;
use crate::config::{
    CLAUSE_GAS, CLAUSE_GAS_CONTRACT_CREATION, NON_ZERO_GAS_DATA, TX_GAS, ZERO_GAS_DATA,
};

/// Intrinsic gas of a clause list.
///
/// A transaction with no clauses is still charged as if it carried one
/// empty call.
pub fn intrinsic_gas(clauses: &[Clause]) -> u64 {
    if clauses.is_empty() {
        return TX_GAS + CLAUSE_GAS;
    }
    clauses.iter().fold(TX_GAS, |total, clause| {
        let base = if clause.is_contract_creation() {
            CLAUSE_GAS_CONTRACT_CREATION
        } else {
            CLAUSE_GAS
        };
        total
            .saturating_add(base)
            .saturating_add(data_gas(&clause.data))
    })
}

fn data_gas(data: &[u8]) -> u64 {
    data.iter()
        .map(|b| if *b == 0 { ZERO_GAS_DATA } else { NON_ZERO_GAS_DATA })
        .fold(0u64, u64::saturating_add)
}
