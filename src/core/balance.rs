//! Per-party balance computation.
//!
//! Every transaction lands in exactly one of two buckets, `will_give` or
//! `will_get`, chosen by the party's type and the transaction's direction.
//! The buckets are summed independently and never netted here.

use crate::core::errors::LedgerError;
use crate::core::models::{Direction, Party, PartyBalance, PartyType, PartyWithTotals, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceBucket {
    WillGive,
    WillGet,
}

// Rows: customer, supplier. Columns: gave, got.
const SIGN_TABLE: [[BalanceBucket; 2]; 2] = [
    [BalanceBucket::WillGet, BalanceBucket::WillGive],
    [BalanceBucket::WillGive, BalanceBucket::WillGet],
];

pub fn bucket_for(party_type: PartyType, direction: Direction) -> BalanceBucket {
    let row = match party_type {
        PartyType::Customer => 0,
        PartyType::Supplier => 1,
    };
    let col = match direction {
        Direction::Gave => 0,
        Direction::Got => 1,
    };
    SIGN_TABLE[row][col]
}

impl PartyBalance {
    /// Adds one transaction's amount to the bucket selected by `party_type`.
    pub fn record(&mut self, party_type: PartyType, tx: &Transaction) -> Result<(), LedgerError> {
        ensure_positive(tx)?;
        let bucket = match bucket_for(party_type, tx.direction) {
            BalanceBucket::WillGive => &mut self.will_give,
            BalanceBucket::WillGet => &mut self.will_get,
        };
        *bucket = bucket
            .checked_add(tx.amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(tx.id.clone()))?;
        Ok(())
    }
}

pub(crate) fn ensure_positive(tx: &Transaction) -> Result<(), LedgerError> {
    if tx.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(tx.id.clone()));
    }
    Ok(())
}

pub(crate) fn ensure_same_workspace(party: &Party, tx: &Transaction) -> Result<(), LedgerError> {
    if party.workspace_id != tx.workspace_id {
        return Err(LedgerError::CrossWorkspaceReference {
            transaction_id: tx.id.clone(),
            party_id: party.id.clone(),
        });
    }
    Ok(())
}

/// Sums `transactions` into a [`PartyBalance`] using the rule for `party_type`.
///
/// The input may be a party's full history or any subset of it; the result only
/// reflects what is passed in.
pub fn compute_party_balance<'a, I>(party_type: PartyType, transactions: I) -> Result<PartyBalance, LedgerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut balance = PartyBalance::default();
    for tx in transactions {
        balance.record(party_type, tx)?;
    }
    Ok(balance)
}

/// One row per party, in the order given, with its totals.
///
/// Transactions whose party is not in `parties` are ignored, so a type-filtered
/// party list can be paired with a workspace-wide transaction set. A transaction
/// pointing at a listed party from a different workspace is rejected.
pub fn list_parties_with_totals(
    parties: &[Party],
    transactions: &[Transaction],
) -> Result<Vec<PartyWithTotals>, LedgerError> {
    let index: HashMap<&str, &Party> = parties.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut totals: HashMap<&str, PartyBalance> = HashMap::with_capacity(parties.len());

    for tx in transactions {
        let Some(party) = index.get(tx.party_id.as_str()) else {
            continue;
        };
        ensure_same_workspace(party, tx)?;
        totals.entry(party.id.as_str()).or_default().record(party.party_type, tx)?;
    }

    Ok(parties
        .iter()
        .map(|party| PartyWithTotals {
            party: party.clone(),
            balance: totals.get(party.id.as_str()).copied().unwrap_or_default(),
        })
        .collect())
}
