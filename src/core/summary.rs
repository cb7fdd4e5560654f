//! Workspace-wide totals and the recent-activity feed.

use crate::core::balance::{ensure_positive, ensure_same_workspace};
use crate::core::errors::LedgerError;
use crate::core::models::{Party, PartyBalance, Transaction, WorkspaceSummary};
use std::collections::HashMap;

/// Accumulates every transaction into a single workspace-wide pair.
///
/// Transactions whose party is not in `parties` contribute nothing. A
/// transaction pointing at a listed party from another workspace is rejected.
pub fn workspace_totals(parties: &[Party], transactions: &[Transaction]) -> Result<PartyBalance, LedgerError> {
    let index: HashMap<&str, &Party> = parties.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut totals = PartyBalance::default();
    for tx in transactions {
        match index.get(tx.party_id.as_str()) {
            Some(party) => {
                ensure_same_workspace(party, tx)?;
                totals.record(party.party_type, tx)?;
            }
            None => ensure_positive(tx)?,
        }
    }
    Ok(totals)
}

/// Totals computed over `recent` itself; `recent` is returned as given.
pub fn summarize(parties: &[Party], recent: Vec<Transaction>) -> Result<WorkspaceSummary, LedgerError> {
    let totals = workspace_totals(parties, &recent)?;
    Ok(WorkspaceSummary { totals, recent })
}

/// Totals over the full `history`, feed from the separately bounded `recent`.
pub fn summarize_with_history(
    parties: &[Party],
    history: &[Transaction],
    recent: Vec<Transaction>,
) -> Result<WorkspaceSummary, LedgerError> {
    let totals = workspace_totals(parties, history)?;
    Ok(WorkspaceSummary { totals, recent })
}
