use super::party::Party;
use super::transaction::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartyBalance {
    /// Amount the workspace owes the party.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub will_give: Decimal,
    /// Amount the party owes the workspace.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub will_get: Decimal,
}

impl PartyBalance {
    pub fn new(will_give: Decimal, will_get: Decimal) -> Self {
        PartyBalance { will_give, will_get }
    }

    /// `will_get - will_give`, for display only.
    pub fn net(&self) -> Decimal {
        self.will_get - self.will_give
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PartyWithTotals {
    #[serde(flatten)]
    pub party: Party,
    #[serde(flatten)]
    pub balance: PartyBalance,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WorkspaceSummary {
    pub totals: PartyBalance,
    pub recent: Vec<Transaction>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PartyDetail {
    #[serde(flatten)]
    pub party: Party,
    pub balance: PartyBalance,
    pub transactions: Vec<Transaction>,
}
