use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `Gave`: the workspace disbursed money to the party. `Got`: it received money.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Gave,
    Got,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub workspace_id: String,
    pub party_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub amount: Decimal,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_image_url: Option<String>,
    pub created_by: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when recording a transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub direction: Direction,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub bill_image_url: Option<String>,
}

/// Partial overwrite of a transaction. `None` keeps the stored value; an empty
/// string for `description` or `bill_image_url` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionChanges {
    pub amount: Option<Decimal>,
    pub direction: Option<Direction>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub bill_image_url: Option<String>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.direction.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.bill_image_url.is_none()
    }

    pub fn apply_to(self, tx: &mut Transaction) {
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(direction) = self.direction {
            tx.direction = direction;
        }
        if let Some(description) = self.description {
            tx.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(url) = self.bill_image_url {
            tx.bill_image_url = Some(url).filter(|u| !u.is_empty());
        }
    }
}
