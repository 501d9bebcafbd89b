use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{TransactionStatus, TransactionType};

/// A single transaction as reported by the backend.
///
/// Rows are owned by the backend and immutable once fetched; the client only
/// ever renders them. The `id` is opaque and never inspected beyond equality.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Backend-assigned unique identifier.
    pub id: String,
    /// Counterparty or payee name.
    pub name: String,
    /// Whether funds moved out of or into the account.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Signed amount in currency units.
    pub amount: Decimal,
    /// Processing outcome assigned by the backend.
    pub status: TransactionStatus,
    /// Free-text description.
    pub description: String,
    /// When the transaction took place.
    pub transaction_date: DateTime<Utc>
}
