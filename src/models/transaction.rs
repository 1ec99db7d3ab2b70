use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Gateway, TransactionId, TransactionStatus, TransactionType};

/// A committed ledger entry. Never mutated after it is built.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub gateway: Gateway,
    pub amount: Decimal,
    pub account_number: String,
    pub status: TransactionStatus,
    /// Local wall time at commit, already formatted for display.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType
}

/// A withdrawal that passed form validation and is waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub gateway: Gateway,
    pub account_number: String,
    pub amount: Decimal
}
