mod errors;
mod ledger;
mod transaction;

use rust_decimal::Decimal;
use serde::Serialize;

pub use errors::ValidationError;
pub use ledger::Ledger;
pub use transaction::{Transaction, WithdrawalRequest};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub balance: Decimal
}

impl UserProfile {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance
        }
    }
}
