use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::models::errors::ValidationError;
use crate::models::{Transaction, UserProfile, WithdrawalRequest};
use crate::types::{TransactionId, TransactionStatus, TransactionType};

/// Balance and history of the single demo user.
///
/// The ledger only ever shrinks the balance, and only through [`Ledger::withdraw`],
/// which re-checks the funds guard before committing.
#[derive(Debug, Clone)]
pub struct Ledger {
    profile: UserProfile,
    /// Most recent first.
    transactions: VecDeque<Transaction>
}

impl Ledger {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            transactions: VecDeque::new()
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn balance(&self) -> Decimal {
        self.profile.balance
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// The slice of history the dashboard shows.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().take(limit)
    }

    pub fn ensure_funds(&self, amount: Decimal) -> Result<(), ValidationError> {
        if amount > self.profile.balance {
            return Err(ValidationError::insufficient_funds(amount, self.profile.balance))
        }

        Ok(())
    }

    /// Debits the balance and records the withdrawal at the head of the history.
    ///
    /// # Errors
    /// Returns `ValidationError::InsufficientFunds` and leaves the ledger untouched
    /// if the amount exceeds the current balance.
    pub fn withdraw(&mut self, request: &WithdrawalRequest, id: TransactionId, timestamp: String) -> Result<&Transaction, ValidationError> {
        self.ensure_funds(request.amount)?;

        self.profile.balance -= request.amount;
        self.transactions.push_front(Transaction {
            id,
            gateway: request.gateway,
            amount: request.amount,
            account_number: request.account_number.clone(),
            status: TransactionStatus::Success,
            timestamp,
            transaction_type: TransactionType::Withdraw
        });

        Ok(&self.transactions[0])
    }
}
