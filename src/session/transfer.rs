use std::mem;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::models::{Ledger, Transaction, ValidationError, WithdrawalRequest};
use crate::types::{Gateway, TransactionId};

/// Raw contents of the withdrawal form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub gateway: Option<Gateway>,
    pub account_number: String,
    pub amount: String
}

/// What the success screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: TransactionId,
    pub gateway: Gateway,
    pub amount: Decimal,
    pub account_number: String
}

impl From<&Transaction> for Receipt {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_id: transaction.id.clone(),
            gateway: transaction.gateway,
            amount: transaction.amount,
            account_number: transaction.account_number.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransferPhase {
    #[default]
    Idle,
    Submitting {
        request: WithdrawalRequest,
        complete_at: Duration
    },
    Succeeded {
        receipt: Receipt,
        until: Duration
    }
}

impl TransferPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TransferPhase::Idle => "idle",
            TransferPhase::Submitting { .. } => "submitting",
            TransferPhase::Succeeded { .. } => "showing a receipt"
        }
    }
}

/// Withdrawal form plus the `Idle -> Submitting -> Succeeded -> Idle` cycle.
#[derive(Debug, Clone, Default)]
pub struct TransferWorkflow {
    form: TransferForm,
    phase: TransferPhase
}

impl TransferWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    pub fn phase(&self) -> &TransferPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TransferPhase::Idle
    }

    pub fn select_gateway(&mut self, gateway: Gateway) {
        self.form.gateway = Some(gateway);
    }

    pub fn set_account_number(&mut self, account_number: impl Into<String>) {
        self.form.account_number = account_number.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.form.amount = amount.into();
    }

    /// Runs the submission guard against the current form and ledger.
    ///
    /// Checks run in form order: gateway, account number, amount presence,
    /// amount format, sign, minimum, and finally available balance.
    pub fn validate(&self, ledger: &Ledger, minimum: Decimal) -> Result<WithdrawalRequest, ValidationError> {
        let Some(gateway) = self.form.gateway else {
            return Err(ValidationError::GatewayRequired)
        };

        let account_number = self.form.account_number.trim();
        if account_number.is_empty() {
            return Err(ValidationError::AccountNumberRequired)
        }

        let raw_amount = self.form.amount.trim();
        if raw_amount.is_empty() {
            return Err(ValidationError::AmountRequired)
        }

        let amount = Decimal::from_str(raw_amount)
            .map_err(|_| ValidationError::InvalidAmount { value: raw_amount.to_string() })?;

        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount { amount })
        }

        if amount < minimum {
            return Err(ValidationError::below_minimum(amount, minimum))
        }

        ledger.ensure_funds(amount)?;

        Ok(WithdrawalRequest {
            gateway,
            account_number: account_number.to_string(),
            amount
        })
    }

    pub fn begin(&mut self, request: WithdrawalRequest, complete_at: Duration) {
        self.phase = TransferPhase::Submitting { request, complete_at };
    }

    pub fn succeed(&mut self, receipt: Receipt, until: Duration) {
        self.phase = TransferPhase::Succeeded { receipt, until };
    }

    /// Clears the form and gateway and goes back to `Idle`.
    pub fn reset(&mut self) {
        self.form = TransferForm::default();
        self.phase = TransferPhase::Idle;
    }

    pub fn take_phase(&mut self) -> TransferPhase {
        mem::take(&mut self.phase)
    }

    pub fn deadline(&self) -> Option<Duration> {
        match self.phase {
            TransferPhase::Idle => None,
            TransferPhase::Submitting { complete_at, .. } => Some(complete_at),
            TransferPhase::Succeeded { until, .. } => Some(until)
        }
    }
}
