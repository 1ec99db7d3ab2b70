use rust_decimal::Decimal;
use thiserror::Error;

/// A form input that blocks a transition. Surfaced to the user as an alert.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email address is required")]
    EmailRequired,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Select a gateway before sending money")]
    GatewayRequired,
    #[error("Account number is required")]
    AccountNumberRequired,
    #[error("Amount is required")]
    AmountRequired,
    #[error("Amount [{value}] is not a valid number")]
    InvalidAmount {
        value: String
    },
    #[error("Amount [{amount}] must be positive")]
    NonPositiveAmount {
        amount: Decimal
    },
    #[error("Amount [{amount}] is below the minimum withdrawal of [{minimum}]")]
    BelowMinimum {
        amount: Decimal,
        minimum: Decimal
    },
    #[error("Insufficient balance: requested [{amount}] but only [{balance}] is available")]
    InsufficientFunds {
        amount: Decimal,
        balance: Decimal
    }
}

impl ValidationError {
    pub fn insufficient_funds(amount: Decimal, balance: Decimal) -> Self {
        Self::InsufficientFunds { amount, balance }
    }

    pub fn below_minimum(amount: Decimal, minimum: Decimal) -> Self {
        Self::BelowMinimum { amount, minimum }
    }
}
