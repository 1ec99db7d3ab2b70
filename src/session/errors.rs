use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("A user is already logged in")]
    AlreadyLoggedIn,
    #[error("Cannot {action} while {state}")]
    Busy {
        action: &'static str,
        state: &'static str
    }
}

impl SessionError {
    pub fn busy(action: &'static str, state: &'static str) -> Self {
        Self::Busy { action, state }
    }

    /// Whether the user would see this as a blocking alert.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
