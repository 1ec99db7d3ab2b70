//! The wallet's view-state machine.
//!
//! A [`Session`] is the explicit context object every UI handler operates on:
//! authentication state, the active screen, the in-memory ledger and the
//! withdrawal workflow. Simulated network latency is expressed as deadlines on
//! an injected [`Clock`](crate::clock::Clock) and fired by [`Session::tick`].

mod controller;
mod errors;
mod event;
mod transfer;

use std::time::Duration;

use rust_decimal::Decimal;

use crate::models::UserProfile;
use crate::types::TransactionId;

pub use controller::Session;
pub use event::{Credentials, WalletEvent};

/// Number of transactions the dashboard lists before linking to history.
pub const DASHBOARD_RECENT_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub authentication: Duration,
    pub submission: Duration,
    pub success_display: Duration
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            authentication: Duration::from_millis(1500),
            submission: Duration::from_millis(2500),
            success_display: Duration::from_millis(3000)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub latency: Latency,
    pub profile_name: String,
    pub opening_balance: Decimal,
    pub minimum_withdrawal: Decimal,
    /// Fixes the transaction id sequence. `None` seeds from the OS.
    pub seed: Option<u64>
}

impl SessionSettings {
    pub fn new_profile(&self) -> UserProfile {
        UserProfile::new(self.profile_name.clone(), self.opening_balance)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            latency: Latency::default(),
            profile_name: "Demo User".to_string(),
            opening_balance: Decimal::new(5_000_000, 2),
            minimum_withdrawal: Decimal::new(100, 0),
            seed: None
        }
    }
}

/// A timer-driven state change reported by [`Session::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Authenticated,
    WithdrawalCommitted {
        transaction_id: TransactionId
    },
    TransferReset
}
