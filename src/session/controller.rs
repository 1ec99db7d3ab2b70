use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::clock::Clock;
use crate::models::{Ledger, ValidationError};
use crate::session::errors::SessionError;
use crate::session::event::{Credentials, WalletEvent};
use crate::session::transfer::{Receipt, TransferPhase, TransferWorkflow};
use crate::session::{SessionSettings, Transition};
use crate::types::{AuthMode, Gateway, SessionView, TransactionId};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %I:%M:%S %p";

#[derive(Debug, Clone)]
pub enum SessionState {
    LoggedOut {
        mode: AuthMode
    },
    Authenticating {
        mode: AuthMode,
        ready_at: Duration
    },
    LoggedIn(Box<Wallet>)
}

/// Everything that exists only while a user is logged in.
#[derive(Debug, Clone)]
pub struct Wallet {
    view: SessionView,
    ledger: Ledger,
    transfer: TransferWorkflow
}

impl Wallet {
    fn new(ledger: Ledger) -> Self {
        Self {
            view: SessionView::Dashboard,
            ledger,
            transfer: TransferWorkflow::new()
        }
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[cfg(test)]
    pub fn transfer(&self) -> &TransferWorkflow {
        &self.transfer
    }

    fn fire_due(&mut self, now: Duration, settings: &SessionSettings, rng: &mut StdRng) -> Option<Transition> {
        let deadline = self.transfer.deadline()?;
        if deadline > now {
            return None
        }

        match self.transfer.take_phase() {
            TransferPhase::Submitting { request, complete_at } => {
                let id = TransactionId::generate(rng);
                let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

                match self.ledger.withdraw(&request, id, timestamp) {
                    Ok(transaction) => {
                        let receipt = Receipt::from(transaction);
                        let transaction_id = receipt.transaction_id.clone();
                        self.transfer.succeed(receipt, complete_at + settings.latency.success_display);

                        Some(Transition::WithdrawalCommitted { transaction_id })
                    }
                    Err(error) => {
                        //NOTE: Unreachable while submit is the only writer, the guard already ran on entry.
                        error!("Withdrawal could not be committed: {error}");
                        self.reset_transfer();

                        Some(Transition::TransferReset)
                    }
                }
            }
            TransferPhase::Succeeded { .. } => {
                self.reset_transfer();

                Some(Transition::TransferReset)
            }
            TransferPhase::Idle => None
        }
    }

    fn reset_transfer(&mut self) {
        self.transfer.reset();
        self.view = SessionView::Dashboard;
    }
}

/// Single-user session context passed to every UI handler.
pub struct Session {
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    rng: StdRng,
    state: SessionState
}

impl Session {
    pub fn new(clock: Arc<dyn Clock>, settings: SessionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        Self {
            clock,
            settings,
            rng,
            state: SessionState::LoggedOut { mode: AuthMode::Login }
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn wallet(&self) -> Option<&Wallet> {
        match &self.state {
            SessionState::LoggedIn(wallet) => Some(wallet.as_ref()),
            _ => None
        }
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.wallet().map(|wallet| wallet.ledger.balance())
    }

    pub fn view(&self) -> Option<SessionView> {
        self.wallet().map(Wallet::view)
    }

    /// Applies one user interaction.
    ///
    /// # Errors
    /// Returns `SessionError::Validation` for input the user has to fix, and the
    /// other variants for interactions the current screen would not offer. In
    /// every error case the session is left unchanged.
    pub fn apply(&mut self, event: &WalletEvent) -> Result<(), SessionError> {
        match event {
            WalletEvent::SwitchAuthMode(mode) => self.switch_auth_mode(*mode),
            WalletEvent::SubmitCredentials(credentials) => self.submit_credentials(credentials),
            WalletEvent::Navigate(view) => self.navigate(*view),
            WalletEvent::QuickWithdraw(gateway) => self.quick_withdraw(*gateway),
            WalletEvent::SelectGateway(gateway) => self.select_gateway(*gateway),
            WalletEvent::SetAccountNumber(number) => self.set_account_number(number),
            WalletEvent::SetAmount(amount) => self.set_amount(amount),
            WalletEvent::SubmitWithdrawal => self.submit_withdrawal(),
            WalletEvent::Logout => self.logout()
        }
    }

    pub fn switch_auth_mode(&mut self, mode: AuthMode) -> Result<(), SessionError> {
        match &mut self.state {
            SessionState::LoggedOut { mode: current } => {
                *current = mode;
                Ok(())
            }
            SessionState::Authenticating { .. } => Err(SessionError::busy("switch forms", "authenticating")),
            SessionState::LoggedIn(_) => Err(SessionError::AlreadyLoggedIn)
        }
    }

    /// Starts the simulated sign-in. No credential is actually checked.
    pub fn submit_credentials(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        let mode = match self.state {
            SessionState::LoggedOut { mode } => mode,
            SessionState::Authenticating { .. } => return Err(SessionError::busy("sign in", "authenticating")),
            SessionState::LoggedIn(_) => return Err(SessionError::AlreadyLoggedIn)
        };

        if credentials.email.trim().is_empty() {
            return Err(ValidationError::EmailRequired.into())
        }

        if credentials.password.is_empty() {
            return Err(ValidationError::PasswordRequired.into())
        }

        if mode == AuthMode::Signup && credentials.password != credentials.confirm_password {
            return Err(ValidationError::PasswordMismatch.into())
        }

        let ready_at = self.clock.now() + self.settings.latency.authentication;
        self.state = SessionState::Authenticating { mode, ready_at };

        debug!("Authenticating in {mode:?} mode until {ready_at:?}");

        Ok(())
    }

    pub fn navigate(&mut self, view: SessionView) -> Result<(), SessionError> {
        self.wallet_mut()?.view = view;
        Ok(())
    }

    pub fn quick_withdraw(&mut self, gateway: Gateway) -> Result<(), SessionError> {
        let wallet = self.wallet_mut()?;
        wallet.transfer.select_gateway(gateway);
        wallet.view = SessionView::Transfer;
        Ok(())
    }

    pub fn select_gateway(&mut self, gateway: Gateway) -> Result<(), SessionError> {
        self.wallet_mut()?.transfer.select_gateway(gateway);
        Ok(())
    }

    pub fn set_account_number(&mut self, account_number: &str) -> Result<(), SessionError> {
        self.wallet_mut()?.transfer.set_account_number(account_number);
        Ok(())
    }

    pub fn set_amount(&mut self, amount: &str) -> Result<(), SessionError> {
        self.wallet_mut()?.transfer.set_amount(amount);
        Ok(())
    }

    /// Validates the withdrawal form and, if it passes, enters `Submitting`.
    ///
    /// The ledger is not touched until the submission delay has elapsed and
    /// [`Session::tick`] commits the request.
    pub fn submit_withdrawal(&mut self) -> Result<(), SessionError> {
        let now = self.clock.now();
        let minimum = self.settings.minimum_withdrawal;
        let submission = self.settings.latency.submission;
        let wallet = self.wallet_mut()?;

        if !wallet.transfer.is_idle() {
            return Err(SessionError::busy("submit a withdrawal", wallet.transfer.phase().name()))
        }

        let request = wallet.transfer.validate(&wallet.ledger, minimum)?;

        debug!("Submitting withdrawal of [{}] via [{}]", request.amount, request.gateway);

        wallet.transfer.begin(request, now + submission);

        Ok(())
    }

    /// Drops the profile, ledger and any in-flight withdrawal.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if !self.is_logged_in() {
            return Err(SessionError::NotLoggedIn)
        }

        self.state = SessionState::LoggedOut { mode: AuthMode::Login };

        Ok(())
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        match &self.state {
            SessionState::LoggedOut { .. } => None,
            SessionState::Authenticating { ready_at, .. } => Some(*ready_at),
            SessionState::LoggedIn(wallet) => wallet.transfer.deadline()
        }
    }

    /// Fires every timer that is due at the clock's current time, in order.
    pub fn tick(&mut self) -> Vec<Transition> {
        let mut fired = Vec::new();

        while let Some(transition) = self.fire_next_due() {
            debug!("Session transition: {transition:?}");
            fired.push(transition);
        }

        fired
    }

    fn fire_next_due(&mut self) -> Option<Transition> {
        let now = self.clock.now();

        if let SessionState::Authenticating { mode, ready_at } = self.state {
            if ready_at > now {
                return None
            }

            let ledger = Ledger::new(self.settings.new_profile());
            debug!("{mode:?} succeeded for [{}]", ledger.profile().name);
            self.state = SessionState::LoggedIn(Box::new(Wallet::new(ledger)));

            return Some(Transition::Authenticated)
        }

        if let SessionState::LoggedIn(wallet) = &mut self.state {
            return wallet.fire_due(now, &self.settings, &mut self.rng)
        }

        None
    }

    fn wallet_mut(&mut self) -> Result<&mut Wallet, SessionError> {
        match &mut self.state {
            SessionState::LoggedIn(wallet) => Ok(wallet.as_mut()),
            _ => Err(SessionError::NotLoggedIn)
        }
    }
}
