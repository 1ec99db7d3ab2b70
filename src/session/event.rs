use crate::types::{AuthMode, Gateway, SessionView};

#[derive(Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Only consulted in sign-up mode.
    pub confirm_password: String
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into()
        }
    }
}

/// A single user interaction with the wallet UI.
#[derive(Clone)]
pub enum WalletEvent {
    SwitchAuthMode(AuthMode),
    SubmitCredentials(Credentials),
    Navigate(SessionView),
    /// Dashboard shortcut: picks the gateway and opens the transfer screen.
    QuickWithdraw(Gateway),
    SelectGateway(Gateway),
    SetAccountNumber(String),
    SetAmount(String),
    SubmitWithdrawal,
    Logout
}

impl WalletEvent {
    //NOTE: Events are logged by name only so credentials never end up in the logs.
    pub fn name(&self) -> &'static str {
        match self {
            WalletEvent::SwitchAuthMode(_) => "mode",
            WalletEvent::SubmitCredentials(_) => "credentials",
            WalletEvent::Navigate(_) => "navigate",
            WalletEvent::QuickWithdraw(_) => "quick",
            WalletEvent::SelectGateway(_) => "gateway",
            WalletEvent::SetAccountNumber(_) => "account",
            WalletEvent::SetAmount(_) => "amount",
            WalletEvent::SubmitWithdrawal => "withdraw",
            WalletEvent::Logout => "logout"
        }
    }
}
