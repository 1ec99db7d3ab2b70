mod errors;
mod transaction_id;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use errors::ParseError;
pub use transaction_id::TransactionId;

pub type SessionId = u32;

/// Mobile-payment channel a withdrawal is routed through. Used only as a label.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Gateway {
    #[serde(rename = "bKash")]
    BKash,
    Nagad,
    Rocket
}

impl Gateway {
    pub const ALL: [Gateway; 3] = [Gateway::BKash, Gateway::Nagad, Gateway::Rocket];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::BKash => "bKash",
            Gateway::Nagad => "Nagad",
            Gateway::Rocket => "Rocket"
        }
    }
}

impl Display for Gateway {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Gateway {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Gateway::ALL.into_iter()
            .find(|gateway| gateway.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::UnknownGateway(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Processing
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionType {
    Withdraw,
    //NOTE: Never constructed. Kept so history rows can carry the tag if a peer-to-peer path is ever added.
    Transfer
}

/// Top-level screen shown while logged in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionView {
    #[default]
    Dashboard,
    Transfer,
    History
}

impl SessionView {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionView::Dashboard => "dashboard",
            SessionView::Transfer => "transfer",
            SessionView::History => "history"
        }
    }
}

impl Display for SessionView {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SessionView {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "dashboard" => Ok(SessionView::Dashboard),
            "transfer" => Ok(SessionView::Transfer),
            "history" => Ok(SessionView::History),
            other => Err(ParseError::UnknownView(other.to_string()))
        }
    }
}

/// Which credentials form is shown while logged out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Signup
}

impl FromStr for AuthMode {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "login" => Ok(AuthMode::Login),
            "signup" => Ok(AuthMode::Signup),
            other => Err(ParseError::UnknownAuthMode(other.to_string()))
        }
    }
}
