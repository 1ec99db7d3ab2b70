use std::str::FromStr;

use serde::Deserialize;

use crate::engine::errors::EventError;
use crate::session::{Credentials, WalletEvent};
use crate::types::{AuthMode, Gateway, ParseError, SessionId, SessionView};

/// One row of a replay script.
///
/// ```text
/// session,event,value,secret,confirm
/// 1,credentials,user@example.com,hunter2,
/// 1,quick,bKash,,
/// 1,account,01700000000,,
/// 1,amount,100,,
/// 1,withdraw,,,
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub session: SessionId,
    pub event: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Password for `credentials` rows.
    #[serde(default)]
    pub secret: Option<String>,
    /// Password confirmation for `credentials` rows in sign-up mode.
    #[serde(default)]
    pub confirm: Option<String>
}

impl EventRecord {
    pub fn into_event(self) -> Result<WalletEvent, EventError> {
        let session_id = self.session;
        let name = self.event.to_lowercase();

        let event = match name.as_str() {
            "mode" => WalletEvent::SwitchAuthMode(parse_value::<AuthMode>(session_id, "mode", self.value)?),
            "credentials" => WalletEvent::SubmitCredentials(Credentials::new(
                self.value.unwrap_or_default(),
                self.secret.unwrap_or_default(),
                self.confirm.unwrap_or_default()
            )),
            "navigate" => WalletEvent::Navigate(parse_value::<SessionView>(session_id, "navigate", self.value)?),
            "quick" => WalletEvent::QuickWithdraw(parse_value::<Gateway>(session_id, "quick", self.value)?),
            "gateway" => WalletEvent::SelectGateway(parse_value::<Gateway>(session_id, "gateway", self.value)?),
            "account" => WalletEvent::SetAccountNumber(self.value.unwrap_or_default()),
            "amount" => WalletEvent::SetAmount(self.value.unwrap_or_default()),
            "withdraw" => WalletEvent::SubmitWithdrawal,
            "logout" => WalletEvent::Logout,
            _ => return Err(EventError::UnknownEvent { session_id, event: self.event })
        };

        Ok(event)
    }
}

fn parse_value<T>(session_id: SessionId, event: &'static str, value: Option<String>) -> Result<T, EventError>
where
    T: FromStr<Err = ParseError>
{
    let value = value.ok_or(EventError::MissingValue { session_id, event })?;

    T::from_str(&value).map_err(|source| EventError::InvalidValue { session_id, source })
}
