use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;
use crate::session::{Session, DASHBOARD_RECENT_LIMIT};
use crate::types::{SessionId, SessionView, TransactionId};

/// What is left of a scripted session once its event stream ends.
///
/// The wallet fields are `None` or empty when the session ended logged out.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub logged_in: bool,
    pub profile_name: Option<String>,
    pub view: Option<SessionView>,
    pub balance: Option<Decimal>,
    /// Most recent first.
    pub transactions: Vec<Transaction>,
    /// Ids the dashboard lists, most recent first.
    pub recent: Vec<TransactionId>,
    /// Messages the user would have seen as blocking alerts.
    pub alerts: Vec<String>
}

impl SessionReport {
    #[cfg(test)]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            logged_in: false,
            profile_name: None,
            view: None,
            balance: None,
            transactions: Vec::new(),
            recent: Vec::new(),
            alerts: Vec::new()
        }
    }

    pub fn capture(session_id: SessionId, session: &Session, alerts: Vec<String>) -> Self {
        let wallet = session.wallet();
        let ledger = wallet.map(|wallet| wallet.ledger());

        Self {
            session_id,
            logged_in: session.is_logged_in(),
            profile_name: ledger.map(|ledger| ledger.profile().name.clone()),
            view: session.view(),
            balance: session.balance(),
            transactions: ledger
                .map(|ledger| ledger.transactions().cloned().collect())
                .unwrap_or_default(),
            recent: ledger
                .map(|ledger| ledger.recent(DASHBOARD_RECENT_LIMIT).map(|transaction| transaction.id.clone()).collect())
                .unwrap_or_default(),
            alerts
        }
    }
}
