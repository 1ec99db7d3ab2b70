mod session_report;
mod session_storage;
#[cfg(test)]
mod tests;

use crate::types::SessionId;

pub use session_report::SessionReport;
pub use session_storage::SessionStorage;

pub trait Storage: Send + Sync + 'static {
    fn save(&self, session_id: SessionId, report: SessionReport);
}
