use crate::storage::{SessionReport, Storage};
use crate::types::SessionId;
#[cfg(test)]
use dashmap::iter::Iter;
use dashmap::DashMap;
use std::sync::Arc;

pub struct SessionStorage {
    reports: Arc<DashMap<SessionId, SessionReport>>
}

impl SessionStorage {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(DashMap::new())
        }
    }

    #[cfg(test)]
    pub fn load(&self, session_id: SessionId) -> Option<SessionReport> {
        self.reports.get(&session_id).map(|report| report.value().clone())
    }

    #[cfg(test)]
    pub fn iter(&self) -> Iter<'_, SessionId, SessionReport> {
        self.reports.iter()
    }

    /// Reports ordered by session id, for stable output.
    pub fn sorted(&self) -> Vec<SessionReport> {
        let mut reports: Vec<_> = self.reports.iter().map(|item| item.value().clone()).collect();
        reports.sort_by_key(|report| report.session_id);
        reports
    }
}

impl Storage for SessionStorage {
    fn save(&self, session_id: SessionId, report: SessionReport) {
        self.reports.insert(session_id, report);
    }
}
