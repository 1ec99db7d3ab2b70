use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::clock::Clock;

/// Virtual clock that only moves when told to.
///
/// `sleep_until` jumps straight to the deadline, which lets a scripted
/// session run through every simulated delay instantly.
pub struct ManualClock {
    elapsed_ms: AtomicU64
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            elapsed_ms: AtomicU64::new(0)
        }
    }

    #[cfg(test)]
    pub fn advance(&self, by: Duration) {
        self.elapsed_ms.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    fn advance_to(&self, deadline: Duration) {
        self.elapsed_ms.fetch_max(deadline.as_millis() as u64, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }

    async fn sleep_until(&self, deadline: Duration) {
        self.advance_to(deadline);
    }
}
