use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep_until, Instant};

use crate::clock::Clock;

/// Wall time backed by tokio's timer.
pub struct SystemClock {
    origin: Instant
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now()
        }
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep_until(&self, deadline: Duration) {
        sleep_until(self.origin + deadline).await;
    }
}
