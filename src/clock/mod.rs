//! Time source for simulated latency.
//!
//! Deadlines are expressed as offsets from the clock's own origin, so a
//! [`ManualClock`] can stand in for real time without touching tokio's timer.

mod manual_clock;
mod system_clock;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::types::ParseError;

pub use manual_clock::ManualClock;
pub use system_clock::SystemClock;

#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Suspends until `now() >= deadline`. Returns immediately for past deadlines.
    async fn sleep_until(&self, deadline: Duration);
}

/// Which clock a replayed session runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// Simulated latency takes real time.
    #[default]
    System,
    /// Simulated latency is skipped over instantly.
    Virtual
}

impl ClockMode {
    /// A fresh clock with its origin at the moment of the call.
    pub fn create(&self) -> Arc<dyn Clock> {
        match self {
            ClockMode::System => Arc::new(SystemClock::new()),
            ClockMode::Virtual => Arc::new(ManualClock::new())
        }
    }
}

impl FromStr for ClockMode {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "system" => Ok(ClockMode::System),
            "virtual" => Ok(ClockMode::Virtual),
            _ => Err(ParseError::UnknownClockMode(value.to_string()))
        }
    }
}
