use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::session::{Session, SessionSettings, Transition, WalletEvent};
use crate::storage::{SessionReport, Storage};
use crate::types::SessionId;

/// Owns one [`Session`] and applies its events strictly in arrival order.
///
/// After every event the actor waits out any simulated latency the event
/// started, so the next event always sees the session at rest.
pub struct SessionActor {
    sender: mpsc::UnboundedSender<WalletEvent>,
    handle: JoinHandle<()>
}

impl SessionActor {
    /// Spawns a new actor task for the session.
    pub fn new<S: Storage>(session_id: SessionId, storage: Arc<S>, clock: Arc<dyn Clock>, settings: SessionSettings) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<WalletEvent>();

        let handle = spawn(async move {
            let mut session = Session::new(clock.clone(), settings);
            let mut alerts = Vec::new();

            while let Some(event) = receiver.recv().await {
                match session.apply(&event) {
                    Ok(_) => {
                        debug!("Event [{}] for session [{session_id}] applied", event.name());
                    },
                    Err(error) if error.is_alert() => {
                        warn!("Alert for session [{session_id}] on [{}]: {error}", event.name());
                        alerts.push(error.to_string());
                    },
                    Err(error) => {
                        warn!("Event [{}] for session [{session_id}] ignored: {error}", event.name());
                    }
                }

                settle(session_id, &mut session, clock.as_ref()).await;
            }

            storage.save(session_id, SessionReport::capture(session_id, &session, alerts));
        });

        Self {
            sender,
            handle
        }
    }

    /// Queues an event. Returns `false` if the actor is no longer running.
    pub fn accept(&self, event: &WalletEvent) -> bool {
        self.sender.send(event.clone()).is_ok()
    }

    /// Closes the queue and waits for the remaining events and the final save.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}

async fn settle(session_id: SessionId, session: &mut Session, clock: &dyn Clock) {
    while let Some(deadline) = session.next_deadline() {
        clock.sleep_until(deadline).await;

        for transition in session.tick() {
            if let Transition::WithdrawalCommitted { transaction_id } = transition {
                debug!("Withdrawal [{transaction_id}] committed for session [{session_id}]");
            }
        }
    }
}
