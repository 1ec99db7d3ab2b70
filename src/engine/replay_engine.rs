use crate::actors::SessionActor;
use crate::clock::ClockMode;
use crate::engine::EventRecord;
use crate::session::{SessionSettings, WalletEvent};
use crate::storage::SessionStorage;
use crate::types::SessionId;
use csv::{ReaderBuilder, Trim};
use futures::future::join_all;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, warn};

/// Replays scripted wallet sessions from a CSV file.
///
/// Each session id gets its own [`SessionActor`], so independent sessions run
/// concurrently while the events of any one session stay strictly ordered.
pub struct ReplayEngine {
    storage: Arc<SessionStorage>,
    settings: SessionSettings,
    clock_mode: ClockMode,
    backpressure: usize
}

impl ReplayEngine {
    pub fn new(storage: Arc<SessionStorage>, settings: SessionSettings) -> Self {
        Self {
            storage,
            settings,
            clock_mode: ClockMode::default(),
            backpressure: 256
        }
    }

    pub fn with_clock_mode(mut self, clock_mode: ClockMode) -> Self {
        self.clock_mode = clock_mode;
        self
    }

    /// Reads the script at `path` and waits until every session has been saved.
    pub async fn run(&self, path: &str) -> anyhow::Result<()> {
        let (sender, receiver) = mpsc::channel::<(SessionId, WalletEvent)>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let processing_result = self.process_events(receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        processing_result
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<(SessionId, WalletEvent)>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<EventRecord>() {
                let record = match result {
                    Ok(record) => record,
                    Err(error) => {
                        error!("CSV deserialization error: {error}");
                        continue;
                    }
                };

                let session_id = record.session;

                match record.into_event() {
                    Ok(event) => {
                        if sender.blocking_send((session_id, event)).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!("Skipping script row: {error}");
                    }
                }
            }
        })
    }

    async fn process_events(&self, mut receiver: mpsc::Receiver<(SessionId, WalletEvent)>) -> anyhow::Result<()> {
        let mut actors = HashMap::<SessionId, SessionActor>::new();

        while let Some((session_id, event)) = receiver.recv().await {
            let actor = actors.entry(session_id).or_insert_with(|| {
                SessionActor::new(session_id, self.storage.clone(), self.clock_mode.create(), self.settings.clone())
            });

            if !actor.accept(&event) {
                error!("Session actor [{session_id}] could not accept event [{}]", event.name());
            }
        }

        //NOTE: Closing every queue lets each actor drain its remaining events before saving its report
        let despawns = actors.into_values().map(|actor| actor.despawn());

        for result in join_all(despawns).await {
            if let Err(error) = result {
                error!("A session actor did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}
