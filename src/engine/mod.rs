mod errors;
mod event_record;
mod replay_engine;

pub use event_record::EventRecord;
pub use replay_engine::ReplayEngine;
