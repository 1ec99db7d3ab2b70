use thiserror::Error;

use crate::types::{ParseError, SessionId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Unknown event '{event}' for session [{session_id}]")]
    UnknownEvent {
        session_id: SessionId,
        event: String
    },
    #[error("Event '{event}' for session [{session_id}] requires a value")]
    MissingValue {
        session_id: SessionId,
        event: &'static str
    },
    #[error("Event for session [{session_id}] has an invalid value: {source}")]
    InvalidValue {
        session_id: SessionId,
        source: ParseError
    }
}
