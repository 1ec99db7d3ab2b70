use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown gateway '{0}', expected one of bKash, Nagad, Rocket")]
    UnknownGateway(String),
    #[error("Unknown view '{0}', expected one of dashboard, transfer, history")]
    UnknownView(String),
    #[error("Unknown auth mode '{0}', expected login or signup")]
    UnknownAuthMode(String),
    #[error("Unknown clock mode '{0}', expected system or virtual")]
    UnknownClockMode(String)
}
