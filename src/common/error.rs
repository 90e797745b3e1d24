//! Error types for minicontacts

use mongodb::error::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Network Errors ===
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation timeout: {0}")]
    Timeout(String),

    // === Query Errors ===
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed document: {0}")]
    Decode(String),

    #[error("Contact not found: {0}")]
    NotFound(String),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Did a lookup come back empty?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Should the process give up on this error?
    ///
    /// Only an empty lookup can be handled locally; everything else ends the run.
    pub fn is_fatal(&self) -> bool {
        !self.is_not_found()
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => Error::Connection(e.to_string()),
            ErrorKind::BsonDeserialization(_) => Error::Decode(e.to_string()),
            _ => Error::Query(e.to_string()),
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
