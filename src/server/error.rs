use std::io;

use thiserror::Error;

/// Rejections raised by the [`Store`](super::Store) itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Error: Key is too long. Maximum length is {max} characters")]
    KeyTooLong { key: String, max: usize },
}

/// Malformed commands. The `Display` text is what the client receives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid GET command. Format: GET <key>")]
    InvalidGet,
    #[error("Invalid PUT command. Format: PUT <key> <value>")]
    InvalidPut,
    #[error("Invalid DELETE command. Format: DELETE <key>")]
    InvalidDelete,
    #[error("Invalid SELECTED command. Format: SELECTED <key>")]
    InvalidSelected,
    #[error("Invalid command")]
    UnknownCommand,
}

/// Failures that end a single session. Never surfaced to other sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Listener failures. Fatal for the whole process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
