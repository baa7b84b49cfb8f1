//! Persistence error classification.
//!
//! Driver errors are folded into [`StoreError`] by inspecting the server
//! error code, then mapped to a stable `(status, message)` pair.

use axum::http::StatusCode;
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};
use thiserror::Error;

use crate::config::{DUPLICATE_KEY_ERROR_CODE, DUPLICATE_KEY_MESSAGE, INTERNAL_ERROR_MESSAGE};

/// Failure raised by the persistence layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write (e.g. `email` already taken)
    #[error("duplicate key: {message}")]
    DuplicateKey { message: String },

    #[error("database unavailable: {message}")]
    Unavailable { message: String },

    #[error("database error: {message}")]
    Driver { message: String },
}

impl StoreError {
    pub fn duplicate_key(message: impl Into<String>) -> Self {
        StoreError::DuplicateKey {
            message: message.into(),
        }
    }

    pub fn driver(message: impl Into<String>) -> Self {
        StoreError::Driver {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

impl From<DriverError> for StoreError {
    fn from(err: DriverError) -> Self {
        if server_error_code(&err) == Some(DUPLICATE_KEY_ERROR_CODE) {
            return StoreError::duplicate_key(err.to_string());
        }

        match err.kind.as_ref() {
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                StoreError::unavailable(err.to_string())
            }
            _ => StoreError::driver(err.to_string()),
        }
    }
}

/// Server-side error code carried by write and command failures.
fn server_error_code(err: &DriverError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

/// Stable HTTP projection of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub status: StatusCode,
    pub message: &'static str,
}

/// Map a persistence failure to the status and message sent to clients.
pub fn classify(err: &StoreError) -> Classified {
    match err {
        StoreError::DuplicateKey { .. } => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: DUPLICATE_KEY_MESSAGE,
        },
        StoreError::Unavailable { .. } | StoreError::Driver { .. } => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE,
        },
    }
}
