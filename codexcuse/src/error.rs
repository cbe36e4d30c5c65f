//! Error types for the excuse store and its HTTP surface.

use common::StorageError;
use thiserror::Error;

/// All errors surfaced by [`ExcuseStore`](crate::ExcuseStore) operations and
/// request parsing.
///
/// A missing record is not an error: lookups return `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The backend could not be created or is unreachable.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend read failed or timed out.
    #[error("{op} failed on {key}: {message}")]
    ReadFailed {
        op: &'static str,
        key: String,
        message: String,
    },

    /// A backend write failed or timed out.
    #[error("{op} failed on {key}: {message}")]
    WriteFailed {
        op: &'static str,
        key: String,
        message: String,
    },

    /// A record could not be serialized or a stored value could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Malformed request input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required fields are missing. Lists every violation.
    #[error("invalid arguments: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),
}

impl Error {
    pub(crate) fn read(op: &'static str, key: &str, err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => Error::BackendUnavailable(msg),
            other => Error::ReadFailed {
                op,
                key: key.to_string(),
                message: other.to_string(),
            },
        }
    }

    pub(crate) fn write(op: &'static str, key: &str, err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => Error::BackendUnavailable(msg),
            other => Error::WriteFailed {
                op,
                key: key.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
