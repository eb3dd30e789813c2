//! Errors raised by catalog sources.

use catalog::DataError;
use thiserror::Error;

/// A source could not produce its collection.
///
/// Callers treat every variant the same way: the affected collection is
/// considered empty and the failure is reported next to the results.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: DataError,
    },

    #[error("{endpoint} is unavailable: {reason}")]
    Unavailable { endpoint: String, reason: String },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. }
            | FetchError::Unavailable { endpoint, .. } => endpoint,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
