//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while decoding catalog collections.
#[derive(Error, Debug)]
pub enum DataError {
    /// A response body was not a valid JSON array of the expected rows
    #[error("Failed to decode {collection}: {source}")]
    Json {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;

/// Returned when a sort option does not name a known criterion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort criterion '{0}' (expected none, release-date or rating)")]
pub struct UnknownSortCriterion(pub String);
