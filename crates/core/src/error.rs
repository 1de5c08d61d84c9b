//! Error types for the launch catalog pipeline.

use thiserror::Error;

/// Result type alias for catalog retrieval.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while retrieving the remote catalog.
///
/// Any of these fails the whole load; no partial catalog is exposed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error fetching {resource}: {message}")]
    Network {
        /// Which collection was being fetched.
        resource: &'static str,
        /// Description of the transport failure.
        message: String,
    },

    /// The remote service answered with a non-success status.
    #[error("{resource} request failed with status {status}")]
    Status {
        /// Which collection was being fetched.
        resource: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON array.
    #[error("failed to decode {resource}: {message}")]
    Decode {
        /// Which collection was being decoded.
        resource: &'static str,
        /// Description of the decode failure.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors raised by the favorites store.
///
/// Only writes can fail; unreadable stored values fall back to an empty set.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The durable backend rejected the write.
    #[error("failed to persist favorites: {0}")]
    Persist(String),

    /// The favorites set could not be encoded.
    #[error("failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),

    /// The in-memory set lock was poisoned by a panicking writer.
    #[error("favorites lock poisoned")]
    Poisoned,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment override held a value of the wrong shape.
    #[error("invalid value for {key}: {value}")]
    InvalidEnv {
        /// Environment variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// A setting is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
