//! Crate error type

use thiserror::Error;

/// Errors raised by the storage, config and browser layers
#[derive(Debug, Error)]
pub enum Error {
    /// The key-value backend refused a read or write
    #[error("storage error: {0}")]
    Storage(String),

    /// A value could not be encoded or decoded as JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The application config was malformed
    #[error("invalid config: {0}")]
    Config(String),

    /// A browser API call failed or an expected node was missing
    #[error("dom error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, Error>;
