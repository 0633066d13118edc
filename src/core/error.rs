use std::io;
use thiserror::Error;

/// Custom error types for the Switcher protocol core
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A value falls outside the valid domain of its wire field
    #[error("{0}")]
    Range(String),

    /// A value does not fit the 32-bit unsigned encoding of a wire field
    #[error("{0}")]
    Overflow(String),

    /// The device family has no circuits of the requested kind
    #[error("{0}")]
    Capability(String),

    /// A token that does not decode to a packet fragment
    #[error("{0}")]
    TokenFormat(String),

    /// Malformed fixed-width or hex input
    #[error("Format error: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new range error
    pub fn range(msg: impl Into<String>) -> Self {
        Error::Range(msg.into())
    }

    /// Creates a new overflow error
    pub fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    /// Creates a new capability error
    pub fn capability(msg: impl Into<String>) -> Self {
        Error::Capability(msg.into())
    }

    /// Creates a new token format error
    pub fn token_format(msg: impl Into<String>) -> Self {
        Error::TokenFormat(msg.into())
    }

    /// Creates a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
