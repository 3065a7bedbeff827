//! Error types for the client core.

use thiserror::Error;

/// Errors surfaced by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The alias is already bound to a different public key.
    #[error("alias already taken: {alias}")]
    AliasConflict {
        /// The contested alias.
        alias: String,
    },

    /// Ledger layer failure.
    #[error(transparent)]
    Chain(#[from] colour_chain::ChainError),

    /// Data model failure.
    #[error(transparent)]
    Core(#[from] colour_core::CoreError),

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Key material on disk is not usable.
    #[error("malformed key file: {0}")]
    MalformedKey(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
