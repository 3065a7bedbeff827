//! Error types for the chain layer.

use colour_core::{BlockHash, CoreError};
use thiserror::Error;

/// Errors that can occur in cache, channel, network, or mining operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Encoding/decoding or signature error from the core types.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No head is known for a channel, locally or remotely.
    #[error("no head for channel {0}")]
    NoHead(String),

    /// A block referenced by the chain could not be found.
    #[error("block not found: {0}")]
    BlockNotFound(BlockHash),

    /// A fetched block did not hash to the name it was fetched under.
    #[error("block hash mismatch for {0}")]
    BlockHashMismatch(BlockHash),

    /// Network-level failure (unreachable peer, framing, transport).
    #[error("network error: {0}")]
    Network(String),

    /// The remote registrar rejected a registration.
    #[error("registration rejected: {0}")]
    Registration(String),

    /// Mining could not produce a block.
    #[error("mining error: {0}")]
    Mining(String),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
