//! Error types for Colour core operations.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or verifying core types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("malformed hash: {0}")]
    MalformedHash(String),

    #[error("record not readable by {alias}")]
    NotPermitted { alias: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}
