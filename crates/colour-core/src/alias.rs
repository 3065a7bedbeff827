//! Alias bindings carried in record payloads on the alias channel.

use serde::{Deserialize, Serialize};

use crate::canonical::{from_slice, to_vec};
use crate::crypto::Ed25519PublicKey;
use crate::error::CoreError;

/// The well-known name of the shared alias channel.
pub const ALIAS_CHANNEL: &str = "alias";

/// Binds a human-readable alias to a public key.
///
/// An alias is considered registered once a record carrying this binding is
/// committed to the alias channel (or accepted by the remote registrar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasBinding {
    /// The claimed alias.
    pub alias: String,
    /// The key the alias is bound to.
    pub public_key: Ed25519PublicKey,
}

impl AliasBinding {
    /// Encode to a record payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, CoreError> {
        to_vec(self)
    }

    /// Decode from a record payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, CoreError> {
        from_slice(bytes)
    }
}
