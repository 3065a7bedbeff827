//! Strong identifier types for the Colour client.
//!
//! Record and block hashes are newtypes to prevent misuse at compile time.
//! The CLI-facing textual form is base64url (URL-safe alphabet, no padding),
//! matching what `show <hash>` accepts and `list` prints.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte record identifier: Blake3 over the record's canonical bytes.
///
/// Two records with identical content have the same hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordHash(pub [u8; 32]);

/// A 32-byte block identifier: Blake3 over the block's work bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

macro_rules! hash_newtype {
    ($name:ident, $label:literal) => {
        impl $name {
            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Base64url (URL-safe, no padding) textual form.
            pub fn to_base64(&self) -> String {
                URL_SAFE_NO_PAD.encode(self.0)
            }

            /// Parse the base64url textual form.
            pub fn from_base64(s: &str) -> Result<Self, CoreError> {
                let bytes = URL_SAFE_NO_PAD
                    .decode(s)
                    .map_err(|e| CoreError::MalformedHash(e.to_string()))?;
                let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                    CoreError::MalformedHash(format!("expected 32 bytes, got {}", bytes.len()))
                })?;
                Ok(Self(arr))
            }

            /// The zero hash (sentinel).
            pub const ZERO: Self = Self([0u8; 32]);
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), &hex::encode(&self.0[..8]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_base64())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }
    };
}

hash_newtype!(RecordHash, "RecordHash");
hash_newtype!(BlockHash, "BlockHash");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_hash_base64_roundtrip() {
        let hash = RecordHash::from_bytes([0x42; 32]);
        let text = hash.to_base64();
        assert_eq!(RecordHash::from_base64(&text).unwrap(), hash);
    }

    #[test]
    fn test_record_hash_display_is_url_safe() {
        let hash = RecordHash::from_bytes([0xfb; 32]);
        let text = format!("{}", hash);
        assert!(!text.contains('='));
        assert!(!text.contains('+'));
        assert!(!text.contains('/'));
    }

    #[test]
    fn test_malformed_base64_rejected() {
        assert!(RecordHash::from_base64("!!!").is_err());
        // Valid base64 but wrong length
        assert!(RecordHash::from_base64("AAAA").is_err());
        // Standard-alphabet padding is not part of the accepted form
        assert!(BlockHash::from_base64(
            "QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVphYmNkZWZnaGk="
        )
        .is_err());
    }

    proptest! {
        #[test]
        fn prop_hash_base64_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
            let hash = BlockHash::from_bytes(bytes);
            let recovered = BlockHash::from_base64(&hash.to_base64()).unwrap();
            prop_assert_eq!(hash, recovered);
        }
    }
}
