//! # Colour Core
//!
//! Pure primitives for the Colour client: records, blocks, canvas metadata,
//! and alias bindings.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Record`] - A signed, immutable payload with references
//! - [`Block`] - A mined bundle of records, hash-linked to its predecessor
//! - [`RecordHash`] / [`BlockHash`] - Content-addressed identifiers
//! - [`Canvas`] - Decoded canvas metadata carried in a record payload
//! - [`AliasBinding`] - An alias-to-public-key binding on the alias channel
//!
//! ## Hashing
//!
//! Record and block hashes are Blake3 over deterministic byte encodings.
//! See [`canonical`].

pub mod alias;
pub mod block;
pub mod canonical;
pub mod canvas;
pub mod crypto;
pub mod error;
pub mod record;
pub mod types;

pub use alias::{AliasBinding, ALIAS_CHANNEL};
pub use block::Block;
pub use canonical::{from_slice, to_vec};
pub use canvas::{Canvas, ColourMode, CANVAS_CHANNEL};
pub use crypto::{Blake3Hash, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::CoreError;
pub use record::{Access, BlockEntry, Record, RecordBuilder};
pub use types::{BlockHash, RecordHash};
