//! Deterministic byte encodings.
//!
//! Record and block hashes feed off the byte encodings in this module, so
//! they must be identical across platforms and releases. The hashed forms
//! are hand-rolled length-prefixed concatenations under a domain tag; CBOR
//! (via serde) is used only for storage and wire framing, where byte
//! stability is not load-bearing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::block::Block;
use crate::crypto::{Blake3Hash, Ed25519PublicKey};
use crate::error::CoreError;
use crate::record::{Access, Record};
use crate::types::RecordHash;

const RECORD_TAG: &[u8] = b"colour-record-v0:";
const BLOCK_TAG: &[u8] = b"colour-block-v0:";

/// Encode any serde type to CBOR bytes (storage and wire framing).
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}

/// Decode any serde type from CBOR bytes.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

fn put_len_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// The message a record author signs.
///
/// Covers the payload by hash, so verification does not require the
/// (possibly large) payload to be re-concatenated.
pub fn record_signing_bytes(
    timestamp: i64,
    author: &Ed25519PublicKey,
    payload: &[u8],
    references: &[RecordHash],
    access: &[Access],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);
    buf.extend_from_slice(RECORD_TAG);
    buf.extend_from_slice(&timestamp.to_be_bytes());
    buf.extend_from_slice(author.as_bytes());
    buf.extend_from_slice(Blake3Hash::hash(payload).as_bytes());
    buf.extend_from_slice(&(references.len() as u64).to_be_bytes());
    for reference in references {
        buf.extend_from_slice(reference.as_bytes());
    }
    buf.extend_from_slice(&(access.len() as u64).to_be_bytes());
    for grant in access {
        put_len_prefixed(&mut buf, grant.alias.as_bytes());
    }
    buf
}

/// The bytes a record's content hash is computed over.
///
/// Signing bytes plus the signature: two records differing only in
/// signature hash differently.
pub fn record_digest_bytes(record: &Record) -> Vec<u8> {
    let mut buf = record_signing_bytes(
        record.timestamp,
        &record.author,
        &record.payload,
        &record.references,
        &record.access,
    );
    buf.extend_from_slice(record.signature.as_bytes());
    buf
}

/// The bytes a block's hash is computed over.
///
/// Entries are covered by their record hashes, keeping the nonce search in
/// mining cheap to iterate.
pub fn block_work_bytes(block: &Block) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);
    buf.extend_from_slice(BLOCK_TAG);
    put_len_prefixed(&mut buf, block.channel.as_bytes());
    buf.extend_from_slice(&block.timestamp.to_be_bytes());
    buf.extend_from_slice(&block.length.to_be_bytes());
    match &block.previous {
        Some(hash) => buf.extend_from_slice(hash.as_bytes()),
        None => buf.extend_from_slice(&[0u8; 32]),
    }
    buf.extend_from_slice(&block.nonce.to_be_bytes());
    buf.extend_from_slice(&(block.entries.len() as u64).to_be_bytes());
    for entry in &block.entries {
        buf.extend_from_slice(entry.record_hash.as_bytes());
    }
    buf
}
