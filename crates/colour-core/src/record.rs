//! Record: a signed, immutable payload stored on a channel.
//!
//! Once mined into a block a record cannot be edited. Changes are new
//! records referencing the old one.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::{record_digest_bytes, record_signing_bytes};
use crate::crypto::{Blake3Hash, Ed25519PublicKey, Ed25519Signature, Keypair};
use crate::error::CoreError;
use crate::types::RecordHash;

/// Grants one alias read access to a record's payload.
///
/// An empty access list means the record is public. The sealing of payload
/// keys per recipient happens outside this client; here the list only
/// gates whether a reader should attempt to open the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    /// The grantee's alias.
    pub alias: String,
}

/// A complete record: metadata, payload, and the author's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Author-claimed creation time (Unix milliseconds).
    pub timestamp: i64,

    /// The author's public key.
    pub author: Ed25519PublicKey,

    /// The payload bytes (canvas CBOR, alias binding CBOR, ...).
    pub payload: Bytes,

    /// Content hashes of records this record refers to.
    pub references: Vec<RecordHash>,

    /// Readers granted access; empty means public.
    pub access: Vec<Access>,

    /// Ed25519 signature over the signing bytes (see [`crate::canonical`]).
    pub signature: Ed25519Signature,
}

impl Record {
    /// Compute the record's content hash.
    pub fn compute_hash(&self) -> RecordHash {
        RecordHash(Blake3Hash::hash(&record_digest_bytes(self)).0)
    }

    /// Verify the author's signature.
    pub fn verify(&self) -> Result<(), CoreError> {
        let message = record_signing_bytes(
            self.timestamp,
            &self.author,
            &self.payload,
            &self.references,
            &self.access,
        );
        self.author.verify(&message, &self.signature)
    }

    /// Open the payload as the given reader.
    ///
    /// Public records (empty access list) open for anyone; otherwise the
    /// reader's alias must appear in the access list.
    pub fn open(&self, alias: &str) -> Result<&[u8], CoreError> {
        if self.access.is_empty() || self.access.iter().any(|a| a.alias == alias) {
            Ok(&self.payload)
        } else {
            Err(CoreError::NotPermitted {
                alias: alias.to_string(),
            })
        }
    }
}

/// A record paired with its content hash, as stored inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// The record's content hash.
    pub record_hash: RecordHash,

    /// The record itself.
    pub record: Record,
}

impl BlockEntry {
    /// Wrap a record, computing its hash.
    pub fn new(record: Record) -> Self {
        Self {
            record_hash: record.compute_hash(),
            record,
        }
    }
}

/// Builder for creating signed records.
pub struct RecordBuilder {
    author: Ed25519PublicKey,
    timestamp: i64,
    payload: Bytes,
    references: Vec<RecordHash>,
    access: Vec<Access>,
}

impl RecordBuilder {
    /// Start building a record.
    pub fn new(author: Ed25519PublicKey) -> Self {
        Self {
            author,
            timestamp: 0,
            payload: Bytes::new(),
            references: Vec::new(),
            access: Vec::new(),
        }
    }

    /// Set the timestamp (Unix milliseconds).
    pub fn timestamp(mut self, ts: i64) -> Self {
        self.timestamp = ts;
        self
    }

    /// Set the payload.
    pub fn payload(mut self, p: impl Into<Bytes>) -> Self {
        self.payload = p.into();
        self
    }

    /// Add a reference to another record.
    pub fn reference(mut self, hash: RecordHash) -> Self {
        self.references.push(hash);
        self
    }

    /// Grant read access to an alias.
    pub fn grant(mut self, alias: impl Into<String>) -> Self {
        self.access.push(Access {
            alias: alias.into(),
        });
        self
    }

    /// Sign and produce the record.
    pub fn sign(self, keypair: &Keypair) -> Record {
        let message = record_signing_bytes(
            self.timestamp,
            &self.author,
            &self.payload,
            &self.references,
            &self.access,
        );
        let signature = keypair.sign(&message);
        Record {
            timestamp: self.timestamp,
            author: self.author,
            payload: self.payload,
            references: self.references,
            access: self.access,
            signature,
        }
    }
}
