//! Block: a mined bundle of records, hash-linked to its predecessor.
//!
//! A channel is a reverse-linked chain of blocks: each block names the hash
//! of the previous one, and the cached head names the newest. `length` is
//! the 1-indexed chain length, used by pull to decide whether a remote
//! chain supersedes the local one.

use serde::{Deserialize, Serialize};

use crate::canonical::block_work_bytes;
use crate::crypto::Blake3Hash;
use crate::record::BlockEntry;
use crate::types::BlockHash;

/// One block in a channel's chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The channel this block belongs to.
    pub channel: String,

    /// When the block was mined (Unix milliseconds).
    pub timestamp: i64,

    /// 1-indexed chain length up to and including this block.
    pub length: u64,

    /// Hash of the previous block (None for the genesis block).
    pub previous: Option<BlockHash>,

    /// The nonce found by mining.
    pub nonce: u64,

    /// The records committed by this block.
    pub entries: Vec<BlockEntry>,
}

impl Block {
    /// Compute the block's hash.
    pub fn compute_hash(&self) -> BlockHash {
        BlockHash(Blake3Hash::hash(&block_work_bytes(self)).0)
    }

    /// Whether this is the first block in its chain.
    pub fn is_genesis(&self) -> bool {
        self.previous.is_none() && self.length == 1
    }
}
