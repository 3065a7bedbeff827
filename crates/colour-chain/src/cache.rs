//! Cache trait: local persistence for heads, blocks, and pending records.
//!
//! The trait allows the client to be storage-agnostic. Implementations are
//! [`MemoryCache`] (tests) and [`crate::file::FileCache`] (the real,
//! file-per-hash store).

use std::collections::HashMap;
use std::sync::RwLock;

use colour_core::{Block, BlockHash, Record, RecordHash};

use crate::channel::HeadRef;
use crate::error::Result;

/// Local persistence for channel heads, blocks, and pending records.
///
/// # Design Notes
///
/// - **Content addressing**: Blocks and records are keyed by their own
///   hashes; a `put` under the wrong key is a caller bug.
/// - **Missing is not an error**: Reads return `Ok(None)` for absent
///   entries; only storage-level failures are `Err`.
pub trait Cache {
    /// Get the cached head for a channel, if any.
    fn head(&self, channel: &str) -> Result<Option<HeadRef>>;

    /// Store or replace the cached head for a channel.
    fn put_head(&self, head: &HeadRef) -> Result<()>;

    /// Get a block by hash, if cached.
    fn block(&self, hash: &BlockHash) -> Result<Option<Block>>;

    /// Store a block under its hash.
    fn put_block(&self, hash: &BlockHash, block: &Block) -> Result<()>;

    /// Get a pending (not yet mined) record by hash, if cached.
    fn record(&self, hash: &RecordHash) -> Result<Option<Record>>;

    /// Store a pending record; returns its content hash.
    fn put_record(&self, record: &Record) -> Result<RecordHash>;
}

/// In-memory cache implementation.
///
/// All data is lost when the cache is dropped. Thread-safe via RwLock.
pub struct MemoryCache {
    inner: RwLock<MemoryCacheInner>,
}

struct MemoryCacheInner {
    heads: HashMap<String, HeadRef>,
    blocks: HashMap<BlockHash, Block>,
    records: HashMap<RecordHash, Record>,
}

impl MemoryCache {
    /// Create a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryCacheInner {
                heads: HashMap::new(),
                blocks: HashMap::new(),
                records: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache for MemoryCache {
    fn head(&self, channel: &str) -> Result<Option<HeadRef>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.heads.get(channel).cloned())
    }

    fn put_head(&self, head: &HeadRef) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.heads.insert(head.channel.clone(), head.clone());
        Ok(())
    }

    fn block(&self, hash: &BlockHash) -> Result<Option<Block>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.blocks.get(hash).cloned())
    }

    fn put_block(&self, hash: &BlockHash, block: &Block) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.blocks.insert(*hash, block.clone());
        Ok(())
    }

    fn record(&self, hash: &RecordHash) -> Result<Option<Record>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(hash).cloned())
    }

    fn put_record(&self, record: &Record) -> Result<RecordHash> {
        let hash = record.compute_hash();
        let mut inner = self.inner.write().unwrap();
        inner.records.insert(hash, record.clone());
        Ok(hash)
    }
}
