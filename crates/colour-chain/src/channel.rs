//! Channel: a named, append-only, reverse-linked chain of blocks.
//!
//! The cached head names the newest block; each block names its
//! predecessor. Traversal therefore runs newest-first, and that order is
//! part of the query contract, not an accident.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use colour_core::{BlockEntry, BlockHash};

use crate::cache::Cache;
use crate::error::{ChainError, Result};
use crate::network::Network;

/// A channel head: the newest block plus chain bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRef {
    /// The channel name.
    pub channel: String,
    /// Hash of the newest block.
    pub block_hash: BlockHash,
    /// Chain length up to the newest block.
    pub length: u64,
    /// When the newest block was mined (Unix milliseconds).
    pub timestamp: i64,
}

/// A channel's local view: name plus the currently known head.
#[derive(Debug, Clone)]
pub struct Channel {
    /// The channel name.
    pub name: String,
    /// The known head, if any.
    pub head: Option<HeadRef>,
}

impl Channel {
    /// Open a channel by name. No I/O happens until load/pull.
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            head: None,
        }
    }

    /// Chain length of the known head (0 when no head is known).
    pub fn length(&self) -> u64 {
        self.head.as_ref().map(|h| h.length).unwrap_or(0)
    }

    /// Load the head from cache, falling back to the network.
    ///
    /// A head obtained from the network is written back to the cache.
    /// Errors here are routinely treated as non-fatal by callers: a channel
    /// with no head simply iterates as empty.
    pub fn load_head<C: Cache, N: Network>(
        &mut self,
        cache: &C,
        network: Option<&N>,
    ) -> Result<()> {
        if let Some(head) = cache.head(&self.name)? {
            self.head = Some(head);
            return Ok(());
        }
        if let Some(network) = network {
            let head = network.head(&self.name)?;
            cache.put_head(&head)?;
            self.head = Some(head);
            return Ok(());
        }
        Err(ChainError::NoHead(self.name.clone()))
    }

    /// Synchronize down: adopt the remote head if its chain is strictly
    /// longer, fetching the missing blocks into the cache.
    ///
    /// Fetched blocks are verified to hash to the name they were fetched
    /// under. Equal-length forks keep local state.
    pub fn pull<C: Cache, N: Network>(&mut self, cache: &C, network: &N) -> Result<()> {
        let remote = network.head(&self.name)?;
        if let Some(local) = &self.head {
            // An equal head still falls through to the walk below: a head
            // learned over the network may not have its blocks cached yet.
            if remote.length <= local.length && remote.block_hash != local.block_hash {
                debug!(
                    channel = %self.name,
                    local = local.length,
                    remote = remote.length,
                    "pull: remote chain not longer, keeping local head"
                );
                return Ok(());
            }
        }

        // Walk the remote chain backwards until we reach a cached block or
        // genesis, storing each block as we go.
        let mut hash = remote.block_hash;
        loop {
            if cache.block(&hash)?.is_some() {
                break;
            }
            let block = network.block(&hash)?;
            if block.compute_hash() != hash {
                return Err(ChainError::BlockHashMismatch(hash));
            }
            let previous = block.previous;
            cache.put_block(&hash, &block)?;
            match previous {
                Some(prev) => hash = prev,
                None => break,
            }
        }

        cache.put_head(&remote)?;
        self.head = Some(remote);
        Ok(())
    }

    /// Synchronize up: announce the local head and chain blocks to peers.
    pub fn push<C: Cache, N: Network>(&self, cache: &C, network: &N) -> Result<()> {
        let head = self
            .head
            .clone()
            .ok_or_else(|| ChainError::NoHead(self.name.clone()))?;

        let mut blocks = Vec::new();
        let mut next = Some(head.block_hash);
        while let Some(hash) = next {
            let block = cache
                .block(&hash)?
                .ok_or(ChainError::BlockNotFound(hash))?;
            next = block.previous;
            blocks.push(block);
        }

        network.announce(&head, &blocks)
    }

    /// Iterate block entries in chain order: newest block first, entries in
    /// stored order within each block.
    ///
    /// A missing block ends traversal with a warning rather than an error;
    /// browsing never panics over an incomplete cache.
    pub fn entries<'a, C: Cache>(&self, cache: &'a C) -> EntryIter<'a, C> {
        EntryIter {
            cache,
            channel: self.name.clone(),
            next: self.head.as_ref().map(|h| h.block_hash),
            pending: VecDeque::new(),
        }
    }
}

/// Lazy iterator over a channel's block entries, newest block first.
pub struct EntryIter<'a, C: Cache> {
    cache: &'a C,
    channel: String,
    next: Option<BlockHash>,
    pending: VecDeque<BlockEntry>,
}

impl<'a, C: Cache> Iterator for EntryIter<'a, C> {
    type Item = BlockEntry;

    fn next(&mut self) -> Option<BlockEntry> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(entry);
            }
            let hash = self.next.take()?;
            match self.cache.block(&hash) {
                Ok(Some(block)) => {
                    self.next = block.previous;
                    self.pending.extend(block.entries);
                }
                Ok(None) => {
                    warn!(channel = %self.channel, block = %hash, "chain truncated: block missing from cache");
                    return None;
                }
                Err(e) => {
                    warn!(channel = %self.channel, block = %hash, error = %e, "chain truncated: cache read failed");
                    return None;
                }
            }
        }
    }
}
