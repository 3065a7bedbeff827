//! Network abstraction: remote head/block access and chain announcement.
//!
//! The real implementation is [`crate::tcp::TcpNetwork`]. The in-memory
//! implementation here simulates a remote peer for tests, including an
//! unreachable toggle so the best-effort sync paths can be exercised.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use colour_core::{Block, BlockHash};

use crate::cache::Cache;
use crate::channel::HeadRef;
use crate::error::{ChainError, Result};

/// Remote access to channel state held by peers.
pub trait Network {
    /// Fetch the remote head of a channel.
    fn head(&self, channel: &str) -> Result<HeadRef>;

    /// Fetch a block by hash.
    fn block(&self, hash: &BlockHash) -> Result<Block>;

    /// Announce a new head, supplying the chain blocks so peers can adopt it.
    fn announce(&self, head: &HeadRef, blocks: &[Block]) -> Result<()>;
}

/// In-memory network: a shared fake remote peer.
///
/// Clones share state, so one handle can play "the network" for several
/// test clients.
#[derive(Clone)]
pub struct MemoryNetwork {
    inner: Arc<RwLock<MemoryNetworkInner>>,
}

struct MemoryNetworkInner {
    heads: HashMap<String, HeadRef>,
    blocks: HashMap<BlockHash, Block>,
    unreachable: bool,
}

impl MemoryNetwork {
    /// Create an empty, reachable network.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryNetworkInner {
                heads: HashMap::new(),
                blocks: HashMap::new(),
                unreachable: false,
            })),
        }
    }

    /// Toggle reachability. While unreachable every call fails with a
    /// network error, exercising the logged-but-ignored sync branches.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.inner.write().unwrap().unreachable = unreachable;
    }

    /// Seed the remote state with a chain already present in a cache.
    pub fn seed_from_cache<C: Cache>(&self, cache: &C, head: &HeadRef) -> Result<()> {
        let mut blocks = Vec::new();
        let mut next = Some(head.block_hash);
        while let Some(hash) = next {
            let block = cache
                .block(&hash)?
                .ok_or(ChainError::BlockNotFound(hash))?;
            next = block.previous;
            blocks.push(block);
        }
        self.announce(head, &blocks)
    }

    fn check_reachable(&self) -> Result<()> {
        if self.inner.read().unwrap().unreachable {
            Err(ChainError::Network("peer unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl Network for MemoryNetwork {
    fn head(&self, channel: &str) -> Result<HeadRef> {
        self.check_reachable()?;
        let inner = self.inner.read().unwrap();
        inner
            .heads
            .get(channel)
            .cloned()
            .ok_or_else(|| ChainError::NoHead(channel.to_string()))
    }

    fn block(&self, hash: &BlockHash) -> Result<Block> {
        self.check_reachable()?;
        let inner = self.inner.read().unwrap();
        inner
            .blocks
            .get(hash)
            .cloned()
            .ok_or(ChainError::BlockNotFound(*hash))
    }

    fn announce(&self, head: &HeadRef, blocks: &[Block]) -> Result<()> {
        self.check_reachable()?;
        let mut inner = self.inner.write().unwrap();
        for block in blocks {
            inner.blocks.insert(block.compute_hash(), block.clone());
        }
        // Same adoption rule as pull: only a strictly longer chain wins.
        match inner.heads.get(&head.channel) {
            Some(existing) if existing.length >= head.length => {}
            _ => {
                inner.heads.insert(head.channel.clone(), head.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colour_core::{BlockEntry, Keypair, RecordBuilder};

    fn genesis(channel: &str) -> (HeadRef, Block) {
        let keypair = Keypair::from_seed(&[2; 32]);
        let entry = BlockEntry::new(
            RecordBuilder::new(keypair.public_key())
                .timestamp(1)
                .payload(b"g".to_vec())
                .sign(&keypair),
        );
        let block = Block {
            channel: channel.to_string(),
            timestamp: 1,
            length: 1,
            previous: None,
            nonce: 0,
            entries: vec![entry],
        };
        let head = HeadRef {
            channel: channel.to_string(),
            block_hash: block.compute_hash(),
            length: 1,
            timestamp: 1,
        };
        (head, block)
    }

    #[test]
    fn test_announce_then_fetch() {
        let network = MemoryNetwork::new();
        let (head, block) = genesis("c");
        network.announce(&head, &[block.clone()]).unwrap();
        assert_eq!(network.head("c").unwrap(), head);
        assert_eq!(network.block(&head.block_hash).unwrap(), block);
    }

    #[test]
    fn test_unknown_channel_errors() {
        let network = MemoryNetwork::new();
        assert!(matches!(network.head("nope"), Err(ChainError::NoHead(_))));
    }

    #[test]
    fn test_unreachable_fails_everything() {
        let network = MemoryNetwork::new();
        let (head, block) = genesis("c");
        network.announce(&head, &[block]).unwrap();

        network.set_unreachable(true);
        assert!(matches!(network.head("c"), Err(ChainError::Network(_))));
        assert!(matches!(
            network.block(&head.block_hash),
            Err(ChainError::Network(_))
        ));

        network.set_unreachable(false);
        assert!(network.head("c").is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let network = MemoryNetwork::new();
        let other = network.clone();
        let (head, block) = genesis("c");
        network.announce(&head, &[block]).unwrap();
        assert_eq!(other.head("c").unwrap(), head);
    }
}
