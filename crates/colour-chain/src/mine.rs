//! Proof-of-work mining: commit pending records into a channel.
//!
//! Difficulty is the number of leading zero bits required of the block
//! hash. The search is a plain nonce increment over the block work bytes,
//! single-threaded like the rest of the client.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use colour_core::{Block, BlockEntry, BlockHash, Record};

use crate::cache::Cache;
use crate::channel::{Channel, HeadRef};
use crate::error::{ChainError, Result};

/// Default difficulty in leading zero bits.
pub const DEFAULT_DIFFICULTY: u32 = 8;

/// Observer for mining progress.
pub trait MiningListener {
    /// Called periodically while searching nonces.
    fn on_attempt(&self, nonce: u64);
    /// Called once when a block meeting the difficulty is found.
    fn on_mined(&self, hash: &BlockHash, nonce: u64);
}

/// Listener that ignores all events.
pub struct NoopListener;

impl MiningListener for NoopListener {
    fn on_attempt(&self, _nonce: u64) {}
    fn on_mined(&self, _hash: &BlockHash, _nonce: u64) {}
}

/// Current wall-clock time in Unix milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Mine the given records into a new block on top of the channel head.
///
/// Records are stored in the cache, the mined block and the new head are
/// committed, and the channel's in-memory head is updated. The caller is
/// responsible for pushing the new head to peers afterwards.
pub fn mine<C: Cache, L: MiningListener>(
    channel: &mut Channel,
    records: Vec<Record>,
    difficulty: u32,
    listener: &L,
    cache: &C,
) -> Result<BlockHash> {
    if records.is_empty() {
        return Err(ChainError::Mining("no records to mine".to_string()));
    }

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        cache.put_record(&record)?;
        entries.push(BlockEntry::new(record));
    }

    let mut block = Block {
        channel: channel.name.clone(),
        timestamp: now_millis(),
        length: channel.length() + 1,
        previous: channel.head.as_ref().map(|h| h.block_hash),
        nonce: 0,
        entries,
    };

    debug!(
        channel = %channel.name,
        length = block.length,
        entries = block.entries.len(),
        difficulty,
        "mining block"
    );

    let hash = loop {
        let hash = block.compute_hash();
        if leading_zero_bits(hash.as_bytes()) >= difficulty {
            break hash;
        }
        block.nonce = block
            .nonce
            .checked_add(1)
            .ok_or_else(|| ChainError::Mining("nonce space exhausted".to_string()))?;
        if block.nonce % 1024 == 0 {
            listener.on_attempt(block.nonce);
        }
    };
    listener.on_mined(&hash, block.nonce);
    info!(channel = %channel.name, block = %hash, nonce = block.nonce, "mined block");

    let head = HeadRef {
        channel: channel.name.clone(),
        block_hash: hash,
        length: block.length,
        timestamp: block.timestamp,
    };
    cache.put_block(&hash, &block)?;
    cache.put_head(&head)?;
    channel.head = Some(head);
    Ok(hash)
}

fn leading_zero_bits(bytes: &[u8]) -> u32 {
    let mut bits = 0;
    for byte in bytes {
        if *byte == 0 {
            bits += 8;
        } else {
            bits += byte.leading_zeros();
            break;
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use colour_core::{Keypair, RecordBuilder};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn record(payload: &[u8]) -> Record {
        let keypair = Keypair::from_seed(&[7; 32]);
        RecordBuilder::new(keypair.public_key())
            .timestamp(42)
            .payload(payload.to_vec())
            .sign(&keypair)
    }

    #[test]
    fn test_mine_empty_records_fails() {
        let cache = MemoryCache::new();
        let mut channel = Channel::open("c");
        let result = mine(&mut channel, Vec::new(), 1, &NoopListener, &cache);
        assert!(matches!(result, Err(ChainError::Mining(_))));
    }

    #[test]
    fn test_mine_commits_block_and_head() {
        let cache = MemoryCache::new();
        let mut channel = Channel::open("c");
        let hash = mine(
            &mut channel,
            vec![record(b"one")],
            4,
            &NoopListener,
            &cache,
        )
        .unwrap();

        let block = cache.block(&hash).unwrap().unwrap();
        assert!(block.is_genesis());
        assert_eq!(block.length, 1);
        assert!(leading_zero_bits(hash.as_bytes()) >= 4);

        let head = cache.head("c").unwrap().unwrap();
        assert_eq!(head.block_hash, hash);
        assert_eq!(channel.head, Some(head));
    }

    #[test]
    fn test_mine_extends_existing_head() {
        let cache = MemoryCache::new();
        let mut channel = Channel::open("c");
        let first = mine(&mut channel, vec![record(b"one")], 1, &NoopListener, &cache).unwrap();
        let second = mine(&mut channel, vec![record(b"two")], 1, &NoopListener, &cache).unwrap();

        let block = cache.block(&second).unwrap().unwrap();
        assert_eq!(block.previous, Some(first));
        assert_eq!(block.length, 2);
        assert_eq!(channel.length(), 2);
    }

    #[test]
    fn test_mined_records_are_cached() {
        let cache = MemoryCache::new();
        let mut channel = Channel::open("c");
        let r = record(b"one");
        let record_hash = r.compute_hash();
        mine(&mut channel, vec![r.clone()], 1, &NoopListener, &cache).unwrap();
        assert_eq!(cache.record(&record_hash).unwrap(), Some(r));
    }

    #[test]
    fn test_listener_sees_mined_event() {
        struct Flag(AtomicBool);
        impl MiningListener for Flag {
            fn on_attempt(&self, _nonce: u64) {}
            fn on_mined(&self, _hash: &BlockHash, _nonce: u64) {
                self.0.store(true, Ordering::SeqCst);
            }
        }
        let cache = MemoryCache::new();
        let mut channel = Channel::open("c");
        let flag = Flag(AtomicBool::new(false));
        mine(&mut channel, vec![record(b"one")], 1, &flag, &cache).unwrap();
        assert!(flag.0.load(Ordering::SeqCst));
    }
}
