//! Canvas query integration tests against in-memory fakes.

use std::sync::atomic::{AtomicUsize, Ordering};

use colour_chain::{Cache, HeadRef, MemoryCache, MemoryNetwork, NoopListener};
use colour_client::{Client, ClientConfig};
use colour_core::{Block, BlockHash, ColourMode, Record, RecordHash};
use colour_testkit::{fixtures::canvas, FakeRegistrar, TestWorld};

fn ready_client(
    dir: &std::path::Path,
    world: &TestWorld,
) -> Client<MemoryCache, MemoryNetwork, FakeRegistrar> {
    let mut client = Client::new(
        ClientConfig::new("ada", dir),
        MemoryCache::new(),
        world.network.clone(),
        world.registrar.clone(),
    );
    client.init(&NoopListener).unwrap();
    client
}

#[test]
fn test_canvases_come_newest_block_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("oldest", ColourMode::Rgb)]);
    world.publish_canvases(&[canvas("newest", ColourMode::Rgb)]);

    let client = ready_client(dir.path(), &world);
    let names: Vec<String> = client.canvases().map(|(_, c)| c.name).collect();
    assert_eq!(names, vec!["newest".to_string(), "oldest".to_string()]);
}

#[test]
fn test_empty_channel_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let world = TestWorld::new();
    let client = ready_client(dir.path(), &world);
    assert_eq!(client.canvases().count(), 0);
}

#[test]
fn test_target_filter_selects_one_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    let hashes = world.publish_canvases(&[
        canvas("one", ColourMode::Rgb),
        canvas("two", ColourMode::Rgba),
    ]);

    let client = ready_client(dir.path(), &world);
    let found: Vec<_> = client.canvases().target(hashes[1]).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0.record_hash, hashes[1]);
    assert_eq!(found[0].1.name, "two");
}

#[test]
fn test_target_without_match_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[
        canvas("one", ColourMode::Rgb),
        canvas("two", ColourMode::Rgba),
    ]);

    let client = ready_client(dir.path(), &world);
    let absent = RecordHash::from_bytes([0xAB; 32]);
    assert_eq!(client.canvases().target(absent).count(), 0);
}

/// A [`MemoryCache`] that counts block reads, to observe how far a
/// query walks the chain.
struct BlockCountingCache {
    inner: MemoryCache,
    block_reads: AtomicUsize,
}

impl BlockCountingCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::new(),
            block_reads: AtomicUsize::new(0),
        }
    }

    fn reset(&self) {
        self.block_reads.store(0, Ordering::SeqCst);
    }

    fn block_reads(&self) -> usize {
        self.block_reads.load(Ordering::SeqCst)
    }
}

impl Cache for BlockCountingCache {
    fn head(&self, channel: &str) -> colour_chain::Result<Option<HeadRef>> {
        self.inner.head(channel)
    }

    fn put_head(&self, head: &HeadRef) -> colour_chain::Result<()> {
        self.inner.put_head(head)
    }

    fn block(&self, hash: &BlockHash) -> colour_chain::Result<Option<Block>> {
        self.block_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.block(hash)
    }

    fn put_block(&self, hash: &BlockHash, block: &Block) -> colour_chain::Result<()> {
        self.inner.put_block(hash, block)
    }

    fn record(&self, hash: &RecordHash) -> colour_chain::Result<Option<Record>> {
        self.inner.record(hash)
    }

    fn put_record(&self, record: &Record) -> colour_chain::Result<RecordHash> {
        self.inner.put_record(record)
    }
}

#[test]
fn test_target_match_stops_the_chain_walk() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("one", ColourMode::Rgb)]);
    world.publish_canvases(&[canvas("two", ColourMode::Rgb)]);
    let newest = world.publish_canvases(&[canvas("three", ColourMode::Rgb)])[0];

    let mut client = Client::new(
        ClientConfig::new("ada", dir.path()),
        BlockCountingCache::new(),
        world.network.clone(),
        world.registrar.clone(),
    );
    client.init(&NoopListener).unwrap();
    assert_eq!(client.canvases().count(), 3);

    client.cache().reset();
    let mut query = client.canvases().target(newest);
    assert_eq!(query.next().unwrap().1.name, "three");
    assert!(query.next().is_none());
    // Syncing touches the head block once and yielding the newest entry
    // reads it again; the two older blocks are never loaded.
    assert!(client.cache().block_reads() <= 2);
}

#[test]
fn test_mode_filter_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[
        canvas("gray", ColourMode::Grayscale),
        canvas("gray-alpha", ColourMode::GrayscaleAlpha),
        canvas("rgb", ColourMode::Rgb),
        canvas("rgba", ColourMode::Rgba),
    ]);

    let client = ready_client(dir.path(), &world);

    let names: Vec<String> = client.canvases().mode("RGB").map(|(_, c)| c.name).collect();
    assert_eq!(names, vec!["rgb".to_string()]);

    let names: Vec<String> = client
        .canvases()
        .mode("Grayscale")
        .map(|(_, c)| c.name)
        .collect();
    assert_eq!(names, vec!["gray".to_string()]);

    // A tag that is a prefix of another must not match it.
    assert_eq!(client.canvases().mode("Gray").count(), 0);
}

#[test]
fn test_foreign_records_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("real", ColourMode::Rgb)]);
    world.publish_opaque(b"not a canvas at all");

    let client = ready_client(dir.path(), &world);
    let names: Vec<String> = client.canvases().map(|(_, c)| c.name).collect();
    assert_eq!(names, vec!["real".to_string()]);
}

#[test]
fn test_records_granted_to_others_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_restricted_canvas(&canvas("mine", ColourMode::Rgb), "ada");
    world.publish_restricted_canvas(&canvas("theirs", ColourMode::Rgb), "bob");

    let client = ready_client(dir.path(), &world);
    let names: Vec<String> = client.canvases().map(|(_, c)| c.name).collect();
    assert_eq!(names, vec!["mine".to_string()]);
}

#[test]
fn test_try_for_each_propagates_the_first_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("one", ColourMode::Rgb)]);
    world.publish_canvases(&[canvas("two", ColourMode::Rgb)]);
    world.publish_canvases(&[canvas("three", ColourMode::Rgb)]);

    let client = ready_client(dir.path(), &world);
    let mut seen = Vec::new();
    let result = client.canvases().try_for_each(|(_, c)| {
        seen.push(c.name.clone());
        if c.name == "two" {
            Err("stop right there")
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err("stop right there"));
    // Newest first: "three" passes, "two" fails, "one" is never visited.
    assert_eq!(seen, vec!["three".to_string(), "two".to_string()]);
}

#[test]
fn test_query_runs_from_cache_when_peers_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("cached", ColourMode::Rgb)]);

    let client = ready_client(dir.path(), &world);
    assert_eq!(client.canvases().count(), 1);

    world.network.set_unreachable(true);
    let names: Vec<String> = client.canvases().map(|(_, c)| c.name).collect();
    assert_eq!(names, vec!["cached".to_string()]);
}

#[test]
fn test_new_blocks_appear_on_next_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = TestWorld::new();
    world.publish_canvases(&[canvas("first", ColourMode::Rgb)]);

    let client = ready_client(dir.path(), &world);
    assert_eq!(client.canvases().count(), 1);

    world.publish_canvases(&[canvas("second", ColourMode::Rgb)]);
    assert_eq!(client.canvases().count(), 2);
}
