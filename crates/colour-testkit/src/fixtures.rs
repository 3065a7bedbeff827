//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a fake remote node holding
//! canvas and alias chains, reachable through the in-memory network.

use std::sync::{Arc, Mutex};

use colour_chain::{
    mine, AliasRegistrar, ChainError, Channel, MemoryCache, MemoryNetwork, NoopListener,
};
use colour_core::{
    AliasBinding, Canvas, ColourMode, Ed25519PublicKey, Keypair, Record, RecordBuilder,
    RecordHash, ALIAS_CHANNEL, CANVAS_CHANNEL,
};

/// Low difficulty so fixture mining is instant.
const TEST_DIFFICULTY: u32 = 1;

/// A fake remote node: network, registrar, and the chains behind them.
pub struct TestWorld {
    /// The network clients should be given. Clones share state.
    pub network: MemoryNetwork,
    /// The registrar clients should be given. Clones share state.
    pub registrar: FakeRegistrar,
    /// Keypair the fake node signs fixture records with.
    pub keypair: Keypair,
    node_cache: MemoryCache,
    canvas_channel: Channel,
    alias_channel: Channel,
}

impl TestWorld {
    /// An empty world: reachable network, accepting registrar, no chains.
    pub fn new() -> Self {
        Self {
            network: MemoryNetwork::new(),
            registrar: FakeRegistrar::new(),
            keypair: Keypair::from_seed(&[42; 32]),
            node_cache: MemoryCache::new(),
            canvas_channel: Channel::open(CANVAS_CHANNEL),
            alias_channel: Channel::open(ALIAS_CHANNEL),
        }
    }

    /// Mine the given canvases into one block on the canvas channel and
    /// publish the new chain to the network. Returns the record hashes
    /// in the order given.
    pub fn publish_canvases(&mut self, canvases: &[Canvas]) -> Vec<RecordHash> {
        let records: Vec<Record> = canvases
            .iter()
            .enumerate()
            .map(|(i, canvas)| {
                RecordBuilder::new(self.keypair.public_key())
                    .timestamp(1_000 + i as i64)
                    .payload(canvas.to_payload().expect("canvas payload"))
                    .sign(&self.keypair)
            })
            .collect();
        let hashes = records.iter().map(Record::compute_hash).collect();
        self.publish(CANVAS_CHANNEL, records);
        hashes
    }

    /// Mine an alias binding onto the alias channel and publish it.
    pub fn bind_alias(&mut self, alias: &str, public_key: Ed25519PublicKey) {
        let binding = AliasBinding {
            alias: alias.to_string(),
            public_key,
        };
        let record = RecordBuilder::new(self.keypair.public_key())
            .timestamp(1)
            .payload(binding.to_payload().expect("alias payload"))
            .sign(&self.keypair);
        self.publish(ALIAS_CHANNEL, vec![record]);
    }

    /// Mine a canvas readable only by the given alias onto the canvas
    /// channel.
    pub fn publish_restricted_canvas(&mut self, canvas: &Canvas, grantee: &str) -> RecordHash {
        let record = RecordBuilder::new(self.keypair.public_key())
            .timestamp(3_000)
            .payload(canvas.to_payload().expect("canvas payload"))
            .grant(grantee)
            .sign(&self.keypair);
        let hash = record.compute_hash();
        self.publish(CANVAS_CHANNEL, vec![record]);
        hash
    }

    /// Mine a record with an arbitrary payload onto the canvas channel.
    /// Useful for checking that foreign records do not break queries.
    pub fn publish_opaque(&mut self, payload: &[u8]) -> RecordHash {
        let record = RecordBuilder::new(self.keypair.public_key())
            .timestamp(2_000)
            .payload(payload.to_vec())
            .sign(&self.keypair);
        let hash = record.compute_hash();
        self.publish(CANVAS_CHANNEL, vec![record]);
        hash
    }

    fn publish(&mut self, channel: &str, records: Vec<Record>) {
        let channel = if channel == CANVAS_CHANNEL {
            &mut self.canvas_channel
        } else {
            &mut self.alias_channel
        };
        mine(
            channel,
            records,
            TEST_DIFFICULTY,
            &NoopListener,
            &self.node_cache,
        )
        .expect("fixture mining");
        let head = channel.head.clone().expect("mined head");
        self.network
            .seed_from_cache(&self.node_cache, &head)
            .expect("seed network");
    }

    /// Head of the fake node's canvas chain, if any.
    pub fn canvas_length(&self) -> u64 {
        self.canvas_channel.length()
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// A sample canvas with the given name and mode.
pub fn canvas(name: &str, mode: ColourMode) -> Canvas {
    Canvas {
        name: name.to_string(),
        width: 16,
        height: 9,
        depth: 1,
        mode,
    }
}

/// Scriptable in-memory registrar.
///
/// Accepts by default and remembers every registration; can be switched
/// to fail so the local-mining fallback runs.
#[derive(Clone)]
pub struct FakeRegistrar {
    inner: Arc<Mutex<FakeRegistrarInner>>,
}

struct FakeRegistrarInner {
    fail: bool,
    registered: Vec<(String, Ed25519PublicKey)>,
}

impl FakeRegistrar {
    /// A registrar that accepts everything.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRegistrarInner {
                fail: false,
                registered: Vec::new(),
            })),
        }
    }

    /// Make subsequent registrations fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.inner.lock().unwrap().fail = fail;
    }

    /// Every (alias, key) pair registered so far.
    pub fn registered(&self) -> Vec<(String, Ed25519PublicKey)> {
        self.inner.lock().unwrap().registered.clone()
    }
}

impl Default for FakeRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasRegistrar for FakeRegistrar {
    fn register(&self, alias: &str, public_key: &Ed25519PublicKey) -> colour_chain::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail {
            return Err(ChainError::Registration(format!(
                "registrar scripted to fail alias {alias}"
            )));
        }
        inner.registered.push((alias.to_string(), *public_key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_canvases_reaches_the_network() {
        use colour_chain::Network;

        let mut world = TestWorld::new();
        world.publish_canvases(&[canvas("one", ColourMode::Rgb)]);
        world.publish_canvases(&[canvas("two", ColourMode::Rgba)]);

        let head = world.network.head(CANVAS_CHANNEL).unwrap();
        assert_eq!(head.length, 2);
        assert_eq!(world.canvas_length(), 2);
    }

    #[test]
    fn test_fake_registrar_records_and_fails_on_demand() {
        let registrar = FakeRegistrar::new();
        let key = Keypair::from_seed(&[1; 32]).public_key();
        registrar.register("ada", &key).unwrap();
        assert_eq!(registrar.registered(), vec![("ada".to_string(), key)]);

        registrar.set_fail(true);
        assert!(registrar.register("bob", &key).is_err());
    }
}
