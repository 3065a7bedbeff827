//! Client bootstrap: peer setup, key material, and alias registration.
//!
//! [`Client::init`] is idempotent. Running it twice with the same root
//! directory reuses the persisted peer list and key file and recognises
//! the existing alias binding instead of registering again.

use tracing::{debug, info, warn};

use colour_chain::{
    mine, now_millis, AliasRegistrar, Cache, Channel, MiningListener, Network, PeerSet,
};
use colour_core::{AliasBinding, RecordBuilder, ALIAS_CHANNEL};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::identity::NodeIdentity;

/// How an alias ended up registered during init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The alias channel already binds the alias to our key.
    AlreadyRegistered,
    /// A remote node accepted the registration.
    Remote,
    /// The binding was mined locally after the remote path failed.
    MinedLocally,
}

/// The Colour client: configuration plus injected collaborators.
///
/// Generic over its cache, network, and registrar so tests can run the
/// whole bootstrap against in-memory fakes.
pub struct Client<C: Cache, N: Network, R: AliasRegistrar> {
    config: ClientConfig,
    cache: C,
    network: N,
    registrar: R,
    identity: Option<NodeIdentity>,
}

impl<C: Cache, N: Network, R: AliasRegistrar> Client<C, N, R> {
    /// Create a client. No I/O happens until [`Client::init`].
    pub fn new(config: ClientConfig, cache: C, network: N, registrar: R) -> Self {
        Self {
            config,
            cache,
            network,
            registrar,
            identity: None,
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The cache collaborator.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The network collaborator.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// The node identity, once [`Client::init`] has run.
    pub fn identity(&self) -> Option<&NodeIdentity> {
        self.identity.as_ref()
    }

    /// Bootstrap the node.
    ///
    /// Adds the standard and configured peers, loads or creates the key
    /// for the configured alias, synchronizes the alias channel, and
    /// ensures the alias is bound to our key. An alias already bound to
    /// a different key is a conflict and aborts. Network failures while
    /// syncing are logged and ignored; a failure to mine or push a
    /// locally created binding aborts.
    pub fn init<L: MiningListener>(&mut self, listener: &L) -> Result<Registration> {
        self.setup_peers()?;

        let identity = NodeIdentity::load_or_create(&self.config.keys_dir(), &self.config.alias)?;
        info!(alias = %identity.alias, key = %identity.public_key().to_base64(), "node identity ready");

        let mut aliases = Channel::open(ALIAS_CHANNEL);
        self.sync_best_effort(&mut aliases);

        if let Some(registration) = self.find_existing_binding(&aliases, &identity)? {
            self.identity = Some(identity);
            return Ok(registration);
        }

        let registration = match self.registrar.register(&self.config.alias, &identity.public_key())
        {
            Ok(()) => {
                info!(alias = %self.config.alias, "alias registered remotely");
                // Fetch the node-mined binding so the local cache has it.
                self.sync_best_effort(&mut aliases);
                Registration::Remote
            }
            Err(err) => {
                warn!(alias = %self.config.alias, error = %err, "remote registration failed, mining locally");
                self.mine_binding(&mut aliases, &identity, listener)?;
                Registration::MinedLocally
            }
        };

        self.identity = Some(identity);
        Ok(registration)
    }

    fn setup_peers(&self) -> Result<()> {
        let path = self.config.peers_path();
        let mut peers = PeerSet::load(&path)?;
        peers.add(&self.config.colour_host);
        peers.add(&self.config.ledger_host);
        for host in &self.config.peers {
            peers.add(host);
        }
        peers.save(&path)?;
        debug!(count = peers.len(), "peer list ready");
        Ok(())
    }

    /// Load and pull a channel, treating every network failure as
    /// transient. A channel that cannot be reached simply keeps (or
    /// stays in) its local state.
    pub(crate) fn sync_best_effort(&self, channel: &mut Channel) {
        if let Err(err) = channel.load_head(&self.cache, Some(&self.network)) {
            debug!(channel = %channel.name, error = %err, "no head available");
        }
        if let Err(err) = channel.pull(&self.cache, &self.network) {
            warn!(channel = %channel.name, error = %err, "pull failed, using local state");
        }
    }

    /// Scan the alias channel for a binding of our alias. Newest
    /// binding wins.
    fn find_existing_binding(
        &self,
        aliases: &Channel,
        identity: &NodeIdentity,
    ) -> Result<Option<Registration>> {
        for entry in aliases.entries(&self.cache) {
            let binding = match AliasBinding::from_payload(&entry.record.payload) {
                Ok(binding) => binding,
                Err(err) => {
                    debug!(record = %entry.record_hash, error = %err, "skipping undecodable alias record");
                    continue;
                }
            };
            if binding.alias != self.config.alias {
                continue;
            }
            if binding.public_key == identity.public_key() {
                debug!(alias = %self.config.alias, "alias already bound to our key");
                return Ok(Some(Registration::AlreadyRegistered));
            }
            return Err(ClientError::AliasConflict {
                alias: self.config.alias.clone(),
            });
        }
        Ok(None)
    }

    /// Mine a signed alias binding into the alias channel and push it to
    /// peers. Unlike the sync paths, a push failure here is fatal.
    fn mine_binding<L: MiningListener>(
        &self,
        aliases: &mut Channel,
        identity: &NodeIdentity,
        listener: &L,
    ) -> Result<()> {
        let binding = AliasBinding {
            alias: self.config.alias.clone(),
            public_key: identity.public_key(),
        };
        let record = RecordBuilder::new(identity.public_key())
            .timestamp(now_millis())
            .payload(binding.to_payload()?)
            .sign(identity.keypair());

        let hash = mine(
            aliases,
            vec![record],
            self.config.difficulty,
            listener,
            &self.cache,
        )?;
        info!(alias = %self.config.alias, block = %hash, "alias binding mined");

        aliases.push(&self.cache, &self.network)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colour_chain::{MemoryCache, MemoryNetwork, NoopListener};
    use colour_testkit::{FakeRegistrar, TestWorld};

    fn client_in(
        dir: &std::path::Path,
        world: &TestWorld,
    ) -> Client<MemoryCache, MemoryNetwork, FakeRegistrar> {
        let config = ClientConfig::new("ada", dir);
        Client::new(
            config,
            MemoryCache::new(),
            world.network.clone(),
            world.registrar.clone(),
        )
    }

    #[test]
    fn test_init_writes_peer_list_once() {
        let dir = tempfile::tempdir().unwrap();
        let world = TestWorld::new();
        let mut client = client_in(dir.path(), &world);
        client.init(&NoopListener).unwrap();
        client.init(&NoopListener).unwrap();

        let peers = PeerSet::load(&client.config().peers_path()).unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(
            peers.hosts()[0],
            client.config().colour_host
        );
    }
}
