//! Client configuration.
//!
//! Every knob is an explicit field. Defaults that come from the
//! environment (home directory, `$COLOUR_ALIAS`) are resolved by the
//! binary, not here.

use std::path::PathBuf;

use colour_chain::DEFAULT_DIFFICULTY;

/// Configuration for a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The alias this node acts as.
    pub alias: String,
    /// Root directory for keys, the peer list, and the cache.
    pub root_dir: PathBuf,
    /// Peer hosts to add on init, in priority order.
    pub peers: Vec<String>,
    /// The Colour application host, always added as a peer.
    pub colour_host: String,
    /// The ledger host, always added as a peer and used for alias
    /// registration.
    pub ledger_host: String,
    /// Mining difficulty in leading zero bits.
    pub difficulty: u32,
}

impl ClientConfig {
    /// Configuration with the given alias and root, standard hosts, no
    /// extra peers.
    pub fn new(alias: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            alias: alias.into(),
            root_dir: root_dir.into(),
            peers: Vec::new(),
            colour_host: "colour.aletheiaware.com".to_string(),
            ledger_host: "bc.aletheiaware.com".to_string(),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    /// Path of the persisted peer list.
    pub fn peers_path(&self) -> PathBuf {
        self.root_dir.join("peers")
    }

    /// Directory holding key files.
    pub fn keys_dir(&self) -> PathBuf {
        self.root_dir.join("keys")
    }

    /// Directory holding the block cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.root_dir.join("cache")
    }
}
