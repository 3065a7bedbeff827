//! Wiring from parsed arguments to a concrete client.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use colour_chain::{FileCache, HttpRegistrar, PeerSet, TcpNetwork};
use colour_client::{Client, ClientConfig};

use crate::cli::Cli;
use crate::error::{CliError, CliResult};

/// The client as the binary runs it: file cache, TCP peers, HTTPS
/// registration.
pub type CliClient = Client<FileCache, TcpNetwork, HttpRegistrar>;

/// Resolve the root directory: flag first, then the platform data dir.
pub fn resolve_root(cli: &Cli) -> CliResult<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    let dirs = ProjectDirs::from("com", "aletheiaware", "colour")
        .ok_or_else(|| CliError::User("cannot determine a home directory; pass --root".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Build the configuration from arguments.
pub fn resolve_config(cli: &Cli) -> CliResult<ClientConfig> {
    let alias = cli
        .alias
        .clone()
        .ok_or_else(|| CliError::User("no alias; pass --alias or set COLOUR_ALIAS".into()))?;
    let mut config = ClientConfig::new(alias, resolve_root(cli)?);
    config.peers = cli.peers.clone();
    Ok(config)
}

/// Build a ready-to-use client from arguments.
///
/// The network talks to the persisted peer list plus the standard and
/// requested hosts, so query commands reach peers even before the list
/// has been saved by init.
pub fn build_client(cli: &Cli) -> CliResult<CliClient> {
    let config = resolve_config(cli)?;

    let mut peers = PeerSet::load(&config.peers_path())?;
    peers.add(&config.colour_host);
    peers.add(&config.ledger_host);
    for host in &config.peers {
        peers.add(host);
    }
    debug!(root = %config.root_dir.display(), peers = peers.len(), "client wiring");

    let cache = FileCache::open(config.cache_dir())?;
    let network = TcpNetwork::new(peers);
    let registrar = HttpRegistrar::new(&config.ledger_host);
    Ok(Client::new(config, cache, network, registrar))
}
