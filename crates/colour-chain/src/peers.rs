//! Peer list: an ordered, duplicate-free set of peer hosts.
//!
//! Order is preserved because it is meaningful: peers are tried in the
//! order they were added, and the persisted file keeps that order across
//! restarts.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// An ordered set of peer host names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerSet {
    hosts: Vec<String>,
}

impl PeerSet {
    /// Create an empty peer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a peer set from a file, one host per line.
    ///
    /// A missing file yields an empty set. Blank lines are skipped and
    /// duplicates collapse to their first occurrence.
    pub fn load(path: &Path) -> Result<Self> {
        let mut peers = Self::new();
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(peers),
            Err(err) => return Err(err.into()),
        };
        for line in BufReader::new(file).lines() {
            let line = line?;
            let host = line.trim();
            if !host.is_empty() {
                peers.add(host);
            }
        }
        Ok(peers)
    }

    /// Persist the set, one host per line, in insertion order.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        for host in &self.hosts {
            writeln!(file, "{host}")?;
        }
        debug!(path = %path.display(), count = self.hosts.len(), "saved peer list");
        Ok(())
    }

    /// Add a host. Returns true if it was new, false if already present.
    pub fn add(&mut self, host: &str) -> bool {
        if self.hosts.iter().any(|h| h == host) {
            return false;
        }
        self.hosts.push(host.to_string());
        true
    }

    /// Hosts in insertion order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }
}

impl<'a> IntoIterator for &'a PeerSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
