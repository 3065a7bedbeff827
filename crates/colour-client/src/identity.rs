//! Node identity: an alias plus its signing keypair.
//!
//! Key material lives at `<keys dir>/<alias>.key` as a hex-encoded
//! 32-byte ed25519 seed. Loading an existing file and generating a new
//! one go through the same entry point so init is idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use colour_core::{Ed25519PublicKey, Keypair};

use crate::error::{ClientError, Result};

/// An alias and the keypair that signs for it.
pub struct NodeIdentity {
    /// The alias this identity signs as.
    pub alias: String,
    keypair: Keypair,
}

impl NodeIdentity {
    /// Load the key file for `alias` under `keys_dir`, generating and
    /// persisting a fresh keypair if none exists.
    pub fn load_or_create(keys_dir: &Path, alias: &str) -> Result<Self> {
        let path = Self::key_path(keys_dir, alias);
        if path.exists() {
            let keypair = Self::read_key(&path)?;
            debug!(alias, path = %path.display(), "loaded existing keypair");
            return Ok(Self {
                alias: alias.to_string(),
                keypair,
            });
        }

        let keypair = Keypair::generate();
        fs::create_dir_all(keys_dir)?;
        fs::write(&path, hex::encode(keypair.seed()))?;
        info!(alias, path = %path.display(), "generated new keypair");
        Ok(Self {
            alias: alias.to_string(),
            keypair,
        })
    }

    /// The signing keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// The public half of the keypair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    fn key_path(keys_dir: &Path, alias: &str) -> PathBuf {
        keys_dir.join(format!("{alias}.key"))
    }

    fn read_key(path: &Path) -> Result<Keypair> {
        let contents = fs::read_to_string(path)?;
        let bytes = hex::decode(contents.trim())
            .map_err(|err| ClientError::MalformedKey(err.to_string()))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ClientError::MalformedKey("seed must be 32 bytes".to_string()))?;
        Ok(Keypair::from_seed(&seed))
    }
}
