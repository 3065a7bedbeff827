//! File-backed cache: one CBOR file per head, block, and record.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/channel/<base64url(name)>   head of a channel
//! <root>/block/<base64url(hash)>     block body
//! <root>/record/<base64url(hash)>    pending record body
//! ```
//!
//! Hashes already have a base64url form; channel names are encoded the
//! same way so arbitrary names cannot escape the directory.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::debug;

use colour_core::{canonical, Block, BlockHash, Record, RecordHash};

use crate::cache::Cache;
use crate::channel::HeadRef;
use crate::error::Result;

/// Cache that persists under a root directory, one file per entry.
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Open a cache rooted at the given directory, creating the layout
    /// if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for sub in ["channel", "block", "record"] {
            fs::create_dir_all(root.join(sub))?;
        }
        debug!(root = %root.display(), "opened file cache");
        Ok(Self { root })
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn head_path(&self, channel: &str) -> PathBuf {
        self.root
            .join("channel")
            .join(URL_SAFE_NO_PAD.encode(channel.as_bytes()))
    }

    fn block_path(&self, hash: &BlockHash) -> PathBuf {
        self.root.join("block").join(hash.to_base64())
    }

    fn record_path(&self, hash: &RecordHash) -> PathBuf {
        self.root.join("record").join(hash.to_base64())
    }

    fn read_opt(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Cache for FileCache {
    fn head(&self, channel: &str) -> Result<Option<HeadRef>> {
        match Self::read_opt(&self.head_path(channel))? {
            Some(bytes) => Ok(Some(canonical::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_head(&self, head: &HeadRef) -> Result<()> {
        let bytes = canonical::to_vec(head)?;
        fs::write(self.head_path(&head.channel), bytes)?;
        Ok(())
    }

    fn block(&self, hash: &BlockHash) -> Result<Option<Block>> {
        match Self::read_opt(&self.block_path(hash))? {
            Some(bytes) => Ok(Some(canonical::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_block(&self, hash: &BlockHash, block: &Block) -> Result<()> {
        let bytes = canonical::to_vec(block)?;
        fs::write(self.block_path(hash), bytes)?;
        Ok(())
    }

    fn record(&self, hash: &RecordHash) -> Result<Option<Record>> {
        match Self::read_opt(&self.record_path(hash))? {
            Some(bytes) => Ok(Some(canonical::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_record(&self, record: &Record) -> Result<RecordHash> {
        let hash = record.compute_hash();
        let bytes = canonical::to_vec(record)?;
        fs::write(self.record_path(&hash), bytes)?;
        Ok(hash)
    }
}
