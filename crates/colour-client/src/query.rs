//! Canvas queries: a lazy, filterable view over the canvas channel.
//!
//! [`Client::canvases`] synchronizes the canvas channel on a best-effort
//! basis and returns an iterator. Nothing is decoded until the iterator
//! is driven, and filters short-circuit per entry, so `find`-style
//! consumers stop walking the chain as soon as they are satisfied.

use tracing::debug;

use colour_chain::{AliasRegistrar, Cache, Channel, EntryIter, Network};
use colour_core::{BlockEntry, Canvas, RecordHash, CANVAS_CHANNEL};

use crate::bootstrap::Client;

impl<C: Cache, N: Network, R: AliasRegistrar> Client<C, N, R> {
    /// Iterate the canvases on the canvas channel, newest block first.
    ///
    /// The channel is pulled from peers first; if peers are unreachable
    /// the iterator runs over cached state alone.
    pub fn canvases(&self) -> CanvasIter<'_, C> {
        let mut channel = Channel::open(CANVAS_CHANNEL);
        self.sync_best_effort(&mut channel);
        CanvasIter {
            entries: channel.entries(self.cache()),
            alias: self.config().alias.clone(),
            target: None,
            mode: None,
            done: false,
        }
    }
}

/// Iterator over decoded canvases, with optional filters.
///
/// Entries this node may not read, and entries whose payload is not a
/// canvas, are skipped with a debug log; a foreign record on the channel
/// must not poison the whole query.
pub struct CanvasIter<'a, C: Cache> {
    entries: EntryIter<'a, C>,
    alias: String,
    target: Option<RecordHash>,
    mode: Option<String>,
    done: bool,
}

impl<'a, C: Cache> CanvasIter<'a, C> {
    /// Keep only the canvas whose record hash matches. The iterator
    /// stops walking the chain once that entry has been seen.
    pub fn target(mut self, hash: RecordHash) -> Self {
        self.target = Some(hash);
        self
    }

    /// Keep only canvases whose mode tag equals `mode` exactly.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

impl<'a, C: Cache> Iterator for CanvasIter<'a, C> {
    type Item = (BlockEntry, Canvas);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            let entry = self.entries.next()?;
            if let Some(target) = &self.target {
                if entry.record_hash != *target {
                    continue;
                }
                // Record hashes are unique on the channel, so once the
                // target entry has been seen there is nothing further
                // to walk, whether or not it decodes.
                self.done = true;
            }
            let payload = match entry.record.open(&self.alias) {
                Ok(payload) => payload,
                Err(err) => {
                    debug!(record = %entry.record_hash, error = %err, "skipping unreadable record");
                    continue;
                }
            };
            let canvas = match Canvas::from_payload(payload) {
                Ok(canvas) => canvas,
                Err(err) => {
                    debug!(record = %entry.record_hash, error = %err, "skipping non-canvas record");
                    continue;
                }
            };
            if let Some(mode) = &self.mode {
                if canvas.mode.tag() != mode {
                    continue;
                }
            }
            return Some((entry, canvas));
        }
    }
}
