//! # Colour Chain
//!
//! Ledger plumbing for the Colour client. The client core treats these as
//! injected collaborators; every seam is a trait with a real implementation
//! and an in-memory test double with the same semantics.
//!
//! ## Key Types
//!
//! - [`Cache`] - Block/head/record persistence ([`MemoryCache`], [`FileCache`])
//! - [`Network`] - Remote head/block access ([`MemoryNetwork`], [`TcpNetwork`])
//! - [`PeerSet`] - Ordered, duplicate-free peer host list
//! - [`Channel`] - A named, reverse-linked chain: load-head, pull, push, iterate
//! - [`mine`] - Nonce-search commit of records into a channel
//! - [`AliasRegistrar`] - Remote alias registration ([`HttpRegistrar`])

pub mod cache;
pub mod channel;
pub mod error;
pub mod file;
pub mod mine;
pub mod network;
pub mod peers;
pub mod registrar;
pub mod tcp;

pub use cache::{Cache, MemoryCache};
pub use channel::{Channel, EntryIter, HeadRef};
pub use error::{ChainError, Result};
pub use file::FileCache;
pub use mine::{mine, now_millis, MiningListener, NoopListener, DEFAULT_DIFFICULTY};
pub use network::{MemoryNetwork, Network};
pub use peers::PeerSet;
pub use registrar::{AliasRegistrar, HttpRegistrar};
pub use tcp::{TcpNetwork, DEFAULT_PORT};
