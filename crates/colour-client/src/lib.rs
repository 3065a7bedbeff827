//! # Colour Client
//!
//! Client core for the Colour canvas ledger. Ties the data model and
//! chain plumbing together behind two operations:
//!
//! - [`Client::init`] - bootstrap a node: peers, keys, alias registration
//! - [`Client::canvases`] - synchronized, filterable canvas queries
//!
//! The [`Client`] is generic over its cache, network, and registrar, so
//! the full bootstrap and query paths run unchanged against in-memory
//! fakes in tests.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod identity;
pub mod query;

pub use bootstrap::{Client, Registration};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use identity::NodeIdentity;
pub use query::CanvasIter;
