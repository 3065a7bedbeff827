//! # Colour Testkit
//!
//! Testing utilities for the Colour client.
//!
//! - **Fixtures**: [`TestWorld`] stands in for a remote node: an
//!   in-memory network pre-seeded with canvas and alias chains, plus a
//!   scriptable [`FakeRegistrar`].
//! - **Generators**: proptest strategies for canvases and records.

pub mod fixtures;
pub mod generators;

pub use fixtures::{FakeRegistrar, TestWorld};
