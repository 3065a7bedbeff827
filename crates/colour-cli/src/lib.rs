//! # Colour CLI
//!
//! Terminal interface for the Colour canvas ledger. The binary wires
//! the client core to its file cache, TCP peers, and the HTTPS alias
//! registrar; everything else lives in library modules so it can be
//! exercised in tests.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
