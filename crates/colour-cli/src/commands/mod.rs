//! Command implementations.
//!
//! Each command takes the parsed arguments plus a writer so output is
//! testable. Commands that are part of the surface but not built yet
//! fail with a distinct exit code instead of pretending to succeed.

pub mod init;
pub mod list;
pub mod show;
pub mod showall;

use crate::error::{CliError, CliResult};

/// Placeholder for commands that exist in the surface but have no
/// implementation yet.
pub fn unimplemented(name: &'static str) -> CliResult<()> {
    Err(CliError::Unimplemented(name))
}
