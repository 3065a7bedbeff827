//! Show one canvas in full, by record hash.

use std::io::Write;

use colour_core::RecordHash;

use crate::cli::Cli;
use crate::context::build_client;
use crate::error::{CliError, CliResult};
use crate::output::print_canvas_long;

/// Execute the show command.
pub fn run<W: Write>(cli: &Cli, hash: &str, w: &mut W) -> CliResult<()> {
    let target = RecordHash::from_base64(hash)
        .map_err(|err| CliError::User(format!("bad record hash '{hash}': {err}")))?;

    let client = build_client(cli)?;
    match client.canvases().target(target).next() {
        Some((entry, canvas)) => {
            print_canvas_long(w, &entry, &canvas)?;
            Ok(())
        }
        None => Err(CliError::NotFound(hash.to_string())),
    }
}
