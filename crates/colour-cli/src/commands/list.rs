//! List every canvas, newest first.

use std::io::Write;

use crate::cli::Cli;
use crate::context::build_client;
use crate::error::CliResult;
use crate::output::print_canvas_short;

/// Execute the list command.
pub fn run<W: Write>(cli: &Cli, w: &mut W) -> CliResult<()> {
    let client = build_client(cli)?;
    let mut count = 0usize;
    for (entry, canvas) in client.canvases() {
        print_canvas_short(w, &entry, &canvas)?;
        count += 1;
    }
    writeln!(w, "{count} canvases")?;
    Ok(())
}
