//! Terminal rendering for canvases.
//!
//! Printers take a writer so tests can render into a buffer.

use std::io::{self, Write};

use colour_core::{BlockEntry, Canvas};

/// One-line summary: hash, timestamp, then the canvas fields.
pub fn print_canvas_short<W: Write>(w: &mut W, entry: &BlockEntry, canvas: &Canvas) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {} {} {} {} {}",
        entry.record_hash,
        entry.record.timestamp,
        canvas.name,
        canvas.width,
        canvas.height,
        canvas.depth,
        canvas.mode,
    )
}

/// Full rendering of one canvas, including its record metadata.
pub fn print_canvas_long<W: Write>(w: &mut W, entry: &BlockEntry, canvas: &Canvas) -> io::Result<()> {
    writeln!(w, "hash: {}", entry.record_hash)?;
    writeln!(w, "timestamp: {}", entry.record.timestamp)?;
    writeln!(w, "author: {}", entry.record.author.to_base64())?;
    writeln!(w, "name: {}", canvas.name)?;
    writeln!(w, "width: {}", canvas.width)?;
    writeln!(w, "height: {}", canvas.height)?;
    writeln!(w, "depth: {}", canvas.depth)?;
    writeln!(w, "mode: {}", canvas.mode)?;
    writeln!(w, "references: {}", entry.record.references.len())?;
    for reference in &entry.record.references {
        writeln!(w, "  {reference}")?;
    }
    Ok(())
}
