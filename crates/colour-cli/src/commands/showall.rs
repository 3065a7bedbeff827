//! Show every canvas with a given colour mode.

use std::io::Write;

use colour_core::{BlockEntry, Canvas};

use crate::cli::Cli;
use crate::context::build_client;
use crate::error::CliResult;
use crate::output::print_canvas_short;

/// Execute the showall command.
///
/// The mode is matched by exact tag comparison; an unknown tag simply
/// matches nothing.
pub fn run<W: Write>(cli: &Cli, mode: &str, w: &mut W) -> CliResult<()> {
    let client = build_client(cli)?;
    render(client.canvases().mode(mode), mode, w)
}

/// Render like `list`: one line per canvas, then the count.
fn render<W: Write>(
    canvases: impl Iterator<Item = (BlockEntry, Canvas)>,
    mode: &str,
    w: &mut W,
) -> CliResult<()> {
    let mut count = 0usize;
    for (entry, canvas) in canvases {
        print_canvas_short(w, &entry, &canvas)?;
        count += 1;
    }
    writeln!(w, "{count} canvases with mode {mode}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colour_core::{ColourMode, Keypair, RecordBuilder};

    fn entry(name: &str) -> (BlockEntry, Canvas) {
        let canvas = Canvas {
            name: name.to_string(),
            width: 16,
            height: 9,
            depth: 1,
            mode: ColourMode::Rgb,
        };
        let keypair = Keypair::from_seed(&[5; 32]);
        let record = RecordBuilder::new(keypair.public_key())
            .timestamp(1_700_000_000_000)
            .payload(canvas.to_payload().unwrap())
            .sign(&keypair);
        (BlockEntry::new(record), canvas)
    }

    #[test]
    fn test_render_is_one_line_per_canvas() {
        let mut buffer = Vec::new();
        render(
            vec![entry("sunset"), entry("sunrise")].into_iter(),
            "RGB",
            &mut buffer,
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("sunset"));
        assert!(!lines[0].contains("name:"));
        assert!(lines[1].contains("sunrise"));
        assert_eq!(lines[2], "2 canvases with mode RGB");
    }
}
