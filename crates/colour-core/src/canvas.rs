//! Canvas metadata carried in record payloads on the canvas channel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::{from_slice, to_vec};
use crate::error::CoreError;

/// The well-known name of the canvas channel.
pub const CANVAS_CHANNEL: &str = "colour-canvas";

/// Colour mode of a canvas.
///
/// The textual tags are part of the CLI contract: `showall <mode>` compares
/// them by exact string equality, with no case folding or aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColourMode {
    Unknown,
    Grayscale,
    GrayscaleAlpha,
    Indexed,
    Rgb,
    Rgba,
}

impl ColourMode {
    /// The exact textual tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Grayscale => "Grayscale",
            Self::GrayscaleAlpha => "GrayscaleAlpha",
            Self::Indexed => "Indexed",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }

    /// Parse a textual tag (exact match only).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "Unknown" => Some(Self::Unknown),
            "Grayscale" => Some(Self::Grayscale),
            "GrayscaleAlpha" => Some(Self::GrayscaleAlpha),
            "Indexed" => Some(Self::Indexed),
            "RGB" => Some(Self::Rgb),
            "RGBA" => Some(Self::Rgba),
            _ => None,
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named drawable surface: dimensions, colour depth, and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Human-readable canvas name.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bits per channel.
    pub depth: u32,
    /// Colour mode tag.
    pub mode: ColourMode,
}

impl Canvas {
    /// Encode to a record payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, CoreError> {
        to_vec(self)
    }

    /// Decode from a record payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, CoreError> {
        from_slice(bytes)
    }
}
