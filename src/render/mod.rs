//! QR symbol rendering, terminal preview and decode-back verification
//!
//! Symbol construction (module placement, error-correction codewords,
//! finder patterns) is delegated to the `qrcode` crate; this module only
//! fixes the rendering parameters and rasterizes the result with `image`.

mod decoder;
mod renderer;
mod terminal;

pub use decoder::QrDecoder;
pub use renderer::QrRenderer;
pub use terminal::render_terminal;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted output size in pixels
pub const MIN_SIZE: u32 = 128;
/// Largest accepted output size in pixels
pub const MAX_SIZE: u32 = 300;
/// Output size used when nothing else is configured
pub const DEFAULT_SIZE: u32 = 220;

/// Error-correction level applied to every symbol (highest tier)
pub const ERROR_CORRECTION: qrcode::EcLevel = qrcode::EcLevel::H;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Black
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);
    /// White, the fixed background
    pub const WHITE: Color = Color([0xFF, 0xFF, 0xFF]);
    /// Navy blue
    pub const NAVY: Color = Color([0x1E, 0x3A, 0x8A]);
    /// Forest green
    pub const GREEN: Color = Color([0x16, 0x65, 0x34]);
    /// Dark red
    pub const RED: Color = Color([0xB9, 0x1C, 0x1C]);
    /// Purple
    pub const PURPLE: Color = Color([0x6B, 0x21, 0xA8]);

    /// Named foreground palette offered to users
    pub const PALETTE: [(&'static str, Color); 5] = [
        ("black", Color::BLACK),
        ("navy", Color::NAVY),
        ("green", Color::GREEN),
        ("red", Color::RED),
        ("purple", Color::PURPLE),
    ];

    /// Parse a palette name or a `#RRGGBB` / `RRGGBB` hex triplet.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some((_, color)) = Self::PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Ok(*color);
        }

        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 {
            return Err(Error::InvalidColor(format!(
                "'{value}' is neither a palette color nor #RRGGBB"
            )));
        }

        let bytes = hex::decode(digits)?;
        Ok(Color([bytes[0], bytes[1], bytes[2]]))
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode(self.0))
    }

    /// Palette name, if this color is one of the named entries
    pub fn palette_name(self) -> Option<&'static str> {
        Self::PALETTE
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(name, _)| *name)
    }

    pub(crate) fn rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Validated rendering parameters
///
/// Background is always white and error correction always [`ERROR_CORRECTION`];
/// only the foreground and the pixel size are user-selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    foreground: Color,
    size: u32,
}

impl RenderOptions {
    /// Build options, rejecting sizes outside [`MIN_SIZE`]..=[`MAX_SIZE`].
    pub fn new(foreground: Color, size: u32) -> Result<Self> {
        Ok(Self {
            foreground,
            size: validate_size(size)?,
        })
    }

    /// Foreground (dark module) color
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Background (light module) color
    pub fn background(&self) -> Color {
        Color::WHITE
    }

    /// Output width and height in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Copy with a new foreground color
    pub fn with_foreground(self, foreground: Color) -> Self {
        Self { foreground, ..self }
    }

    /// Copy with a new size, validated like [`RenderOptions::new`]
    pub fn with_size(self, size: u32) -> Result<Self> {
        Ok(Self {
            size: validate_size(size)?,
            ..self
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            size: DEFAULT_SIZE,
        }
    }
}

fn validate_size(size: u32) -> Result<u32> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(Error::InvalidSize {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}
