//! Color value and palette swatch types.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black, the fallback color for degenerate regions.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Formats the color as a lowercase `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One entry of an extracted color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    /// Identifier in prominence order (e.g. `color_0`).
    pub id: String,
    /// Hex representation, `#rrggbb`.
    pub hex: String,
    /// RGB channels of the swatch.
    pub rgb: Rgb,
    /// Categorical color name (white, black, red, ...).
    pub name: String,
}
