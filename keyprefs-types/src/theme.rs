//! Colour primitives and the chromagram colour themes.

use serde::{Deserialize, Serialize};

/// One 8-bit-per-channel swatch or pixel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

define_ordinal_enum! {
    /// Colour scheme for chromagram rendering and key swatches.
    pub enum ChromaTheme {
        /// Multi-hue default.
        Izo => 0, "izo",
        /// Greyscale, safe for every form of colour blindness.
        Mono => 1, "mono",
        /// Thermal blue-to-red ramp.
        Predator => 2, "predator",
        /// Red on black.
        VirtualBoy => 3, "virtual-boy",
        /// Green on black.
        Hacker => 4, "hacker",
    }
}

impl Default for ChromaTheme {
    fn default() -> Self {
        ChromaTheme::Izo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting_pads_channels() {
        assert_eq!(Rgb::new(0, 128, 255).to_hex(), "#0080ff");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }
}
