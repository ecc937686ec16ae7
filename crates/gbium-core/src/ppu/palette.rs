//! Host colors for the four LCD shades.
//!
//! The PPU itself only produces shades 0..=3 (0 lightest). Turning those into
//! RGB is a presentation choice, so it is configured here and applied by the
//! color sink in [`crate::display`].

use core::fmt;

/// Simple RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// One host color per shade, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadePalette {
    colors: [Color; 4],
}

impl ShadePalette {
    pub const fn new(colors: [Color; 4]) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn color(&self, shade: u8) -> Color {
        self.colors[(shade & 0b11) as usize]
    }

    pub fn colors(&self) -> &[Color; 4] {
        &self.colors
    }
}

impl Default for ShadePalette {
    fn default() -> Self {
        PaletteKind::default().palette()
    }
}

/// Built-in shade palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteKind {
    /// Neutral gray ramp.
    #[default]
    Grayscale,
    /// Slightly warm grays resembling the later pocket-sized screens.
    Pocket,
    /// Yellow-green tint of the original reflective LCD.
    ClassicGreen,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 3] = [
        PaletteKind::Grayscale,
        PaletteKind::Pocket,
        PaletteKind::ClassicGreen,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PaletteKind::Grayscale => "grayscale",
            PaletteKind::Pocket => "pocket",
            PaletteKind::ClassicGreen => "classic-green",
        }
    }

    pub const fn palette(self) -> ShadePalette {
        match self {
            PaletteKind::Grayscale => ShadePalette::new([
                Color::gray(255),
                Color::gray(192),
                Color::gray(96),
                Color::gray(0),
            ]),
            PaletteKind::Pocket => ShadePalette::new([
                Color::new(0xE3, 0xE6, 0xC9),
                Color::new(0xC3, 0xC4, 0xA5),
                Color::new(0x8E, 0x8B, 0x61),
                Color::new(0x6C, 0x6C, 0x4E),
            ]),
            PaletteKind::ClassicGreen => ShadePalette::new([
                Color::new(0x9B, 0xBC, 0x0F),
                Color::new(0x8B, 0xAC, 0x0F),
                Color::new(0x30, 0x62, 0x30),
                Color::new(0x0F, 0x38, 0x0F),
            ]),
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
