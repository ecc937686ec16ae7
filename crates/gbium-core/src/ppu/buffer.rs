//! Frame storage produced by the scanline renderer.
//!
//! The PPU writes shades (0..=3) into a single [`FrameBuffer`]. At vertical
//! blank the finished buffer is lent read-only to the display sink, then the
//! next frame overwrites it line by line. Packing shades into host pixel
//! formats is done on the sink side with [`ColorFormat::encode`].
use crate::{
    mem_block::video::FramePixels,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH, palette::Color},
};

/// Describes how a logical RGB color is packed into the underlying byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// 16-bit packed RGB using 5 bits per channel (0RRRRRGGGGGBBBBB).
    Rgb555,
    /// 16-bit packed RGB using 5/6/5 bits (RRRRRGGGGGGBBBBB).
    Rgb565,
    /// Packed 24-bit RGB, 3 bytes per pixel in R, G, B order.
    Rgb888,
    /// Packed 32-bit RGBA, 4 bytes per pixel in R, G, B, A order.
    #[default]
    Rgba8888,
    /// Packed 32-bit BGRA, 4 bytes per pixel in B, G, R, A order.
    Bgra8888,
    /// Packed 32-bit ARGB, 4 bytes per pixel in A, R, G, B order.
    Argb8888,
}

impl ColorFormat {
    /// Returns the number of bytes used to represent a single pixel in this format.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::Rgb555 | ColorFormat::Rgb565 => 2,
            ColorFormat::Rgb888 => 3,
            ColorFormat::Rgba8888 | ColorFormat::Bgra8888 | ColorFormat::Argb8888 => 4,
        }
    }

    /// Bytes per scanline of a full-width frame.
    #[inline]
    pub const fn pitch(self) -> usize {
        SCREEN_WIDTH * self.bytes_per_pixel()
    }

    /// Bytes needed for a whole frame.
    #[inline]
    pub const fn frame_len(self) -> usize {
        self.pitch() * SCREEN_HEIGHT
    }

    /// Packs `color` into `out`, which must be exactly one pixel long.
    pub fn encode(self, color: Color, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.bytes_per_pixel());
        match self {
            ColorFormat::Rgb555 => {
                let r5 = (color.r as u16) >> 3;
                let g5 = (color.g as u16) >> 3;
                let b5 = (color.b as u16) >> 3;
                let packed = (r5 << 10) | (g5 << 5) | b5;
                out.copy_from_slice(&packed.to_le_bytes());
            }
            ColorFormat::Rgb565 => {
                let r5 = (color.r as u16) >> 3;
                let g6 = (color.g as u16) >> 2;
                let b5 = (color.b as u16) >> 3;
                let packed = (r5 << 11) | (g6 << 5) | b5;
                out.copy_from_slice(&packed.to_le_bytes());
            }
            ColorFormat::Rgb888 => out.copy_from_slice(&[color.r, color.g, color.b]),
            ColorFormat::Rgba8888 => out.copy_from_slice(&[color.r, color.g, color.b, 0xFF]),
            ColorFormat::Bgra8888 => out.copy_from_slice(&[color.b, color.g, color.r, 0xFF]),
            ColorFormat::Argb8888 => out.copy_from_slice(&[0xFF, color.r, color.g, color.b]),
        }
    }
}

/// 160x144 grid of shades, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FrameBuffer {
    pixels: FramePixels,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Shade at `(x, y)`, or `None` outside the screen.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < SCREEN_WIDTH && y < SCREEN_HEIGHT).then(|| self.pixels[y * SCREEN_WIDTH + x])
    }

    /// Writes a shade at `(x, y)`; coordinates off screen are clipped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, shade: u8) {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.pixels[y * SCREEN_WIDTH + x] = shade & 0b11;
        }
    }

    /// One row of shades.
    pub fn line(&self, y: usize) -> &[u8] {
        let start = y * SCREEN_WIDTH;
        &self.pixels[start..start + SCREEN_WIDTH]
    }

    pub fn as_slice(&self) -> &[u8] {
        self.pixels.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_off_screen_are_clipped() {
        let mut frame = FrameBuffer::new();
        frame.set(SCREEN_WIDTH, 0, 3);
        frame.set(0, SCREEN_HEIGHT, 3);
        assert!(frame.as_slice().iter().all(|&s| s == 0));
        assert_eq!(frame.get(SCREEN_WIDTH, 0), None);

        frame.set(159, 143, 2);
        assert_eq!(frame.get(159, 143), Some(2));
        assert_eq!(frame.line(143)[159], 2);
    }

    #[test]
    fn encodes_each_format() {
        let color = Color::new(0xF8, 0xFC, 0x08);
        let mut two = [0u8; 2];
        ColorFormat::Rgb565.encode(color, &mut two);
        assert_eq!(u16::from_le_bytes(two), (0x1F << 11) | (0x3F << 5) | 0x01);
        ColorFormat::Rgb555.encode(color, &mut two);
        assert_eq!(u16::from_le_bytes(two), (0x1F << 10) | (0x1F << 5) | 0x01);

        let mut four = [0u8; 4];
        ColorFormat::Bgra8888.encode(color, &mut four);
        assert_eq!(four, [0x08, 0xFC, 0xF8, 0xFF]);
        ColorFormat::Argb8888.encode(color, &mut four);
        assert_eq!(four, [0xFF, 0xF8, 0xFC, 0x08]);
        assert_eq!(ColorFormat::Rgb888.frame_len(), 160 * 144 * 3);
    }
}
