//! Decoded view of the VRAM tile data region.
//!
//! Tiles are stored 2bpp planar: each 8-pixel row is two bytes, the first
//! holding bit 0 of every pixel and the second bit 1, leftmost pixel in the
//! most significant bit. The cache keeps one color index (0..=3) per pixel in
//! a flat block indexed by `tile * 64 + row * 8 + col`.

use crate::{mem_block::video::TilePixels, memory::ppu as ppu_mem};

pub const TILE_SIZE: usize = 8;
pub const PIXELS_PER_TILE: usize = TILE_SIZE * TILE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TileCache {
    pixels: TilePixels,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    fn index(tile: u16, row: u8, col: u8) -> usize {
        (tile as usize % ppu_mem::TILE_COUNT) * PIXELS_PER_TILE
            + (row as usize & 7) * TILE_SIZE
            + (col as usize & 7)
    }

    /// Color index at `(row, col)` of `tile`.
    #[inline]
    pub fn pixel(&self, tile: u16, row: u8, col: u8) -> u8 {
        self.pixels[Self::index(tile, row, col)]
    }

    /// One decoded row of `tile`, leftmost pixel first.
    pub fn row(&self, tile: u16, row: u8) -> &[u8] {
        let start = Self::index(tile, row, 0);
        &self.pixels[start..start + TILE_SIZE]
    }

    /// Re-decodes the tile row touched by a write at `offset` in VRAM.
    ///
    /// Offsets outside the tile data region are ignored. Both planes are
    /// re-read from `vram` so writes to either byte of a row pair land here.
    pub fn refresh(&mut self, vram: &[u8], offset: u16) {
        if offset >= ppu_mem::TILE_DATA_END {
            return;
        }
        let tile = offset / ppu_mem::TILE_BYTES;
        let row = ((offset >> 1) & 7) as u8;
        let base = (offset & !1) as usize;
        self.decode_row(tile, row, vram[base], vram[base + 1]);
    }

    /// Overwrites exactly the eight cached indices of one tile row.
    pub fn decode_row(&mut self, tile: u16, row: u8, low: u8, high: u8) {
        let start = Self::index(tile, row, 0);
        for (col, slot) in self.pixels[start..start + TILE_SIZE]
            .iter_mut()
            .enumerate()
        {
            let bit = 7 - col;
            *slot = ((low >> bit) & 1) | (((high >> bit) & 1) << 1);
        }
    }
}
