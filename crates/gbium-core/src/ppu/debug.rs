//! Debug views of decoded video state.

use super::{Ppu, registers::DmgPalette, tile_cache::TileCache};

/// Tiles reachable through the tile data region (`$8000-$97FF`).
pub const SHEET_TILES: u16 = 384;
/// Tiles per sheet row.
pub const SHEET_COLUMNS: usize = 16;
pub const SHEET_WIDTH: usize = SHEET_COLUMNS * 8;
pub const SHEET_HEIGHT: usize = (SHEET_TILES as usize / SHEET_COLUMNS) * 8;

const GRID_SHADE: u8 = 3;

/// Shade grid holding every tile, 16 per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSheet {
    shades: Vec<u8>,
}

impl TileSheet {
    pub fn width(&self) -> usize {
        SHEET_WIDTH
    }

    pub fn height(&self) -> usize {
        SHEET_HEIGHT
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < SHEET_WIDTH && y < SHEET_HEIGHT).then(|| self.shades[y * SHEET_WIDTH + x])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.shades
    }
}

/// Lays out tiles 0..384 through `palette`.
///
/// The top row and left column of each 8x8 cell are drawn as grid lines.
pub fn render_tile_sheet(tiles: &TileCache, palette: &DmgPalette) -> TileSheet {
    let mut shades = vec![0; SHEET_WIDTH * SHEET_HEIGHT];
    for tile in 0..SHEET_TILES {
        let origin_x = (tile as usize % SHEET_COLUMNS) * 8;
        let origin_y = (tile as usize / SHEET_COLUMNS) * 8;
        for row in 0..8u8 {
            let line = &mut shades[(origin_y + row as usize) * SHEET_WIDTH + origin_x..][..8];
            for (col, shade) in line.iter_mut().enumerate() {
                *shade = if row == 0 || col == 0 {
                    GRID_SHADE
                } else {
                    palette.shade(tiles.pixel(tile, row, col as u8))
                };
            }
        }
    }
    TileSheet { shades }
}

impl Ppu {
    /// Tile sheet drawn with the current background palette.
    pub fn tile_sheet(&self) -> TileSheet {
        render_tile_sheet(&self.tile_cache, &self.registers.bg_palette)
    }
}
