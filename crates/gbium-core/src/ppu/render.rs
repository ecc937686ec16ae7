//! Whole-line renderer run at the end of pixel transfer.
//!
//! The background pass walks the active tile map from the scroll origin and
//! records each pixel's raw color index by screen x. The sprite pass then
//! overlays up to 40 sprites in OAM order: index 0 is considered first and
//! keeps any screen column it covers with an opaque pixel.

use super::{Ppu, SCREEN_HEIGHT, SCREEN_WIDTH, sprite::SpriteAttributes};
use crate::memory::ppu as ppu_mem;

impl Ppu {
    /// Draws the current line into the frame buffer.
    pub(crate) fn render_scanline(&mut self) {
        let line = self.registers.line;
        if line as usize >= SCREEN_HEIGHT {
            return;
        }
        let mut bg_line = [0u8; SCREEN_WIDTH];
        if self.registers.control.background_enabled() {
            self.render_background(line, &mut bg_line);
        }
        if self.registers.control.sprites_enabled() {
            self.render_sprites(line, &bg_line);
        }
    }

    fn render_background(&mut self, line: u8, bg_line: &mut [u8; SCREEN_WIDTH]) {
        let regs = &self.registers;
        let control = regs.control;

        let y = line.wrapping_add(regs.scroll_y);
        let map_row = control.tile_map_base() + (y as u16 / 8) * ppu_mem::TILE_MAP_WIDTH;
        let pixel_row = y % 8;

        let mut map_col = (regs.scroll_x / 8) as u16 % ppu_mem::TILE_MAP_WIDTH;
        let mut pixel_col = regs.scroll_x % 8;
        let mut tile = control.background_tile(self.vram[(map_row + map_col) as usize]);

        for (x, raw) in bg_line.iter_mut().enumerate() {
            let color = self.tile_cache.pixel(tile, pixel_row, pixel_col);
            *raw = color;
            self.frame
                .set(x, line as usize, regs.bg_palette.shade(color));

            pixel_col += 1;
            if pixel_col == 8 {
                pixel_col = 0;
                map_col = (map_col + 1) % ppu_mem::TILE_MAP_WIDTH;
                tile = control.background_tile(self.vram[(map_row + map_col) as usize]);
            }
        }
    }

    fn render_sprites(&mut self, line: u8, bg_line: &[u8; SCREEN_WIDTH]) {
        let regs = &self.registers;
        let height = regs.control.sprite_height();
        // Columns already claimed by an opaque pixel of a lower-index sprite.
        let mut claimed = [false; SCREEN_WIDTH];

        for sprite in self.sprites.iter() {
            if !sprite.covers_line(line, height) {
                continue;
            }
            let attributes = sprite.attributes;

            let offset = (line as i16 - sprite.y) as u8;
            let row = if attributes.contains(SpriteAttributes::FLIP_VERTICAL) {
                (height - 1) - offset
            } else {
                offset
            };
            let (tile, row) = match (height, row) {
                (16, 0..=7) => (sprite.tile & 0xFE, row),
                (16, _) => (sprite.tile | 0x01, row % 8),
                _ => (sprite.tile, row),
            };

            let palette = regs.obj_palettes[attributes.palette_index()];
            let behind_bg = attributes.contains(SpriteAttributes::PRIORITY_BEHIND_BACKGROUND);
            let flip_x = attributes.contains(SpriteAttributes::FLIP_HORIZONTAL);

            for col in 0..8u8 {
                let screen_x = if flip_x {
                    sprite.x + (7 - col) as i16
                } else {
                    sprite.x + col as i16
                };
                if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                    continue;
                }
                let x = screen_x as usize;

                let color = self.tile_cache.pixel(tile as u16, row, col);
                if color == 0 || claimed[x] {
                    continue;
                }
                claimed[x] = true;

                if !behind_bg || bg_line[x] == 0 {
                    self.frame.set(x, line as usize, palette.shade(color));
                }
            }
        }
    }
}
