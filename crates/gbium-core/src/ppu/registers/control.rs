use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// LCD control register (`$FF40`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// L W w T M S O B
    /// ```
    /// - `B`: background enable
    /// - `O`: sprite (object) enable
    /// - `S`: sprite size (0=8x8, 1=8x16)
    /// - `M`: background tile map (0=`$9800`, 1=`$9C00`)
    /// - `T`: tile data bank (0=signed `$8800`, 1=unsigned `$8000`)
    /// - `w`: window enable
    /// - `W`: window tile map
    /// - `L`: LCD enable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Control: u8 {
        /// Draws the background layer (bit 0).
        /// When clear the background pass is skipped entirely.
        const BACKGROUND_ENABLE = 0b0000_0001;

        /// Draws sprites (bit 1).
        const SPRITE_ENABLE = 0b0000_0010;

        /// Uses 8x16 sprites instead of 8x8 (bit 2).
        const SPRITE_SIZE_16 = 0b0000_0100;

        /// Selects the second background tile map at `$9C00` (bit 3).
        const TILE_MAP = 0b0000_1000;

        /// Selects unsigned tile addressing from `$8000` (bit 4).
        /// When clear, map indices below 128 resolve to tiles 256..383.
        const TILE_DATA_UNSIGNED = 0b0001_0000;

        /// Window layer enable (bit 5). Stored only.
        const WINDOW_ENABLE = 0b0010_0000;

        /// Window tile map select (bit 6). Stored only.
        const WINDOW_TILE_MAP = 0b0100_0000;

        /// Display enable (bit 7). Stored only.
        const LCD_ENABLE = 0b1000_0000;
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::empty()
    }
}

impl Control {
    pub fn background_enabled(self) -> bool {
        self.contains(Control::BACKGROUND_ENABLE)
    }

    pub fn sprites_enabled(self) -> bool {
        self.contains(Control::SPRITE_ENABLE)
    }

    /// Sprite height in pixels (8 or 16).
    pub fn sprite_height(self) -> u8 {
        if self.contains(Control::SPRITE_SIZE_16) {
            16
        } else {
            8
        }
    }

    /// VRAM offset of the active background tile map.
    pub fn tile_map_base(self) -> u16 {
        if self.contains(Control::TILE_MAP) {
            ppu_mem::TILE_MAP_1
        } else {
            ppu_mem::TILE_MAP_0
        }
    }

    /// Resolves a tile map entry to a tile cache index (0..384).
    ///
    /// In signed mode, entries 0..=127 address the bank at `$9000`, which the
    /// cache stores as tiles 256..=383; entries 128..=255 share the low bank.
    pub fn background_tile(self, map_entry: u8) -> u16 {
        if !self.contains(Control::TILE_DATA_UNSIGNED) && map_entry < 128 {
            map_entry as u16 + 256
        } else {
            map_entry as u16
        }
    }
}
