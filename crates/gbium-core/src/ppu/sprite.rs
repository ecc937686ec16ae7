use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// Attribute bits stored in sprite byte 3.
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// P V H p . . . .
    /// ```
    /// - `P`: Priority (behind non-zero background when set)
    /// - `V`: Vertical flip
    /// - `H`: Horizontal flip
    /// - `p`: Object palette select (OBP0/OBP1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SpriteAttributes: u8 {
        /// Use object palette 1 instead of 0.
        const PALETTE_1 = 0b0001_0000;

        /// Horizontal flip.
        const FLIP_HORIZONTAL = 0b0010_0000;

        /// Vertical flip.
        const FLIP_VERTICAL = 0b0100_0000;

        /// When set, sprite is drawn behind background colors 1-3.
        const PRIORITY_BEHIND_BACKGROUND = 0b1000_0000;
    }
}

impl Default for SpriteAttributes {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpriteAttributes {
    /// Index (0 or 1) of the object palette this sprite uses.
    pub fn palette_index(self) -> usize {
        usize::from(self.contains(SpriteAttributes::PALETTE_1))
    }
}

/// Decoded sprite record, positioned in screen space.
///
/// OAM stores positions biased so a sprite can sit partly off screen; the
/// descriptor removes the bias (`y - 16`, `x - 8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sprite {
    pub y: i16,
    pub x: i16,
    pub tile: u8,
    pub attributes: SpriteAttributes,
}

impl Sprite {
    const Y_BIAS: i16 = 16;
    const X_BIAS: i16 = 8;

    /// Whether `line` falls within `[y, y + height)`.
    pub fn covers_line(&self, line: u8, height: u8) -> bool {
        let line = line as i16;
        line >= self.y && line < self.y + height as i16
    }
}

impl Default for Sprite {
    /// Descriptor for an all-zero OAM record.
    fn default() -> Self {
        Self {
            y: -Self::Y_BIAS,
            x: -Self::X_BIAS,
            tile: 0,
            attributes: SpriteAttributes::empty(),
        }
    }
}

/// Field of a sprite record addressed by `offset % 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SpriteField {
    Y,
    X,
    Tile,
    Attributes,
}

impl SpriteField {
    fn from_offset(offset: usize) -> Self {
        match offset % ppu_mem::SPRITE_BYTES {
            0 => SpriteField::Y,
            1 => SpriteField::X,
            2 => SpriteField::Tile,
            _ => SpriteField::Attributes,
        }
    }
}

/// The 40 descriptors mirrored from OAM.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteTable {
    sprites: [Sprite; ppu_mem::SPRITE_COUNT],
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteTable {
    pub fn new() -> Self {
        Self {
            sprites: [Sprite::default(); ppu_mem::SPRITE_COUNT],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    /// Descriptors in OAM order; lower indices win overlaps.
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    /// Applies a byte written at `offset` in OAM to exactly one descriptor field.
    ///
    /// Offsets beyond the 40th record are ignored.
    pub fn update(&mut self, offset: usize, value: u8) {
        let Some(sprite) = self.sprites.get_mut(offset / ppu_mem::SPRITE_BYTES) else {
            return;
        };
        match SpriteField::from_offset(offset) {
            SpriteField::Y => sprite.y = value as i16 - Sprite::Y_BIAS,
            SpriteField::X => sprite.x = value as i16 - Sprite::X_BIAS,
            SpriteField::Tile => sprite.tile = value,
            SpriteField::Attributes => {
                sprite.attributes = SpriteAttributes::from_bits_retain(value)
            }
        }
    }
}
