//! Shared definitions for the Game Boy video memory map.
//!
//! All video-related addresses live here so the PPU, the bus adapter and the
//! tests agree on one layout. Constants in [`bus`] are CPU bus addresses;
//! those in [`ppu`] are offsets from the start of their memory block.

/// System bus addresses the video subsystem answers to.
pub mod bus {
    /// First CPU bus address of video RAM (`$8000`).
    pub const VRAM_ADDR: u16 = 0x8000;
    /// Last CPU bus address of video RAM (`$9FFF`).
    pub const VRAM_END: u16 = 0x9FFF;

    /// First CPU bus address of object attribute memory (`$FE00`).
    pub const OAM_ADDR: u16 = 0xFE00;
    /// Last CPU bus address of object attribute memory (`$FE9F`).
    pub const OAM_END: u16 = 0xFE9F;

    /// Interrupt request register shared with the CPU (`$FF0F`).
    pub const INTERRUPT_FLAGS_ADDR: u16 = 0xFF0F;

    /// Base of the graphics control register block (`$FF40`).
    pub const REGISTER_BASE: u16 = 0xFF40;
    /// Last address decoded by the register block (`$FF4B`).
    ///
    /// Offsets past [`super::ppu::Register::ObjectPalette1`] are unmapped and
    /// fall back to read-0 / ignored-write.
    pub const REGISTER_END: u16 = 0xFF4B;
}

/// Video RAM, OAM and register layout relative to their block bases.
pub mod ppu {
    use crate::error::Error;

    /// Video RAM byte count (8 KiB).
    pub const VRAM_SIZE: usize = 0x2000;
    /// Object attribute memory byte count (40 sprites * 4 bytes).
    pub const OAM_SIZE: usize = 0xA0;

    /// End (exclusive) of the tile data region inside VRAM.
    pub const TILE_DATA_END: u16 = 0x1800;
    /// Bytes per encoded tile (8 rows * 2 bitplanes).
    pub const TILE_BYTES: u16 = 16;
    /// Number of tiles addressable through the tile data region.
    pub const TILE_COUNT: usize = 512;

    /// Background tile map selected when the tile-map flag is clear.
    pub const TILE_MAP_0: u16 = 0x1800;
    /// Background tile map selected when the tile-map flag is set.
    pub const TILE_MAP_1: u16 = 0x1C00;
    /// Tiles per tile-map row (and rows per map).
    pub const TILE_MAP_WIDTH: u16 = 32;

    /// Number of sprite records in OAM.
    pub const SPRITE_COUNT: usize = 40;
    /// Bytes per sprite record.
    pub const SPRITE_BYTES: usize = 4;

    /// Bytes copied by one OAM DMA transfer.
    pub const DMA_LENGTH: u16 = OAM_SIZE as u16;

    /// Graphics control registers, by offset from [`super::bus::REGISTER_BASE`].
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$FF40` - LCDC
        Control = 0,
        /// `$FF41` - STAT
        Status = 1,
        /// `$FF42` - SCY
        ScrollY = 2,
        /// `$FF43` - SCX
        ScrollX = 3,
        /// `$FF44` - LY
        Line = 4,
        /// `$FF45` - LYC
        LineCompare = 5,
        /// `$FF46` - DMA
        Dma = 6,
        /// `$FF47` - BGP
        BackgroundPalette = 7,
        /// `$FF48` - OBP0
        ObjectPalette0 = 8,
        /// `$FF49` - OBP1
        ObjectPalette1 = 9,
    }

    impl Register {
        pub const ALL: [Register; 10] = [
            Register::Control,
            Register::Status,
            Register::ScrollY,
            Register::ScrollX,
            Register::Line,
            Register::LineCompare,
            Register::Dma,
            Register::BackgroundPalette,
            Register::ObjectPalette0,
            Register::ObjectPalette1,
        ];

        /// Offset from the register block base.
        pub const fn offset(self) -> u16 {
            self as u16
        }

        /// Absolute CPU bus address of the register.
        pub const fn addr(self) -> u16 {
            super::bus::REGISTER_BASE + self.offset()
        }
    }

    impl TryFrom<u16> for Register {
        type Error = Error;

        fn try_from(offset: u16) -> Result<Self, Self::Error> {
            Register::ALL
                .get(offset as usize)
                .copied()
                .ok_or(Error::UnmappedRegister(offset))
        }
    }
}
