use core::fmt;

/// Cycles spent scanning OAM at the start of a visible line.
pub const OAM_SCAN_CYCLES: u32 = 20;
/// Cycles spent transferring pixels to the LCD.
pub const PIXEL_TRANSFER_CYCLES: u32 = 43;
/// Cycles of horizontal blank closing a visible line.
pub const HBLANK_CYCLES: u32 = 51;
/// Cycles per line while in vertical blank (one full line).
pub const VBLANK_LINE_CYCLES: u32 = 114;

/// PPU phase; the discriminant is the value reported in `STAT` bits 0-1.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Mode {
    #[default]
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    PixelTransfer = 3,
}

impl Mode {
    /// Cycle budget that must accumulate before this phase expires.
    pub const fn threshold(self) -> u32 {
        match self {
            Mode::OamScan => OAM_SCAN_CYCLES,
            Mode::PixelTransfer => PIXEL_TRANSFER_CYCLES,
            Mode::HBlank => HBLANK_CYCLES,
            Mode::VBlank => VBLANK_LINE_CYCLES,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::HBlank => "HBLANK",
            Mode::VBlank => "VBLANK",
            Mode::OamScan => "OAM_SCAN",
            Mode::PixelTransfer => "PIXEL_TRANSFER",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
