//! CPU-visible graphics register state (`$FF40-$FF49`).
//!
//! The concrete bit layouts live in submodules. Register I/O itself is
//! implemented on [`super::Ppu`] because the status byte and the DMA trigger
//! need the scheduler and OAM.

mod control;
mod palette;
mod status;

pub use control::Control;
pub use palette::DmgPalette;
pub use status::Status;

use super::Mode;

/// Last line number the scheduler produces (VBLANK runs 144..=153).
pub const LAST_LINE: u8 = 153;

/// Aggregates the state of the graphics register block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Registers {
    /// Mirror of the LCD control register (`$FF40`).
    pub control: Control,
    /// Interrupt-enable half of `$FF41`; mode and coincidence are synthesized.
    pub stat_enable: Status,
    /// `$FF42`
    pub scroll_y: u8,
    /// `$FF43`
    pub scroll_x: u8,
    /// Current line, 0..=153 (`$FF44`).
    pub line: u8,
    /// `$FF45`
    pub line_compare: u8,
    /// `$FF47`
    pub bg_palette: DmgPalette,
    /// `$FF48` and `$FF49`.
    pub obj_palettes: [DmgPalette; 2],
}

impl Registers {
    /// Creates a new register block with the power-on reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores all register values to their reset defaults.
    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    pub fn coincidence(&self) -> bool {
        self.line == self.line_compare
    }

    /// Composes the byte returned by a `$FF41` read.
    pub fn status(&self, mode: Mode) -> u8 {
        let mut status = self.stat_enable & Status::INTERRUPT_ENABLES;
        status |= Status::from_bits_retain(mode.bits()) & Status::MODE;
        status.set(Status::COINCIDENCE, self.coincidence());
        status.bits()
    }

    pub fn interrupt_enabled(&self, source: Status) -> bool {
        self.stat_enable.contains(source)
    }
}
