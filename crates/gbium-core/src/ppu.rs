//! Picture Processing Unit.
//!
//! The DMG PPU owns 8 KiB of VRAM, 160 bytes of OAM and the `$FF40-$FF49`
//! register block. It is advanced by the CPU driver with elapsed machine
//! cycles and walks a four-phase state machine per line:
//!
//! ```text
//! OAM_SCAN (20) -> PIXEL_TRANSFER (43) -> HBLANK (51)   lines 0..=143
//! VBLANK (114 per line)                                lines 144..=153
//! ```
//!
//! Each visible line is rendered in one go when pixel transfer ends, and the
//! completed frame is handed to a [`DisplaySink`] when line 144 begins.
//!
//! Decoded state (the tile cache and the sprite table) is derived from VRAM
//! and OAM. Every store into those memories goes through [`Ppu::write_vram`]
//! or [`Ppu::write_oam`], which update the raw byte and the derived view in
//! the same call.

pub mod buffer;
pub mod debug;
pub mod palette;
pub mod registers;
pub mod sprite;
pub mod tile_cache;

mod mode;
mod render;

use core::fmt;

use tracing::{debug, trace};

use crate::{
    bus::{self, Bus},
    display::DisplaySink,
    interrupt::InterruptFlags,
    mem_block::video::{Oam, Vram},
    memory::ppu::{self as ppu_mem, Register},
};
use buffer::FrameBuffer;
use registers::{Control, DmgPalette, Registers, Status};
use sprite::SpriteTable;
use tile_cache::TileCache;

pub use mode::{
    HBLANK_CYCLES, Mode, OAM_SCAN_CYCLES, PIXEL_TRANSFER_CYCLES, VBLANK_LINE_CYCLES,
};

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

/// First line of vertical blank.
const VBLANK_LINE: u8 = SCREEN_HEIGHT as u8;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ppu {
    /// Collection of CPU visible registers.
    registers: Registers,
    /// Raw video RAM (`$8000-$9FFF`).
    vram: Vram,
    /// Raw sprite attribute memory (`$FE00-$FE9F`).
    oam: Oam,
    /// Decoded tile data, kept in step with `vram`.
    tile_cache: TileCache,
    /// Decoded sprite records, kept in step with `oam`.
    sprites: SpriteTable,
    /// Current phase of the line state machine.
    mode: Mode,
    /// Cycles accumulated toward the current phase's threshold.
    mode_clock: u32,
    frame: FrameBuffer,
    /// Frames handed to the display sink so far.
    frame_count: u64,
}

impl fmt::Debug for Ppu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ppu")
            .field("registers", &self.registers)
            .field("mode", &self.mode)
            .field("mode_clock", &self.mode_clock)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Creates a PPU in its power-on state: HBLANK on line 0, memories cleared.
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
            vram: Vram::new(),
            oam: Oam::new(),
            tile_cache: TileCache::new(),
            sprites: SpriteTable::new(),
            mode: Mode::HBlank,
            mode_clock: 0,
            frame: FrameBuffer::new(),
            frame_count: 0,
        }
    }

    /// Restores the device to its power-on state.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.vram.fill(0);
        self.oam.fill(0);
        self.tile_cache.clear();
        self.sprites.reset();
        self.mode = Mode::HBlank;
        self.mode_clock = 0;
        self.frame.clear();
        self.frame_count = 0;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line(&self) -> u8 {
        self.registers.line
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn control(&self) -> Control {
        self.registers.control
    }

    /// Shades of the frame being drawn (or the last one completed, during VBLANK).
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn tile_cache(&self) -> &TileCache {
        &self.tile_cache
    }

    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    pub fn oam(&self) -> &[u8] {
        &self.oam
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advances the line state machine by `cycles` machine cycles.
    ///
    /// Cycles accumulate across calls; a single call may cross any number of
    /// phase boundaries. Interrupt requests are ORed into `interrupts` and the
    /// finished frame is passed to `sink` when VBLANK begins.
    pub fn step<S>(&mut self, cycles: u32, interrupts: &mut InterruptFlags, sink: &mut S)
    where
        S: DisplaySink + ?Sized,
    {
        self.mode_clock = self.mode_clock.saturating_add(cycles);
        loop {
            let threshold = self.mode.threshold();
            if self.mode_clock < threshold {
                break;
            }
            self.mode_clock -= threshold;
            self.expire_mode(interrupts, sink);
        }
    }

    fn expire_mode<S>(&mut self, interrupts: &mut InterruptFlags, sink: &mut S)
    where
        S: DisplaySink + ?Sized,
    {
        match self.mode {
            Mode::OamScan => self.enter(Mode::PixelTransfer),
            Mode::PixelTransfer => {
                self.render_scanline();
                self.enter(Mode::HBlank);
                self.request_stat(Status::HBLANK_INTERRUPT, interrupts);
            }
            Mode::HBlank => {
                self.registers.line = self.registers.line.wrapping_add(1);
                if self.registers.coincidence() {
                    self.request_stat(Status::COINCIDENCE_INTERRUPT, interrupts);
                }

                if self.registers.line == VBLANK_LINE {
                    self.enter(Mode::VBlank);
                    interrupts.insert(InterruptFlags::VBLANK);
                    self.request_stat(Status::VBLANK_INTERRUPT, interrupts);
                    self.frame_count = self.frame_count.wrapping_add(1);
                    trace!(frame = self.frame_count, "frame ready");
                    sink.frame_ready(&self.frame);
                } else {
                    self.enter(Mode::OamScan);
                    self.request_stat(Status::OAM_INTERRUPT, interrupts);
                }
            }
            Mode::VBlank => {
                self.registers.line = self.registers.line.wrapping_add(1);
                if self.registers.line > registers::LAST_LINE {
                    self.registers.line = 0;
                    self.enter(Mode::OamScan);
                    self.request_stat(Status::OAM_INTERRUPT, interrupts);
                }
            }
        }
    }

    fn enter(&mut self, mode: Mode) {
        trace!(from = %self.mode, to = %mode, line = self.registers.line, "mode transition");
        self.mode = mode;
    }

    fn request_stat(&self, source: Status, interrupts: &mut InterruptFlags) {
        if self.registers.interrupt_enabled(source) {
            interrupts.insert(InterruptFlags::LCD_STAT);
        }
    }

    /// CPU read from the register block, `offset` relative to `$FF40`.
    ///
    /// Write-only and unmapped offsets read as 0.
    pub fn read_register(&self, offset: u16) -> u8 {
        let Ok(register) = Register::try_from(offset) else {
            return 0;
        };
        let regs = &self.registers;
        match register {
            Register::Control => regs.control.bits(),
            Register::Status => regs.status(self.mode),
            Register::ScrollY => regs.scroll_y,
            Register::ScrollX => regs.scroll_x,
            Register::Line => regs.line,
            Register::LineCompare => regs.line_compare,
            Register::Dma => 0,
            Register::BackgroundPalette => regs.bg_palette.bits(),
            Register::ObjectPalette0 => regs.obj_palettes[0].bits(),
            Register::ObjectPalette1 => regs.obj_palettes[1].bits(),
        }
    }

    /// CPU write to the register block, `offset` relative to `$FF40`.
    ///
    /// A write to the DMA register copies `$XX00-$XX9F` from `dma_source` into
    /// OAM before returning. Pass [`crate::bus::OpenBus`] when no system bus
    /// is attached.
    pub fn write_register<B>(&mut self, offset: u16, value: u8, dma_source: &mut B)
    where
        B: Bus + ?Sized,
    {
        if let Some(page) = self.store_register(offset, value) {
            self.oam_dma(page, dma_source);
        }
    }

    /// Applies a register write and returns the source page if it started a DMA.
    ///
    /// The caller must run the transfer before handing control back to the CPU.
    #[must_use]
    pub(crate) fn store_register(&mut self, offset: u16, value: u8) -> Option<u8> {
        let register = match Register::try_from(offset) {
            Ok(register) => register,
            Err(err) => {
                debug!(%err, value, "ignoring graphics register write");
                return None;
            }
        };
        let regs = &mut self.registers;
        match register {
            Register::Control => regs.control = Control::from_bits_retain(value),
            Register::Status => {
                regs.stat_enable = Status::from_write(value);
                debug!(value, enables = ?regs.stat_enable, "STAT write");
            }
            Register::ScrollY => regs.scroll_y = value,
            Register::ScrollX => regs.scroll_x = value,
            Register::Line => {
                regs.line = 0;
                debug!(value, "LY write resets line counter");
            }
            Register::LineCompare => {
                regs.line_compare = value;
                debug!(value, "LYC write");
            }
            Register::Dma => return Some(value),
            Register::BackgroundPalette => regs.bg_palette = DmgPalette::from_bits(value),
            Register::ObjectPalette0 => regs.obj_palettes[0] = DmgPalette::from_bits(value),
            Register::ObjectPalette1 => regs.obj_palettes[1] = DmgPalette::from_bits(value),
        }
        None
    }

    /// Copies `$XX00-$XX9F` from `source` into OAM, lowest address first.
    ///
    /// The transfer is instantaneous: it costs no PPU cycles.
    pub fn oam_dma<B>(&mut self, page: u8, source: &mut B)
    where
        B: Bus + ?Sized,
    {
        let block = bus::read_dma_block(source, page);
        self.load_dma_block(page, &block);
    }

    /// Stores a fetched DMA block into OAM through the descriptor path.
    pub(crate) fn load_dma_block(&mut self, page: u8, block: &[u8; ppu_mem::OAM_SIZE]) {
        debug!(page, "OAM DMA");
        for (offset, &value) in (0..ppu_mem::DMA_LENGTH).zip(block) {
            self.write_oam(offset, value);
        }
    }

    /// Reads VRAM at `offset` (`0x0000-0x1FFF`); other offsets read as 0.
    pub fn read_vram(&self, offset: u16) -> u8 {
        self.vram.get(offset as usize).copied().unwrap_or(0)
    }

    /// Stores into VRAM and refreshes the decoded tile row if the byte is tile data.
    pub fn write_vram(&mut self, offset: u16, value: u8) {
        let Some(slot) = self.vram.get_mut(offset as usize) else {
            debug!(offset, value, "ignoring VRAM write outside 8 KiB window");
            return;
        };
        *slot = value;
        self.tile_cache.refresh(&self.vram, offset);
    }

    /// Reads OAM at `offset` (`0x00-0x9F`); other offsets read as 0.
    pub fn read_oam(&self, offset: u16) -> u8 {
        self.oam.get(offset as usize).copied().unwrap_or(0)
    }

    /// Stores into OAM and updates the matching sprite descriptor field.
    pub fn write_oam(&mut self, offset: u16, value: u8) {
        let Some(slot) = self.oam.get_mut(offset as usize) else {
            debug!(offset, value, "ignoring OAM write past sprite 39");
            return;
        };
        *slot = value;
        self.sprites.update(offset as usize, value);
    }
}
