//! System bus plumbing for the video subsystem.
//!
//! The PPU does not own the address space. The CPU driver owns a [`Bus`] and
//! routes video addresses to the PPU, either by hand or through
//! [`VideoBus`].

pub mod video;

#[cfg(test)]
pub mod mock;

pub use video::VideoBus;

use crate::memory::ppu as ppu_mem;

/// Byte-wide access to a 16-bit address space.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);
}

/// Bus with nothing attached: the data lines float high.
///
/// Useful as the DMA source for register writes when no system bus exists,
/// such as when setting up the PPU in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenBus;

impl OpenBus {
    /// Value read from an undriven data bus.
    pub const VALUE: u8 = 0xFF;
}

impl Bus for OpenBus {
    fn read(&mut self, _addr: u16) -> u8 {
        Self::VALUE
    }

    fn write(&mut self, _addr: u16, _value: u8) {}
}

impl<T: Bus + ?Sized> Bus for &mut T {
    fn read(&mut self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }
}

/// Reads the OAM DMA source block `$XX00-$XX9F`, lowest address first.
pub(crate) fn read_dma_block<B: Bus + ?Sized>(source: &mut B, page: u8) -> [u8; ppu_mem::OAM_SIZE] {
    let base = u16::from(page) << 8;
    let mut block = [0; ppu_mem::OAM_SIZE];
    for (offset, byte) in (0..ppu_mem::DMA_LENGTH).zip(block.iter_mut()) {
        *byte = source.read(base.wrapping_add(offset));
    }
    block
}
