use crate::{
    bus::{self, Bus},
    display::DisplaySink,
    interrupt::InterruptFlags,
    memory::bus as bus_mem,
    ppu::Ppu,
};

/// Routes CPU bus traffic between the PPU and the rest of the system.
///
/// | Range           | Target                        |
/// |-----------------|-------------------------------|
/// | `$8000-$9FFF`   | VRAM                          |
/// | `$FE00-$FE9F`   | OAM                           |
/// | `$FF0F`         | interrupt request flags       |
/// | `$FF40-$FF4B`   | graphics registers            |
/// | everything else | `external`                    |
///
/// A write to `$FF46` runs the OAM DMA before returning. The copy reads
/// through this adapter, so a source page inside VRAM is served by the PPU.
pub struct VideoBus<'a, B: Bus + ?Sized> {
    ppu: &'a mut Ppu,
    interrupts: &'a mut InterruptFlags,
    external: &'a mut B,
}

impl<'a, B: Bus + ?Sized> VideoBus<'a, B> {
    pub fn new(ppu: &'a mut Ppu, interrupts: &'a mut InterruptFlags, external: &'a mut B) -> Self {
        Self {
            ppu,
            interrupts,
            external,
        }
    }

    pub fn ppu(&self) -> &Ppu {
        &*self.ppu
    }

    pub fn interrupts(&self) -> InterruptFlags {
        *self.interrupts
    }

    /// Advances the PPU, raising interrupts into the shared flags.
    pub fn step<S: DisplaySink + ?Sized>(&mut self, cycles: u32, sink: &mut S) {
        self.ppu.step(cycles, &mut *self.interrupts, sink);
    }

    /// OAM DMA whose source reads are routed through this adapter.
    fn run_dma(&mut self, page: u8) {
        let block = bus::read_dma_block(self, page);
        self.ppu.load_dma_block(page, &block);
    }
}

impl<B: Bus + ?Sized> Bus for VideoBus<'_, B> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            bus_mem::VRAM_ADDR..=bus_mem::VRAM_END => self.ppu.read_vram(addr - bus_mem::VRAM_ADDR),
            bus_mem::OAM_ADDR..=bus_mem::OAM_END => self.ppu.read_oam(addr - bus_mem::OAM_ADDR),
            bus_mem::INTERRUPT_FLAGS_ADDR => self.interrupts.bits(),
            bus_mem::REGISTER_BASE..=bus_mem::REGISTER_END => {
                self.ppu.read_register(addr - bus_mem::REGISTER_BASE)
            }
            _ => self.external.read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            bus_mem::VRAM_ADDR..=bus_mem::VRAM_END => {
                self.ppu.write_vram(addr - bus_mem::VRAM_ADDR, value)
            }
            bus_mem::OAM_ADDR..=bus_mem::OAM_END => {
                self.ppu.write_oam(addr - bus_mem::OAM_ADDR, value)
            }
            bus_mem::INTERRUPT_FLAGS_ADDR => {
                *self.interrupts = InterruptFlags::from_bits_truncate(value);
            }
            bus_mem::REGISTER_BASE..=bus_mem::REGISTER_END => {
                if let Some(page) = self.ppu.store_register(addr - bus_mem::REGISTER_BASE, value) {
                    self.run_dma(page);
                }
            }
            _ => self.external.write(addr, value),
        }
    }
}
