#![allow(dead_code)]

use anyhow::{Result, ensure};
use gbium_core::{
    Bus, FrameBuffer, InterruptFlags, Ppu, VideoBus,
    memory::{bus as bus_mem, ppu::Register},
    ppu::{HBLANK_CYCLES, VBLANK_LINE_CYCLES},
};

/// Cycles in one full frame (154 lines).
pub const FRAME_CYCLES: u32 = 154 * VBLANK_LINE_CYCLES;
/// Cycles from power-on until line 1 begins.
pub const LINE_ONE_CYCLES: u32 = HBLANK_CYCLES;
/// Cycles from power-on until the first frame is handed off.
pub const FIRST_VBLANK_CYCLES: u32 = HBLANK_CYCLES + 143 * VBLANK_LINE_CYCLES;

/// Flat 64 KiB stand-in for the rest of the system.
pub struct FlatBus {
    pub mem: Vec<u8>,
}

impl Default for FlatBus {
    fn default() -> Self {
        Self {
            mem: vec![0; 0x10000],
        }
    }
}

impl Bus for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }
}

/// PPU plus the state a CPU driver would own alongside it.
#[derive(Default)]
pub struct Machine {
    pub ppu: Ppu,
    pub interrupts: InterruptFlags,
    pub external: FlatBus,
    pub frames: Vec<FrameBuffer>,
}

impl Machine {
    pub fn bus(&mut self) -> VideoBus<'_, FlatBus> {
        VideoBus::new(&mut self.ppu, &mut self.interrupts, &mut self.external)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bus().write(addr, value);
    }

    pub fn write_register(&mut self, register: Register, value: u8) {
        self.write(register.addr(), value);
    }

    /// Stores a tile as eight `(low, high)` plane pairs.
    pub fn load_tile(&mut self, tile: u16, rows: [(u8, u8); 8]) {
        let base = bus_mem::VRAM_ADDR + tile * 16;
        for (row, (low, high)) in rows.into_iter().enumerate() {
            self.write(base + row as u16 * 2, low);
            self.write(base + row as u16 * 2 + 1, high);
        }
    }

    /// Writes a raw OAM record for sprite `index`.
    pub fn load_sprite(&mut self, index: u16, record: [u8; 4]) {
        for (i, byte) in record.into_iter().enumerate() {
            self.write(bus_mem::OAM_ADDR + index * 4 + i as u16, byte);
        }
    }

    /// Steps the PPU, collecting any frames handed off.
    pub fn step(&mut self, cycles: u32) {
        let frames = &mut self.frames;
        self.ppu
            .step(cycles, &mut self.interrupts, &mut |frame: &FrameBuffer| {
                frames.push(frame.clone())
            });
    }

    /// Runs until the next frame is handed off and returns it.
    pub fn run_frame(&mut self) -> Result<FrameBuffer> {
        let before = self.frames.len();
        for _ in 0..=FRAME_CYCLES {
            self.step(1);
            if self.frames.len() > before {
                break;
            }
        }
        ensure!(
            self.frames.len() == before + 1,
            "no frame within {FRAME_CYCLES} cycles"
        );
        Ok(self.frames[before].clone())
    }
}
