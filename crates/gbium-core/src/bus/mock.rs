use crate::bus::Bus;

/// Flat 64 KiB address space for tests.
#[derive(Debug)]
pub(crate) struct MockBus {
    pub(crate) mem: [u8; 0x10000],
}

impl Default for MockBus {
    fn default() -> Self {
        Self { mem: [0; 0x10000] }
    }
}

impl Bus for MockBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }
}
