use bitflags::bitflags;

bitflags! {
    /// LCD status register (`$FF41`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// . C O V H = m m
    /// ```
    /// - `m m`: current mode (read-only, synthesized)
    /// - `=`: line equals line-compare (read-only, synthesized)
    /// - `H`/`V`/`O`/`C`: interrupt enables for HBLANK, VBLANK, OAM scan and
    ///   line coincidence
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Mode bits (0 and 1).
        const MODE = 0b0000_0011;

        /// Current line equals line-compare (bit 2).
        const COINCIDENCE = 0b0000_0100;

        /// Raise LCD-status on entering HBLANK (bit 3).
        const HBLANK_INTERRUPT = 0b0000_1000;

        /// Raise LCD-status on entering VBLANK (bit 4).
        const VBLANK_INTERRUPT = 0b0001_0000;

        /// Raise LCD-status on entering OAM scan (bit 5).
        const OAM_INTERRUPT = 0b0010_0000;

        /// Raise LCD-status when the line reaches line-compare (bit 6).
        const COINCIDENCE_INTERRUPT = 0b0100_0000;

        /// The only bits the CPU can write.
        const INTERRUPT_ENABLES = Self::HBLANK_INTERRUPT.bits()
            | Self::VBLANK_INTERRUPT.bits()
            | Self::OAM_INTERRUPT.bits()
            | Self::COINCIDENCE_INTERRUPT.bits();
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::empty()
    }
}

impl Status {
    /// Keeps only the writable interrupt-enable bits of a CPU write.
    pub fn from_write(value: u8) -> Self {
        Status::from_bits_truncate(value) & Status::INTERRUPT_ENABLES
    }
}
