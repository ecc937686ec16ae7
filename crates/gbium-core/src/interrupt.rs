use bitflags::bitflags;

bitflags! {
    /// Interrupt request bits the video subsystem raises (`$FF0F`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// . . . J S T L V
    /// ```
    /// - `V`: vertical blank
    /// - `L`: LCD status (STAT)
    /// - `T`/`S`/`J`: timer, serial and joypad; owned by other devices
    ///
    /// The PPU only ever ORs bits in; acknowledging them is the CPU's job.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        /// Vertical blank started (bit 0).
        const VBLANK = 0b0000_0001;

        /// One of the enabled LCD status conditions fired (bit 1).
        const LCD_STAT = 0b0000_0010;

        const TIMER = 0b0000_0100;
        const SERIAL = 0b0000_1000;
        const JOYPAD = 0b0001_0000;
    }
}

impl Default for InterruptFlags {
    fn default() -> Self {
        Self::empty()
    }
}
