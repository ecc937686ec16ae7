use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Offset does not name one of the graphics control registers.
    #[error("no graphics register at offset {0:#04X}")]
    UnmappedRegister(u16),

    /// Destination slice cannot hold a full packed frame.
    #[error("frame buffer expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}
