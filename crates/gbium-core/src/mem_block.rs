use core::ops::{Deref, DerefMut};

#[cfg(feature = "boxed-memblock")]
type MemBlockStorage<T, const N: usize> = Box<[T; N]>;

#[cfg(not(feature = "boxed-memblock"))]
type MemBlockStorage<T, const N: usize> = [T; N];

/// Fixed-size backing store, inline by default and boxed with `boxed-memblock`.
///
/// Every video store (VRAM, OAM, decoded tiles, the frame) is one of these so
/// that sizes are part of the type and indexing stays bounds-checked.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemBlock<T, const N: usize>(MemBlockStorage<T, N>);

pub mod video {
    use crate::memory::ppu as ppu_mem;
    use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH, tile_cache::PIXELS_PER_TILE};

    pub type Vram = super::MemBlock<u8, { ppu_mem::VRAM_SIZE }>;
    pub type Oam = super::MemBlock<u8, { ppu_mem::OAM_SIZE }>;
    /// Decoded 2-bit color indices, `tile * 64 + row * 8 + col`.
    pub type TilePixels = super::MemBlock<u8, { ppu_mem::TILE_COUNT * PIXELS_PER_TILE }>;
    /// One shade per visible pixel, row-major.
    pub type FramePixels = super::MemBlock<u8, { SCREEN_WIDTH * SCREEN_HEIGHT }>;
}

impl<T, const N: usize> MemBlock<T, N> {
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0[..]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0[..]
    }
}

impl<T: Copy + Default, const N: usize> MemBlock<T, N> {
    pub fn new() -> Self {
        Self::filled(T::default())
    }
}

impl<T: Copy, const N: usize> MemBlock<T, N> {
    /// Create a `MemBlock` where every element is initialized to `value`.
    #[inline]
    pub fn filled(value: T) -> Self {
        #[cfg(feature = "boxed-memblock")]
        {
            Self(Box::new([value; N]))
        }
        #[cfg(not(feature = "boxed-memblock"))]
        {
            Self([value; N])
        }
    }
}

impl<T: Copy + Default, const N: usize> Default for MemBlock<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for MemBlock<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for MemBlock<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_block_has_fixed_length() {
        let block = MemBlock::<u8, 16>::filled(0xAB);
        assert_eq!(block.len(), 16);
        assert!(block.iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn deref_mut_writes_through() {
        let mut block = video::Oam::new();
        block[0x9F] = 7;
        assert_eq!(block.as_slice()[0x9F], 7);
    }
}
