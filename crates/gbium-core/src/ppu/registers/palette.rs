/// Shade lookup held by `BGP`/`OBP0`/`OBP1` (`$FF47-$FF49`).
///
/// The register packs four 2-bit shades; entry 0 sits in the least
/// significant bits:
/// ```text
/// 7 6 5 4 3 2 1 0
/// 3 3 2 2 1 1 0 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DmgPalette([u8; 4]);

impl DmgPalette {
    /// Maps every color index to itself.
    pub const IDENTITY: DmgPalette = DmgPalette([0, 1, 2, 3]);

    pub fn from_bits(value: u8) -> Self {
        let mut entries = [0; 4];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = (value >> (i * 2)) & 0b11;
        }
        Self(entries)
    }

    pub fn bits(self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &entry)| acc | (entry << (i * 2)))
    }

    /// Shade (0..=3) for a raw color index.
    #[inline]
    pub fn shade(self, color_index: u8) -> u8 {
        self.0[(color_index & 0b11) as usize]
    }

    pub fn entries(self) -> [u8; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_low_bits_first() {
        let palette = DmgPalette::from_bits(0b1110_0100);
        assert_eq!(palette.entries(), [0, 1, 2, 3]);
        assert_eq!(palette, DmgPalette::IDENTITY);

        let palette = DmgPalette::from_bits(0b0001_1011);
        assert_eq!(palette.entries(), [3, 2, 1, 0]);
        assert_eq!(palette.shade(0), 3);
        assert_eq!(palette.bits(), 0b0001_1011);
    }
}
