//! Frame hand-off from the PPU to the host.
//!
//! At the start of vertical blank the scheduler lends its [`FrameBuffer`] to a
//! [`DisplaySink`]. The sink may copy or convert the shades but cannot keep the
//! reference; the PPU overwrites the buffer once line 0 is drawn again.

use tracing::trace;

use crate::{
    error::Error,
    ppu::{
        buffer::{ColorFormat, FrameBuffer},
        palette::ShadePalette,
    },
};

/// Receiver for completed frames.
pub trait DisplaySink {
    fn frame_ready(&mut self, frame: &FrameBuffer);
}

impl<F> DisplaySink for F
where
    F: FnMut(&FrameBuffer),
{
    fn frame_ready(&mut self, frame: &FrameBuffer) {
        self(frame)
    }
}

/// Sink that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn frame_ready(&mut self, _frame: &FrameBuffer) {}
}

/// Converts each presented frame into packed host colors.
#[derive(Debug, Clone)]
pub struct ColorFrameSink {
    format: ColorFormat,
    palette: ShadePalette,
    pixels: Vec<u8>,
    frames: u64,
}

impl ColorFrameSink {
    pub fn new(format: ColorFormat, palette: ShadePalette) -> Self {
        Self {
            format,
            palette,
            pixels: vec![0; format.frame_len()],
            frames: 0,
        }
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn palette(&self) -> &ShadePalette {
        &self.palette
    }

    /// Swaps the shade colors; takes effect from the next frame.
    pub fn set_palette(&mut self, palette: ShadePalette) {
        self.palette = palette;
    }

    /// Latest converted frame, `format.pitch()` bytes per row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Copies the latest frame into a caller-provided buffer.
    pub fn copy_into(&self, dst: &mut [u8]) -> Result<(), Error> {
        let expected = self.pixels.len();
        let Some(dst) = dst.get_mut(..expected) else {
            return Err(Error::BufferTooSmall {
                expected,
                actual: dst.len(),
            });
        };
        dst.copy_from_slice(&self.pixels);
        Ok(())
    }
}

impl DisplaySink for ColorFrameSink {
    fn frame_ready(&mut self, frame: &FrameBuffer) {
        let bpp = self.format.bytes_per_pixel();
        for (out, &shade) in self.pixels.chunks_exact_mut(bpp).zip(frame.as_slice()) {
            self.format.encode(self.palette.color(shade), out);
        }
        self.frames += 1;
        trace!(frames = self.frames, format = ?self.format, "frame converted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::{SCREEN_WIDTH, palette::PaletteKind};

    #[test]
    fn closures_are_sinks() {
        let mut seen = 0;
        let mut sink = |frame: &FrameBuffer| {
            seen += frame.as_slice().len();
        };
        sink.frame_ready(&FrameBuffer::new());
        assert_eq!(seen, 160 * 144);
    }

    #[test]
    fn color_sink_converts_shades() {
        let mut frame = FrameBuffer::new();
        frame.set(1, 0, 3);
        frame.set(0, 1, 1);

        let mut sink = ColorFrameSink::new(ColorFormat::Rgba8888, PaletteKind::Grayscale.palette());
        sink.frame_ready(&frame);
        let px = sink.pixels();
        assert_eq!(&px[..4], &[255, 255, 255, 255]);
        assert_eq!(&px[4..8], &[0, 0, 0, 255]);
        let second_row = ColorFormat::Rgba8888.pitch();
        assert_eq!(&px[second_row..second_row + 4], &[192, 192, 192, 255]);
        assert_eq!(sink.frames_presented(), 1);
    }

    #[test]
    fn copy_into_checks_length() {
        let sink = ColorFrameSink::new(ColorFormat::Rgb565, ShadePalette::default());
        let mut short = vec![0; SCREEN_WIDTH];
        assert_eq!(
            sink.copy_into(&mut short),
            Err(Error::BufferTooSmall {
                expected: ColorFormat::Rgb565.frame_len(),
                actual: SCREEN_WIDTH,
            })
        );

        let mut exact = vec![0xAA; ColorFormat::Rgb565.frame_len()];
        assert!(sink.copy_into(&mut exact).is_ok());
        assert!(exact.iter().all(|&b| b == 0));
    }
}
