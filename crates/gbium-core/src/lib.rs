//! Game Boy (DMG) video subsystem.
//!
//! [`Ppu`] holds VRAM, OAM and the graphics registers, advances its line
//! state machine when the CPU driver reports elapsed machine cycles, renders
//! whole scanlines into a shade [`FrameBuffer`] and hands each finished frame
//! to a [`DisplaySink`]. CPU accesses are routed to it either directly or via
//! [`VideoBus`].
//!
//! ```
//! use gbium_core::{InterruptFlags, Ppu, ppu::buffer::FrameBuffer};
//!
//! let mut ppu = Ppu::new();
//! let mut interrupts = InterruptFlags::empty();
//! let mut frames = 0;
//! // 154 lines of 114 cycles; the power-on HBLANK is one line short.
//! ppu.step(154 * 114, &mut interrupts, &mut |_: &FrameBuffer| frames += 1);
//! assert_eq!(frames, 1);
//! assert!(interrupts.contains(InterruptFlags::VBLANK));
//! ```

pub mod bus;
pub mod display;
pub mod error;
pub mod interrupt;
pub mod mem_block;
pub mod memory;
pub mod ppu;

pub use bus::{Bus, OpenBus, VideoBus};
pub use display::{ColorFrameSink, DisplaySink, NullSink};
pub use error::Error;
pub use interrupt::InterruptFlags;
pub use ppu::{Mode, Ppu, buffer::FrameBuffer};
