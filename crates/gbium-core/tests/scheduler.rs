mod common;

use common::{FIRST_VBLANK_CYCLES, FRAME_CYCLES, Machine};
use ctor::ctor;
use gbium_core::{
    InterruptFlags, Mode, NullSink, Ppu,
    bus::OpenBus,
    memory::ppu::Register,
    ppu::{
        HBLANK_CYCLES, OAM_SCAN_CYCLES, PIXEL_TRANSFER_CYCLES, VBLANK_LINE_CYCLES,
        registers::Status,
    },
};
use proptest::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(Level::DEBUG)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Records `(mode, line)` every time either changes.
fn trace_transitions(ppu: &mut Ppu, cycles: u32) -> Vec<(Mode, u8)> {
    let mut seen = vec![(ppu.mode(), ppu.line())];
    let mut interrupts = InterruptFlags::empty();
    for _ in 0..cycles {
        ppu.step(1, &mut interrupts, &mut NullSink);
        let now = (ppu.mode(), ppu.line());
        if seen.last() != Some(&now) {
            seen.push(now);
        }
    }
    seen
}

#[test]
fn visible_lines_cycle_through_three_phases() {
    let mut ppu = Ppu::new();
    let seen = trace_transitions(&mut ppu, HBLANK_CYCLES + 2 * VBLANK_LINE_CYCLES);
    assert_eq!(
        seen,
        vec![
            (Mode::HBlank, 0),
            (Mode::OamScan, 1),
            (Mode::PixelTransfer, 1),
            (Mode::HBlank, 1),
            (Mode::OamScan, 2),
            (Mode::PixelTransfer, 2),
            (Mode::HBlank, 2),
            (Mode::OamScan, 3),
        ]
    );
}

#[test]
fn every_line_costs_114_cycles() {
    assert_eq!(
        OAM_SCAN_CYCLES + PIXEL_TRANSFER_CYCLES + HBLANK_CYCLES,
        VBLANK_LINE_CYCLES
    );

    let mut ppu = Ppu::new();
    let seen = trace_transitions(&mut ppu, FIRST_VBLANK_CYCLES + FRAME_CYCLES);
    let vblank_lines: Vec<u8> = seen
        .iter()
        .filter(|(mode, _)| *mode == Mode::VBlank)
        .map(|&(_, line)| line)
        .collect();
    // All ten lines of the first vertical blank, then the entry into the second.
    assert_eq!(vblank_lines.len(), 11);
    assert_eq!(vblank_lines[..10].to_vec(), (144..=153).collect::<Vec<u8>>());
    assert!(seen.iter().all(|&(_, line)| line <= 153));
    assert_eq!(seen.last(), Some(&(Mode::VBlank, 144)));
}

#[test]
fn one_frame_and_one_vblank_interrupt_per_154_lines() -> anyhow::Result<()> {
    let mut machine = Machine::default();
    machine.step(FIRST_VBLANK_CYCLES - 1);
    assert!(machine.frames.is_empty());
    assert!(!machine.interrupts.contains(InterruptFlags::VBLANK));

    machine.step(1);
    assert_eq!(machine.frames.len(), 1);
    assert_eq!(machine.ppu.mode(), Mode::VBlank);
    assert_eq!(machine.ppu.line(), 144);
    assert!(machine.interrupts.contains(InterruptFlags::VBLANK));

    machine.interrupts = InterruptFlags::empty();
    machine.run_frame()?;
    assert_eq!(machine.frames.len(), 2);
    assert_eq!(machine.ppu.frame_count(), 2);
    assert_eq!(machine.interrupts, InterruptFlags::VBLANK);
    Ok(())
}

#[test]
fn vblank_stat_source_raises_lcd_interrupt() {
    let mut machine = Machine::default();
    machine.write_register(Register::Status, Status::VBLANK_INTERRUPT.bits());
    machine.step(FIRST_VBLANK_CYCLES - 1);
    assert!(machine.interrupts.is_empty());
    machine.step(1);
    assert_eq!(
        machine.interrupts,
        InterruptFlags::VBLANK | InterruptFlags::LCD_STAT
    );
}

#[test]
fn last_vblank_line_wraps_to_oam_scan_on_line_zero() {
    let mut machine = Machine::default();
    machine.write_register(Register::Status, Status::OAM_INTERRUPT.bits());
    machine.step(FIRST_VBLANK_CYCLES + 10 * VBLANK_LINE_CYCLES - 1);
    assert_eq!((machine.ppu.mode(), machine.ppu.line()), (Mode::VBlank, 153));

    machine.interrupts = InterruptFlags::empty();
    machine.step(1);
    assert_eq!((machine.ppu.mode(), machine.ppu.line()), (Mode::OamScan, 0));
    assert_eq!(machine.interrupts, InterruptFlags::LCD_STAT);
    assert_eq!(machine.ppu.read_register(Register::Status.offset()) & 0b11, 2);
    assert_eq!(machine.frames.len(), 1);
}

#[test]
fn status_register_reports_mode_bits() {
    let mut machine = Machine::default();
    let status = |m: &mut Machine| m.ppu.read_register(Register::Status.offset()) & 0b11;

    assert_eq!(status(&mut machine), 0);
    machine.step(HBLANK_CYCLES);
    assert_eq!(status(&mut machine), 2);
    machine.step(OAM_SCAN_CYCLES);
    assert_eq!(status(&mut machine), 3);
    machine.step(PIXEL_TRANSFER_CYCLES);
    assert_eq!(status(&mut machine), 0);
    machine.step(FIRST_VBLANK_CYCLES);
    assert_eq!(status(&mut machine), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_big_step_matches_many_small_ones(total in 0u32..(2 * FRAME_CYCLES), lyc in any::<u8>()) {
        let mut batched = Ppu::new();
        let mut single = Ppu::new();
        for ppu in [&mut batched, &mut single] {
            ppu.write_register(Register::Status.offset(), 0x78, &mut OpenBus);
            ppu.write_register(Register::LineCompare.offset(), lyc, &mut OpenBus);
        }

        let mut batched_irq = InterruptFlags::empty();
        let mut batched_frames = 0;
        batched.step(total, &mut batched_irq, &mut |_: &gbium_core::FrameBuffer| batched_frames += 1);

        let mut single_irq = InterruptFlags::empty();
        let mut single_frames = 0;
        for _ in 0..total {
            single.step(1, &mut single_irq, &mut |_: &gbium_core::FrameBuffer| single_frames += 1);
        }

        prop_assert_eq!(batched.mode(), single.mode());
        prop_assert_eq!(batched.line(), single.line());
        prop_assert_eq!(batched_irq, single_irq);
        prop_assert_eq!(batched_frames, single_frames);
        prop_assert_eq!(batched, single);
    }

    #[test]
    fn coincidence_bit_tracks_line_compare(cycles in 0u32..FRAME_CYCLES, lyc in 0u8..=153) {
        let mut ppu = Ppu::new();
        ppu.write_register(Register::LineCompare.offset(), lyc, &mut OpenBus);
        ppu.step(cycles, &mut InterruptFlags::empty(), &mut NullSink);
        let status = ppu.read_register(Register::Status.offset());
        prop_assert_eq!(status & Status::COINCIDENCE.bits() != 0, ppu.line() == lyc);
    }
}
