//! Universal invariants checked against arbitrary inputs rather than fixed
//! examples: the ADC/SBC bitwise-complement identity, stack push/pull
//! round-tripping at arbitrary SP (including the 0x00/0xFF wrap), and
//! MirroredRam's write-propagates-to-every-mirror property.

use proptest::prelude::*;

use mos6502_core::cartridge::FlatMapper;
use mos6502_core::memory::{Bank, MirroredRam};
use mos6502_core::{Mos6502, Status, Vaddr};

fn adc_immediate(a: u8, operand: u8, carry_in: bool) -> (u8, Status) {
    let mapper = FlatMapper::new();
    mapper.write(Vaddr::new(0xFFFC), 0x00).unwrap();
    mapper.write(Vaddr::new(0xFFFD), 0x80).unwrap();
    mapper.write(Vaddr::new(0x8000), 0x69).unwrap(); // ADC #
    mapper.write(Vaddr::new(0x8001), operand).unwrap();
    let mut cpu = Mos6502::new(mapper).unwrap();
    cpu.a = a;
    cpu.sr.set_flag(Status::CARRY, carry_in);
    cpu.step().unwrap();
    (cpu.a, cpu.sr)
}

fn sbc_immediate(a: u8, operand: u8, carry_in: bool) -> (u8, Status) {
    let mapper = FlatMapper::new();
    mapper.write(Vaddr::new(0xFFFC), 0x00).unwrap();
    mapper.write(Vaddr::new(0xFFFD), 0x80).unwrap();
    mapper.write(Vaddr::new(0x8000), 0xE9).unwrap(); // SBC #
    mapper.write(Vaddr::new(0x8001), operand).unwrap();
    let mut cpu = Mos6502::new(mapper).unwrap();
    cpu.a = a;
    cpu.sr.set_flag(Status::CARRY, carry_in);
    cpu.step().unwrap();
    (cpu.a, cpu.sr)
}

proptest! {
    /// `SBC(m)` must be bit-for-bit identical to `ADC(!m)`: the 6502 wires
    /// subtraction as addition of the ones' complement.
    #[test]
    fn sbc_matches_adc_of_ones_complement(a: u8, operand: u8, carry_in: bool) {
        let (sbc_result, sbc_sr) = sbc_immediate(a, operand, carry_in);
        let (adc_result, adc_sr) = adc_immediate(a, !operand, carry_in);
        prop_assert_eq!(sbc_result, adc_result);
        prop_assert_eq!(sbc_sr, adc_sr);
    }

    /// Pushing a byte and immediately pulling it back returns the same
    /// byte, for every starting stack pointer, including the two wrap
    /// points at 0x00 and 0xFF.
    #[test]
    fn push_pull_round_trips_at_any_stack_pointer(sp: u8, value: u8) {
        let mapper = FlatMapper::new();
        mapper.write(Vaddr::new(0xFFFC), 0x00).unwrap();
        mapper.write(Vaddr::new(0xFFFD), 0x80).unwrap();
        let mut cpu = Mos6502::new(mapper).unwrap();
        cpu.sp = sp;
        cpu.push_u8(value).unwrap();
        let pulled = cpu.pull_u8().unwrap();
        prop_assert_eq!(pulled, value);
        prop_assert_eq!(cpu.sp, sp);
    }

    /// A 16-bit push/pull round trip (as JSR/RTS and interrupt dispatch
    /// use) preserves the address across the same SP wrap points.
    #[test]
    fn push_pull_u16_round_trips(sp: u8, addr: u16) {
        let mapper = FlatMapper::new();
        mapper.write(Vaddr::new(0xFFFC), 0x00).unwrap();
        mapper.write(Vaddr::new(0xFFFD), 0x80).unwrap();
        let mut cpu = Mos6502::new(mapper).unwrap();
        cpu.sp = sp;
        cpu.push_u16(Vaddr::new(addr)).unwrap();
        let pulled = cpu.pull_u16().unwrap();
        prop_assert_eq!(pulled, Vaddr::new(addr));
        prop_assert_eq!(cpu.sp, sp);
    }

    /// Writing through any one mirror of a MirroredRam must be observable
    /// through every other mirror at the same relative offset.
    #[test]
    fn mirrored_ram_write_propagates_to_every_mirror(
        mirror_written in 0u16..4,
        mirror_read in 0u16..4,
        offset in 0u16..0x0800,
        value: u8,
    ) {
        let mut ram = MirroredRam::new(Vaddr::ZERO, 0x0800 * 4, 4).unwrap();
        let write_index = (mirror_written * 0x0800 + offset) as usize;
        let read_index = (mirror_read * 0x0800 + offset) as usize;
        ram.write(write_index, value).unwrap();
        prop_assert_eq!(ram.read(read_index), value);
    }

    /// `reset` always restores the documented power-on register values
    /// regardless of what garbage state preceded it.
    #[test]
    fn reset_is_idempotent_from_any_prior_state(a: u8, x: u8, y: u8, sp: u8) {
        let mapper = FlatMapper::new();
        mapper.write(Vaddr::new(0xFFFC), 0x00).unwrap();
        mapper.write(Vaddr::new(0xFFFD), 0x80).unwrap();
        let mut cpu = Mos6502::new(mapper).unwrap();
        cpu.a = a;
        cpu.x = x;
        cpu.y = y;
        cpu.sp = sp;
        cpu.reset().unwrap();
        prop_assert_eq!(cpu.a, 0);
        prop_assert_eq!(cpu.x, 0);
        prop_assert_eq!(cpu.y, 0);
        prop_assert_eq!(cpu.sp, 0xFD);
        prop_assert_eq!(cpu.pc, Vaddr::new(0x8000));
    }
}
