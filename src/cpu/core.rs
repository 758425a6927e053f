use tracing::trace;

use crate::cpu::disassembler::Disassembler;
use crate::cpu::handlers::{self, OperationFn};
use crate::cpu::instruction::{Instruction, Mode};
use crate::cpu::mmu::Mmu;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::{Mapper, Reference};
use crate::vaddr::Vaddr;

const NMI_VECTOR: Vaddr = Vaddr(0xFFFA);
const RESET_VECTOR: Vaddr = Vaddr(0xFFFC);
const IRQ_BRK_VECTOR: Vaddr = Vaddr(0xFFFE);
const STACK_PAGE: u16 = 0x0100;
const INTERRUPT_SERVICE_CYCLES: u64 = 7;

/// Where an instruction's operand lives, once the addressing mode has been
/// resolved. `Immediate` is read-only: no legal instruction ever writes
/// back to its own immediate operand.
pub enum ValueOperand {
    Accumulator,
    Memory(Reference),
    Immediate(u8),
}

/// Architectural state: registers, stack, cycle budget, and the Mapper
/// collaborator the Mmu resolves addresses through. `Mos6502` is generic
/// over its Mapper so the hot dispatch path never goes through a trait
/// object for the thing it touches on every single access.
pub struct Mos6502<M: Mapper> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: Vaddr,
    pub sp: u8,
    pub sr: Status,
    pub cycle_counter: i64,
    pub mapper: M,
    disassembler: Disassembler,
    handler_table: [OperationFn<M>; handlers::MNEMONIC_COUNT],
    extra_cycles: u8,
    halt_reason: Option<Error>,
    pending_nmi: bool,
    pending_irq: bool,
}

impl<M: Mapper> Mos6502<M> {
    pub fn new(mapper: M) -> Result<Self, Error> {
        let mut cpu = Mos6502 {
            a: 0,
            x: 0,
            y: 0,
            pc: Vaddr::ZERO,
            sp: 0,
            sr: Status::empty(),
            cycle_counter: 0,
            mapper,
            disassembler: Disassembler::new(),
            handler_table: handlers::build_handler_table(),
            extra_cycles: 0,
            halt_reason: None,
            pending_nmi: false,
            pending_irq: false,
        };
        cpu.reset()?;
        Ok(cpu)
    }

    pub(crate) fn mmu(&self) -> Mmu<'_> {
        Mmu::new(&self.mapper)
    }

    /// Sets SP = 0xFD, SR = 0x24, AC = X = Y = 0, cycle_counter = 0, and
    /// loads PC from the reset vector. Idempotent: two consecutive calls
    /// yield bit-identical state.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.sr = Status::RESET_VALUE;
        self.cycle_counter = 0;
        self.halt_reason = None;
        self.pending_nmi = false;
        self.pending_irq = false;
        self.pc = self.mmu().load_vector(RESET_VECTOR)?;
        Ok(())
    }

    /// Queues a non-maskable interrupt; always serviced before the next
    /// instruction decode.
    pub fn nmi(&mut self) {
        self.pending_nmi = true;
    }

    /// Queues a maskable interrupt request; ignored if the interrupt
    /// disable flag is set, otherwise serviced before the next instruction
    /// decode.
    pub fn irq(&mut self) {
        self.pending_irq = true;
    }

    /// Executes exactly one decoded instruction, or services one pending
    /// interrupt, and returns the number of cycles consumed. Once halted
    /// (InvalidOpcode or UnmappedAddress), every subsequent call re-raises
    /// the same error; only `reset` clears it.
    pub fn step(&mut self) -> Result<u64, Error> {
        if let Some(err) = self.halt_reason.clone() {
            return Err(err);
        }

        if let Some(cycles) = self.service_pending_interrupt()? {
            self.cycle_counter += cycles as i64;
            return Ok(cycles);
        }

        let inst = match self.disassembler.decode(&self.mapper, self.pc) {
            Ok(inst) => inst,
            Err(err) => {
                self.halt_reason = Some(err.clone());
                return Err(err);
            }
        };

        trace!(pc = %self.pc, opcode = inst.opcode, mnemonic = inst.mnemonic.as_str(), "decoded instruction");

        self.extra_cycles = 0;
        // Advance a local copy of PC past the instruction's bytes before
        // dispatch; handlers that rewrite PC (branches, jumps, JSR, RTS,
        // RTI, BRK) overwrite this value themselves.
        self.pc = self.pc.wrapping_add(inst.byte_length() as u16);

        let handler = self.handler_table[inst.mnemonic as usize];
        if let Err(err) = handler(self, &inst) {
            self.halt_reason = Some(err.clone());
            return Err(err);
        }

        let total = inst.cycles as u64 + self.extra_cycles as u64;
        self.cycle_counter += total as i64;
        Ok(total)
    }

    /// Runs `step` until `cycle_counter >= target_cycles`.
    pub fn run(&mut self, target_cycles: u64) -> Result<(), Error> {
        while self.cycle_counter < target_cycles as i64 {
            self.step()?;
        }
        Ok(())
    }

    /// Like `step`, but also writes a human-readable trace line to `sink`
    /// (in addition to the `tracing` event `step` always emits), in the
    /// register-dump style NES test ROMs compare CPU traces against.
    pub fn trace<W: std::fmt::Write>(&mut self, sink: &mut W) -> Result<u64, Error> {
        let pc_before = self.pc;
        let a = self.a;
        let x = self.x;
        let y = self.y;
        let sp = self.sp;
        let sr = self.sr;
        let cycles_before = self.cycle_counter;
        let result = self.step();
        let _ = writeln!(
            sink,
            "{}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc_before,
            a,
            x,
            y,
            sr.bits(),
            sp,
            cycles_before
        );
        result
    }

    fn service_pending_interrupt(&mut self) -> Result<Option<u64>, Error> {
        if self.pending_nmi {
            self.pending_nmi = false;
            self.service_interrupt(NMI_VECTOR)?;
            return Ok(Some(INTERRUPT_SERVICE_CYCLES));
        }
        if self.pending_irq && !self.sr.is_set(Status::INTERRUPT_DISABLE) {
            self.pending_irq = false;
            self.service_interrupt(IRQ_BRK_VECTOR)?;
            return Ok(Some(INTERRUPT_SERVICE_CYCLES));
        }
        self.pending_irq = false;
        Ok(None)
    }

    fn service_interrupt(&mut self, vector: Vaddr) -> Result<(), Error> {
        let pc = self.pc;
        self.push_u16(pc)?;
        let pushed = self.sr.to_pushed_byte_hardware();
        self.push_u8(pushed)?;
        self.sr.set_flag(Status::INTERRUPT_DISABLE, true);
        self.pc = self.mmu().load_vector(vector)?;
        Ok(())
    }

    // -- stack discipline -----------------------------------------------

    pub fn push_u8(&mut self, value: u8) -> Result<(), Error> {
        let addr = Vaddr::new(STACK_PAGE | self.sp as u16);
        let reference = self.mmu().absolute(addr)?.reference;
        reference.write(value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    pub fn pull_u8(&mut self) -> Result<u8, Error> {
        self.sp = self.sp.wrapping_add(1);
        let addr = Vaddr::new(STACK_PAGE | self.sp as u16);
        let reference = self.mmu().absolute(addr)?.reference;
        Ok(reference.read())
    }

    pub fn push_u16(&mut self, value: Vaddr) -> Result<(), Error> {
        self.push_u8(value.hi())?;
        self.push_u8(value.lo())?;
        Ok(())
    }

    pub fn pull_u16(&mut self) -> Result<Vaddr, Error> {
        let lo = self.pull_u8()?;
        let hi = self.pull_u8()?;
        Ok(Vaddr::from_bytes(lo, hi))
    }

    // -- operand resolution -----------------------------------------------

    /// Resolves `inst`'s operand into a `ValueOperand`, routing through the
    /// Mmu for every mode that needs memory and crediting the conditional
    /// page-cross penalty when the opcode table marks this (mnemonic,
    /// mode) pair as eligible. Not used for `Relative`, `Implied` or
    /// control-flow instructions, which read `Instruction` fields or
    /// registers directly.
    pub fn fetch_operand(&mut self, inst: &Instruction) -> Result<ValueOperand, Error> {
        let x = self.x;
        let y = self.y;
        let mmu = self.mmu();
        let operand = match inst.mode {
            Mode::Accumulator => ValueOperand::Accumulator,
            Mode::Immediate => ValueOperand::Immediate(inst.operand_byte()),
            Mode::Absolute => ValueOperand::Memory(mmu.absolute(inst.operand_address())?.reference),
            Mode::AbsoluteX => {
                let resolved = mmu.absolute_x(inst.operand_address(), x)?;
                self.credit_page_cross(inst, resolved.page_crossed);
                ValueOperand::Memory(resolved.reference)
            }
            Mode::AbsoluteY => {
                let resolved = mmu.absolute_y(inst.operand_address(), y)?;
                self.credit_page_cross(inst, resolved.page_crossed);
                ValueOperand::Memory(resolved.reference)
            }
            Mode::Indirect => ValueOperand::Memory(mmu.indirect(inst.operand_address())?.reference),
            Mode::XIndexedIndirect => {
                ValueOperand::Memory(mmu.x_indexed_indirect(inst.operand_address(), x)?.reference)
            }
            Mode::IndirectYIndexed => {
                let resolved = mmu.indirect_y_indexed(inst.operand_address(), y)?;
                self.credit_page_cross(inst, resolved.page_crossed);
                ValueOperand::Memory(resolved.reference)
            }
            Mode::ZeroPage => ValueOperand::Memory(mmu.zeropage(inst.operand_address())?.reference),
            Mode::ZeroPageX => {
                ValueOperand::Memory(mmu.zeropage_x(inst.operand_address(), x)?.reference)
            }
            Mode::ZeroPageY => {
                ValueOperand::Memory(mmu.zeropage_y(inst.operand_address(), y)?.reference)
            }
            Mode::Relative | Mode::Implied => {
                unreachable!("{:?} does not resolve through fetch_operand", inst.mode)
            }
        };
        Ok(operand)
    }

    fn credit_page_cross(&mut self, inst: &Instruction, page_crossed: bool) {
        if inst.page_cross_penalty && page_crossed {
            self.extra_cycles += 1;
        }
    }

    pub fn load_operand(&self, operand: &ValueOperand) -> u8 {
        match operand {
            ValueOperand::Accumulator => self.a,
            ValueOperand::Memory(reference) => reference.read(),
            ValueOperand::Immediate(value) => *value,
        }
    }

    pub fn store_operand(&mut self, operand: &ValueOperand, value: u8) -> Result<(), Error> {
        match operand {
            ValueOperand::Accumulator => {
                self.a = value;
                Ok(())
            }
            ValueOperand::Memory(reference) => reference.write(value),
            ValueOperand::Immediate(_) => {
                panic!("attempted to write back to an immediate operand")
            }
        }
    }

    /// Applies the taken-branch and branch-page-cross cycle penalties and
    /// moves PC to `PC + signed(offset)`, where PC is the address already
    /// advanced past the two-byte branch instruction.
    pub fn take_branch(&mut self, offset: u8) {
        let base = self.pc;
        let target = base.wrapping_add_signed(offset as i8);
        self.extra_cycles += 1;
        if !base.same_page(target) {
            self.extra_cycles += 1;
        }
        self.pc = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatMapper;

    fn cpu_with_program(program: &[(u16, u8)], reset_vector: u16) -> Mos6502<FlatMapper> {
        let mapper = FlatMapper::new();
        mapper
            .write(Vaddr::new(0xFFFC), reset_vector as u8)
            .unwrap();
        mapper
            .write(Vaddr::new(0xFFFD), (reset_vector >> 8) as u8)
            .unwrap();
        for &(addr, byte) in program {
            mapper.write(Vaddr::new(addr), byte).unwrap();
        }
        Mos6502::new(mapper).unwrap()
    }

    #[test]
    fn reset_loads_pc_from_reset_vector_and_zeroes_registers() {
        let cpu = cpu_with_program(&[], 0x8000);
        assert_eq!(cpu.pc, Vaddr::new(0x8000));
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.sr, Status::RESET_VALUE);
        assert_eq!(cpu.a, 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut cpu = cpu_with_program(&[], 0x8000);
        cpu.a = 0x42;
        cpu.reset().unwrap();
        let snapshot = (cpu.a, cpu.x, cpu.y, cpu.sp, cpu.sr, cpu.pc, cpu.cycle_counter);
        cpu.reset().unwrap();
        assert_eq!(
            (cpu.a, cpu.x, cpu.y, cpu.sp, cpu.sr, cpu.pc, cpu.cycle_counter),
            snapshot
        );
    }

    #[test]
    fn scenario_immediate_load_and_absolute_store() {
        let mut cpu = cpu_with_program(
            &[
                (0x4001, 0xA9),
                (0x4002, 0x05),
                (0x4003, 0x8D),
                (0x4004, 0x01),
                (0x4005, 0x00),
            ],
            0x4001,
        );
        let mut total = 0u64;
        total += cpu.step().unwrap();
        total += cpu.step().unwrap();
        assert_eq!(total, 6);
        assert_eq!(cpu.mapper.read(Vaddr::new(0x0001)), 0x05);
        assert_eq!(cpu.a, 0x05);
        assert!(!cpu.sr.is_set(Status::ZERO));
        assert!(!cpu.sr.is_set(Status::NEGATIVE));
    }

    #[test]
    fn scenario_adc_with_carry() {
        let mut cpu = cpu_with_program(
            &[
                (0x4001, 0x69),
                (0x4002, 0x0A),
                (0x4003, 0x8D),
                (0x4004, 0x02),
                (0x4005, 0x00),
            ],
            0x4001,
        );
        cpu.a = 0x05;
        let mut total = 0u64;
        total += cpu.step().unwrap();
        total += cpu.step().unwrap();
        assert_eq!(total, 6);
        assert_eq!(cpu.mapper.read(Vaddr::new(0x0002)), 0x0F);
        assert!(!cpu.sr.is_set(Status::CARRY));
        assert!(!cpu.sr.is_set(Status::OVERFLOW));
        assert!(!cpu.sr.is_set(Status::ZERO));
        assert!(!cpu.sr.is_set(Status::NEGATIVE));
    }

    #[test]
    fn scenario_jmp_indirect_page_boundary_quirk() {
        let mut cpu = cpu_with_program(
            &[(0x30FF, 0x40), (0x3000, 0x80), (0x3100, 0x50), (0x4000, 0x6C), (0x4001, 0xFF), (0x4002, 0x30)],
            0x4000,
        );
        cpu.step().unwrap();
        assert_eq!(cpu.pc, Vaddr::new(0x8040));
    }

    #[test]
    fn scenario_signed_overflow_on_adc() {
        let mut cpu = cpu_with_program(&[(0x4000, 0x69), (0x4001, 0x50)], 0x4000);
        cpu.a = 0x50;
        cpu.step().unwrap();
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.sr.is_set(Status::OVERFLOW));
        assert!(cpu.sr.is_set(Status::NEGATIVE));
        assert!(!cpu.sr.is_set(Status::CARRY));
        assert!(!cpu.sr.is_set(Status::ZERO));
    }

    #[test]
    fn scenario_branch_taken_page_cross() {
        let mut cpu = cpu_with_program(&[(0x00FB, 0xB0), (0x00FC, 0x05)], 0x00FB);
        cpu.sr.set_flag(Status::CARRY, true);
        let cycles = cpu.step().unwrap();
        assert_eq!(cpu.pc, Vaddr::new(0x0102));
        assert_eq!(cycles, 4);
    }

    #[test]
    fn invalid_opcode_halts_and_keeps_halting() {
        let mut cpu = cpu_with_program(&[(0x4000, 0x02)], 0x4000);
        assert!(cpu.step().is_err());
        assert!(cpu.step().is_err());
    }
}
