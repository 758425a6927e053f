use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

pub fn and<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    cpu.a &= value;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn ora<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    cpu.a |= value;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn eor<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    cpu.a ^= value;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

/// BIT is the one logical operation that doesn't touch the accumulator: Z
/// comes from `A & M`, while N and V are copied straight from bits 7 and 6
/// of the memory operand regardless of the AND result.
pub fn bit<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    cpu.sr.set_flag(Status::ZERO, cpu.a & value == 0);
    cpu.sr.set_flag(Status::NEGATIVE, value & 0b1000_0000 != 0);
    cpu.sr.set_flag(Status::OVERFLOW, value & 0b0100_0000 != 0);
    Ok(())
}
