use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::error::Error;
use crate::memory::Mapper;

pub fn inc<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let result = cpu.load_operand(&operand).wrapping_add(1);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

pub fn dec<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let result = cpu.load_operand(&operand).wrapping_sub(1);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

pub fn inx<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.sr.set_nz(cpu.x);
    Ok(())
}

pub fn dex<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.sr.set_nz(cpu.x);
    Ok(())
}

pub fn iny<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.sr.set_nz(cpu.y);
    Ok(())
}

/// Operates on Y, not X: a transcription bug in some reference
/// implementations swaps these two registers.
pub fn dey<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.sr.set_nz(cpu.y);
    Ok(())
}
