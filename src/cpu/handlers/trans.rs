use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::error::Error;
use crate::memory::Mapper;

pub fn tax<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.x = cpu.a;
    cpu.sr.set_nz(cpu.x);
    Ok(())
}

pub fn tay<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.y = cpu.a;
    cpu.sr.set_nz(cpu.y);
    Ok(())
}

pub fn txa<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.a = cpu.x;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn tya<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.a = cpu.y;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn tsx<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.x = cpu.sp;
    cpu.sr.set_nz(cpu.x);
    Ok(())
}

/// TXS copies X into SP without touching any status flag: SP is a stack
/// pointer, not a value the Z/N flags are meaningful for.
pub fn txs<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sp = cpu.x;
    Ok(())
}
