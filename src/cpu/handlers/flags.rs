use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

pub fn clc<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::CARRY, false);
    Ok(())
}

pub fn sec<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::CARRY, true);
    Ok(())
}

pub fn cld<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::DECIMAL, false);
    Ok(())
}

pub fn sed<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::DECIMAL, true);
    Ok(())
}

pub fn cli<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::INTERRUPT_DISABLE, false);
    Ok(())
}

pub fn sei<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::INTERRUPT_DISABLE, true);
    Ok(())
}

pub fn clv<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.sr.set_flag(Status::OVERFLOW, false);
    Ok(())
}
