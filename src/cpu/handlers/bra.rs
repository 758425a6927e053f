use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

fn branch_if<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction, condition: bool) {
    if condition {
        cpu.take_branch(inst.operand_byte());
    }
}

pub fn bcc<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, !cpu.sr.is_set(Status::CARRY));
    Ok(())
}

pub fn bcs<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, cpu.sr.is_set(Status::CARRY));
    Ok(())
}

pub fn bne<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, !cpu.sr.is_set(Status::ZERO));
    Ok(())
}

pub fn beq<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, cpu.sr.is_set(Status::ZERO));
    Ok(())
}

pub fn bpl<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, !cpu.sr.is_set(Status::NEGATIVE));
    Ok(())
}

pub fn bmi<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, cpu.sr.is_set(Status::NEGATIVE));
    Ok(())
}

pub fn bvc<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, !cpu.sr.is_set(Status::OVERFLOW));
    Ok(())
}

pub fn bvs<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    branch_if(cpu, inst, cpu.sr.is_set(Status::OVERFLOW));
    Ok(())
}
