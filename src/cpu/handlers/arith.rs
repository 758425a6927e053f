use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

/// The shared addition core for ADC and SBC: on real hardware SBC is wired
/// as ADC of the ones' complement of the operand, so `sbc` below just
/// negates its operand and calls back into this.
fn adc_with_carry<M: Mapper>(cpu: &mut Mos6502<M>, value: u8) {
    let carry_in = cpu.sr.is_set(Status::CARRY) as u16;
    let a = cpu.a as u16;
    let sum = a + value as u16 + carry_in;
    let result = sum as u8;

    let overflow = (!(cpu.a ^ value) & (cpu.a ^ result) & 0x80) != 0;

    cpu.sr.set_flag(Status::CARRY, sum > 0xFF);
    cpu.sr.set_flag(Status::OVERFLOW, overflow);
    cpu.sr.set_nz(result);
    cpu.a = result;
}

pub fn adc<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    adc_with_carry(cpu, value);
    Ok(())
}

pub fn sbc<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    adc_with_carry(cpu, !value);
    Ok(())
}

fn compare<M: Mapper>(cpu: &mut Mos6502<M>, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    cpu.sr.set_flag(Status::CARRY, register >= value);
    cpu.sr.set_nz(result);
}

pub fn cmp<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let a = cpu.a;
    compare(cpu, a, value);
    Ok(())
}

pub fn cpx<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let x = cpu.x;
    compare(cpu, x, value);
    Ok(())
}

pub fn cpy<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let y = cpu.y;
    compare(cpu, y, value);
    Ok(())
}
