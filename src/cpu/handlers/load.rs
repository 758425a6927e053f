use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::error::Error;
use crate::memory::Mapper;

pub fn lda<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    cpu.a = cpu.load_operand(&operand);
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn ldx<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    cpu.x = cpu.load_operand(&operand);
    cpu.sr.set_nz(cpu.x);
    Ok(())
}

pub fn ldy<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    cpu.y = cpu.load_operand(&operand);
    cpu.sr.set_nz(cpu.y);
    Ok(())
}

pub fn sta<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.a;
    cpu.store_operand(&operand, value)
}

pub fn stx<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.x;
    cpu.store_operand(&operand, value)
}

pub fn sty<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.y;
    cpu.store_operand(&operand, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatMapper;
    use crate::cpu::instruction::{Mnemonic, Mode};
    use crate::vaddr::Vaddr;

    fn flat() -> Mos6502<FlatMapper> {
        Mos6502::new(FlatMapper::new()).unwrap()
    }

    #[test]
    fn lda_sets_zero_and_negative_from_the_loaded_value() {
        let mut cpu = flat();
        let inst = Instruction {
            opcode: 0,
            mnemonic: Mnemonic::Lda,
            mode: Mode::Immediate,
            operand_lo: 0x00,
            operand_hi: 0,
            cycles: 2,
            page_cross_penalty: false,
            modifies_pc: false,
        };
        lda(&mut cpu, &inst).unwrap();
        assert_eq!(cpu.a, 0);
        assert!(cpu.sr.is_set(crate::cpu::status::Status::ZERO));
    }

    #[test]
    fn sta_writes_the_accumulator_without_touching_flags() {
        let mut cpu = flat();
        cpu.a = 0x42;
        let before = cpu.sr;
        let inst = Instruction {
            opcode: 0,
            mnemonic: Mnemonic::Sta,
            mode: Mode::ZeroPage,
            operand_lo: 0x10,
            operand_hi: 0,
            cycles: 3,
            page_cross_penalty: false,
            modifies_pc: false,
        };
        sta(&mut cpu, &inst).unwrap();
        assert_eq!(cpu.mapper.read(Vaddr::new(0x0010)), 0x42);
        assert_eq!(cpu.sr, before);
    }
}
