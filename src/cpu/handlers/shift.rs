use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

pub fn asl<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let result = value << 1;
    cpu.sr.set_flag(Status::CARRY, value & 0b1000_0000 != 0);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

pub fn lsr<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let result = value >> 1;
    cpu.sr.set_flag(Status::CARRY, value & 0b0000_0001 != 0);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

pub fn rol<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let carry_in = cpu.sr.is_set(Status::CARRY) as u8;
    let result = (value << 1) | carry_in;
    cpu.sr.set_flag(Status::CARRY, value & 0b1000_0000 != 0);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

pub fn ror<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let operand = cpu.fetch_operand(inst)?;
    let value = cpu.load_operand(&operand);
    let carry_in = cpu.sr.is_set(Status::CARRY) as u8;
    let result = (value >> 1) | (carry_in << 7);
    cpu.sr.set_flag(Status::CARRY, value & 0b0000_0001 != 0);
    cpu.sr.set_nz(result);
    cpu.store_operand(&operand, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatMapper;
    use crate::cpu::instruction::Mode;
    use crate::cpu::instruction::Mnemonic;

    fn flat() -> Mos6502<FlatMapper> {
        Mos6502::new(FlatMapper::new()).unwrap()
    }

    fn accumulator(mnemonic: Mnemonic) -> Instruction {
        Instruction {
            opcode: 0,
            mnemonic,
            mode: Mode::Accumulator,
            operand_lo: 0,
            operand_hi: 0,
            cycles: 2,
            page_cross_penalty: false,
            modifies_pc: false,
        }
    }

    #[test]
    fn asl_shifts_bit7_into_carry() {
        let mut cpu = flat();
        cpu.a = 0b1000_0001;
        asl(&mut cpu, &accumulator(Mnemonic::Asl)).unwrap();
        assert_eq!(cpu.a, 0b0000_0010);
        assert!(cpu.sr.is_set(Status::CARRY));
    }

    #[test]
    fn rol_rotates_carry_into_bit0() {
        let mut cpu = flat();
        cpu.a = 0b0000_0001;
        cpu.sr.set_flag(Status::CARRY, true);
        rol(&mut cpu, &accumulator(Mnemonic::Rol)).unwrap();
        assert_eq!(cpu.a, 0b0000_0011);
        assert!(!cpu.sr.is_set(Status::CARRY));
    }

    #[test]
    fn ror_rotates_carry_into_bit7() {
        let mut cpu = flat();
        cpu.a = 0b0000_0000;
        cpu.sr.set_flag(Status::CARRY, true);
        ror(&mut cpu, &accumulator(Mnemonic::Ror)).unwrap();
        assert_eq!(cpu.a, 0b1000_0000);
        assert!(!cpu.sr.is_set(Status::CARRY));
    }
}
