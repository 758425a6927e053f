use crate::cpu::core::Mos6502;
use crate::cpu::instruction::Instruction;
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;

pub fn pha<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    let value = cpu.a;
    cpu.push_u8(value)
}

pub fn pla<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.a = cpu.pull_u8()?;
    cpu.sr.set_nz(cpu.a);
    Ok(())
}

pub fn php<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    let pushed = cpu.sr.to_pushed_byte();
    cpu.push_u8(pushed)
}

pub fn plp<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    let byte = cpu.pull_u8()?;
    cpu.sr = Status::from_pulled_byte(byte);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatMapper;
    use crate::cpu::instruction::{Mnemonic, Mode};

    fn flat() -> Mos6502<FlatMapper> {
        Mos6502::new(FlatMapper::new()).unwrap()
    }

    fn implied(mnemonic: Mnemonic) -> Instruction {
        Instruction {
            opcode: 0,
            mnemonic,
            mode: Mode::Implied,
            operand_lo: 0,
            operand_hi: 0,
            cycles: 3,
            page_cross_penalty: false,
            modifies_pc: false,
        }
    }

    #[test]
    fn pha_then_pla_round_trips_the_accumulator() {
        let mut cpu = flat();
        cpu.a = 0x77;
        pha(&mut cpu, &implied(Mnemonic::Pha)).unwrap();
        cpu.a = 0x00;
        pla(&mut cpu, &implied(Mnemonic::Pla)).unwrap();
        assert_eq!(cpu.a, 0x77);
    }

    #[test]
    fn php_sets_break_and_unused_in_the_pushed_byte() {
        let mut cpu = flat();
        cpu.sr = Status::empty();
        php(&mut cpu, &implied(Mnemonic::Php)).unwrap();
        let pulled = cpu.pull_u8().unwrap();
        assert_eq!(pulled, (Status::BREAK | Status::UNUSED).bits());
    }

    #[test]
    fn plp_forces_unused_but_leaves_break_unlatched() {
        let mut cpu = flat();
        cpu.push_u8(0x00).unwrap();
        plp(&mut cpu, &implied(Mnemonic::Plp)).unwrap();
        assert!(cpu.sr.is_set(Status::UNUSED));
        assert!(!cpu.sr.is_set(Status::BREAK));
    }
}
