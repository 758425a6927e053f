use crate::cpu::instruction::{build_opcode_table, Instruction, OpcodeDef};
use crate::error::Error;
use crate::memory::Mapper;
use crate::vaddr::Vaddr;

fn read_byte(mapper: &dyn Mapper, addr: Vaddr) -> Result<u8, Error> {
    let bank = mapper.map_to_hardware(addr)?;
    let bank = bank.borrow();
    let index = (addr.get() - bank.base_address().get()) as usize;
    Ok(bank.read(index))
}

/// Translates raw bytes at a Vaddr into a structured `Instruction`. A pure
/// function of its input bytes: it never mutates CPU state, only reads
/// through the Mapper it is given.
pub struct Disassembler {
    table: [Option<OpcodeDef>; 256],
}

impl Disassembler {
    pub fn new() -> Self {
        Disassembler {
            table: build_opcode_table(),
        }
    }

    pub fn decode(&self, mapper: &dyn Mapper, pc: Vaddr) -> Result<Instruction, Error> {
        let opcode = read_byte(mapper, pc)?;
        let def = self.table[opcode as usize].ok_or(Error::InvalidOpcode(opcode))?;

        let (operand_lo, operand_hi) = match def.mode.byte_length() {
            1 => (0, 0),
            2 => (read_byte(mapper, pc.wrapping_add(1))?, 0),
            3 => (
                read_byte(mapper, pc.wrapping_add(1))?,
                read_byte(mapper, pc.wrapping_add(2))?,
            ),
            other => unreachable!("addressing mode with invalid byte length {}", other),
        };

        Ok(Instruction {
            opcode,
            mnemonic: def.mnemonic,
            mode: def.mode,
            operand_lo,
            operand_hi,
            cycles: def.cycles,
            page_cross_penalty: def.page_cross_penalty,
            modifies_pc: def.modifies_pc,
        })
    }
}

impl Default for Disassembler {
    fn default() -> Self {
        Disassembler::new()
    }
}
