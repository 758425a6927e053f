//! A MOS 6502 decoder, interpreter and memory substrate sized for an NES
//! CPU core: a dense opcode table, a stateless addressing-mode resolver,
//! and a `Bank`/`Reference`/`Mapper` substrate standing in for the NES's
//! shared address bus.

pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod vaddr;

pub use cpu::{Disassembler, Instruction, Mnemonic, Mode, Mos6502, Mmu, OpcodeDef, Status};
pub use error::Error;
pub use vaddr::Vaddr;
