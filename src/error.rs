use crate::vaddr::Vaddr;
use thiserror::Error;

/// Every fallible operation in the crate shares this error type, per the
/// producer table: Bank/Rom writes, MirroredRam construction, Mapper
/// lookups and the disassembler all raise through here. Hardware-faithful
/// quirks (stack wrap, zeropage wrap, indirect-JMP page boundary) are never
/// errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid opcode ${0:02X}")]
    InvalidOpcode(u8),

    #[error("write to read-only memory")]
    ReadOnly,

    #[error("invalid mirroring configuration: {0}")]
    MirroringConfig(String),

    #[error("no bank mapped at {0}")]
    UnmappedAddress(Vaddr),

    #[error("key error: {0}")]
    KeyError(String),
}
