use crate::cpu::core::Mos6502;
use crate::cpu::instruction::{Instruction, Mode};
use crate::cpu::status::Status;
use crate::error::Error;
use crate::memory::Mapper;
use crate::vaddr::Vaddr;

const IRQ_BRK_VECTOR: Vaddr = Vaddr(0xFFFE);

pub fn jmp<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    cpu.pc = match inst.mode {
        Mode::Absolute => inst.operand_address(),
        Mode::Indirect => cpu.mmu().indirect_address(inst.operand_address())?,
        other => unreachable!("JMP does not support addressing mode {:?}", other),
    };
    Ok(())
}

/// By the time this handler runs, the interpreter has already advanced PC
/// past this three-byte instruction, so the return address pushed (the
/// byte before the next instruction) is `PC - 1`.
pub fn jsr<M: Mapper>(cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    let return_addr = cpu.pc.wrapping_add_signed(-1);
    cpu.push_u16(return_addr)?;
    cpu.pc = inst.operand_address();
    Ok(())
}

pub fn rts<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    let return_addr = cpu.pull_u16()?;
    cpu.pc = return_addr.wrapping_add(1);
    Ok(())
}

pub fn rti<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    let byte = cpu.pull_u8()?;
    cpu.sr = Status::from_pulled_byte(byte);
    cpu.pc = cpu.pull_u16()?;
    Ok(())
}

/// BRK consumes a padding byte after its opcode on real hardware (it reads
/// as a two-byte instruction even though the table's byte length is 1), so
/// the pushed return address is `PC + 1` relative to the already-advanced
/// PC, and it always services the IRQ/BRK vector, never RESET.
pub fn brk<M: Mapper>(cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push_u16(cpu.pc)?;
    let pushed = cpu.sr.to_pushed_byte();
    cpu.push_u8(pushed)?;
    cpu.sr.set_flag(Status::INTERRUPT_DISABLE, true);
    cpu.pc = cpu.mmu().load_vector(IRQ_BRK_VECTOR)?;
    Ok(())
}

pub fn nop<M: Mapper>(_cpu: &mut Mos6502<M>, _inst: &Instruction) -> Result<(), Error> {
    Ok(())
}
