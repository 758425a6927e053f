mod arith;
mod bra;
mod ctrl;
mod flags;
mod inc;
mod load;
mod logic;
mod shift;
mod stack;
mod trans;

use crate::cpu::core::Mos6502;
use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::error::Error;
use crate::memory::Mapper;

/// The signature every instruction handler shares: given the already-decoded
/// `Instruction` (operand bytes, addressing mode, cycle/page-cross metadata
/// already resolved by the disassembler), mutate CPU state and report
/// failure through the same `Error` type as everything else.
pub type OperationFn<M> = fn(&mut Mos6502<M>, &Instruction) -> Result<(), Error>;

/// Number of legal mnemonics; also the length of the dispatch table, indexed
/// by `Mnemonic as usize`.
pub const MNEMONIC_COUNT: usize = 56;

fn unimplemented_handler<M: Mapper>(_cpu: &mut Mos6502<M>, inst: &Instruction) -> Result<(), Error> {
    unreachable!(
        "no handler registered for mnemonic {}: the dispatch table is incomplete",
        inst.mnemonic.as_str()
    )
}

/// Builds the dense, Mnemonic-indexed dispatch table once per `Mos6502`.
/// Every one of the 56 mnemonics is assigned explicitly below; the
/// `handler_table_is_total` test asserts none are left at the placeholder.
pub fn build_handler_table<M: Mapper>() -> [OperationFn<M>; MNEMONIC_COUNT] {
    use Mnemonic::*;

    let mut t: [OperationFn<M>; MNEMONIC_COUNT] = [unimplemented_handler; MNEMONIC_COUNT];

    t[Adc as usize] = arith::adc;
    t[Sbc as usize] = arith::sbc;
    t[Cmp as usize] = arith::cmp;
    t[Cpx as usize] = arith::cpx;
    t[Cpy as usize] = arith::cpy;

    t[And as usize] = logic::and;
    t[Ora as usize] = logic::ora;
    t[Eor as usize] = logic::eor;
    t[Bit as usize] = logic::bit;

    t[Asl as usize] = shift::asl;
    t[Lsr as usize] = shift::lsr;
    t[Rol as usize] = shift::rol;
    t[Ror as usize] = shift::ror;

    t[Lda as usize] = load::lda;
    t[Ldx as usize] = load::ldx;
    t[Ldy as usize] = load::ldy;
    t[Sta as usize] = load::sta;
    t[Stx as usize] = load::stx;
    t[Sty as usize] = load::sty;

    t[Tax as usize] = trans::tax;
    t[Tay as usize] = trans::tay;
    t[Txa as usize] = trans::txa;
    t[Tya as usize] = trans::tya;
    t[Tsx as usize] = trans::tsx;
    t[Txs as usize] = trans::txs;

    t[Pha as usize] = stack::pha;
    t[Pla as usize] = stack::pla;
    t[Php as usize] = stack::php;
    t[Plp as usize] = stack::plp;

    t[Inc as usize] = inc::inc;
    t[Dec as usize] = inc::dec;
    t[Inx as usize] = inc::inx;
    t[Dex as usize] = inc::dex;
    t[Iny as usize] = inc::iny;
    t[Dey as usize] = inc::dey;

    t[Bcc as usize] = bra::bcc;
    t[Bcs as usize] = bra::bcs;
    t[Bne as usize] = bra::bne;
    t[Beq as usize] = bra::beq;
    t[Bpl as usize] = bra::bpl;
    t[Bmi as usize] = bra::bmi;
    t[Bvc as usize] = bra::bvc;
    t[Bvs as usize] = bra::bvs;

    t[Jmp as usize] = ctrl::jmp;
    t[Jsr as usize] = ctrl::jsr;
    t[Rts as usize] = ctrl::rts;
    t[Rti as usize] = ctrl::rti;
    t[Brk as usize] = ctrl::brk;
    t[Nop as usize] = ctrl::nop;

    t[Clc as usize] = flags::clc;
    t[Sec as usize] = flags::sec;
    t[Cld as usize] = flags::cld;
    t[Sed as usize] = flags::sed;
    t[Cli as usize] = flags::cli;
    t[Sei as usize] = flags::sei;
    t[Clv as usize] = flags::clv;

    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatMapper;

    #[test]
    fn handler_table_is_total() {
        let table = build_handler_table::<FlatMapper>();
        for (index, handler) in table.iter().enumerate() {
            assert!(
                *handler as usize != unimplemented_handler::<FlatMapper> as usize,
                "mnemonic index {} has no handler registered",
                index
            );
        }
    }
}
