/// One of the twelve 6502 addressing modes (accumulator and implied are
/// kept as distinct variants since they decode differently — accumulator
/// operates on AC, implied touches no operand at all — but neither yields
/// an effective address).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    XIndexedIndirect,
    IndirectYIndexed,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Immediate,
    Relative,
    Accumulator,
    Implied,
}

impl Mode {
    /// Total instruction length in bytes, including the opcode byte.
    pub fn byte_length(self) -> u8 {
        match self {
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 3,
            Mode::XIndexedIndirect
            | Mode::IndirectYIndexed
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::Immediate
            | Mode::Relative => 2,
            Mode::Accumulator | Mode::Implied => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Absolute => "abs",
            Mode::AbsoluteX => "abs,X",
            Mode::AbsoluteY => "abs,Y",
            Mode::Indirect => "ind",
            Mode::XIndexedIndirect => "(zp,X)",
            Mode::IndirectYIndexed => "(zp),Y",
            Mode::ZeroPage => "zp",
            Mode::ZeroPageX => "zp,X",
            Mode::ZeroPageY => "zp,Y",
            Mode::Immediate => "#",
            Mode::Relative => "rel",
            Mode::Accumulator => "A",
            Mode::Implied => "impl",
        }
    }
}

/// The 56 legal 6502 mnemonics. Unofficial/illegal opcodes decode to
/// `Error::InvalidOpcode` rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    pub fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
        }
    }
}

/// One entry of the static opcode table: everything the disassembler and
/// interpreter need to know about an opcode byte without touching memory
/// beyond the operand bytes themselves.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeDef {
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    pub cycles: u8,
    /// Whether this (mnemonic, mode) pair pays a conditional +1 cycle when
    /// the effective address crosses a page boundary. Only set for reading
    /// instructions in abs,X / abs,Y / (zp),Y; read-modify-write and store
    /// instructions already bake the unconditional penalty into `cycles`.
    pub page_cross_penalty: bool,
    /// True for branches, jumps, subroutine/interrupt returns and BRK —
    /// instructions whose handler assigns PC itself rather than letting the
    /// interpreter advance it by `mode.byte_length()`.
    pub modifies_pc: bool,
}

/// A fully decoded instruction, as produced by the disassembler.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    pub operand_lo: u8,
    pub operand_hi: u8,
    pub cycles: u8,
    pub page_cross_penalty: bool,
    pub modifies_pc: bool,
}

impl Instruction {
    /// The operand interpreted as a 16-bit address (absolute-family modes
    /// and `indirect`).
    pub fn operand_address(&self) -> crate::vaddr::Vaddr {
        crate::vaddr::Vaddr::from_bytes(self.operand_lo, self.operand_hi)
    }

    /// The operand's single byte, for immediate/zeropage-family/relative
    /// modes.
    pub fn operand_byte(&self) -> u8 {
        self.operand_lo
    }

    pub fn byte_length(&self) -> u8 {
        self.mode.byte_length()
    }
}

macro_rules! op {
    ($table:ident, $opcode:expr, $mnemonic:expr, $mode:expr, $cycles:expr) => {
        $table[$opcode as usize] = Some(OpcodeDef {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            page_cross_penalty: false,
            modifies_pc: false,
        });
    };
    ($table:ident, $opcode:expr, $mnemonic:expr, $mode:expr, $cycles:expr, page_cross) => {
        $table[$opcode as usize] = Some(OpcodeDef {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            page_cross_penalty: true,
            modifies_pc: false,
        });
    };
    ($table:ident, $opcode:expr, $mnemonic:expr, $mode:expr, $cycles:expr, modifies_pc) => {
        $table[$opcode as usize] = Some(OpcodeDef {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            page_cross_penalty: false,
            modifies_pc: true,
        });
    };
}

/// Builds the dense 256-entry opcode table: `None` at an index means that
/// opcode byte is unofficial/illegal and the disassembler must raise
/// `InvalidOpcode`. Built once at `Disassembler::new()` rather than as a
/// `const` array literal, since Rust const arrays can't express "default
/// then override a handful of indices" without this much repetition twice
/// over.
pub fn build_opcode_table() -> [Option<OpcodeDef>; 256] {
    use Mnemonic::*;
    use Mode::*;

    let mut t: [Option<OpcodeDef>; 256] = [None; 256];

    op!(t, 0x69, Adc, Immediate, 2);
    op!(t, 0x65, Adc, ZeroPage, 3);
    op!(t, 0x75, Adc, ZeroPageX, 4);
    op!(t, 0x6D, Adc, Absolute, 4);
    op!(t, 0x7D, Adc, AbsoluteX, 4, page_cross);
    op!(t, 0x79, Adc, AbsoluteY, 4, page_cross);
    op!(t, 0x61, Adc, XIndexedIndirect, 6);
    op!(t, 0x71, Adc, IndirectYIndexed, 5, page_cross);

    op!(t, 0x29, And, Immediate, 2);
    op!(t, 0x25, And, ZeroPage, 3);
    op!(t, 0x35, And, ZeroPageX, 4);
    op!(t, 0x2D, And, Absolute, 4);
    op!(t, 0x3D, And, AbsoluteX, 4, page_cross);
    op!(t, 0x39, And, AbsoluteY, 4, page_cross);
    op!(t, 0x21, And, XIndexedIndirect, 6);
    op!(t, 0x31, And, IndirectYIndexed, 5, page_cross);

    op!(t, 0x0A, Asl, Accumulator, 2);
    op!(t, 0x06, Asl, ZeroPage, 5);
    op!(t, 0x16, Asl, ZeroPageX, 6);
    op!(t, 0x0E, Asl, Absolute, 6);
    op!(t, 0x1E, Asl, AbsoluteX, 7);

    op!(t, 0x90, Bcc, Relative, 2, modifies_pc);
    op!(t, 0xB0, Bcs, Relative, 2, modifies_pc);
    op!(t, 0xF0, Beq, Relative, 2, modifies_pc);

    op!(t, 0x24, Bit, ZeroPage, 3);
    op!(t, 0x2C, Bit, Absolute, 4);

    op!(t, 0x30, Bmi, Relative, 2, modifies_pc);
    op!(t, 0xD0, Bne, Relative, 2, modifies_pc);
    op!(t, 0x10, Bpl, Relative, 2, modifies_pc);

    op!(t, 0x00, Brk, Implied, 7, modifies_pc);

    op!(t, 0x50, Bvc, Relative, 2, modifies_pc);
    op!(t, 0x70, Bvs, Relative, 2, modifies_pc);

    op!(t, 0x18, Clc, Implied, 2);
    op!(t, 0xD8, Cld, Implied, 2);
    op!(t, 0x58, Cli, Implied, 2);
    op!(t, 0xB8, Clv, Implied, 2);

    op!(t, 0xC9, Cmp, Immediate, 2);
    op!(t, 0xC5, Cmp, ZeroPage, 3);
    op!(t, 0xD5, Cmp, ZeroPageX, 4);
    op!(t, 0xCD, Cmp, Absolute, 4);
    op!(t, 0xDD, Cmp, AbsoluteX, 4, page_cross);
    op!(t, 0xD9, Cmp, AbsoluteY, 4, page_cross);
    op!(t, 0xC1, Cmp, XIndexedIndirect, 6);
    op!(t, 0xD1, Cmp, IndirectYIndexed, 5, page_cross);

    op!(t, 0xE0, Cpx, Immediate, 2);
    op!(t, 0xE4, Cpx, ZeroPage, 3);
    op!(t, 0xEC, Cpx, Absolute, 4);

    op!(t, 0xC0, Cpy, Immediate, 2);
    op!(t, 0xC4, Cpy, ZeroPage, 3);
    op!(t, 0xCC, Cpy, Absolute, 4);

    op!(t, 0xC6, Dec, ZeroPage, 5);
    op!(t, 0xD6, Dec, ZeroPageX, 6);
    op!(t, 0xCE, Dec, Absolute, 6);
    op!(t, 0xDE, Dec, AbsoluteX, 7);

    op!(t, 0xCA, Dex, Implied, 2);
    op!(t, 0x88, Dey, Implied, 2);

    op!(t, 0x49, Eor, Immediate, 2);
    op!(t, 0x45, Eor, ZeroPage, 3);
    op!(t, 0x55, Eor, ZeroPageX, 4);
    op!(t, 0x4D, Eor, Absolute, 4);
    op!(t, 0x5D, Eor, AbsoluteX, 4, page_cross);
    op!(t, 0x59, Eor, AbsoluteY, 4, page_cross);
    op!(t, 0x41, Eor, XIndexedIndirect, 6);
    op!(t, 0x51, Eor, IndirectYIndexed, 5, page_cross);

    op!(t, 0xE6, Inc, ZeroPage, 5);
    op!(t, 0xF6, Inc, ZeroPageX, 6);
    op!(t, 0xEE, Inc, Absolute, 6);
    op!(t, 0xFE, Inc, AbsoluteX, 7);

    op!(t, 0xE8, Inx, Implied, 2);
    op!(t, 0xC8, Iny, Implied, 2);

    op!(t, 0x4C, Jmp, Absolute, 3, modifies_pc);
    op!(t, 0x6C, Jmp, Indirect, 5, modifies_pc);

    op!(t, 0x20, Jsr, Absolute, 6, modifies_pc);

    op!(t, 0xA9, Lda, Immediate, 2);
    op!(t, 0xA5, Lda, ZeroPage, 3);
    op!(t, 0xB5, Lda, ZeroPageX, 4);
    op!(t, 0xAD, Lda, Absolute, 4);
    op!(t, 0xBD, Lda, AbsoluteX, 4, page_cross);
    op!(t, 0xB9, Lda, AbsoluteY, 4, page_cross);
    op!(t, 0xA1, Lda, XIndexedIndirect, 6);
    op!(t, 0xB1, Lda, IndirectYIndexed, 5, page_cross);

    op!(t, 0xA2, Ldx, Immediate, 2);
    op!(t, 0xA6, Ldx, ZeroPage, 3);
    op!(t, 0xB6, Ldx, ZeroPageY, 4);
    op!(t, 0xAE, Ldx, Absolute, 4);
    op!(t, 0xBE, Ldx, AbsoluteY, 4, page_cross);

    op!(t, 0xA0, Ldy, Immediate, 2);
    op!(t, 0xA4, Ldy, ZeroPage, 3);
    op!(t, 0xB4, Ldy, ZeroPageX, 4);
    op!(t, 0xAC, Ldy, Absolute, 4);
    op!(t, 0xBC, Ldy, AbsoluteX, 4, page_cross);

    op!(t, 0x4A, Lsr, Accumulator, 2);
    op!(t, 0x46, Lsr, ZeroPage, 5);
    op!(t, 0x56, Lsr, ZeroPageX, 6);
    op!(t, 0x4E, Lsr, Absolute, 6);
    op!(t, 0x5E, Lsr, AbsoluteX, 7);

    op!(t, 0xEA, Nop, Implied, 2);

    op!(t, 0x09, Ora, Immediate, 2);
    op!(t, 0x05, Ora, ZeroPage, 3);
    op!(t, 0x15, Ora, ZeroPageX, 4);
    op!(t, 0x0D, Ora, Absolute, 4);
    op!(t, 0x1D, Ora, AbsoluteX, 4, page_cross);
    op!(t, 0x19, Ora, AbsoluteY, 4, page_cross);
    op!(t, 0x01, Ora, XIndexedIndirect, 6);
    op!(t, 0x11, Ora, IndirectYIndexed, 5, page_cross);

    op!(t, 0x48, Pha, Implied, 3);
    op!(t, 0x08, Php, Implied, 3);
    op!(t, 0x68, Pla, Implied, 4);
    op!(t, 0x28, Plp, Implied, 4);

    op!(t, 0x2A, Rol, Accumulator, 2);
    op!(t, 0x26, Rol, ZeroPage, 5);
    op!(t, 0x36, Rol, ZeroPageX, 6);
    op!(t, 0x2E, Rol, Absolute, 6);
    op!(t, 0x3E, Rol, AbsoluteX, 7);

    op!(t, 0x6A, Ror, Accumulator, 2);
    op!(t, 0x66, Ror, ZeroPage, 5);
    op!(t, 0x76, Ror, ZeroPageX, 6);
    op!(t, 0x6E, Ror, Absolute, 6);
    op!(t, 0x7E, Ror, AbsoluteX, 7);

    op!(t, 0x40, Rti, Implied, 6, modifies_pc);
    op!(t, 0x60, Rts, Implied, 6, modifies_pc);

    op!(t, 0xE9, Sbc, Immediate, 2);
    op!(t, 0xE5, Sbc, ZeroPage, 3);
    op!(t, 0xF5, Sbc, ZeroPageX, 4);
    op!(t, 0xED, Sbc, Absolute, 4);
    op!(t, 0xFD, Sbc, AbsoluteX, 4, page_cross);
    op!(t, 0xF9, Sbc, AbsoluteY, 4, page_cross);
    op!(t, 0xE1, Sbc, XIndexedIndirect, 6);
    op!(t, 0xF1, Sbc, IndirectYIndexed, 5, page_cross);

    op!(t, 0x38, Sec, Implied, 2);
    op!(t, 0xF8, Sed, Implied, 2);
    op!(t, 0x78, Sei, Implied, 2);

    op!(t, 0x85, Sta, ZeroPage, 3);
    op!(t, 0x95, Sta, ZeroPageX, 4);
    op!(t, 0x8D, Sta, Absolute, 4);
    op!(t, 0x9D, Sta, AbsoluteX, 5);
    op!(t, 0x99, Sta, AbsoluteY, 5);
    op!(t, 0x81, Sta, XIndexedIndirect, 6);
    op!(t, 0x91, Sta, IndirectYIndexed, 6);

    op!(t, 0x86, Stx, ZeroPage, 3);
    op!(t, 0x96, Stx, ZeroPageY, 4);
    op!(t, 0x8E, Stx, Absolute, 4);

    op!(t, 0x84, Sty, ZeroPage, 3);
    op!(t, 0x94, Sty, ZeroPageX, 4);
    op!(t, 0x8C, Sty, Absolute, 4);

    op!(t, 0xAA, Tax, Implied, 2);
    op!(t, 0xA8, Tay, Implied, 2);
    op!(t, 0xBA, Tsx, Implied, 2);
    op!(t, 0x8A, Txa, Implied, 2);
    op!(t, 0x9A, Txs, Implied, 2);
    op!(t, 0x98, Tya, Implied, 2);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_exactly_151_legal_opcodes() {
        let table = build_opcode_table();
        assert_eq!(table.iter().filter(|e| e.is_some()).count(), 151);
    }

    #[test]
    fn brk_is_opcode_zero_and_modifies_pc() {
        let table = build_opcode_table();
        let def = table[0x00].unwrap();
        assert_eq!(def.mnemonic.as_str(), "BRK");
        assert!(def.modifies_pc);
        assert_eq!(def.cycles, 7);
    }

    #[test]
    fn illegal_opcode_slot_is_none() {
        let table = build_opcode_table();
        // 0x02 is KIL/JAM on real hardware, never a legal opcode.
        assert!(table[0x02].is_none());
    }
}
