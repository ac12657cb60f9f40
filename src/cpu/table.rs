//! Instruction table: opcode byte -> (mnemonic, addressing mode).
//!
//! 256 slots indexed by opcode, built at compile time and never mutated. The mnemonic selects
//! the handler in `instructions.rs`; an empty slot is an unrecognized opcode. Only the 151
//! documented opcodes are present.

use crate::cpu::addressing::{Addressing, Index, Mode};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    #[rustfmt::skip]
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
        }
    }
}

/// One table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub addressing: Addressing,
}

const IMP: Addressing = Addressing::new(Mode::Implied, Index::None);
const ACC: Addressing = Addressing::new(Mode::Accumulator, Index::None);
const IMM: Addressing = Addressing::new(Mode::Immediate, Index::None);
const ZP: Addressing = Addressing::new(Mode::ZeroPage, Index::None);
const ZPX: Addressing = Addressing::new(Mode::ZeroPage, Index::X);
const ZPY: Addressing = Addressing::new(Mode::ZeroPage, Index::Y);
const ABS: Addressing = Addressing::new(Mode::Absolute, Index::None);
const ABX: Addressing = Addressing::new(Mode::Absolute, Index::X);
const ABY: Addressing = Addressing::new(Mode::Absolute, Index::Y);
const REL: Addressing = Addressing::new(Mode::Relative, Index::None);
const IND: Addressing = Addressing::new(Mode::Indirect, Index::None);
const IZX: Addressing = Addressing::new(Mode::IndexedIndirect, Index::X);
const IZY: Addressing = Addressing::new(Mode::IndirectIndexed, Index::Y);

/// The full table, shared by every CPU instance.
pub static INSTRUCTIONS: [Option<Instruction>; 256] = build();

/// Table entry for `opcode`, or `None` if the opcode is not a documented instruction.
pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    INSTRUCTIONS[opcode as usize].as_ref()
}

const fn op(mnemonic: Mnemonic, addressing: Addressing) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        addressing,
    })
}

/// Fill the eight-mode layout shared by ORA/AND/EOR/ADC/LDA/CMP/SBC: opcode base + 0x01 ($nn,X),
/// 0x05 zp, 0x09 imm, 0x0D abs, 0x11 ($nn),Y, 0x15 zp,X, 0x19 abs,Y, 0x1D abs,X.
const fn alu_group(
    mut t: [Option<Instruction>; 256],
    base: usize,
    m: Mnemonic,
) -> [Option<Instruction>; 256] {
    t[base + 0x01] = op(m, IZX);
    t[base + 0x05] = op(m, ZP);
    t[base + 0x09] = op(m, IMM);
    t[base + 0x0D] = op(m, ABS);
    t[base + 0x11] = op(m, IZY);
    t[base + 0x15] = op(m, ZPX);
    t[base + 0x19] = op(m, ABY);
    t[base + 0x1D] = op(m, ABX);
    t
}

/// ASL/ROL/LSR/ROR: accumulator, zp, abs, zp,X, abs,X.
const fn shift_group(
    mut t: [Option<Instruction>; 256],
    base: usize,
    m: Mnemonic,
) -> [Option<Instruction>; 256] {
    t[base + 0x06] = op(m, ZP);
    t[base + 0x0A] = op(m, ACC);
    t[base + 0x0E] = op(m, ABS);
    t[base + 0x16] = op(m, ZPX);
    t[base + 0x1E] = op(m, ABX);
    t
}

const fn build() -> [Option<Instruction>; 256] {
    use Mnemonic::*;

    let mut t: [Option<Instruction>; 256] = [None; 256];

    t = alu_group(t, 0x00, Ora);
    t = alu_group(t, 0x20, And);
    t = alu_group(t, 0x40, Eor);
    t = alu_group(t, 0x60, Adc);
    t = alu_group(t, 0xA0, Lda);
    t = alu_group(t, 0xC0, Cmp);
    t = alu_group(t, 0xE0, Sbc);

    // STA has no immediate form
    t = alu_group(t, 0x80, Sta);
    t[0x89] = None;

    t = shift_group(t, 0x00, Asl);
    t = shift_group(t, 0x20, Rol);
    t = shift_group(t, 0x40, Lsr);
    t = shift_group(t, 0x60, Ror);

    t[0xC6] = op(Dec, ZP);
    t[0xCE] = op(Dec, ABS);
    t[0xD6] = op(Dec, ZPX);
    t[0xDE] = op(Dec, ABX);
    t[0xE6] = op(Inc, ZP);
    t[0xEE] = op(Inc, ABS);
    t[0xF6] = op(Inc, ZPX);
    t[0xFE] = op(Inc, ABX);

    t[0xA2] = op(Ldx, IMM);
    t[0xA6] = op(Ldx, ZP);
    t[0xAE] = op(Ldx, ABS);
    t[0xB6] = op(Ldx, ZPY);
    t[0xBE] = op(Ldx, ABY);
    t[0xA0] = op(Ldy, IMM);
    t[0xA4] = op(Ldy, ZP);
    t[0xAC] = op(Ldy, ABS);
    t[0xB4] = op(Ldy, ZPX);
    t[0xBC] = op(Ldy, ABX);

    t[0x86] = op(Stx, ZP);
    t[0x8E] = op(Stx, ABS);
    t[0x96] = op(Stx, ZPY);
    t[0x84] = op(Sty, ZP);
    t[0x8C] = op(Sty, ABS);
    t[0x94] = op(Sty, ZPX);

    t[0xE0] = op(Cpx, IMM);
    t[0xE4] = op(Cpx, ZP);
    t[0xEC] = op(Cpx, ABS);
    t[0xC0] = op(Cpy, IMM);
    t[0xC4] = op(Cpy, ZP);
    t[0xCC] = op(Cpy, ABS);

    t[0x24] = op(Bit, ZP);
    t[0x2C] = op(Bit, ABS);

    t[0x10] = op(Bpl, REL);
    t[0x30] = op(Bmi, REL);
    t[0x50] = op(Bvc, REL);
    t[0x70] = op(Bvs, REL);
    t[0x90] = op(Bcc, REL);
    t[0xB0] = op(Bcs, REL);
    t[0xD0] = op(Bne, REL);
    t[0xF0] = op(Beq, REL);

    t[0x4C] = op(Jmp, ABS);
    t[0x6C] = op(Jmp, IND);
    t[0x20] = op(Jsr, ABS);
    t[0x60] = op(Rts, IMP);
    t[0x40] = op(Rti, IMP);
    t[0x00] = op(Brk, IMP);

    t[0x08] = op(Php, IMP);
    t[0x28] = op(Plp, IMP);
    t[0x48] = op(Pha, IMP);
    t[0x68] = op(Pla, IMP);

    t[0x18] = op(Clc, IMP);
    t[0x38] = op(Sec, IMP);
    t[0x58] = op(Cli, IMP);
    t[0x78] = op(Sei, IMP);
    t[0xB8] = op(Clv, IMP);
    t[0xD8] = op(Cld, IMP);
    t[0xF8] = op(Sed, IMP);

    t[0xAA] = op(Tax, IMP);
    t[0xA8] = op(Tay, IMP);
    t[0xBA] = op(Tsx, IMP);
    t[0x8A] = op(Txa, IMP);
    t[0x9A] = op(Txs, IMP);
    t[0x98] = op(Tya, IMP);

    t[0xCA] = op(Dex, IMP);
    t[0x88] = op(Dey, IMP);
    t[0xE8] = op(Inx, IMP);
    t[0xC8] = op(Iny, IMP);

    t[0xEA] = op(Nop, IMP);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(opcode: u8) -> Instruction {
        *lookup(opcode).unwrap()
    }

    #[test]
    fn documented_opcode_count() {
        assert_eq!(INSTRUCTIONS.iter().flatten().count(), 151);
    }

    #[test]
    fn undocumented_opcodes_are_empty() {
        for opcode in [0x02, 0x03, 0x04, 0x0C, 0x1A, 0x80, 0x89, 0xA3, 0xEB, 0xFF] {
            assert!(lookup(opcode).is_none(), "opcode ${opcode:02X}");
        }
    }

    #[test]
    fn alu_groups_follow_opcode_layout() {
        assert_eq!(entry(0x69), Instruction { mnemonic: Mnemonic::Adc, addressing: IMM });
        assert_eq!(entry(0xB1), Instruction { mnemonic: Mnemonic::Lda, addressing: IZY });
        assert_eq!(entry(0x81), Instruction { mnemonic: Mnemonic::Sta, addressing: IZX });
        assert_eq!(entry(0xDD), Instruction { mnemonic: Mnemonic::Cmp, addressing: ABX });
        assert_eq!(entry(0xF9), Instruction { mnemonic: Mnemonic::Sbc, addressing: ABY });
        assert_eq!(entry(0x15), Instruction { mnemonic: Mnemonic::Ora, addressing: ZPX });
    }

    #[test]
    fn irregular_entries() {
        assert_eq!(entry(0x6A), Instruction { mnemonic: Mnemonic::Ror, addressing: ACC });
        assert_eq!(entry(0xB6), Instruction { mnemonic: Mnemonic::Ldx, addressing: ZPY });
        assert_eq!(entry(0xBE), Instruction { mnemonic: Mnemonic::Ldx, addressing: ABY });
        assert_eq!(entry(0x6C), Instruction { mnemonic: Mnemonic::Jmp, addressing: IND });
        assert_eq!(entry(0x00).mnemonic.as_str(), "BRK");
    }

    #[test]
    fn lengths_by_mode() {
        for inst in INSTRUCTIONS.iter().flatten() {
            let expected = match inst.addressing.mode {
                Mode::Implied | Mode::Accumulator => 1,
                Mode::Absolute | Mode::Indirect => 3,
                _ => 2,
            };
            assert_eq!(inst.addressing.byte_count(), expected, "{:?}", inst);
        }
    }
}
