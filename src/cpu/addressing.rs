//! Addressing modes and the operand resolver.
//!
//! The resolver runs before the handler so the instruction length is known even when the
//! handler goes on to overwrite PC.

use crate::bus::Bus;
use crate::cpu::cpu::CPU;

/// How an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    Absolute,
    Relative,
    /// `JMP ($nnnn)` only.
    Indirect,
    /// `($nn,X)`: pointer fetched from zero page at operand + X.
    IndexedIndirect,
    /// `($nn),Y`: pointer fetched from zero page at operand, then + Y.
    IndirectIndexed,
}

/// Index register added to a zero-page or absolute address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    None,
    X,
    Y,
}

/// Addressing-mode descriptor stored in the instruction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addressing {
    pub mode: Mode,
    pub index: Index,
}

impl Addressing {
    pub const fn new(mode: Mode, index: Index) -> Self {
        Self { mode, index }
    }

    /// Instruction length in bytes, opcode included.
    pub const fn byte_count(&self) -> u16 {
        match self.mode {
            Mode::Implied | Mode::Accumulator => 1,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::Relative
            | Mode::IndexedIndirect
            | Mode::IndirectIndexed => 2,
            Mode::Absolute | Mode::Indirect => 3,
        }
    }
}

impl<B: Bus> CPU<B> {
    /// Resolve the operand of the instruction whose opcode sits at PC.
    ///
    /// Returns `(operand, length)`. The operand is the literal byte for immediate mode, the
    /// branch target for relative mode, unused (0) for implied/accumulator, and the effective
    /// address for everything else.
    pub fn resolve(&mut self, addressing: Addressing) -> (u16, u16) {
        let pc = self.pc;
        let len = addressing.byte_count();

        let operand = match addressing.mode {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate => self.read(pc.wrapping_add(1)) as u16,
            Mode::ZeroPage => {
                let base = self.read(pc.wrapping_add(1));
                // Indexing wraps inside page zero
                base.wrapping_add(self.index_value(addressing.index)) as u16
            }
            Mode::Absolute => {
                let base = self.read_word(pc.wrapping_add(1));
                base.wrapping_add(self.index_value(addressing.index) as u16)
            }
            Mode::Relative => {
                let offset = self.read(pc.wrapping_add(1)) as i8;
                pc.wrapping_add(len).wrapping_add(offset as u16)
            }
            Mode::Indirect => {
                let ptr = self.read_word(pc.wrapping_add(1));
                let lo = self.read(ptr) as u16;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF); // page-boundary bug
                let hi = self.read(hi_addr) as u16;
                (hi << 8) | lo
            }
            Mode::IndexedIndirect => {
                let zp = self.read(pc.wrapping_add(1)).wrapping_add(self.x);
                self.read_zero_page_word(zp)
            }
            Mode::IndirectIndexed => {
                let zp = self.read(pc.wrapping_add(1));
                self.read_zero_page_word(zp).wrapping_add(self.y as u16)
            }
        };

        (operand, len)
    }

    fn index_value(&self, index: Index) -> u8 {
        match index {
            Index::None => 0,
            Index::X => self.x,
            Index::Y => self.y,
        }
    }

    /// Little-endian pointer from page zero; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&mut self, zp: u8) -> u16 {
        let lo = self.read(zp as u16) as u16;
        let hi = self.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}
