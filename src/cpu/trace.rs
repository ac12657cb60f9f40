//! Per-instruction trace lines, nestest style:
//!
//! ```text
//! 8000  A9 50     LDA #$50                        A:00 X:00 Y:00 P:00 SP:FF
//! ```

use crate::bus::Bus;
use crate::cpu::addressing::{Index, Mode};
use crate::cpu::cpu::CPU;
use crate::cpu::table::Instruction;

impl<B: Bus> CPU<B> {
    /// Trace line for `inst` at PC, with registers as they are before it executes.
    pub fn trace_line(&mut self, inst: Instruction, operand: u16) -> String {
        let pc = self.pc;
        let len = inst.addressing.byte_count();

        let bytes: Vec<String> = (0..len)
            .map(|i| format!("{:02X}", self.read(pc.wrapping_add(i))))
            .collect();

        format!(
            "{:04X}  {:<8}  {:<30}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            pc,
            bytes.join(" "),
            self.disassemble(inst, operand),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp
        )
    }

    /// Assembler syntax for `inst` at PC. Operands appear as written in source, except that
    /// branches show their resolved target.
    pub fn disassemble(&mut self, inst: Instruction, operand: u16) -> String {
        let pc = self.pc;
        let mnemonic = inst.mnemonic.as_str();
        let suffix = match inst.addressing.index {
            Index::None => "",
            Index::X => ",X",
            Index::Y => ",Y",
        };

        match inst.addressing.mode {
            Mode::Implied => mnemonic.to_string(),
            Mode::Accumulator => format!("{mnemonic} A"),
            Mode::Immediate => format!("{mnemonic} #${:02X}", operand as u8),
            Mode::ZeroPage => {
                let zp = self.read(pc.wrapping_add(1));
                format!("{mnemonic} ${zp:02X}{suffix}")
            }
            Mode::Absolute => {
                let addr = self.read_word(pc.wrapping_add(1));
                format!("{mnemonic} ${addr:04X}{suffix}")
            }
            Mode::Relative => format!("{mnemonic} ${operand:04X}"),
            Mode::Indirect => {
                let ptr = self.read_word(pc.wrapping_add(1));
                format!("{mnemonic} (${ptr:04X})")
            }
            Mode::IndexedIndirect => {
                let zp = self.read(pc.wrapping_add(1));
                format!("{mnemonic} (${zp:02X},X)")
            }
            Mode::IndirectIndexed => {
                let zp = self.read(pc.wrapping_add(1));
                format!("{mnemonic} (${zp:02X}),Y")
            }
        }
    }
}
