//! 6502 CPU emulation for the NES.
//!
//! Documented instruction set only; undocumented opcodes stop the run loop.
//! Table-driven: fetch, look the opcode up in `table`, resolve the operand (`addressing`),
//! run the handler (`instructions`), advance PC. Bus trait used for all memory access.

pub mod addressing;
pub mod cpu;
pub mod flags;
pub mod instructions;
pub mod table;
pub mod trace;
