//! Nescore: the instruction core and cartridge bus of an NES emulator.
//!
//! Implements the CPU side of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the 6502 instruction set of the
//! Ricoh 2A03 and the CPU address space with its cartridge mappers. Video, audio and timing are not
//! part of this crate; their register ports read as $00.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM, hardware ports,
//!   cartridge
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0), MMC1 (1)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): documented opcodes, table-driven dispatch,
//!   trace output
//! - **config**, **logger** – command line and log output for the `nescore` binary
//! - **error** – error types for the above

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod logger;
