//! Error types shared by the bus, the CPU core and the cartridge loader.

use thiserror::Error;

/// A bus access that no device answers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    #[error("unmapped address ${0:04X}")]
    UnmappedAddress(u16),
}

/// Conditions that stop the CPU run loop.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("unrecognized opcode ${opcode:02X} at ${pc:04X}")]
    UnrecognizedOpcode { opcode: u8, pc: u16 },

    #[error("stack overflow")]
    StackOverflow,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("bus write failed: {0}")]
    Bus(#[from] BusError),
}

/// Load-time failures. A cartridge that fails here never reaches the CPU.
#[derive(Error, Debug)]
pub enum CartridgeError {
    #[error("failed to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed iNES image: {0}")]
    MalformedImage(String),

    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}
