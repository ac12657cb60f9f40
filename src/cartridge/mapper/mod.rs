//! NES mappers for PRG memory mapping.
//!
//! Mapper0 (NROM), Mapper1 (MMC1), and the shared trait.

/// PRG-ROM bank size, the unit iNES counts PRG in.
pub const PRG_BANK_SIZE: usize = 16 * 1024;

pub mod mapper;

pub mod mapper0;
pub mod mapper1;
