//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) files into PRG/CHR images and builds the mapper.
//! - **mapper**: NROM (0), MMC1 (1); PRG bank switching and battery PRG-RAM.

pub mod cartridge;
pub mod mapper;
