//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, byte 8 for PRG-RAM),
//! an optional 512-byte trainer, then PRG ROM, then CHR ROM. Only the pieces the CPU core needs are
//! kept: the two ROM images, the mapper number and the PRG-RAM size.

use std::fs;
use std::path::Path;

use log::info;

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::mapper::mapper1::Mapper1;
use crate::cartridge::mapper::PRG_BANK_SIZE;
use crate::error::{BusError, CartridgeError};

const INES_MAGIC: &[u8; 4] = b"NES\x1A";
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const CHR_BANK_SIZE: usize = 8 * 1024;
const PRG_RAM_UNIT: usize = 8 * 1024;

/// Cartridge image: PRG/CHR data plus what is needed to pick and size the mapper.
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub mapper_id: u8,
    /// PRG-RAM in bytes, `None` when the board has none.
    pub prg_ram_size: Option<usize>,
    /// Flags 6 bit 1: PRG-RAM is battery backed.
    pub battery: bool,
}

impl Cartridge {
    /// Load cartridge from an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_ines_bytes(&data)
    }

    /// Parse an in-memory iNES image. Header bytes 4–5 = PRG/CHR size; bytes 6–7 = mapper number
    /// (high nibble of 6 | high nibble of 7); byte 8 = PRG-RAM size.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::MalformedImage(format!(
                "header is {} bytes, expected {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        if &data[0..4] != INES_MAGIC {
            return Err(CartridgeError::MalformedImage(
                "missing NES<EOF> magic".to_string(),
            ));
        }

        let prg_rom_size = data[4] as usize * PRG_BANK_SIZE;
        let chr_rom_size = data[5] as usize * CHR_BANK_SIZE;
        if prg_rom_size == 0 {
            return Err(CartridgeError::MalformedImage(
                "image declares no PRG-ROM".to_string(),
            ));
        }

        let flags6 = data[6];
        let flags7 = data[7];
        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);
        let battery = flags6 & 0b0000_0010 != 0;
        let has_trainer = flags6 & 0b0000_0100 != 0;

        // Byte 8 = 0 predates the field; only assume RAM when the board says it keeps a battery.
        let prg_ram_size = match data[8] as usize {
            0 if battery => Some(PRG_RAM_UNIT),
            0 => None,
            units => Some(units * PRG_RAM_UNIT),
        };

        let prg_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let prg_end = prg_start + prg_rom_size;
        let chr_start = prg_end;
        let chr_end = chr_start + chr_rom_size;

        if data.len() < chr_end {
            return Err(CartridgeError::MalformedImage(format!(
                "truncated ROM data: {} bytes, header needs {}",
                data.len(),
                chr_end
            )));
        }

        let cart = Self {
            prg_rom: data[prg_start..prg_end].to_vec(),
            chr_rom: data[chr_start..chr_end].to_vec(),
            mapper_id,
            prg_ram_size,
            battery,
        };

        info!(
            "cartridge: PRG-ROM {} KiB, CHR-ROM {} KiB, PRG-RAM {} KiB{}, mapper {}",
            prg_rom_size / 1024,
            chr_rom_size / 1024,
            prg_ram_size.unwrap_or(0) / 1024,
            if battery { " (battery)" } else { "" },
            mapper_id
        );

        Ok(cart)
    }

    /// Build the mapper for this cartridge. 0 = NROM, 1 = MMC1.
    pub fn into_mapper(self) -> Result<Box<dyn Mapper>, CartridgeError> {
        let mapper: Box<dyn Mapper> = match self.mapper_id {
            0 => Box::new(Mapper0::new(self.prg_rom, self.chr_rom, self.prg_ram_size)),
            1 => Box::new(Mapper1::new(self.prg_rom, self.chr_rom, self.prg_ram_size)),
            id => return Err(CartridgeError::UnsupportedMapper(id)),
        };
        Ok(mapper)
    }
}

/// Entry address stored in the reset vector at $FFFC/$FFFD.
pub fn reset_vector(mapper: &dyn Mapper) -> Result<u16, BusError> {
    let lo = mapper.read(0xFFFC)? as u16;
    let hi = mapper.read(0xFFFD)? as u16;
    Ok((hi << 8) | lo)
}
