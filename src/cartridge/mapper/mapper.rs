//! Mapper trait: cartridge-side PRG address decoding.

use crate::error::BusError;

/// Trait for NES cartridge mappers. The bus hands every CPU access in
/// $4020–$FFFF to the mapper untranslated; the mapper owns the range-to-offset mapping.
pub trait Mapper {
    /// Read from PRG-RAM ($6000–$7FFF) or PRG-ROM ($8000–$FFFF).
    fn read(&self, addr: u16) -> Result<u8, BusError>;
    /// Write to PRG-RAM or mapper registers (PRG-ROM itself is read-only).
    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError>;
    /// Pattern data, kept for the video side. The CPU never reads it.
    fn chr_rom(&self) -> &[u8];
}
