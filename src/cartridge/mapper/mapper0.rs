//! Mapper 0 (NROM): no bank switching, 16/32KB PRG, optional PRG-RAM.

use crate::cartridge::mapper::{PRG_BANK_SIZE, mapper::Mapper};
use crate::error::BusError;

/// NROM mapper: fixed PRG and CHR, 16KB PRG mirrored into $C000–$FFFF.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    /// Empty when the board has no PRG-RAM.
    prg_ram: Vec<u8>,
}

impl Mapper0 {
    /// Create Mapper0 with given PRG and CHR ROM and `prg_ram_size` bytes of PRG-RAM.
    pub fn new(prg_rom: Vec<u8>, chr_rom: Vec<u8>, prg_ram_size: Option<usize>) -> Self {
        Self {
            prg_rom,
            chr_rom,
            prg_ram: vec![0; prg_ram_size.unwrap_or(0)],
        }
    }

    fn prg_rom_byte(&self, addr: u16, offset: usize) -> Result<u8, BusError> {
        self.prg_rom
            .get(offset)
            .copied()
            .ok_or(BusError::UnmappedAddress(addr))
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16) -> Result<u8, BusError> {
        match addr {
            // PRG-RAM, mirrored over the window when smaller than 8KB
            0x6000..=0x7FFF => {
                if self.prg_ram.is_empty() {
                    return Err(BusError::UnmappedAddress(addr));
                }
                let i = (addr - 0x6000) as usize % self.prg_ram.len();
                Ok(self.prg_ram[i])
            }
            0x8000..=0xBFFF => self.prg_rom_byte(addr, (addr - 0x8000) as usize),
            // Second bank on NROM-256, mirror of the first on NROM-128
            0xC000..=0xFFFF => {
                let offset = if self.prg_rom.len() > PRG_BANK_SIZE {
                    addr - 0x8000
                } else {
                    addr - 0xC000
                };
                self.prg_rom_byte(addr, offset as usize)
            }
            _ => Err(BusError::UnmappedAddress(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        if let 0x6000..=0x7FFF = addr {
            if !self.prg_ram.is_empty() {
                let i = (addr - 0x6000) as usize % self.prg_ram.len();
                self.prg_ram[i] = data;
            }
        }
        // PRG ROM and $4020-$5FFF: NROM has no registers, so stray writes are dropped
        Ok(())
    }

    fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom(banks: usize) -> Vec<u8> {
        (0..banks * PRG_BANK_SIZE).map(|i| (i / 7) as u8).collect()
    }

    #[test]
    fn nrom_128_mirrors_upper_bank() {
        let mapper = Mapper0::new(rom(1), vec![], None);

        assert_eq!(mapper.read(0xC000), mapper.read(0x8000));
        assert_eq!(mapper.read(0xFFFC), mapper.read(0xBFFC));
    }

    #[test]
    fn nrom_256_maps_second_bank() {
        let prg = rom(2);
        let expected = prg[0x4000];
        let mapper = Mapper0::new(prg, vec![], None);

        assert_eq!(mapper.read(0xC000), Ok(expected));
    }

    #[test]
    fn prg_ram_absent_is_unmapped() {
        let mut mapper = Mapper0::new(rom(1), vec![], None);

        assert_eq!(mapper.read(0x6500), Err(BusError::UnmappedAddress(0x6500)));
        // Writes to a missing RAM are dropped, not errors
        assert_eq!(mapper.write(0x6500, 0x42), Ok(()));
    }

    #[test]
    fn prg_ram_read_back() {
        let mut mapper = Mapper0::new(rom(1), vec![], Some(8 * 1024));

        mapper.write(0x6000, 0x42).unwrap();

        assert_eq!(mapper.read(0x6000), Ok(0x42));
    }

    #[test]
    fn small_prg_ram_is_mirrored() {
        let mut mapper = Mapper0::new(rom(1), vec![], Some(2 * 1024));

        mapper.write(0x6001, 0x99).unwrap();

        assert_eq!(mapper.read(0x6801), Ok(0x99));
        assert_eq!(mapper.read(0x7801), Ok(0x99));
    }

    #[test]
    fn rom_writes_are_ignored() {
        let mut mapper = Mapper0::new(rom(1), vec![], None);
        let before = mapper.read(0x8000);

        assert_eq!(mapper.write(0x8000, 0xFF), Ok(()));
        assert_eq!(mapper.read(0x8000), before);
    }

    #[test]
    fn expansion_area_is_unmapped() {
        let mut mapper = Mapper0::new(rom(1), vec![], Some(8 * 1024));

        assert_eq!(mapper.read(0x5000), Err(BusError::UnmappedAddress(0x5000)));
        assert_eq!(mapper.write(0x5000, 0x12), Ok(()));
    }
}
