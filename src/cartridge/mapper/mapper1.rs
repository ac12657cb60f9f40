//! Mapper 1 (MMC1): bank switching via 5-bit shift register.
//!
//! [MMC1](https://www.nesdev.org/wiki/MMC1): writes to $8000–$9FFF (control), $A000–$BFFF (CHR0),
//! $C000–$DFFF (CHR1), $E000–$FFFF (PRG bank). Any write with bit 7 set resets the shift register.
//! Otherwise, bit 0 is shifted in (LSB first); after 5 writes, the value is latched to the selected
//! register. Control bits 2–3 = PRG mode; bit 4 = CHR mode. CHR registers are latched but CHR
//! is never read by the CPU side, so only PRG banking affects reads.

use log::debug;

use crate::cartridge::mapper::{PRG_BANK_SIZE, mapper::Mapper};
use crate::error::BusError;

/// MMC1 state: 5-bit shift register, control byte (PRG/CHR mode), bank selects.
pub struct Mapper1 {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    shift_reg: u8,
    shift_count: u8,
    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,
}

impl Mapper1 {
    /// Create MMC1. Control defaults to $0C (PRG mode 3: $8000 switchable, $C000 fixed last).
    pub fn new(prg_rom: Vec<u8>, chr_rom: Vec<u8>, prg_ram_size: Option<usize>) -> Self {
        Self {
            prg_rom,
            chr_rom,
            prg_ram: vec![0; prg_ram_size.unwrap_or(0)],
            shift_reg: 0,
            shift_count: 0,
            control: 0x0C,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
        }
    }

    /// PRG bank mode from control bits 2–3: 0/1 = 32 KiB mode; 2 = $8000 fixed first, $C000 switchable; 3 = $8000 switchable, $C000 fixed last.
    fn prg_bank_mode(&self) -> u8 {
        (self.control >> 2) & 0b11
    }

    fn prg_bank_count(&self) -> usize {
        (self.prg_rom.len() / PRG_BANK_SIZE).max(1)
    }

    /// 16 KiB bank mapped into the half of $8000–$FFFF that contains `addr`.
    fn prg_bank_for(&self, addr: u16) -> usize {
        let selected = (self.prg_bank & 0x0F) as usize;
        let upper = addr >= 0xC000;
        let bank = match self.prg_bank_mode() {
            0 | 1 => (selected & !1) + upper as usize,
            2 => {
                if upper {
                    selected
                } else {
                    0
                }
            }
            _ => {
                if upper {
                    self.prg_bank_count() - 1
                } else {
                    selected
                }
            }
        };
        bank % self.prg_bank_count()
    }

    fn latch(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.control = value,
            0xA000..=0xBFFF => self.chr_bank0 = value,
            0xC000..=0xDFFF => self.chr_bank1 = value,
            _ => self.prg_bank = value,
        }
        debug!(
            "MMC1 latch ${:04X} <- {:05b} (control {:05b}, chr {:02X}/{:02X}, prg {:02X})",
            addr, value, self.control, self.chr_bank0, self.chr_bank1, self.prg_bank
        );
    }
}

impl Mapper for Mapper1 {
    fn read(&self, addr: u16) -> Result<u8, BusError> {
        match addr {
            0x6000..=0x7FFF => {
                if self.prg_ram.is_empty() {
                    return Err(BusError::UnmappedAddress(addr));
                }
                let i = (addr - 0x6000) as usize % self.prg_ram.len();
                Ok(self.prg_ram[i])
            }
            0x8000..=0xFFFF => {
                let offset = self.prg_bank_for(addr) * PRG_BANK_SIZE + (addr as usize & 0x3FFF);
                self.prg_rom
                    .get(offset)
                    .copied()
                    .ok_or(BusError::UnmappedAddress(addr))
            }
            _ => Err(BusError::UnmappedAddress(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        match addr {
            0x6000..=0x7FFF => {
                if !self.prg_ram.is_empty() {
                    let i = (addr - 0x6000) as usize % self.prg_ram.len();
                    self.prg_ram[i] = data;
                }
                Ok(())
            }
            0x8000..=0xFFFF => {
                // Bit 7 resets the shift register and forces PRG mode 3
                if data & 0x80 != 0 {
                    self.shift_reg = 0;
                    self.shift_count = 0;
                    self.control |= 0x0C;
                    return Ok(());
                }

                self.shift_reg >>= 1;
                self.shift_reg |= (data & 1) << 4;
                self.shift_count += 1;

                if self.shift_count == 5 {
                    self.latch(addr, self.shift_reg & 0x1F);
                    self.shift_reg = 0;
                    self.shift_count = 0;
                }
                Ok(())
            }
            _ => Err(BusError::UnmappedAddress(addr)),
        }
    }

    fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }
}
