//! Memory bus and address decoding for the NES CPU.
//!
//! Maps CPU addresses to internal RAM, the (unattached) PPU/APU register ports, and the
//! cartridge mapper. See the [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map).

use log::debug;

use crate::cartridge::mapper::mapper::Mapper;
use crate::error::BusError;

/// Internal RAM size; $0000–$1FFF mirrors it four times.
pub const RAM_SIZE: usize = 0x0800;

/// Trait for memory-mapped access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError>;
    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError>;
}

/// Main NES bus: internal RAM and the cartridge mapper bound at load time.
pub struct NesBus {
    pub ram: [u8; RAM_SIZE],
    mapper: Box<dyn Mapper>,
}

impl NesBus {
    /// Create a new bus with the given mapper. The mapper stays bound for the bus's lifetime.
    pub fn new(mapper: Box<dyn Mapper>) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            mapper,
        }
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => Ok(self.ram[addr as usize % RAM_SIZE]),
            // PPU and APU/IO ports: nothing attached, open bus reads as $00
            0x2000..=0x401F => {
                debug!("read from unattached hardware port ${:04X}, returning $00", addr);
                Ok(0x00)
            }
            // Cartridge space, untranslated
            0x4020..=0xFFFF => self.mapper.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        match addr {
            0x0000..=0x1FFF => {
                self.ram[addr as usize % RAM_SIZE] = data;
                Ok(())
            }
            0x2000..=0x401F => {
                debug!("write ${:02X} to unattached hardware port ${:04X} ignored", data, addr);
                Ok(())
            }
            0x4020..=0xFFFF => self.mapper.write(addr, data),
        }
    }
}
