use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::{
    bus::{Bus, NesBus},
    cartridge::mapper::mapper::Mapper,
    cpu::{
        flags::{FLAG_NEGATIVE, FLAG_ZERO},
        instructions::Flow,
        table,
    },
    error::CpuError,
};

/// Stack page base; SP is an offset into $0100–$01FF.
pub const STACK_BASE: u16 = 0x0100;
/// SP value of an empty stack.
pub const STACK_EMPTY: u8 = 0xFF;

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub bus: B,
}

impl CPU<NesBus> {
    /// Zeroed CPU with `mapper` bound to a fresh bus and PC at `entry`.
    pub fn load(mapper: Box<dyn Mapper>, entry: u16) -> Self {
        let mut cpu = CPU::new(NesBus::new(mapper));
        cpu.pc = entry;
        info!("CPU loaded, entry ${:04X}", entry);
        cpu
    }
}

impl<B: Bus> CPU<B> {
    /// Registers and flags cleared, stack empty.
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: STACK_EMPTY,
            pc: 0,
            status: 0,
            bus,
        }
    }

    /// Run until an instruction fails. `trace` prints one line per instruction to stdout.
    pub fn run(&mut self, trace: bool) -> Result<(), CpuError> {
        self.run_until(trace, &AtomicBool::new(false))
    }

    /// Like `run`, but returns `Ok(())` once `stop` is set. The flag is checked between
    /// instructions only.
    pub fn run_until(&mut self, trace: bool, stop: &AtomicBool) -> Result<(), CpuError> {
        while !stop.load(Ordering::Relaxed) {
            self.execute_next(trace)?;
        }
        Ok(())
    }

    /// Run at most `max_steps` instructions. Returns how many were executed.
    pub fn run_for(&mut self, trace: bool, max_steps: u64) -> Result<u64, CpuError> {
        for executed in 0..max_steps {
            if let Err(err) = self.execute_next(trace) {
                debug!("stopped after {executed} instructions");
                return Err(err);
            }
        }
        Ok(max_steps)
    }

    /// Execute exactly one instruction.
    pub fn step(&mut self) -> Result<(), CpuError> {
        self.execute_next(false)
    }

    /// Fetch, decode, resolve, execute, advance. PC is untouched if any stage fails.
    fn execute_next(&mut self, trace: bool) -> Result<(), CpuError> {
        let pc = self.pc;
        let opcode = self.read(pc);
        let inst = *table::lookup(opcode).ok_or(CpuError::UnrecognizedOpcode { opcode, pc })?;

        let (operand, len) = self.resolve(inst.addressing);

        if trace {
            let line = self.trace_line(inst, operand);
            println!("{line}");
        }

        self.pc = match self.execute(inst, operand)? {
            Flow::Next => pc.wrapping_add(len),
            Flow::Jump(target) => target,
        };
        Ok(())
    }

    /// Bus read that never fails: an unmapped cartridge address reads as $00.
    pub(crate) fn read(&mut self, addr: u16) -> u8 {
        match self.bus.read(addr) {
            Ok(value) => value,
            Err(err) => {
                warn!("{err} at PC ${:04X}, reading $00", self.pc);
                0x00
            }
        }
    }

    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn write(&mut self, addr: u16, data: u8) -> Result<(), CpuError> {
        self.bus.write(addr, data)?;
        Ok(())
    }

    pub fn push_byte(&mut self, value: u8) -> Result<(), CpuError> {
        if self.sp == 0 {
            return Err(CpuError::StackOverflow);
        }
        self.write(STACK_BASE | self.sp as u16, value)?;
        self.sp -= 1;
        Ok(())
    }

    pub fn pull_byte(&mut self) -> Result<u8, CpuError> {
        if self.sp == STACK_EMPTY {
            return Err(CpuError::StackUnderflow);
        }
        self.sp += 1;
        Ok(self.read(STACK_BASE | self.sp as u16))
    }

    /// High byte first, so the word sits little-endian in memory.
    pub fn push_word(&mut self, value: u16) -> Result<(), CpuError> {
        if self.sp < 2 {
            return Err(CpuError::StackOverflow);
        }
        self.push_byte((value >> 8) as u8)?;
        self.push_byte(value as u8)
    }

    pub fn pull_word(&mut self) -> Result<u16, CpuError> {
        if self.sp > STACK_EMPTY - 2 {
            return Err(CpuError::StackUnderflow);
        }
        let lo = self.pull_byte()? as u16;
        let hi = self.pull_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    pub fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    pub(crate) fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }
}
