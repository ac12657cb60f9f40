//! 6502 processor status register (P) flag bits.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3; // Stored only; the 2A03 has no BCD adder
pub const FLAG_BREAK: u8 = 1 << 4; // Exists only in the pushed copy of P
pub const FLAG_UNUSED: u8 = 1 << 5; // Always 1 when pushed
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

/// P as pushed by PHP and BRK: B and bit 5 set.
pub fn pushed_status(status: u8) -> u8 {
    status | FLAG_BREAK | FLAG_UNUSED
}

/// P as restored by PLP/RTI: B is dropped, bit 5 stays set.
pub fn pulled_status(value: u8) -> u8 {
    (value & !FLAG_BREAK) | FLAG_UNUSED
}
