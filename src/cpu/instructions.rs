//! Opcode handlers.
//!
//! `execute` receives the table entry and the resolved operand and reports whether the
//! core should advance PC past the instruction or jump somewhere else.

use crate::bus::Bus;
use crate::cpu::addressing::Mode;
use crate::cpu::cpu::CPU;
use crate::cpu::flags::{
    FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_ZERO,
    pulled_status, pushed_status,
};
use crate::cpu::table::{Instruction, Mnemonic};
use crate::error::CpuError;

/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// What the core does with PC after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance by the instruction length.
    Next,
    /// The handler chose the next PC.
    Jump(u16),
}

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, inst: Instruction, operand: u16) -> Result<Flow, CpuError> {
        use Mnemonic::*;

        let mode = inst.addressing.mode;

        match inst.mnemonic {
            // Loads, stores, transfers
            Lda => {
                self.a = self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Ldx => {
                self.x = self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.x);
            }
            Ldy => {
                self.y = self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.y);
            }
            Sta => self.write(operand, self.a)?,
            Stx => self.write(operand, self.x)?,
            Sty => self.write(operand, self.y)?,
            Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }
            Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            Txs => self.sp = self.x,

            // Increments and decrements
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Inc => self.modify(mode, operand, |v, c| (v.wrapping_add(1), c))?,
            Dec => self.modify(mode, operand, |v, c| (v.wrapping_sub(1), c))?,

            // Logic and arithmetic
            And => {
                self.a &= self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Ora => {
                self.a |= self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Eor => {
                self.a ^= self.operand_value(mode, operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Adc => {
                let value = self.operand_value(mode, operand);
                self.add_with_carry(value);
            }
            Sbc => {
                // A - M - (1 - C) == A + !M + C
                let value = self.operand_value(mode, operand);
                self.add_with_carry(value ^ 0xFF);
            }
            Cmp => {
                let value = self.operand_value(mode, operand);
                self.compare(self.a, value);
            }
            Cpx => {
                let value = self.operand_value(mode, operand);
                self.compare(self.x, value);
            }
            Cpy => {
                let value = self.operand_value(mode, operand);
                self.compare(self.y, value);
            }
            Bit => {
                let value = self.read(operand);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
            }

            // Shifts and rotates
            Asl => self.modify(mode, operand, Self::asl)?,
            Lsr => self.modify(mode, operand, Self::lsr)?,
            Rol => self.modify(mode, operand, Self::rol)?,
            Ror => self.modify(mode, operand, Self::ror)?,

            // Branches
            Bcc => return Ok(Self::branch(!self.flag(FLAG_CARRY), operand)),
            Bcs => return Ok(Self::branch(self.flag(FLAG_CARRY), operand)),
            Bne => return Ok(Self::branch(!self.flag(FLAG_ZERO), operand)),
            Beq => return Ok(Self::branch(self.flag(FLAG_ZERO), operand)),
            Bpl => return Ok(Self::branch(!self.flag(FLAG_NEGATIVE), operand)),
            Bmi => return Ok(Self::branch(self.flag(FLAG_NEGATIVE), operand)),
            Bvc => return Ok(Self::branch(!self.flag(FLAG_OVERFLOW), operand)),
            Bvs => return Ok(Self::branch(self.flag(FLAG_OVERFLOW), operand)),

            // Jumps, subroutines, interrupts
            Jmp => return Ok(Flow::Jump(operand)),
            Jsr => {
                // Return address is the last byte of the JSR; RTS adds one
                let return_addr = self.pc.wrapping_add(2);
                self.push_word(return_addr)?;
                return Ok(Flow::Jump(operand));
            }
            Rts => {
                let return_addr = self.pull_word()?;
                return Ok(Flow::Jump(return_addr.wrapping_add(1)));
            }
            Brk => {
                // Return word and P go on together or not at all
                if self.sp < 3 {
                    return Err(CpuError::StackOverflow);
                }
                // +2: BRK is followed by a padding byte
                let return_addr = self.pc.wrapping_add(2);
                self.push_word(return_addr)?;
                self.push_byte(pushed_status(self.status))?;
                self.set_flag(FLAG_INTERRUPT_DISABLE, true);
                return Ok(Flow::Jump(self.read_word(IRQ_VECTOR)));
            }
            Rti => {
                let status = self.pull_byte()?;
                self.status = pulled_status(status);
                return Ok(Flow::Jump(self.pull_word()?));
            }

            // Stack
            Pha => self.push_byte(self.a)?,
            Php => self.push_byte(pushed_status(self.status))?,
            Pla => {
                self.a = self.pull_byte()?;
                self.update_zero_and_negative_flags(self.a);
            }
            Plp => {
                let status = self.pull_byte()?;
                self.status = pulled_status(status);
            }

            // Flags
            Clc => self.set_flag(FLAG_CARRY, false),
            Sec => self.set_flag(FLAG_CARRY, true),
            Cli => self.set_flag(FLAG_INTERRUPT_DISABLE, false),
            Sei => self.set_flag(FLAG_INTERRUPT_DISABLE, true),
            Cld => self.set_flag(FLAG_DECIMAL, false),
            Sed => self.set_flag(FLAG_DECIMAL, true),
            Clv => self.set_flag(FLAG_OVERFLOW, false),

            Nop => {}
        }

        Ok(Flow::Next)
    }

    /// Immediate operands are the value itself; every other mode names an address.
    fn operand_value(&mut self, mode: Mode, operand: u16) -> u8 {
        if mode == Mode::Immediate {
            operand as u8
        } else {
            self.read(operand)
        }
    }

    /// Read-modify-write on A (accumulator mode) or on memory. `op` maps (value, carry in) to
    /// (result, carry out); C/Z/N are committed only once the result is stored.
    fn modify(
        &mut self,
        mode: Mode,
        addr: u16,
        op: fn(u8, bool) -> (u8, bool),
    ) -> Result<(), CpuError> {
        let carry_in = self.flag(FLAG_CARRY);
        let (result, carry) = if mode == Mode::Accumulator {
            let (result, carry) = op(self.a, carry_in);
            self.a = result;
            (result, carry)
        } else {
            let value = self.read(addr);
            let (result, carry) = op(value, carry_in);
            self.write(addr, result)?;
            (result, carry)
        };
        self.set_flag(FLAG_CARRY, carry);
        self.update_zero_and_negative_flags(result);
        Ok(())
    }

    fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.flag(FLAG_CARRY) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        // Both inputs share a sign that the result does not
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    fn asl(value: u8, _carry: bool) -> (u8, bool) {
        (value << 1, value & 0x80 != 0)
    }

    fn lsr(value: u8, _carry: bool) -> (u8, bool) {
        (value >> 1, value & 0x01 != 0)
    }

    fn rol(value: u8, carry: bool) -> (u8, bool) {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    }

    fn ror(value: u8, carry: bool) -> (u8, bool) {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    }

    fn branch(condition: bool, target: u16) -> Flow {
        if condition {
            Flow::Jump(target)
        } else {
            Flow::Next
        }
    }
}
