//! End-to-end: iNES image in memory -> mapper -> bus -> CPU.

use std::sync::atomic::AtomicBool;

use nescore::{
    bus::NesBus,
    cartridge::{
        cartridge::{Cartridge, reset_vector},
        mapper::mapper::Mapper,
    },
    cpu::{
        cpu::CPU,
        flags::{FLAG_CARRY, FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_ZERO},
    },
    error::{BusError, CpuError},
};

const PRG_BANK: usize = 16 * 1024;

/// One-bank image with `program` at $8000 and the reset vector pointing at it.
fn image(mapper_id: u8, prg_ram_units: u8, program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    // $FFFC/$FFFD through the 16 KiB mirror
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let mut rom = vec![b'N', b'E', b'S', 0x1A, 1, 0, mapper_id << 4, 0, prg_ram_units];
    rom.resize(16, 0);
    rom.extend(prg);
    rom
}

fn boot(mapper_id: u8, prg_ram_units: u8, program: &[u8]) -> CPU<NesBus> {
    let cart = Cartridge::from_ines_bytes(&image(mapper_id, prg_ram_units, program)).unwrap();
    let mapper = cart.into_mapper().unwrap();
    let entry = reset_vector(mapper.as_ref()).unwrap();
    CPU::load(mapper, entry)
}

#[test]
fn lda_adc_sets_overflow_and_sign() {
    // LDA #$50; ADC #$50; BRK
    let mut cpu = boot(0, 0, &[0xA9, 0x50, 0x69, 0x50, 0x00]);
    assert_eq!(cpu.pc, 0x8000);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a, 0xA0);
    assert_eq!(cpu.pc, 0x8004);
    assert!(!cpu.flag(FLAG_CARRY));
    assert!(cpu.flag(FLAG_OVERFLOW));
    assert!(cpu.flag(FLAG_NEGATIVE));
    assert!(!cpu.flag(FLAG_ZERO));
}

#[test]
fn run_stops_on_unrecognized_opcode() {
    // LDX #$03; DEX; BNE -3; .byte $02
    let mut cpu = boot(0, 0, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x02]);

    let err = cpu.run(false).unwrap_err();

    assert_eq!(
        err,
        CpuError::UnrecognizedOpcode {
            opcode: 0x02,
            pc: 0x8005
        }
    );
    assert_eq!(cpu.x, 0);
    assert_eq!(cpu.pc, 0x8005);
}

#[test]
fn run_for_counts_instructions() {
    // INX; JMP $8000
    let mut cpu = boot(0, 0, &[0xE8, 0x4C, 0x00, 0x80]);

    assert_eq!(cpu.run_for(false, 10), Ok(10));
    assert_eq!(cpu.x, 5);
    assert_eq!(cpu.pc, 0x8000);
}

#[test]
fn run_until_returns_when_flag_already_set() {
    let mut cpu = boot(0, 0, &[0x02]);

    assert_eq!(cpu.run_until(false, &AtomicBool::new(true)), Ok(()));
    assert_eq!(cpu.pc, 0x8000);
}

#[test]
fn jsr_rts_through_ram_stack() {
    // JSR $8006; LDY #$01; .byte $02; (pad); $8006: LDX #$07; RTS
    let mut cpu = boot(0, 0, &[0x20, 0x06, 0x80, 0xA0, 0x01, 0x02, 0xA2, 0x07, 0x60]);

    let err = cpu.run(false).unwrap_err();

    assert_eq!(err, CpuError::UnrecognizedOpcode { opcode: 0x02, pc: 0x8005 });
    assert_eq!(cpu.x, 0x07);
    assert_eq!(cpu.y, 0x01);
    assert_eq!(cpu.sp, 0xFF);
    // Return address (last byte of the JSR) left behind on the stack page
    assert_eq!(cpu.bus.ram[0x01FF], 0x80);
    assert_eq!(cpu.bus.ram[0x01FE], 0x02);
}

#[test]
fn prg_ram_window_is_writable() {
    // LDA #$42; STA $6000; LDA #$00; LDA $6000
    let mut cpu = boot(0, 1, &[0xA9, 0x42, 0x8D, 0x00, 0x60, 0xA9, 0x00, 0xAD, 0x00, 0x60]);

    assert_eq!(cpu.run_for(false, 4), Ok(4));
    assert_eq!(cpu.a, 0x42);
}

#[test]
fn missing_prg_ram_reads_zero() {
    // LDA #$FF; LDA $6000
    let mut cpu = boot(0, 0, &[0xA9, 0xFF, 0xAD, 0x00, 0x60]);

    assert_eq!(cpu.run_for(false, 2), Ok(2));
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.flag(FLAG_ZERO));
}

#[test]
fn hardware_ports_read_zero() {
    // LDA #$FF; LDA $2002
    let mut cpu = boot(0, 0, &[0xA9, 0xFF, 0xAD, 0x02, 0x20]);

    assert_eq!(cpu.run_for(false, 2), Ok(2));
    assert_eq!(cpu.a, 0x00);
}

#[test]
fn mmc1_expansion_write_is_fatal() {
    // STA $5000
    let mut cpu = boot(1, 0, &[0x8D, 0x00, 0x50]);

    let err = cpu.step().unwrap_err();

    assert_eq!(err, CpuError::Bus(BusError::UnmappedAddress(0x5000)));
    assert_eq!(cpu.pc, 0x8000);
}

#[test]
fn mmc1_switches_prg_bank_under_program() {
    // Runs from the fixed last bank at $C000 and swaps bank 1 into $8000.
    let program = [
        0xAE, 0x00, 0x81, // LDX $8100
        0xA9, 0x01, // LDA #$01
        0x8D, 0x00, 0xE0, // STA $E000
        0xA9, 0x00, // LDA #$00
        0x8D, 0x00, 0xE0, // STA $E000
        0x8D, 0x00, 0xE0, // STA $E000
        0x8D, 0x00, 0xE0, // STA $E000
        0x8D, 0x00, 0xE0, // STA $E000
        0xAD, 0x00, 0x81, // LDA $8100
        0x02,
    ];
    let mut prg = vec![0xEA; 2 * PRG_BANK];
    prg[0x0100] = 0x11;
    prg[PRG_BANK..PRG_BANK + program.len()].copy_from_slice(&program);
    prg[PRG_BANK + 0x0100] = 0x22;
    prg[2 * PRG_BANK - 4] = 0x00;
    prg[2 * PRG_BANK - 3] = 0xC0;

    let mut rom = vec![b'N', b'E', b'S', 0x1A, 2, 0, 0x10, 0];
    rom.resize(16, 0);
    rom.extend(prg);

    let mapper = Cartridge::from_ines_bytes(&rom).unwrap().into_mapper().unwrap();
    let entry = reset_vector(mapper.as_ref()).unwrap();
    assert_eq!(entry, 0xC000);
    let mut cpu = CPU::load(mapper, entry);

    let err = cpu.run(false).unwrap_err();

    assert_eq!(err, CpuError::UnrecognizedOpcode { opcode: 0x02, pc: 0xC019 });
    assert_eq!(cpu.x, 0x11);
    assert_eq!(cpu.a, 0x22);
}

#[test]
fn chr_rom_reachable_through_loaded_bus() {
    let mut rom = image(0, 0, &[0xEA]);
    rom[5] = 1;
    rom.extend((0..8 * 1024).map(|i| (i % 251) as u8));

    let mapper = Cartridge::from_ines_bytes(&rom).unwrap().into_mapper().unwrap();
    let cpu = CPU::load(mapper, 0x8000);

    let chr = cpu.bus.mapper().chr_rom();
    assert_eq!(chr.len(), 8 * 1024);
    assert_eq!(chr[300], (300 % 251) as u8);
}
