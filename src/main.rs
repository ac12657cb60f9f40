//! `nescore` entry point: load an iNES cartridge and run the CPU from its reset vector.
//!
//! Usage: nescore <rom.nes> [--trace] [--entry <hex>] [--max-steps <n>] [--log <level>]

use std::env;
use std::process;

use log::{error, info};
use nescore::{
    cartridge::cartridge::{Cartridge, reset_vector},
    config::{Config, LOG_ENV, USAGE},
    cpu::cpu::CPU,
    logger,
};

fn main() {
    let env_level = env::var(LOG_ENV).ok();
    let config = match Config::from_args(env::args().skip(1), env_level.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(err) = logger::init(config.log_level) {
        eprintln!("failed to install logger: {err}");
    }

    if let Err(message) = run(&config) {
        error!("{message}");
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), String> {
    let cart = Cartridge::load(&config.rom).map_err(|e| format!("{}: {e}", config.rom.display()))?;
    let mapper = cart.into_mapper().map_err(|e| e.to_string())?;

    let entry = match config.entry {
        Some(entry) => entry,
        None => reset_vector(mapper.as_ref()).map_err(|e| format!("reset vector: {e}"))?,
    };

    let mut cpu = CPU::load(mapper, entry);
    match config.max_steps {
        Some(max_steps) => {
            let executed = cpu
                .run_for(config.trace, max_steps)
                .map_err(|e| e.to_string())?;
            info!("stopped after {executed} instructions at ${:04X}", cpu.pc);
            Ok(())
        }
        None => cpu.run(config.trace).map_err(|e| e.to_string()),
    }
}
