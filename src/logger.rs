//! `log` backend for the binary: `LEVEL message` on stderr, level label colored.

use ansi_term::Colour::{Blue, Green, Purple, Red, Yellow};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {}", label(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> String {
    let text = format!("{level:<5}");
    match level {
        Level::Error => Red.bold().paint(text),
        Level::Warn => Yellow.bold().paint(text),
        Level::Info => Green.bold().paint(text),
        Level::Debug => Blue.bold().paint(text),
        Level::Trace => Purple.bold().paint(text),
    }
    .to_string()
}

/// Install the logger. Fails if another logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
