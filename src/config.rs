//! Command-line configuration for the `nescore` binary.
//!
//! ```text
//! nescore <rom.nes> [--trace] [--entry <hex>] [--max-steps <n>] [--log <level>]
//! ```
//!
//! `--log` falls back to the `NESCORE_LOG` environment variable, then to `info`.

use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;

pub const USAGE: &str =
    "usage: nescore <rom.nes> [--trace] [--entry <hex>] [--max-steps <n>] [--log <level>]";

/// Environment variable consulted when `--log` is absent.
pub const LOG_ENV: &str = "NESCORE_LOG";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing ROM path")]
    MissingRom,

    #[error("{0} needs a value")]
    MissingValue(&'static str),

    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rom: PathBuf,
    /// Print one trace line per instruction.
    pub trace: bool,
    /// Start here instead of at the reset vector.
    pub entry: Option<u16>,
    /// Stop cleanly after this many instructions.
    pub max_steps: Option<u64>,
    pub log_level: LevelFilter,
}

impl Config {
    /// Parse arguments (without the program name). `env_level` is the value of `NESCORE_LOG`, if set.
    pub fn from_args<I>(args: I, env_level: Option<&str>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut rom = None;
        let mut trace = false;
        let mut entry = None;
        let mut max_steps = None;
        let mut log_level = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--trace" => trace = true,
                "--entry" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--entry"))?;
                    let digits = value.trim_start_matches('$').trim_start_matches("0x");
                    entry = Some(u16::from_str_radix(digits, 16).map_err(|_| {
                        ConfigError::InvalidValue {
                            flag: "--entry",
                            value: value.clone(),
                        }
                    })?);
                }
                "--max-steps" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--max-steps"))?;
                    max_steps = Some(value.parse().map_err(|_| ConfigError::InvalidValue {
                        flag: "--max-steps",
                        value: value.clone(),
                    })?);
                }
                "--log" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--log"))?;
                    log_level = Some(parse_level("--log", &value)?);
                }
                _ if rom.is_none() && !arg.starts_with("--") => rom = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        let log_level = match (log_level, env_level) {
            (Some(level), _) => level,
            (None, Some(value)) => parse_level(LOG_ENV, value)?,
            (None, None) => LevelFilter::Info,
        };

        Ok(Self {
            rom: rom.ok_or(ConfigError::MissingRom)?,
            trace,
            entry,
            max_steps,
            log_level,
        })
    }
}

fn parse_level(flag: &'static str, value: &str) -> Result<LevelFilter, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rom_only_uses_defaults() {
        let config = Config::from_args(args(&["game.nes"]), None).unwrap();

        assert_eq!(config.rom, PathBuf::from("game.nes"));
        assert!(!config.trace);
        assert_eq!(config.entry, None);
        assert_eq!(config.max_steps, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn all_flags() {
        let config = Config::from_args(
            args(&[
                "--trace",
                "nestest.nes",
                "--entry",
                "C000",
                "--max-steps",
                "5000",
                "--log",
                "debug",
            ]),
            Some("error"),
        )
        .unwrap();

        assert!(config.trace);
        assert_eq!(config.entry, Some(0xC000));
        assert_eq!(config.max_steps, Some(5000));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn entry_accepts_prefixes() {
        let config = Config::from_args(args(&["a.nes", "--entry", "$8000"]), None).unwrap();
        assert_eq!(config.entry, Some(0x8000));

        let config = Config::from_args(args(&["a.nes", "--entry", "0xFFFA"]), None).unwrap();
        assert_eq!(config.entry, Some(0xFFFA));
    }

    #[test]
    fn env_level_applies_without_flag() {
        let config = Config::from_args(args(&["a.nes"]), Some("warn")).unwrap();

        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn errors() {
        assert_eq!(Config::from_args(args(&[]), None), Err(ConfigError::MissingRom));
        assert_eq!(
            Config::from_args(args(&["a.nes", "--entry"]), None),
            Err(ConfigError::MissingValue("--entry"))
        );
        assert_eq!(
            Config::from_args(args(&["a.nes", "--entry", "zz"]), None),
            Err(ConfigError::InvalidValue {
                flag: "--entry",
                value: "zz".to_string()
            })
        );
        assert_eq!(
            Config::from_args(args(&["a.nes", "b.nes"]), None),
            Err(ConfigError::UnexpectedArgument("b.nes".to_string()))
        );
        assert!(matches!(
            Config::from_args(args(&["a.nes"]), Some("loud")),
            Err(ConfigError::InvalidValue { flag: LOG_ENV, .. })
        ));
    }
}
