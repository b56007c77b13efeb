use crate::{
    constants::{
        DEFAULT_FREQUENCY_LIST, DEFAULT_SWEEP_TONE, DEFAULT_TRANSMITTER, FM_END, FM_START,
    },
    frequency::Frequency,
};
use clap::{Args, Parser, ValueHint};
use log::Level;
use std::path::PathBuf;

/// Logging options.
#[derive(Args, Clone, Debug)]
pub struct LoggingOpt {
    /// Verbosity level (1 = warning, 2 = normal, 3 = debug).
    #[arg(
        short, long, default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(1..=3)
    )]
    pub verbose: u8,
}

impl LoggingOpt {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            1 => Level::Warn,
            3 => Level::Debug,
            _ => Level::Info,
        }
    }
}

/// Where the external tools live.
#[derive(Args, Clone, Debug)]
pub struct ToolsOpt {
    /// The transmitter executable.
    #[arg(long, default_value = DEFAULT_TRANSMITTER, value_hint = ValueHint::ExecutablePath)]
    pub transmitter: PathBuf,

    /// Tone played on each frequency while sweeping.
    #[arg(long, default_value = DEFAULT_SWEEP_TONE, value_hint = ValueHint::FilePath)]
    pub tone: PathBuf,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File not found: {value}"))
    }
}

fn band_frequency(value: &str, name: &str) -> Result<Frequency, String> {
    let mhz: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("{name} {value} is not a number: {e}"))?;
    if mhz < FM_START.mhz() {
        return Err(format!("{name} {value} is below the minimum ({FM_START})"));
    }
    if mhz > FM_END.mhz() {
        return Err(format!("{name} {value} is above the maximum ({FM_END})"));
    }
    Frequency::from_mhz(mhz).map_err(|e| e.to_string())
}

fn start_frequency(value: &str) -> Result<Frequency, String> {
    band_frequency(value, "StartFreq")
}

fn end_frequency(value: &str) -> Result<Frequency, String> {
    band_frequency(value, "EndFreq")
}

#[derive(Parser, Clone, Debug)]
#[command(version, about = include_str!("about.md"))]
pub struct JamCli {
    #[command(flatten)]
    pub log_opt: LoggingOpt,

    /// Give priority to frequencies in the given file.
    #[arg(short, long, default_value = DEFAULT_FREQUENCY_LIST, value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    #[command(flatten)]
    pub tools: ToolsOpt,

    /// File to jam the air with (WAV 44100 stereo).
    #[arg(value_name = "WavFile", value_parser = existing_file, value_hint = ValueHint::FilePath)]
    pub wav_file: PathBuf,

    /// Starting frequency in MHz (min 87.50).
    #[arg(value_name = "StartFreq", value_parser = start_frequency, allow_negative_numbers = true)]
    pub start_freq: Frequency,

    /// Ending frequency in MHz (max 108.00).
    #[arg(value_name = "EndFreq", value_parser = end_frequency, allow_negative_numbers = true)]
    pub end_freq: Frequency,
}
