use crate::{
    constants::{CHANNELS, SAMPLE_RATE},
    frequency::Frequency,
};
use anyhow::Context;
use hound::{WavReader, WavSpec};
use log::{debug, warn};
use std::{fs, path::Path};

/// Read the header of a wav file.
pub fn read_wav_spec(file: &Path) -> anyhow::Result<WavSpec> {
    let reader =
        WavReader::open(file).with_context(|| format!("Invalid wav file {}", file.display()))?;
    Ok(reader.spec())
}

/// Whether the transmitter will play `spec` as is.
pub fn matches_transmit_format(spec: &WavSpec) -> bool {
    spec.sample_rate == SAMPLE_RATE && spec.channels == CHANNELS
}

/// Warn when the audio is not in the format the transmitter is started with.
/// The file is transmitted regardless.
pub fn check_audio(file: &Path) {
    match read_wav_spec(file) {
        Ok(spec) => {
            debug!("Spec of {}: {spec:?}", file.display());
            if !matches_transmit_format(&spec) {
                warn!(
                    "{} is {}Hz with {} channel(s), expected {SAMPLE_RATE}Hz stereo.",
                    file.display(),
                    spec.sample_rate,
                    spec.channels
                );
            }
        }
        Err(e) => warn!("{e:#}"),
    }
}

/// Read a list of frequencies, one per line. Blank lines and `#` comments are skipped.
pub fn read_frequency_list(file: &Path) -> anyhow::Result<Vec<Frequency>> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Reading frequency list {}", file.display()))?;
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            line.parse::<Frequency>()
                .with_context(|| format!("{}:{}: bad frequency {line:?}", file.display(), i + 1))
        })
        .collect()
}
