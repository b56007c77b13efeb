use crate::{
    constants::FREQ_STEP,
    frequency::Frequency,
    session::SessionFlags,
    transmit::{TransmitMode, Transmitter},
};
use log::debug;
use std::path::Path;

/// Briefly transmits `tone` on every step from `start` to `end` so the operator can listen for a
/// clear channel.
///
/// If `start >= end` only `start` is tested. An interrupt stops the sweep after the current step.
/// Returns the last frequency that was actually tested and clears the interrupt flag before
/// returning.
pub fn sweep(
    start: Frequency,
    end: Frequency,
    tone: &Path,
    transmitter: &mut impl Transmitter,
    flags: &SessionFlags,
) -> Frequency {
    let mut current = start;
    let mut tested = start;

    while !flags.is_interrupted() {
        tested = current;
        let freq_to_jam = current.to_string();
        println!("Jamming {freq_to_jam}");

        // A failed step is skipped, the sweep goes on.
        if let Err(e) = transmitter.transmit(&freq_to_jam, tone, TransmitMode::Sweeping) {
            e.log();
        }

        if current >= end {
            break;
        }
        current = current.saturating_add(FREQ_STEP);
        if current > end {
            debug!("Next step {current} is past {end}");
            break;
        }
    }

    if flags.is_interrupted() {
        debug!("Sweep interrupted at {tested}");
    }
    flags.clear_interrupted();
    tested
}
