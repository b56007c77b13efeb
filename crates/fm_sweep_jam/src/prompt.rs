use crate::{constants::FREQ_STEP, frequency::Frequency, session::SessionFlags};
use log::trace;
use std::{
    io::{self, BufRead as _, Write},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::Duration,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interrupted while waiting for a choice")]
    Interrupted,
    #[error("Input closed before a frequency was chosen")]
    InputClosed,
    #[error("Writing prompt: {0}")]
    Io(#[from] io::Error),
}

/// Reads stdin line by line on a background thread.
///
/// A blocking read can't observe an interrupt, a channel receive with a timeout can. The channel
/// disconnects when stdin reaches end of file.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        trace!("Stdin reader finished.");
    });
    rx
}

fn next_line(
    lines: &Receiver<String>,
    flags: &SessionFlags,
    poll: Duration,
) -> Result<String, PromptError> {
    loop {
        if flags.is_interrupted() {
            return Err(PromptError::Interrupted);
        }
        match lines.recv_timeout(poll) {
            Ok(line) => return Ok(line),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(PromptError::InputClosed),
        }
    }
}

/// Asks the operator which frequency to jam.
///
/// Entering the prompt commits the session to jamming. `1` picks `current`, `2` the step before it
/// and anything else that isn't empty is returned verbatim.
pub fn choose_frequency(
    current: Frequency,
    flags: &SessionFlags,
    lines: &Receiver<String>,
    poll: Duration,
    out: &mut impl Write,
) -> Result<String, PromptError> {
    flags.start_jamming();
    let previous = current.saturating_sub(FREQ_STEP);

    loop {
        write!(
            out,
            "\nWhich frequency shall I jam?\n    1) {current} (current)\n    2) {previous} (previous)\n    or enter another frequency.\n\nChoice: "
        )?;
        out.flush()?;

        let line = next_line(lines, flags, poll)?;
        match line.trim_end_matches(['\r', '\n']) {
            "" => continue,
            "1" => return Ok(current.to_string()),
            "2" => return Ok(previous.to_string()),
            other => return Ok(other.to_owned()),
        }
    }
}
