use crate::{
    args::JamCli,
    constants::POLL_INTERVAL,
    file_io,
    frequency::Frequency,
    pin::{self, PinReset},
    prompt::{self, PromptError},
    session::{self, SessionFlags},
    sweep,
    transmit::{Pifm, TransmitMode, TransmitOutcome, Transmitter, TransmitterConfig},
};
use anyhow::Context;
use log::{debug, info};
use std::{
    io::Write,
    path::Path,
    process,
    sync::mpsc::Receiver,
    time::Duration,
};

/// Whether the process runs with root privileges.
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and can't fail.
    unsafe { libc::geteuid() == 0 }
}

/// Release the hardware, say goodbye and exit successfully.
pub fn cleanup_and_exit(pin: &impl PinReset) -> ! {
    pin::reset_best_effort(pin);
    println!("Bye :)");
    process::exit(0)
}

/// The sweep range and the files used during a session.
#[derive(Clone, Debug)]
pub struct JamPlan<'a> {
    pub start: Frequency,
    pub end: Frequency,
    pub tone: &'a Path,
    pub audio: &'a Path,
}

/// Sweep, let the operator choose, then jam the choice.
///
/// Returns the frequency that was jammed, or `None` if the operator interrupted at the prompt.
pub fn sweep_then_jam(
    plan: &JamPlan<'_>,
    transmitter: &mut impl Transmitter,
    flags: &SessionFlags,
    lines: &Receiver<String>,
    poll: Duration,
    out: &mut impl Write,
) -> anyhow::Result<Option<String>> {
    println!(
        "Sweeping frequencies between {} and {}.\nPress CTRL+C to stop.\n",
        plan.start, plan.end
    );
    let freq = sweep::sweep(plan.start, plan.end, plan.tone, transmitter, flags);

    let freq_to_jam = match prompt::choose_frequency(freq, flags, lines, poll, out) {
        Ok(freq_to_jam) => freq_to_jam,
        Err(PromptError::Interrupted) => return Ok(None),
        Err(e) => return Err(e).context("Choosing the frequency to jam"),
    };

    println!("Jamming {freq_to_jam}");
    match transmitter.transmit(&freq_to_jam, plan.audio, TransmitMode::Continuous) {
        Ok(TransmitOutcome::Finished) => info!("Transmission of {} finished.", plan.audio.display()),
        Ok(TransmitOutcome::Interrupted) => debug!("Transmission stopped by operator."),
        Err(e) => e.log(),
    }
    Ok(Some(freq_to_jam))
}

/// Main logic. Returning (with or without error) means the caller should clean up.
pub fn run(opt: JamCli, flags: &SessionFlags, pin: &(impl PinReset + Clone)) -> anyhow::Result<()> {
    // Init logging.
    simple_logger::init_with_level(opt.log_opt.log_level())?;
    session::install_interrupt_handler(flags).context("Installing the interrupt handler")?;

    pin::reset_best_effort(pin);

    file_io::check_audio(&opt.wav_file);
    match file_io::read_frequency_list(&opt.file) {
        Ok(list) => debug!("{} preferred frequencies in {}", list.len(), opt.file.display()),
        Err(e) => debug!("No preferred frequencies: {e:#}"),
    }

    let config = TransmitterConfig {
        program: opt.tools.transmitter.clone(),
        ..TransmitterConfig::default()
    };
    let mut transmitter = Pifm::new(config, flags.clone(), pin.clone());
    let plan = JamPlan {
        start: opt.start_freq,
        end: opt.end_freq,
        tone: &opt.tools.tone,
        audio: &opt.wav_file,
    };

    let lines = prompt::spawn_stdin_reader();
    sweep_then_jam(
        &plan,
        &mut transmitter,
        flags,
        &lines,
        POLL_INTERVAL,
        &mut std::io::stdout(),
    )?;
    Ok(())
}
