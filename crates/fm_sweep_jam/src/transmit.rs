use crate::{
    constants::{
        CHANNEL_MODE, DEFAULT_TRANSMITTER, POLL_INTERVAL, SAMPLE_RATE, STOP_GRACE, SWEEP_DWELL,
    },
    pin::{self, PinReset},
    session::SessionFlags,
};
use log::{debug, error, trace, warn};
use std::{
    io,
    os::unix::process::CommandExt as _,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus},
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

/// How long a transmission should last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransmitMode {
    /// Transmit for the fixed sweep dwell, then stop.
    Sweeping,
    /// Transmit until the audio ends or the operator interrupts.
    Continuous,
}

/// How a transmission that was started came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransmitOutcome {
    Finished,
    Interrupted,
}

/// Problems noticed while a transmission was running. These never stop the workflow.
#[derive(Error, Debug)]
pub enum Anomaly {
    #[error("transmitter exited with {0}")]
    Exited(ExitStatus),
    #[error("could not signal process group {pgid}: {source}")]
    Signal {
        pgid: libc::pid_t,
        #[source]
        source: io::Error,
    },
    #[error("waiting on transmitter failed: {0}")]
    Wait(#[source] io::Error),
}

#[derive(Error, Debug)]
pub enum TransmitError {
    #[error("Command not found: {}", .0.display())]
    MissingTransmitter(PathBuf),
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Transmitter anomaly: {0}")]
    Anomaly(#[from] Anomaly),
}

impl TransmitError {
    /// Report the failure at the level matching its kind.
    pub fn log(&self) {
        match self {
            TransmitError::Anomaly(_) => warn!("{self}"),
            TransmitError::MissingTransmitter(_) | TransmitError::Spawn { .. } => error!("{self}"),
        }
    }
}

/// Starts transmissions of an audio file on a frequency.
pub trait Transmitter {
    fn transmit(
        &mut self,
        frequency: &str,
        audio: &Path,
        mode: TransmitMode,
    ) -> Result<TransmitOutcome, TransmitError>;
}

/// How to invoke the external transmitter.
#[derive(Clone, Debug)]
pub struct TransmitterConfig {
    /// Path of the transmitter executable.
    pub program: PathBuf,
    pub sample_rate: u32,
    pub channel_mode: &'static str,
    /// Duration of one sweep transmission.
    pub dwell: Duration,
    pub poll_interval: Duration,
    /// Time allowed between SIGINT and SIGKILL when stopping.
    pub stop_grace: Duration,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        TransmitterConfig {
            program: PathBuf::from(DEFAULT_TRANSMITTER),
            sample_rate: SAMPLE_RATE,
            channel_mode: CHANNEL_MODE,
            dwell: SWEEP_DWELL,
            poll_interval: POLL_INTERVAL,
            stop_grace: STOP_GRACE,
        }
    }
}

/// Sends `signal` to a process group. A group that is already gone is not an error.
fn signal_group(pgid: libc::pid_t, signal: libc::c_int) -> io::Result<()> {
    // SAFETY: killpg takes plain integers and has no memory safety requirements.
    if unsafe { libc::killpg(pgid, signal) } == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Ok(()),
        _ => Err(err),
    }
}

/// The `pifm` transmitter run as a child process.
///
/// Every child is started as the leader of its own process group and is only signalled through that
/// group while it has not been reaped yet, so no unrelated process can receive the signal.
pub struct Pifm<P> {
    config: TransmitterConfig,
    flags: SessionFlags,
    pin: P,
}

impl<P: PinReset> Pifm<P> {
    pub fn new(config: TransmitterConfig, flags: SessionFlags, pin: P) -> Self {
        Pifm { config, flags, pin }
    }

    fn command(&self, frequency: &str, audio: &Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg(audio)
            .arg(frequency)
            .arg(self.config.sample_rate.to_string())
            .arg(self.config.channel_mode);
        cmd
    }

    fn spawn(&self, mut cmd: Command) -> Result<Child, TransmitError> {
        trace!("Spawning {cmd:?}");
        cmd.spawn().map_err(|source| TransmitError::Spawn {
            program: self.config.program.clone(),
            source,
        })
    }

    /// Waits for the child to exit, for the deadline to pass or for an interrupt.
    /// Returns the exit status if the child exited (and is therefore reaped).
    fn supervise(
        &self,
        child: &mut Child,
        deadline: Option<Instant>,
    ) -> Result<Option<ExitStatus>, Anomaly> {
        loop {
            if let Some(status) = child.try_wait().map_err(Anomaly::Wait)? {
                return Ok(Some(status));
            }
            if self.flags.is_interrupted() || deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Interrupts the child's process group and reaps it, escalating to SIGKILL after the grace period.
    fn stop(&self, child: &mut Child) -> Result<(), Anomaly> {
        let pgid = child.id() as libc::pid_t;
        if let Err(source) = signal_group(pgid, libc::SIGINT) {
            // Still reap the child so it does not linger.
            trace!("Killing transmitter: {:?}", child.kill());
            trace!("Reaping transmitter: {:?}", child.wait());
            return Err(Anomaly::Signal { pgid, source });
        }
        let deadline = Instant::now() + self.config.stop_grace;
        loop {
            if let Some(status) = child.try_wait().map_err(Anomaly::Wait)? {
                debug!("Transmitter stopped with {status}");
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!("Transmitter ignored SIGINT, killing process group {pgid}");
                signal_group(pgid, libc::SIGKILL)
                    .map_err(|source| Anomaly::Signal { pgid, source })?;
                child.wait().map_err(Anomaly::Wait)?;
                return Ok(());
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Sleeps until `deadline` unless an interrupt arrives first.
    fn hold_until(&self, deadline: Instant) {
        while !self.flags.is_interrupted() && Instant::now() < deadline {
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Stops the child after `supervise` failed. The supervision error is the one returned.
    fn stop_after(&self, child: &mut Child, err: Anomaly) -> Anomaly {
        warn!("{err}");
        if let Err(stop_err) = self.stop(child) {
            warn!("{stop_err}");
        }
        err
    }

    fn transmit_briefly(&self, frequency: &str, audio: &Path) -> Result<(), TransmitError> {
        let mut cmd = self.command(frequency, audio);
        cmd.process_group(0);
        let mut child = self.spawn(cmd)?;
        let deadline = Instant::now() + self.config.dwell;
        let res = match self.supervise(&mut child, Some(deadline)) {
            // The dwell is fixed, a transmitter that quit early still gets its full slot.
            Ok(Some(status)) => {
                self.hold_until(deadline);
                if status.success() {
                    Ok(())
                } else {
                    Err(Anomaly::Exited(status))
                }
            }
            Ok(None) => self.stop(&mut child),
            Err(e) => Err(self.stop_after(&mut child, e)),
        };
        pin::reset_best_effort(&self.pin);
        res.map_err(Into::into)
    }

    fn transmit_until_done(
        &self,
        frequency: &str,
        audio: &Path,
    ) -> Result<TransmitOutcome, TransmitError> {
        let mut cmd = self.command(frequency, audio);
        // SAFETY: setsid is async-signal-safe and touches no memory of the parent.
        unsafe {
            cmd.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(io::Error::last_os_error());
                }
                Ok(())
            });
        }
        let mut child = self.spawn(cmd)?;
        match self.supervise(&mut child, None) {
            Ok(Some(status)) if status.success() => Ok(TransmitOutcome::Finished),
            Ok(Some(status)) => Err(Anomaly::Exited(status).into()),
            Ok(None) => {
                debug!("Interrupted, stopping transmitter");
                self.stop(&mut child)?;
                Ok(TransmitOutcome::Interrupted)
            }
            Err(e) => Err(self.stop_after(&mut child, e).into()),
        }
    }
}

impl<P: PinReset> Transmitter for Pifm<P> {
    fn transmit(
        &mut self,
        frequency: &str,
        audio: &Path,
        mode: TransmitMode,
    ) -> Result<TransmitOutcome, TransmitError> {
        if !self.config.program.is_file() {
            return Err(TransmitError::MissingTransmitter(
                self.config.program.clone(),
            ));
        }
        match mode {
            TransmitMode::Sweeping => self
                .transmit_briefly(frequency, audio)
                .map(|()| TransmitOutcome::Finished),
            TransmitMode::Continuous => self.transmit_until_done(frequency, audio),
        }
    }
}
