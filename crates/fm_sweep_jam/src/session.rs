use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Default)]
struct Flags {
    interrupted: AtomicBool,
    jamming: AtomicBool,
}

/// Flags shared between the control flow and the interrupt handler.
///
/// Cloning is cheap and every clone observes the same flags.
#[derive(Clone, Debug, Default)]
pub struct SessionFlags(Arc<Flags>);

impl SessionFlags {
    /// Record an operator interrupt.
    pub fn interrupt(&self) {
        self.0.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.0.interrupted.load(Ordering::SeqCst)
    }

    /// Forget a previously recorded interrupt so a later one can be detected.
    pub fn clear_interrupted(&self) {
        self.0.interrupted.store(false, Ordering::SeqCst);
    }

    /// Mark the switch from sweeping to committing to a single frequency.
    /// There is deliberately no way to unset this.
    pub fn start_jamming(&self) {
        self.0.jamming.store(true, Ordering::SeqCst);
    }

    pub fn is_jamming(&self) -> bool {
        self.0.jamming.load(Ordering::SeqCst)
    }
}

/// Installs the process-wide Ctrl-C handler.
///
/// The handler only acknowledges and records the interrupt. Whatever is currently waiting (the sweep
/// dwell, the prompt or the continuous transmission) polls the flags and unwinds by itself.
pub fn install_interrupt_handler(flags: &SessionFlags) -> Result<(), ctrlc::Error> {
    let flags = flags.clone();
    ctrlc::set_handler(move || {
        println!("[x] SIGINT");
        flags.interrupt();
    })
}
