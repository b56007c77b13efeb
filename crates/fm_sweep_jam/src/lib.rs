/// Command line arguments.
pub mod args;

/// Top level workflow shared by the binary.
pub mod binary_logic;

/// Design constants of the band, the sweep and the transmitter invocation.
pub mod constants;

/// Simple helpers for inspecting the input files.
pub mod file_io;

/// Two-decimal MHz frequencies.
pub mod frequency;

/// The transmit pin and putting it back into a safe state.
pub mod pin;

/// Asking the operator which frequency to jam.
pub mod prompt;

/// Flags shared with the interrupt handler.
pub mod session;

/// Stepping through the band.
pub mod sweep;

/// Running the external transmitter.
pub mod transmit;
