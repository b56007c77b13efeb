use crate::frequency::Frequency;
use std::time::Duration;

// FM broadcast band in Europe.
pub const FM_START: Frequency = Frequency::from_centi_mhz(87_50);
pub const FM_END: Frequency = Frequency::from_centi_mhz(108_00);
/// Distance between two neighbouring sweep frequencies (0.2 MHz).
pub const FREQ_STEP: Frequency = Frequency::from_centi_mhz(20);

/// How long each sweep frequency is transmitted.
pub const SWEEP_DWELL: Duration = Duration::from_secs(1);
/// How often blocking waits look at the session flags.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Time a transmitter gets to exit after SIGINT before it is killed.
pub const STOP_GRACE: Duration = Duration::from_secs(2);

// Format the transmitter is always invoked with.
pub const SAMPLE_RATE: u32 = 44100;
pub const CHANNEL_MODE: &str = "stereo";
pub const CHANNELS: u16 = 2;

// Default locations, relative to the working directory.
pub const DEFAULT_TRANSMITTER: &str = "tools/pifm";
pub const DEFAULT_SWEEP_TONE: &str = "sounds/sine.wav";
pub const DEFAULT_FREQUENCY_LIST: &str = "common_frequencies.txt";

/// BCM number of the pin pifm drives.
pub const TRANSMIT_PIN: u8 = 4;
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";
