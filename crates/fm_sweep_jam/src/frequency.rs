use std::{fmt, num::ParseFloatError, str::FromStr};
use thiserror::Error;

/// A radio frequency with two-decimal MHz precision.
///
/// Stored as an integer number of hundredths of a MHz (10 kHz units) so stepping through the band
/// is exact and formatting never drifts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

#[derive(Error, Debug, PartialEq)]
pub enum FrequencyError {
    #[error("not a number: {0}")]
    Invalid(#[from] ParseFloatError),
    #[error("{0} is not a representable frequency")]
    OutOfRange(f64),
}

impl Frequency {
    pub const fn from_centi_mhz(centi_mhz: u32) -> Self {
        Frequency(centi_mhz)
    }

    /// Rounds `mhz` to the nearest hundredth.
    pub fn from_mhz(mhz: f64) -> Result<Self, FrequencyError> {
        let centi = (mhz * 100.0).round();
        if !centi.is_finite() || centi < 0.0 || centi > f64::from(u32::MAX) {
            return Err(FrequencyError::OutOfRange(mhz));
        }
        Ok(Frequency(centi as u32))
    }

    pub const fn centi_mhz(self) -> u32 {
        self.0
    }

    pub fn mhz(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub const fn saturating_add(self, rhs: Frequency) -> Self {
        Frequency(self.0.saturating_add(rhs.0))
    }

    pub const fn saturating_sub(self, rhs: Frequency) -> Self {
        Frequency(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Frequency {
    type Err = FrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::from_mhz(s.trim().parse()?)
    }
}
