use crate::constants::{SYSFS_GPIO_ROOT, TRANSMIT_PIN};
use log::{debug, trace};
use std::{fs, io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Writing {value:?} to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        value: String,
        #[source]
        source: io::Error,
    },
}

/// Something that can put the transmit pin back into a safe state.
pub trait PinReset {
    fn reset(&self) -> Result<(), PinError>;
}

/// Reset the pin, logging instead of failing.
pub fn reset_best_effort(pin: &impl PinReset) {
    match pin.reset() {
        Ok(()) => trace!("Transmit pin reset."),
        Err(e) => debug!("Ignoring pin reset failure: {e}"),
    }
}

/// A GPIO pin driven through the Linux sysfs interface.
///
/// Resetting exports the pin, makes it an input and releases it again. When the sysfs root does not
/// exist (no GPIO hardware) resetting does nothing.
#[derive(Clone, Debug)]
pub struct SysfsPin {
    root: PathBuf,
    pin: u8,
}

impl Default for SysfsPin {
    fn default() -> Self {
        SysfsPin::new(SYSFS_GPIO_ROOT, TRANSMIT_PIN)
    }
}

impl SysfsPin {
    pub fn new(root: impl Into<PathBuf>, pin: u8) -> Self {
        SysfsPin {
            root: root.into(),
            pin,
        }
    }

    fn write(&self, path: PathBuf, value: &str) -> Result<(), PinError> {
        fs::write(&path, value).map_err(|source| PinError::Write {
            path,
            value: value.to_owned(),
            source,
        })
    }
}

impl PinReset for SysfsPin {
    fn reset(&self) -> Result<(), PinError> {
        if !self.root.is_dir() {
            trace!("No GPIO interface at {}", self.root.display());
            return Ok(());
        }
        let number = self.pin.to_string();
        let pin_dir = self.root.join(format!("gpio{number}"));
        if !pin_dir.exists() {
            self.write(self.root.join("export"), &number)?;
        }
        self.write(pin_dir.join("direction"), "in")?;
        self.write(self.root.join("unexport"), &number)
    }
}
