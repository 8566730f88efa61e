//! Discrete charge levels carried by wires.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wire's signal level. `OFF` is level 0; the ceiling is the palette's
/// `max_charge`, which is not known to the type itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Charge(u8);

impl Charge {
    pub const OFF: Charge = Charge(0);

    /// Checked constructor: `level` may not exceed `max`.
    pub fn new(level: u8, max: u8) -> SimResult<Self> {
        if level > max {
            return Err(SimError::ChargeOutOfRange { charge: level, max });
        }
        Ok(Self(level))
    }

    /// Construct without a ceiling check. Callers guarantee `level <= max`.
    pub(crate) const fn from_level(level: u8) -> Self {
        Self(level)
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// One level lower, stopping at `OFF`.
    pub const fn decayed(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_off() {
            f.write_str("off")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
