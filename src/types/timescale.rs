use std::fmt;

use crate::error::{Error, Result};

/// Conventional label for the capture's time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Femtoseconds.
    Fs,
    /// Picoseconds.
    Ps,
    /// Nanoseconds.
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
}

impl TimeUnit {
    /// Returns the label used in human-facing output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Ps => "ps",
            Self::Ns => "ns",
            Self::Us => "us",
            Self::Ms => "ms",
            Self::S => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded timescale of a capture.
///
/// The header stores a single base-10 exponent `m`: one integer time step in
/// the capture lasts `10^m` seconds. That exponent is split into a unit label
/// (`fs` through `s`), the unit's size in seconds, and the tick length
/// expressed in that unit, so callers can report times in the capture's own
/// unit while [`Timescale::seconds_per_tick`] stays exact for time math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timescale {
    /// Unit label derived from the magnitude.
    pub unit: TimeUnit,
    /// Seconds per unit (e.g. `1e-12` for [`TimeUnit::Ps`]).
    pub unit_scale: f64,
    /// Length of one tick expressed in `unit` (always in `[1, 1000)`).
    pub factor: f64,
}

impl Default for Timescale {
    fn default() -> Self {
        Self {
            unit: TimeUnit::S,
            unit_scale: 1.0,
            factor: 1.0,
        }
    }
}

impl Timescale {
    /// Decodes a header timescale magnitude.
    ///
    /// Magnitudes below −15 have no conventional unit and are fatal.
    pub fn from_magnitude(magnitude: i8) -> Result<Self> {
        let m = i32::from(magnitude);
        let (unit, unit_scale, factor) = if m >= 0 {
            (TimeUnit::S, 1.0, pow10(m))
        } else if m >= -3 {
            (TimeUnit::Ms, 1e-3, pow10(m + 3))
        } else if m >= -6 {
            (TimeUnit::Us, 1e-6, pow10(m + 6))
        } else if m >= -9 {
            (TimeUnit::Ns, 1e-9, pow10(m + 9))
        } else if m >= -12 {
            (TimeUnit::Ps, 1e-12, pow10(m + 12))
        } else if m >= -15 {
            (TimeUnit::Fs, 1e-15, pow10(m + 15))
        } else {
            return Err(Error::Timescale { magnitude });
        };
        Ok(Self {
            unit,
            unit_scale,
            factor,
        })
    }

    /// Absolute duration of one integer time step, in seconds.
    pub fn seconds_per_tick(&self) -> f64 {
        self.factor * self.unit_scale
    }
}

fn pow10(exp: i32) -> f64 {
    10f64.powi(exp)
}
