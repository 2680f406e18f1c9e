//! Frequency units and operating-frequency validation
//!
//! Component reactances are always evaluated at a frequency in hertz; these
//! helpers convert user-facing units into that base unit.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_finite, Result, SmithError};

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    #[default]
    Hz,
    KHz,
    MHz,
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Convert a value expressed in this unit to Hz
    pub fn to_hz(&self, value: f64) -> f64 {
        value * self.multiplier()
    }

    /// Convert a value in Hz to this unit
    pub fn from_hz(&self, hz: f64) -> f64 {
        hz / self.multiplier()
    }
}

impl FromStr for FrequencyUnit {
    type Err = SmithError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Ok(FrequencyUnit::Hz),
            "khz" => Ok(FrequencyUnit::KHz),
            "mhz" => Ok(FrequencyUnit::MHz),
            "ghz" => Ok(FrequencyUnit::GHz),
            "thz" => Ok(FrequencyUnit::THz),
            other => Err(SmithError::InvalidInput(format!(
                "unknown frequency unit '{}', expected Hz, kHz, MHz, GHz or THz",
                other
            ))),
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::THz => "THz",
        };
        f.write_str(s)
    }
}

/// Angular frequency ω = 2πf for a frequency in Hz
///
/// Fails with `InvalidInput` unless `f_hz` is finite and strictly positive.
pub fn angular_frequency(f_hz: f64) -> Result<f64> {
    ensure_finite("frequency", f_hz)?;
    if f_hz <= 0.0 {
        return Err(SmithError::InvalidInput(format!(
            "frequency must be positive, got {} Hz",
            f_hz
        )));
    }
    Ok(2.0 * PI * f_hz)
}
