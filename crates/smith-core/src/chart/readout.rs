//! Impedance readout for a picked chart point

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::constants::READOUT_REACTANCE_THRESHOLD;
use crate::error::Result;
use crate::math::transforms::{classify_gamma, impedance_at_chart_point, ChartRegion};

/// Γ, region and impedance under a chart position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceReadout {
    pub gamma: Complex64,
    pub region: ChartRegion,
    pub impedance: Complex64,
}

impl ImpedanceReadout {
    /// Read the impedance at Γ; points outside the disk are `OutOfRange`
    pub fn at(gamma: Complex64, z0: f64) -> Result<Self> {
        let impedance = impedance_at_chart_point(gamma, z0)?;
        Ok(Self {
            gamma,
            region: classify_gamma(gamma),
            impedance,
        })
    }
}

/// `Z = 50.0 Ω`, `Z = 50.0 + j25.0 Ω` or `Z = 50.0 - j25.0 Ω`
impl fmt::Display for ImpedanceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.impedance.re;
        let x = self.impedance.im;
        if x.abs() < READOUT_REACTANCE_THRESHOLD {
            write!(f, "Z = {:.1} Ω", r)
        } else {
            let sign = if x >= 0.0 { '+' } else { '-' };
            write!(f, "Z = {:.1} {} j{:.1} Ω", r, sign, x.abs())
        }
    }
}
