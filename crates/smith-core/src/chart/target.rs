//! Return-loss target
//!
//! Holds a |Γ| value and its dB equivalent in step with each other. Setting
//! one always re-derives the other; |Γ| is kept to two decimals and dB steps
//! to one decimal.

use serde::{Deserialize, Serialize};

use super::contours::Contour;
use crate::constants::{DB_STEP, GAMMA_STEP};
use crate::error::{ensure_finite, Result, SmithError};
use crate::math::conversions::{
    db_to_gamma_magnitude, gamma_magnitude_to_db, magnitude_2_vswr, round_to,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnLossTarget {
    magnitude: f64,
    db: f64,
}

impl Default for ReturnLossTarget {
    fn default() -> Self {
        Self {
            magnitude: 0.5,
            db: -6.0,
        }
    }
}

impl ReturnLossTarget {
    /// Target from |Γ| in [0, 1], rounded to two decimals
    pub fn from_magnitude(magnitude: f64) -> Result<Self> {
        ensure_finite("|Γ|", magnitude)?;
        if !(0.0..=1.0).contains(&magnitude) {
            return Err(SmithError::OutOfRange(format!(
                "|Γ| must lie in [0, 1], got {}",
                magnitude
            )));
        }
        let magnitude = round_to(magnitude, 2);
        Ok(Self {
            magnitude,
            db: gamma_magnitude_to_db(magnitude)?,
        })
    }

    /// Target from a dB value ≤ 0; |Γ| is derived and rounded to two decimals
    pub fn from_db(db: f64) -> Result<Self> {
        let magnitude = round_to(db_to_gamma_magnitude(db)?, 2);
        Ok(Self { magnitude, db })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// dB value; `f64::NEG_INFINITY` for a perfect match
    pub fn db(&self) -> f64 {
        self.db
    }

    pub fn return_loss_db(&self) -> f64 {
        -self.db
    }

    pub fn vswr(&self) -> f64 {
        magnitude_2_vswr(self.magnitude).unwrap_or(f64::INFINITY)
    }

    /// Move |Γ| by `steps` increments of 0.01, clamped to [0, 1]
    pub fn step_magnitude(&mut self, steps: i32) -> Result<()> {
        let next = (self.magnitude + GAMMA_STEP * f64::from(steps)).clamp(0.0, 1.0);
        *self = Self::from_magnitude(next)?;
        Ok(())
    }

    /// Move dB by `steps` increments of 0.1
    ///
    /// A step above 0 dB is `OutOfRange` and leaves the target unchanged.
    pub fn step_db(&mut self, steps: i32) -> Result<()> {
        let next = round_to(self.db + DB_STEP * f64::from(steps), 1);
        *self = Self::from_db(next)?;
        Ok(())
    }

    /// Constant-|Γ| circle for this target
    pub fn circle(&self) -> Contour {
        Contour::GammaCircle {
            magnitude: self.magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_half_magnitude() {
        let t = ReturnLossTarget::default();
        assert_eq!(t.magnitude(), 0.5);
        assert_eq!(t.db(), -6.0);
    }

    #[test]
    fn test_from_magnitude_rounds() {
        let t = ReturnLossTarget::from_magnitude(0.333).unwrap();
        assert_eq!(t.magnitude(), 0.33);
        assert_abs_diff_eq!(t.db(), 20.0 * 0.33_f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_db() {
        let t = ReturnLossTarget::from_db(-6.0).unwrap();
        assert_eq!(t.magnitude(), 0.5);
        assert_eq!(t.db(), -6.0);
        assert_eq!(t.return_loss_db(), 6.0);
        assert!(matches!(ReturnLossTarget::from_db(1.0), Err(SmithError::OutOfRange(_))));
    }

    #[test]
    fn test_magnitude_steps_clamp() {
        let mut t = ReturnLossTarget::from_magnitude(0.99).unwrap();
        t.step_magnitude(5).unwrap();
        assert_eq!(t.magnitude(), 1.0);
        assert_eq!(t.db(), 0.0);

        let mut t = ReturnLossTarget::from_magnitude(0.02).unwrap();
        t.step_magnitude(-5).unwrap();
        assert_eq!(t.magnitude(), 0.0);
        assert!(t.db().is_infinite());
    }

    #[test]
    fn test_db_step_above_zero_rejected() {
        let mut t = ReturnLossTarget::from_db(-0.1).unwrap();
        assert!(t.step_db(2).is_err());
        assert_eq!(t.db(), -0.1);

        t.step_db(-10).unwrap();
        assert_abs_diff_eq!(t.db(), -1.1, epsilon = 1e-12);
        assert_eq!(t.magnitude(), 0.88);
    }

    #[test]
    fn test_vswr_and_circle() {
        let t = ReturnLossTarget::from_magnitude(0.5).unwrap();
        assert_abs_diff_eq!(t.vswr(), 3.0, epsilon = 1e-12);
        assert_eq!(t.circle(), Contour::GammaCircle { magnitude: 0.5 });
        assert!(ReturnLossTarget::from_magnitude(1.0).unwrap().vswr().is_infinite());
    }
}
