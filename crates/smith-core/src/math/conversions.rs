//! Reflection magnitude conversions
//!
//! Provides conversions between |Γ|, dB, return loss and VSWR.

use num_complex::Complex64;

use crate::error::{ensure_finite, Result, SmithError};

/// Convert |Γ| to dB (20*log10(|Γ|))
///
/// A zero magnitude maps to `f64::NEG_INFINITY`, a perfect match. Negative
/// magnitudes are rejected.
pub fn gamma_magnitude_to_db(mag: f64) -> Result<f64> {
    ensure_finite("|Γ|", mag)?;
    if mag < 0.0 {
        return Err(SmithError::InvalidInput(format!(
            "|Γ| must be non-negative, got {}",
            mag
        )));
    }
    if mag == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    Ok(20.0 * mag.log10())
}

/// Convert dB to |Γ| (10^(dB/20))
///
/// A passive reflection cannot exceed unity magnitude, so dB > 0 is
/// `OutOfRange`. `f64::NEG_INFINITY` maps back to 0.
pub fn db_to_gamma_magnitude(db: f64) -> Result<f64> {
    if db.is_nan() || db == f64::INFINITY {
        return Err(SmithError::InvalidInput(format!("dB must be a number, got {}", db)));
    }
    if db > 0.0 {
        return Err(SmithError::OutOfRange(format!(
            "reflection of {} dB exceeds unity magnitude",
            db
        )));
    }
    Ok(10.0_f64.powf(db / 20.0))
}

/// Convert a complex reflection coefficient to dB
pub fn gamma_2_db(gamma: Complex64) -> Result<f64> {
    gamma_magnitude_to_db(gamma.norm())
}

/// Return loss in dB (positive for a passive load)
pub fn return_loss_db(mag: f64) -> Result<f64> {
    gamma_magnitude_to_db(mag).map(|db| -db)
}

/// Convert |Γ| to VSWR, (1 + |Γ|) / (1 - |Γ|)
///
/// |Γ| = 1 gives `f64::INFINITY` (total reflection).
pub fn magnitude_2_vswr(mag: f64) -> Result<f64> {
    ensure_finite("|Γ|", mag)?;
    if !(0.0..=1.0).contains(&mag) {
        return Err(SmithError::OutOfRange(format!(
            "|Γ| must lie in [0, 1] for VSWR, got {}",
            mag
        )));
    }
    if mag == 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok((1.0 + mag) / (1.0 - mag))
}

/// Convert VSWR to |Γ|, (VSWR - 1) / (VSWR + 1)
pub fn vswr_2_magnitude(vswr: f64) -> Result<f64> {
    if vswr.is_nan() || vswr < 1.0 {
        return Err(SmithError::OutOfRange(format!("VSWR must be >= 1, got {}", vswr)));
    }
    if vswr.is_infinite() {
        return Ok(1.0);
    }
    Ok((vswr - 1.0) / (vswr + 1.0))
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10.0_f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_half_magnitude_is_minus_six_db() {
        assert_abs_diff_eq!(gamma_magnitude_to_db(0.5).unwrap(), -6.0206, epsilon = 1e-4);
    }

    #[test]
    fn test_minus_six_db_magnitude() {
        assert_abs_diff_eq!(db_to_gamma_magnitude(-6.0).unwrap(), 0.501187, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_magnitude_is_negative_infinity() {
        let db = gamma_magnitude_to_db(0.0).unwrap();
        assert!(db.is_infinite() && db.is_sign_negative());
        assert_eq!(db_to_gamma_magnitude(f64::NEG_INFINITY).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        assert!(matches!(gamma_magnitude_to_db(-0.1), Err(SmithError::InvalidInput(_))));
    }

    #[test]
    fn test_positive_db_rejected() {
        assert!(matches!(db_to_gamma_magnitude(0.1), Err(SmithError::OutOfRange(_))));
        assert_eq!(db_to_gamma_magnitude(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_gamma_2_db() {
        // |0.3 + 0.4j| = 0.5
        let db = gamma_2_db(Complex64::new(0.3, 0.4)).unwrap();
        assert_relative_eq!(db, 20.0 * 0.5_f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_return_loss_is_positive() {
        assert_relative_eq!(return_loss_db(0.1).unwrap(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vswr() {
        assert_relative_eq!(magnitude_2_vswr(0.0).unwrap(), 1.0);
        assert_relative_eq!(magnitude_2_vswr(0.5).unwrap(), 3.0, epsilon = 1e-12);
        assert!(magnitude_2_vswr(1.0).unwrap().is_infinite());
        assert!(matches!(magnitude_2_vswr(1.2), Err(SmithError::OutOfRange(_))));
        assert_relative_eq!(vswr_2_magnitude(3.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(vswr_2_magnitude(f64::INFINITY).unwrap(), 1.0);
        assert!(vswr_2_magnitude(0.5).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.501187, 2), 0.5);
        assert_eq!(round_to(-6.0206, 1), -6.0);
    }
}
