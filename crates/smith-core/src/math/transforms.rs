//! Reflection coefficient / impedance transforms
//!
//! The bilinear map between Γ and Z for a real reference impedance Z0:
//!
//! Z = Z0 * (1 + Γ) / (1 - Γ)
//! Γ = (Z - Z0) / (Z + Z0)
//!
//! Both directions report their pole as `SingularMapping` instead of
//! returning an infinite or NaN impedance.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::constants::BOUNDARY_TOL;
use crate::error::{ensure_finite, Result, SmithError};

/// Check a reference impedance, returning it unchanged when valid
pub fn validate_z0(z0: f64) -> Result<f64> {
    ensure_finite("Z0", z0)?;
    if z0 <= 0.0 {
        return Err(SmithError::InvalidInput(format!(
            "reference impedance must be positive, got {} Ω",
            z0
        )));
    }
    Ok(z0)
}

fn ensure_finite_complex(name: &str, z: Complex64) -> Result<()> {
    if z.re.is_finite() && z.im.is_finite() {
        Ok(())
    } else {
        Err(SmithError::InvalidInput(format!("{} must be finite, got {}", name, z)))
    }
}

/// num / den with both scaled by den's larger component, so `norm_sqr`
/// cannot overflow. `den` must be non-zero.
fn scaled_div(num: Complex64, den: Complex64) -> Complex64 {
    let s = den.re.abs().max(den.im.abs());
    let d = den / s;
    (num / s) * d.conj() / d.norm_sqr()
}

/// Convert a reflection coefficient to impedance
///
/// Fails with `SingularMapping` when Γ = 1 exactly (open circuit) or when the
/// result overflows.
pub fn gamma_to_impedance(gamma: Complex64, z0: f64) -> Result<Complex64> {
    let z0 = validate_z0(z0)?;
    let zn = gamma_to_normalized(gamma)?;
    let z = zn.scale(z0);
    if !(z.re.is_finite() && z.im.is_finite()) {
        return Err(SmithError::SingularMapping("impedance overflows near Γ = 1"));
    }
    Ok(z)
}

/// Convert an impedance to a reflection coefficient
///
/// Fails with `SingularMapping` when Z = -Z0 exactly. Passive loads never hit
/// the pole.
pub fn impedance_to_gamma(z: Complex64, z0: f64) -> Result<Complex64> {
    let z0 = validate_z0(z0)?;
    ensure_finite_complex("Z", z)?;
    let den = z + z0;
    if den.re == 0.0 && den.im == 0.0 {
        return Err(SmithError::SingularMapping("Z = -Z0 is the pole of the Γ mapping"));
    }
    let num = z - z0;
    if !(num.re.is_finite() && den.re.is_finite() && den.im.is_finite()) {
        return Err(SmithError::OutOfRange(format!("Z = {} overflows the Γ mapping", z)));
    }
    Ok(scaled_div(num, den))
}

/// Normalized impedance z = (1 + Γ) / (1 - Γ)
pub fn gamma_to_normalized(gamma: Complex64) -> Result<Complex64> {
    ensure_finite_complex("Γ", gamma)?;
    let one = Complex64::new(1.0, 0.0);
    let den = one - gamma;
    if den.re == 0.0 && den.im == 0.0 {
        return Err(SmithError::SingularMapping("Γ = 1 is an open circuit"));
    }
    let zn = scaled_div(one + gamma, den);
    if !(zn.re.is_finite() && zn.im.is_finite()) {
        return Err(SmithError::SingularMapping("impedance overflows near Γ = 1"));
    }
    Ok(zn)
}

/// Reflection coefficient of a normalized impedance, Γ = (z - 1) / (z + 1)
pub fn normalized_to_gamma(zn: Complex64) -> Result<Complex64> {
    impedance_to_gamma(zn, 1.0)
}

/// Where a reflection coefficient falls relative to the unit disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRegion {
    Inside,
    Boundary,
    Outside,
}

impl ChartRegion {
    /// True for points drawn on the chart (inside or on the rim)
    pub fn on_chart(&self) -> bool {
        !matches!(self, ChartRegion::Outside)
    }
}

/// Classify Γ against the unit circle
pub fn classify_gamma(gamma: Complex64) -> ChartRegion {
    let mag = gamma.norm();
    if (mag - 1.0).abs() <= BOUNDARY_TOL {
        ChartRegion::Boundary
    } else if mag < 1.0 {
        ChartRegion::Inside
    } else {
        ChartRegion::Outside
    }
}

/// Impedance under a point picked on the chart
///
/// Points outside the unit disk are `OutOfRange`; the rim is accepted.
pub fn impedance_at_chart_point(gamma: Complex64, z0: f64) -> Result<Complex64> {
    if !classify_gamma(gamma).on_chart() {
        return Err(SmithError::OutOfRange(format!(
            "|Γ| = {:.4} lies outside the chart",
            gamma.norm()
        )));
    }
    gamma_to_impedance(gamma, z0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn test_matched_load() {
        // Γ = 0 <-> Z = Z0 exactly
        let z = gamma_to_impedance(Complex64::new(0.0, 0.0), 50.0).unwrap();
        assert_eq!(z, Complex64::new(50.0, 0.0));
        let g = impedance_to_gamma(Complex64::new(75.0, 0.0), 75.0).unwrap();
        assert_eq!(g, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_short_circuit() {
        let z = gamma_to_impedance(Complex64::new(-1.0, 0.0), 50.0).unwrap();
        assert_relative_eq!(z.norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_open_circuit_is_singular() {
        let r = gamma_to_impedance(Complex64::new(1.0, 0.0), 50.0);
        assert!(matches!(r, Err(SmithError::SingularMapping(_))));
    }

    #[test]
    fn test_negative_z0_pole() {
        let r = impedance_to_gamma(Complex64::new(-50.0, 0.0), 50.0);
        assert!(matches!(r, Err(SmithError::SingularMapping(_))));
    }

    #[test]
    fn test_invalid_z0() {
        assert!(matches!(
            gamma_to_impedance(Complex64::new(0.2, 0.0), 0.0),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(
            impedance_to_gamma(Complex64::new(10.0, 0.0), -50.0),
            Err(SmithError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unit_circle_is_reactive() {
        // Γ = e^{jθ} maps to Z = j Z0 cot(θ/2)
        let theta = PI / 3.0;
        let z = gamma_to_impedance(Complex64::from_polar(1.0, theta), 50.0).unwrap();
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 50.0 / (theta / 2.0).tan(), epsilon = 1e-10);
    }

    #[test]
    fn test_normalized_round_trip() {
        let zn = Complex64::new(2.0, -1.5);
        let g = normalized_to_gamma(zn).unwrap();
        let back = gamma_to_normalized(g).unwrap();
        assert_relative_eq!(back.re, zn.re, epsilon = 1e-12);
        assert_relative_eq!(back.im, zn.im, epsilon = 1e-12);
    }

    #[test]
    fn test_classify_gamma() {
        assert_eq!(classify_gamma(Complex64::new(0.3, 0.4)), ChartRegion::Inside);
        assert_eq!(classify_gamma(Complex64::new(0.6, 0.8)), ChartRegion::Boundary);
        assert_eq!(classify_gamma(Complex64::new(1.0, 1.0)), ChartRegion::Outside);
    }

    #[test]
    fn test_chart_point_outside_is_out_of_range() {
        let r = impedance_at_chart_point(Complex64::new(0.9, 0.9), 50.0);
        assert!(matches!(r, Err(SmithError::OutOfRange(_))));
        let z = impedance_at_chart_point(Complex64::new(0.2, 0.0), 50.0).unwrap();
        assert_relative_eq!(z.re, 75.0, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_impedance_stays_finite() {
        // |Z + Z0|² overflows f64 here
        let g = impedance_to_gamma(Complex64::new(50.0, 1.5e308), 50.0).unwrap();
        assert!(g.re.is_finite() && g.im.is_finite());
        assert_relative_eq!(g.norm(), 1.0, epsilon = 1e-12);

        let g = impedance_to_gamma(Complex64::new(f64::MAX, f64::MAX), 50.0).unwrap();
        assert_relative_eq!(g.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_rejected() {
        let r = gamma_to_impedance(Complex64::new(f64::NAN, 0.0), 50.0);
        assert!(matches!(r, Err(SmithError::InvalidInput(_))));
    }
}
