//! Lumped reactive components
//!
//! A component is a series or shunt inductor/capacitor evaluated at one
//! frequency. Values are in base SI units (henries, farads, hertz).

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result, SmithError};
use crate::frequency::angular_frequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Series,
    Shunt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Inductor,
    Capacitor,
}

/// A reactive element inserted into the matching network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub placement: Placement,
    pub element: Element,
    /// Inductance in H or capacitance in F
    pub value: f64,
    /// Evaluation frequency in Hz
    pub frequency: f64,
}

impl Component {
    pub fn new(placement: Placement, element: Element, value: f64, frequency: f64) -> Self {
        Self {
            placement,
            element,
            value,
            frequency,
        }
    }

    pub fn series_inductor(henries: f64, frequency: f64) -> Self {
        Self::new(Placement::Series, Element::Inductor, henries, frequency)
    }

    pub fn series_capacitor(farads: f64, frequency: f64) -> Self {
        Self::new(Placement::Series, Element::Capacitor, farads, frequency)
    }

    pub fn shunt_inductor(henries: f64, frequency: f64) -> Self {
        Self::new(Placement::Shunt, Element::Inductor, henries, frequency)
    }

    pub fn shunt_capacitor(farads: f64, frequency: f64) -> Self {
        Self::new(Placement::Shunt, Element::Capacitor, farads, frequency)
    }

    /// Component realizing a given reactance at `frequency`
    ///
    /// X > 0 gives an inductor L = X/ω, X < 0 a capacitor C = -1/(ωX), and
    /// X = 0 a zero-valued inductor.
    pub fn from_reactance(placement: Placement, reactance: f64, frequency: f64) -> Result<Self> {
        ensure_finite("reactance", reactance)?;
        let omega = angular_frequency(frequency)?;
        if reactance >= 0.0 {
            Ok(Self::new(placement, Element::Inductor, reactance / omega, frequency))
        } else {
            Ok(Self::new(placement, Element::Capacitor, -1.0 / (omega * reactance), frequency))
        }
    }

    /// Reactance in ohms at the component's frequency
    ///
    /// Inductor: X = 2πfL. Capacitor: X = -1/(2πfC), `DegenerateComponent`
    /// when f·C = 0.
    pub fn reactance(&self) -> Result<f64> {
        ensure_finite("component value", self.value)?;
        if self.value < 0.0 {
            return Err(SmithError::InvalidInput(format!(
                "component value must be non-negative, got {}",
                self.value
            )));
        }
        let omega = angular_frequency(self.frequency)?;

        match self.element {
            Element::Inductor => {
                let x = omega * self.value;
                if !x.is_finite() {
                    return Err(SmithError::DegenerateComponent(format!(
                        "inductor reactance overflows for L = {} H",
                        self.value
                    )));
                }
                Ok(x)
            }
            Element::Capacitor => {
                let wc = omega * self.value;
                if wc == 0.0 {
                    return Err(SmithError::DegenerateComponent(
                        "capacitor with f·C = 0 has infinite reactance".to_string(),
                    ));
                }
                let x = -1.0 / wc;
                if !x.is_finite() {
                    return Err(SmithError::DegenerateComponent(format!(
                        "capacitor reactance overflows for C = {} F",
                        self.value
                    )));
                }
                Ok(x)
            }
        }
    }

    /// Impedance seen after inserting this component in front of `z`
    pub fn apply(&self, z: Complex64) -> Result<Complex64> {
        let x = self.reactance()?;
        match self.placement {
            Placement::Series => series(z, x),
            Placement::Shunt => shunt(z, x),
        }
    }
}

fn is_zero(z: Complex64) -> bool {
    z.re == 0.0 && z.im == 0.0
}

fn is_finite(z: Complex64) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

/// 1/z scaled by z's larger component so `norm_sqr` cannot overflow or
/// underflow. `z` must be non-zero.
fn reciprocal(z: Complex64) -> Complex64 {
    let s = z.re.abs().max(z.im.abs());
    let d = z / s;
    d.conj() / d.norm_sqr() / s
}

fn series(z: Complex64, x: f64) -> Result<Complex64> {
    let z_new = z + Complex64::new(0.0, x);
    if !is_finite(z_new) {
        return Err(SmithError::OutOfRange(format!(
            "series reactance {} Ω overflows the impedance {}",
            x, z
        )));
    }
    Ok(z_new)
}

fn shunt(z: Complex64, x: f64) -> Result<Complex64> {
    if is_zero(z) {
        return Err(SmithError::OpenCircuit);
    }
    // zero reactance is an open branch
    if x == 0.0 {
        return Ok(z);
    }
    let y_prev = reciprocal(z);
    if !is_finite(y_prev) {
        return Err(SmithError::OpenCircuit);
    }

    let y_new = y_prev + Complex64::new(0.0, -1.0 / x);
    if is_zero(y_new) || !is_finite(y_new) {
        return Err(SmithError::ShortCircuit);
    }
    let z_new = reciprocal(y_new);
    if !is_finite(z_new) {
        return Err(SmithError::ShortCircuit);
    }
    Ok(z_new)
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = match self.placement {
            Placement::Series => "series",
            Placement::Shunt => "shunt",
        };
        let (element, unit) = match self.element {
            Element::Inductor => ("L", "H"),
            Element::Capacitor => ("C", "F"),
        };
        write!(
            f,
            "{} {} = {:e} {} @ {:e} Hz",
            placement, element, self.value, unit, self.frequency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_inductor_reactance() {
        let c = Component::series_inductor(1e-9, 1e9);
        assert_relative_eq!(c.reactance().unwrap(), 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_capacitor_reactance() {
        let c = Component::shunt_capacitor(1e-12, 1e9);
        assert_relative_eq!(c.reactance().unwrap(), -1.0 / (2.0 * PI * 1e-3), epsilon = 1e-9);
    }

    #[test]
    fn test_zero_capacitance_is_degenerate() {
        let c = Component::series_capacitor(0.0, 1e9);
        assert!(matches!(c.reactance(), Err(SmithError::DegenerateComponent(_))));
    }

    #[test]
    fn test_invalid_component_inputs() {
        assert!(matches!(
            Component::series_inductor(-1e-9, 1e9).reactance(),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(
            Component::series_inductor(1e-9, 0.0).reactance(),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(
            Component::series_capacitor(1e-12, -5.0).reactance(),
            Err(SmithError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_reactance() {
        let l = Component::from_reactance(Placement::Series, 25.0, 1e8).unwrap();
        assert_eq!(l.element, Element::Inductor);
        assert_relative_eq!(l.reactance().unwrap(), 25.0, epsilon = 1e-12);

        let c = Component::from_reactance(Placement::Shunt, -100.0, 1e8).unwrap();
        assert_eq!(c.element, Element::Capacitor);
        assert_relative_eq!(c.reactance().unwrap(), -100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shunt_zero_reactance_is_open() {
        let c = Component::shunt_inductor(0.0, 1e9);
        let z = Complex64::new(30.0, 10.0);
        let out = c.apply(z).unwrap();
        assert_relative_eq!(out.re, z.re, epsilon = 1e-12);
        assert_relative_eq!(out.im, z.im, epsilon = 1e-12);
    }

    #[test]
    fn test_shunt_across_short() {
        let c = Component::shunt_capacitor(1e-12, 1e9);
        assert!(matches!(c.apply(Complex64::new(0.0, 0.0)), Err(SmithError::OpenCircuit)));
    }

    #[test]
    fn test_shunt_resonance_is_short_circuit() {
        // j0.5 in parallel with -j0.5 cancels exactly
        let r = shunt(Complex64::new(0.0, 0.5), -0.5);
        assert!(matches!(r, Err(SmithError::ShortCircuit)));
    }

    #[test]
    fn test_inductor_overflow_is_degenerate() {
        let c = Component::series_inductor(1e300, 1e10);
        assert!(matches!(c.reactance(), Err(SmithError::DegenerateComponent(_))));
        assert!(matches!(
            c.apply(Complex64::new(50.0, 0.0)),
            Err(SmithError::DegenerateComponent(_))
        ));
    }

    #[test]
    fn test_series_overflow_rejected() {
        // X is finite on its own but pushes the sum past f64::MAX
        let c = Component::from_reactance(Placement::Series, 1e308, 1e9).unwrap();
        let r = c.apply(Complex64::new(50.0, 1.5e308));
        assert!(matches!(r, Err(SmithError::OutOfRange(_))));
    }

    #[test]
    fn test_shunt_tiny_load() {
        // |z|² underflows to zero, the scaled reciprocal does not
        let z = Complex64::new(1e-170, 0.0);
        let out = Component::shunt_inductor(1e-9, 1e9).apply(z).unwrap();
        assert_relative_eq!(out.re, 1e-170, max_relative = 1e-9);
        assert!(out.im.abs() < 1e-300);
    }

    #[test]
    fn test_shunt_huge_load_open_branch() {
        let z = Complex64::new(1e200, -3e199);
        assert_eq!(Component::shunt_inductor(0.0, 1e9).apply(z).unwrap(), z);

        let out = Component::shunt_capacitor(1e-12, 1e9).apply(z).unwrap();
        assert!(is_finite(out));
        assert!(!is_zero(out));
    }

    #[test]
    fn test_display() {
        let c = Component::series_inductor(1e-9, 1e9);
        assert_eq!(c.to_string(), "series L = 1e-9 H @ 1e9 Hz");
    }
}
