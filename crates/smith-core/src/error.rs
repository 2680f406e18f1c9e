//! Error type shared by every smith-core operation
//!
//! Every failure is local to the call that produced it: no variant is fatal,
//! and a failed mutation leaves the matching trajectory unchanged.

use thiserror::Error;

/// Errors reported by transforms, contour generation and the matching engine
#[derive(Error, Debug)]
pub enum SmithError {
    /// Z0 ≤ 0, frequency ≤ 0, negative magnitude, r < 0 or a non-finite value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// |Γ| > 1 where a chart point is required, or dB > 0 on conversion
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The bilinear transform was evaluated exactly at its pole
    #[error("singular mapping: {0}")]
    SingularMapping(&'static str),

    #[error("no load impedance has been set")]
    NoLoad,

    #[error("load rejected: R = {resistance} Ω is negative")]
    InvalidLoad { resistance: f64 },

    /// A shunt element was placed across a zero impedance
    #[error("shunt element across a short: previous impedance is zero")]
    OpenCircuit,

    /// The shunt element exactly cancelled the previous admittance
    #[error("shunt element cancels the load admittance, impedance diverges")]
    ShortCircuit,

    #[error("degenerate component: {0}")]
    DegenerateComponent(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmithError>;

/// Reject NaN and infinities with an `InvalidInput` naming the quantity.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SmithError::InvalidInput(format!("{} must be finite, got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("z0", 50.0).is_ok());
        assert!(matches!(ensure_finite("z0", f64::NAN), Err(SmithError::InvalidInput(_))));
        assert!(matches!(
            ensure_finite("frequency", f64::INFINITY),
            Err(SmithError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_messages() {
        let err = SmithError::InvalidLoad { resistance: -5.0 };
        assert_eq!(err.to_string(), "load rejected: R = -5 Ω is negative");
        assert_eq!(SmithError::NoLoad.to_string(), "no load impedance has been set");
    }
}
