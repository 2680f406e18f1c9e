//! Chart configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides:
//!
//! ```
//! use smith_core::chart::ChartConfig;
//! let cfg = ChartConfig::from_json(r#"{ "z0": 75.0, "reactances": [0.0, 1.0] }"#).unwrap();
//! assert_eq!(cfg.z0, 75.0);
//! assert_eq!(cfg.resistances.len(), 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ARC_SAMPLES, DEFAULT_REACTANCES, DEFAULT_RESISTANCES, DEFAULT_Z0};
use crate::error::{ensure_finite, Result, SmithError};
use crate::math::transforms::validate_z0;
use crate::matching::LoadPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Reference impedance in ohms
    pub z0: f64,
    /// Normalized resistances r ≥ 0 for the grid circles
    pub resistances: Vec<f64>,
    /// Normalized reactances for the grid arcs (mirrored automatically)
    pub reactances: Vec<f64>,
    /// Points per reactance arc when sampled into polylines
    pub arc_samples: usize,
    pub load_policy: LoadPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            z0: DEFAULT_Z0,
            resistances: DEFAULT_RESISTANCES.to_vec(),
            reactances: DEFAULT_REACTANCES.to_vec(),
            arc_samples: DEFAULT_ARC_SAMPLES,
            load_policy: LoadPolicy::default(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: ChartConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_z0(self.z0)?;
        for &r in &self.resistances {
            ensure_finite("r", r)?;
            if r < 0.0 {
                return Err(SmithError::InvalidInput(format!(
                    "normalized resistance must be non-negative, got {}",
                    r
                )));
            }
        }
        for &x in &self.reactances {
            ensure_finite("x", x)?;
        }
        if self.arc_samples < 2 {
            return Err(SmithError::InvalidInput(format!(
                "arc_samples must be at least 2, got {}",
                self.arc_samples
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_chart() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.z0, 50.0);
        assert_eq!(cfg.resistances, vec![0.0, 0.5, 1.0, 2.0, 5.0]);
        assert_eq!(cfg.reactances, vec![0.0, 0.5, 1.0, 2.0]);
        assert_eq!(cfg.arc_samples, 100);
        assert_eq!(cfg.load_policy, LoadPolicy::Permissive);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let cfg = ChartConfig::from_json(r#"{ "load_policy": "strict" }"#).unwrap();
        assert_eq!(cfg.load_policy, LoadPolicy::Strict);
        assert_eq!(cfg.z0, 50.0);
    }

    #[test]
    fn test_invalid_json_values() {
        assert!(matches!(
            ChartConfig::from_json(r#"{ "z0": -50.0 }"#),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(
            ChartConfig::from_json(r#"{ "resistances": [1.0, -0.5] }"#),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(
            ChartConfig::from_json(r#"{ "arc_samples": 1 }"#),
            Err(SmithError::InvalidInput(_))
        ));
        assert!(matches!(ChartConfig::from_json("{ z0 "), Err(SmithError::Config(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = ChartConfig {
            z0: 75.0,
            ..ChartConfig::default()
        };
        let back = ChartConfig::from_json(&cfg.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
