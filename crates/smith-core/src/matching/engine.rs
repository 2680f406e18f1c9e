//! Matching network engine
//!
//! Owns the trajectory of impedances produced while building a matching
//! network from the load outwards. The trajectory is append-only: entries are
//! never edited, and the only way to shorten it is a full reset.

use log::{debug, warn};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::component::Component;
use crate::error::{Result, SmithError};
use crate::math::transforms::impedance_to_gamma;

/// How `set_load` treats a negative load resistance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Accept R < 0 and mark the load active
    #[default]
    Permissive,
    /// Reject R < 0 with `InvalidLoad`
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Empty,
    Loaded,
}

/// Informational passivity of the load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passivity {
    Passive,
    Active,
}

impl Passivity {
    fn of(z: Complex64) -> Self {
        if z.re < 0.0 {
            Passivity::Active
        } else {
            Passivity::Passive
        }
    }
}

/// Owned copy of the trajectory for a rendering consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySnapshot {
    pub impedances: Vec<Complex64>,
    pub components: Vec<Component>,
    pub passivity: Option<Passivity>,
}

/// Builds a matching network one reactive element at a time
#[derive(Debug, Clone, Default)]
pub struct MatchingNetwork {
    policy: LoadPolicy,
    trajectory: Vec<Complex64>,
    components: Vec<Component>,
}

impl MatchingNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LoadPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn state(&self) -> EngineState {
        if self.trajectory.is_empty() {
            EngineState::Empty
        } else {
            EngineState::Loaded
        }
    }

    /// Set the load impedance, discarding any previous trajectory
    ///
    /// Under `LoadPolicy::Strict` a negative resistance is `InvalidLoad` and the
    /// engine is left as it was.
    pub fn set_load(&mut self, z: Complex64) -> Result<Passivity> {
        if !(z.re.is_finite() && z.im.is_finite()) {
            return Err(SmithError::InvalidInput(format!("load must be finite, got {}", z)));
        }
        let passivity = Passivity::of(z);
        if passivity == Passivity::Active {
            if self.policy == LoadPolicy::Strict {
                return Err(SmithError::InvalidLoad { resistance: z.re });
            }
            warn!("accepting active load with R = {} Ω", z.re);
        }

        self.trajectory.clear();
        self.components.clear();
        self.trajectory.push(z);
        debug!("load set to {}", z);
        Ok(passivity)
    }

    /// Insert a component and append the resulting impedance
    ///
    /// Any error leaves the trajectory exactly as it was.
    pub fn add_component(&mut self, component: Component) -> Result<Complex64> {
        let prev = *self.trajectory.last().ok_or(SmithError::NoLoad)?;
        let next = component.apply(prev)?;

        self.trajectory.push(next);
        self.components.push(component);
        debug!("{}: {} -> {}", component, prev, next);
        Ok(next)
    }

    /// Return to `Empty`
    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.components.clear();
        debug!("matching network reset");
    }

    pub fn load(&self) -> Option<Complex64> {
        self.trajectory.first().copied()
    }

    /// Impedance after the last inserted component
    pub fn current(&self) -> Option<Complex64> {
        self.trajectory.last().copied()
    }

    pub fn load_passivity(&self) -> Option<Passivity> {
        self.load().map(Passivity::of)
    }

    /// Impedances in insertion order, load first
    pub fn trajectory(&self) -> &[Complex64] {
        &self.trajectory
    }

    /// Components in insertion order; entry i produced trajectory entry i + 1
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// Every trajectory point mapped to Γ for reference impedance `z0`
    pub fn gamma_trajectory(&self, z0: f64) -> Result<Vec<Complex64>> {
        self.trajectory
            .iter()
            .map(|&z| impedance_to_gamma(z, z0))
            .collect()
    }

    pub fn snapshot(&self) -> TrajectorySnapshot {
        TrajectorySnapshot {
            impedances: self.trajectory.clone(),
            components: self.components.clone(),
            passivity: self.load_passivity(),
        }
    }
}
