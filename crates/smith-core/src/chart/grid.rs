//! Smith chart with a cached contour grid
//!
//! The grid only depends on the configured r/x values and Z0, so it is built
//! once and rebuilt whenever one of those changes.

use log::debug;
use num_complex::Complex64;

use super::config::ChartConfig;
use super::contours::{generate_contours, ContourSet, Point};
use super::readout::ImpedanceReadout;
use crate::error::Result;
use crate::matching::MatchingNetwork;

#[derive(Debug, Clone)]
pub struct SmithChart {
    config: ChartConfig,
    grid: ContourSet,
}

impl SmithChart {
    /// Build a chart, validating the config and generating its grid
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let grid = generate_contours(config.z0, &config.resistances, &config.reactances)?;
        debug!("built Smith chart grid: {} contours at Z0 = {} Ω", grid.len(), config.z0);
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Reference impedance in ohms
    pub fn z0(&self) -> f64 {
        self.config.z0
    }

    pub fn contours(&self) -> &ContourSet {
        &self.grid
    }

    /// Change Z0 and rebuild the grid; on error the chart is unchanged
    pub fn set_reference_impedance(&mut self, z0: f64) -> Result<()> {
        let config = ChartConfig {
            z0,
            ..self.config.clone()
        };
        *self = Self::new(config)?;
        Ok(())
    }

    /// Replace the grid values and rebuild; on error the chart is unchanged
    pub fn set_grid(&mut self, resistances: &[f64], reactances: &[f64]) -> Result<()> {
        let config = ChartConfig {
            resistances: resistances.to_vec(),
            reactances: reactances.to_vec(),
            ..self.config.clone()
        };
        *self = Self::new(config)?;
        Ok(())
    }

    /// Reactance arcs sampled at the configured density
    pub fn arc_polylines(&self) -> Vec<(f64, Vec<Point>)> {
        self.grid.arc_polylines(self.config.arc_samples)
    }

    /// Impedance under a chart point at this chart's Z0
    pub fn readout(&self, gamma: Complex64) -> Result<ImpedanceReadout> {
        ImpedanceReadout::at(gamma, self.config.z0)
    }

    /// A fresh matching engine using this chart's load policy
    pub fn matching_network(&self) -> MatchingNetwork {
        MatchingNetwork::with_policy(self.config.load_policy)
    }
}
