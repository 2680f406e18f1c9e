//! Chart module - Smith chart grid geometry and readouts
//!
//! Provides the constant-r / constant-x contours, the cached chart grid,
//! the return-loss target and chart-point readouts.

mod config;
mod contours;
mod grid;
mod readout;
mod target;

pub use config::ChartConfig;
pub use contours::{
    generate_contours, reactance_contours, resistance_contours, ArcGeometry, Contour, ContourSet,
    Point,
};
pub use grid::SmithChart;
pub use readout::ImpedanceReadout;
pub use target::ReturnLossTarget;
