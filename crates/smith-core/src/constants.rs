//! Numerical constants for Smith chart calculations
//!
//! Provides standardized tolerance values, chart defaults and the step sizes
//! used by the return-loss controls.

/// Default reference impedance in ohms.
pub const DEFAULT_Z0: f64 = 50.0;

/// Relative tolerance for the Γ ↔ Z round trip.
pub const ROUND_TRIP_TOL: f64 = 1e-9;

/// Tolerance on |Γ| - 1 within which a point is classified as lying on the
/// chart boundary rather than inside or outside it.
pub const BOUNDARY_TOL: f64 = 1e-12;

/// Default normalized resistance values for the chart grid.
pub const DEFAULT_RESISTANCES: [f64; 5] = [0.0, 0.5, 1.0, 2.0, 5.0];

/// Default normalized reactance values for the chart grid.
pub const DEFAULT_REACTANCES: [f64; 4] = [0.0, 0.5, 1.0, 2.0];

/// Default number of points when a reactance arc is sampled into a polyline.
pub const DEFAULT_ARC_SAMPLES: usize = 100;

/// Below this reactance (ohms) a readout shows the resistance only.
pub const READOUT_REACTANCE_THRESHOLD: f64 = 0.1;

/// |Γ| step used by the return-loss target.
pub const GAMMA_STEP: f64 = 0.01;

/// dB step used by the return-loss target.
pub const DB_STEP: f64 = 0.1;
