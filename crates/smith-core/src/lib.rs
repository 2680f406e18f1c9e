//! smith-core: Smith chart computation library
//!
//! The math behind an impedance-matching Smith chart, independent of any
//! rendering or input layer.
//!
//! ## Modules
//!
//! - `math` - Γ ↔ Z transforms and |Γ| / dB / VSWR conversions
//! - `chart` - Constant-r / constant-x contour geometry, chart grid, readouts
//! - `matching` - Series/shunt component insertion and the impedance trajectory
//! - `frequency` - Frequency units
//! - `error` - The shared error type

pub mod chart;
pub mod constants;
pub mod error;
pub mod frequency;
pub mod math;
pub mod matching;

pub use chart::{ChartConfig, Contour, SmithChart};
pub use error::{Result, SmithError};
pub use matching::{Component, MatchingNetwork};
