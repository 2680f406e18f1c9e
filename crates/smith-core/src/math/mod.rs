//! Mathematical functions module
//!
//! Provides the Γ ↔ Z transforms and reflection magnitude conversions.

pub mod conversions;
pub mod transforms;

pub use conversions::*;
pub use transforms::*;
