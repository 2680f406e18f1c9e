//! Matching module - L-network synthesis on the Smith chart
//!
//! Provides reactive components and the engine that tracks the impedance
//! trajectory as they are inserted in front of a load.

mod component;
mod engine;

pub use component::{Component, Element, Placement};
pub use engine::{EngineState, LoadPolicy, MatchingNetwork, Passivity, TrajectorySnapshot};
