#![forbid(unsafe_code)]

pub mod gate;
pub mod model;

pub use gate::{GateUpdate, VisibilityGate};
