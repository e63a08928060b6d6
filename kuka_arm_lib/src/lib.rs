//! # Kuka Arm Library
//!
//! Joint types, trajectory generation and the data file recorder for the
//! six-axis Kuka arm simulation.

pub mod rig;
pub mod trajectory;
pub mod types;
pub mod utils;

// Re-export everything for convenience
pub use rig::*;
pub use trajectory::*;
pub use types::*;
pub use utils::*;
