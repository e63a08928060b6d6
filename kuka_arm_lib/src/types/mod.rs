pub mod config;
pub mod joint;

pub use config::*;
pub use joint::*;
