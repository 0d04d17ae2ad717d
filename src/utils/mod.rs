//! Display and output helpers

pub mod display;

pub use display::{ColorOutput, SolutionFormatter};
