//! Configuration management for the grid-filling solver

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, PuzzleConfig, Settings, SolverConfig,
};
