//! Crossword grid filling via SAT
//!
//! This library compiles an N×N grid-filling puzzle over a word dictionary
//! into a boolean formula, hands it to a SAT solver, and decodes the
//! resulting models back into letter grids. Every row and column of a
//! solution matches at least one dictionary word, possibly padded with
//! blanks and possibly floating within its line.

pub mod config;
pub mod fill;
pub mod puzzle;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use fill::{FillProblem, Solution};

use anyhow::Result;

/// Main entry point: solve the puzzle described by `settings`.
pub fn solve_puzzle(settings: Settings) -> Result<Vec<Solution>> {
    let mut problem = FillProblem::new(settings)?;
    problem.solve()
}
