//! Grid-filling problem definition

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::puzzle::load_words_from_file;
use crate::sat::encoder::EncodingStatistics;
use crate::sat::{GridModel, SatEncoder};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// A grid-filling problem: a grid size, a dictionary, and solver limits.
pub struct FillProblem {
    settings: Settings,
    words: Vec<String>,
    model: GridModel,
}

impl FillProblem {
    /// Create a problem from settings, loading the dictionary from the
    /// configured word-list file.
    pub fn new(settings: Settings) -> Result<Self> {
        let words = load_words_from_file(&settings.input.word_list_file)
            .context("Failed to load word list")?;

        Self::with_words(settings, words)
    }

    /// Create a problem with an explicit dictionary (useful for testing).
    pub fn with_words(settings: Settings, words: Vec<String>) -> Result<Self> {
        if words.is_empty() {
            anyhow::bail!("dictionary is empty");
        }

        let model = GridModel::new(settings.puzzle.size);

        Ok(Self {
            settings,
            words,
            model,
        })
    }

    /// Encode the puzzle, solve for up to the configured number of
    /// fillings, and return the validated solutions.
    pub fn solve(&mut self) -> Result<Vec<Solution>> {
        let start_time = Instant::now();
        let size = self.settings.puzzle.size;

        println!(
            "Filling a {}x{} grid from {} candidate words",
            size,
            size,
            self.words.len()
        );

        let mut encoder = SatEncoder::new(size)?;
        encoder.set_timeout(Duration::from_secs(self.settings.solver.timeout_seconds));

        let formula = self.model.constrain_grid_to_words(&self.words);
        encoder
            .assert_formula(&formula)
            .context("Failed to encode grid constraints")?;

        let stats = encoder.statistics();
        println!(
            "Encoded {} clauses over {} variables",
            stats.clause_count, stats.variables.total_variables
        );

        let grids = encoder
            .solve(self.settings.solver.max_solutions)
            .context("SAT solving failed")?;
        let solve_time = start_time.elapsed();

        if grids.is_empty() {
            println!("No fillings found");
            return Ok(Vec::new());
        }

        println!(
            "Found {} candidate filling(s) in {:.3}s",
            grids.len(),
            solve_time.as_secs_f64()
        );

        let validator = SolutionValidator::new(self.words.clone());
        let mut solutions = Vec::new();
        for (i, grid) in grids.into_iter().enumerate() {
            let result = validator.validate(&grid);
            if result.is_valid {
                solutions.push(Solution::new(grid, &self.words, solve_time));
            } else {
                eprintln!(
                    "Warning: filling {} failed validation: {}",
                    i + 1,
                    result
                        .error_message
                        .unwrap_or_else(|| "unknown error".to_string())
                );
            }
        }

        println!("Kept {} valid solution(s)", solutions.len());
        Ok(solutions)
    }

    /// The dictionary this problem fills from.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The problem settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Exact encoding statistics, obtained by building the CNF without
    /// solving.
    pub fn encoding_statistics(&self) -> Result<EncodingStatistics> {
        let mut encoder = SatEncoder::new(self.settings.puzzle.size)?;
        let formula = self.model.constrain_grid_to_words(&self.words);
        encoder.assert_formula(&formula)?;
        Ok(encoder.statistics())
    }

    /// Estimate how hard this problem is before encoding anything.
    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        let size = self.settings.puzzle.size;
        let line_count = 2 * size;

        let mut usable_words = 0usize;
        let mut placements_per_line = 0usize;
        let mut atoms_per_line = 0usize;

        for word in &self.words {
            let w = word.chars().count();
            if w > size {
                continue;
            }
            usable_words += 1;

            if w == size {
                placements_per_line += 1;
                atoms_per_line += size;
            } else if w + 1 == size {
                placements_per_line += 2;
                atoms_per_line += 2 * size;
            } else {
                let windows = size - w - 1;
                placements_per_line += windows;
                atoms_per_line += windows * (w + 2);
            }
        }

        let total_placements = line_count * placements_per_line;
        let estimated_atoms = line_count * atoms_per_line;

        let complexity_level = if estimated_atoms < 1_000 {
            ComplexityLevel::Low
        } else if estimated_atoms < 10_000 {
            ComplexityLevel::Medium
        } else if estimated_atoms < 100_000 {
            ComplexityLevel::High
        } else {
            ComplexityLevel::VeryHigh
        };

        ComplexityEstimate {
            complexity_level,
            grid_cells: size * size,
            dictionary_size: self.words.len(),
            usable_words,
            total_placements,
            estimated_atoms,
        }
    }
}

/// Complexity estimate for a problem.
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    pub complexity_level: ComplexityLevel,
    pub grid_cells: usize,
    pub dictionary_size: usize,
    /// Words short enough to fit a line.
    pub usable_words: usize,
    /// Placement disjuncts across all rows and columns.
    pub total_placements: usize,
    /// Equality atoms across all placements.
    pub estimated_atoms: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for ComplexityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem Complexity Estimate:")?;
        writeln!(f, "  Complexity level: {:?}", self.complexity_level)?;
        writeln!(f, "  Grid cells: {}", self.grid_cells)?;
        writeln!(
            f,
            "  Usable words: {} of {}",
            self.usable_words, self.dictionary_size
        )?;
        writeln!(f, "  Placement disjuncts: {}", self.total_placements)?;
        writeln!(f, "  Estimated atoms: {}", self.estimated_atoms)?;

        let recommendation = match self.complexity_level {
            ComplexityLevel::Low => "Should solve quickly",
            ComplexityLevel::Medium => "May take some time to solve",
            ComplexityLevel::High => "Likely to be challenging, consider trimming the dictionary",
            ComplexityLevel::VeryHigh => {
                "Very challenging, strongly consider a smaller grid or dictionary"
            }
        };
        writeln!(f, "  Recommendation: {}", recommendation)?;

        Ok(())
    }
}
