//! Solved-puzzle representation and metadata

use super::validator::{find_line_match, LineKind};
use crate::puzzle::grid::FilledGrid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One validated filling of the puzzle grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The decoded grid.
    pub grid: FilledGrid,
    /// Size of the dictionary the grid was filled from.
    pub dictionary_size: usize,
    /// Time taken by the solver run that produced this filling.
    #[serde(skip)]
    pub solve_time: Duration,
    /// Derived metadata about the filling.
    pub metadata: SolutionMetadata,
}

/// Metadata about a filling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the grid content.
    pub id: String,
    /// Number of cells holding a letter.
    pub filled_cells: usize,
    /// Number of blank cells.
    pub blank_cells: usize,
    /// Share of cells holding a letter (0.0 to 1.0).
    pub letter_density: f64,
    /// Which dictionary word each row and column matched, and where.
    pub line_matches: Vec<LineMatch>,
}

/// A dictionary word matched by one line of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineMatch {
    pub kind: LineKind,
    pub index: usize,
    pub word: String,
    /// Offset of the word's first letter within the line.
    pub offset: usize,
}

impl Solution {
    /// Create a solution, deriving metadata from the grid and dictionary.
    pub fn new(grid: FilledGrid, words: &[String], solve_time: Duration) -> Self {
        let metadata = SolutionMetadata::analyze(&grid, words);

        Self {
            dictionary_size: words.len(),
            grid,
            solve_time,
            metadata,
        }
    }

    /// Check if this solution has the same grid content as another.
    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.grid == other.grid
    }

    /// Convert to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to a file as JSON.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Get a one-line summary of the solution.
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            id: self.metadata.id.clone(),
            filled_cells: self.metadata.filled_cells,
            blank_cells: self.metadata.blank_cells,
            letter_density: self.metadata.letter_density,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }
}

impl SolutionMetadata {
    /// Analyze a decoded grid against the dictionary it was filled from.
    pub fn analyze(grid: &FilledGrid, words: &[String]) -> Self {
        let filled_cells = grid.filled_count();
        let blank_cells = grid.blank_count();
        let total_cells = grid.size * grid.size;

        let mut line_matches = Vec::new();
        for row in 0..grid.size {
            if let Some((word, offset)) = find_line_match(&grid.row_values(row), words) {
                line_matches.push(LineMatch {
                    kind: LineKind::Row,
                    index: row,
                    word: word.to_string(),
                    offset,
                });
            }
        }
        for col in 0..grid.size {
            if let Some((word, offset)) = find_line_match(&grid.column_values(col), words) {
                line_matches.push(LineMatch {
                    kind: LineKind::Column,
                    index: col,
                    word: word.to_string(),
                    offset,
                });
            }
        }

        Self {
            id: Self::generate_id(grid),
            filled_cells,
            blank_cells,
            letter_density: filled_cells as f64 / total_cells as f64,
            line_matches,
        }
    }

    /// Generate an identifier from the grid content.
    fn generate_id(grid: &FilledGrid) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        grid.hash(&mut hasher);

        format!("fill_{:x}", hasher.finish())
    }
}

/// Summary of a solution for display purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub id: String,
    pub filled_cells: usize,
    pub blank_cells: usize,
    pub letter_density: f64,
    pub solve_time_ms: u64,
}

impl std::fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution {}: {} letters, {} blanks, density {:.2}, {}ms",
            self.id, self.filled_cells, self.blank_cells, self.letter_density, self.solve_time_ms
        )
    }
}
