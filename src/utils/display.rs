//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::fill::Solution;
use crate::puzzle::FilledGrid;
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display.
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output.
    pub fn format_solution(solution: &Solution, show_lines: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!(
            "Letters: {} ({:.0}% of cells)\n",
            solution.metadata.filled_cells,
            solution.metadata.letter_density * 100.0
        ));
        output.push_str(&format!(
            "Solve Time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        output.push('\n');

        output.push_str(&Self::format_grid(&solution.grid));

        if show_lines {
            output.push('\n');
            output.push_str("Line matches:\n");
            for m in &solution.metadata.line_matches {
                output.push_str(&format!(
                    "  {} {}: '{}' at offset {}\n",
                    m.kind, m.index, m.word, m.offset
                ));
            }
        }

        output
    }

    /// Format multiple solutions as a summary table.
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("ID            | Letters | Blanks | Density | Time(ms)\n");
        output.push_str("--------------|---------|--------|---------|---------\n");

        for solution in solutions {
            let summary = solution.summary();
            output.push_str(&format!(
                "{:13} | {:7} | {:6} | {:6.2} | {}\n",
                &summary.id[..13.min(summary.id.len())],
                summary.filled_cells,
                summary.blank_cells,
                summary.letter_density,
                summary.solve_time_ms
            ));
        }

        output
    }

    /// Format a grid in compact form.
    pub fn format_grid(grid: &FilledGrid) -> String {
        grid.to_string()
    }

    /// Format a grid with row and column numbers.
    pub fn format_grid_with_coords(grid: &FilledGrid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.size {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.size {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.size {
                let v = grid.value(row, col);
                if v == 0 {
                    output.push_str(" ·");
                } else {
                    output.push_str(&format!(" {}", grid.letter(row, col)));
                }
            }
            output.push('\n');
        }

        output
    }

    /// Save solutions to a directory in the configured format.
    pub fn save_solutions<P: AsRef<Path>>(
        solutions: &[Solution],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let dir = output_dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        for solution in solutions {
            match format {
                OutputFormat::Json => {
                    let path = dir.join(format!("{}.json", solution.metadata.id));
                    solution
                        .save_to_file(&path)
                        .with_context(|| format!("Failed to save solution: {}", path.display()))?;
                }
                OutputFormat::Text => {
                    let path = dir.join(format!("{}.txt", solution.metadata.id));
                    let content = Self::format_solution(solution, true);
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to save solution: {}", path.display()))?;
                }
            }
        }

        Ok(())
    }
}

/// ANSI color helpers for console output.
pub struct ColorOutput;

impl ColorOutput {
    pub fn info(message: &str) -> String {
        format!("\x1b[36m{}\x1b[0m", message)
    }

    pub fn success(message: &str) -> String {
        format!("\x1b[32m{}\x1b[0m", message)
    }

    pub fn warning(message: &str) -> String {
        format!("\x1b[33m{}\x1b[0m", message)
    }

    pub fn error(message: &str) -> String {
        format!("\x1b[31m{}\x1b[0m", message)
    }
}
