//! Independent re-checking of decoded grids against the dictionary
//!
//! The validator replays the placement rules in plain code: a line is
//! valid when some dictionary word occupies it exactly, occupies all but
//! one blank end cell, or floats inside it flanked by blanks on both
//! sides. Cells outside a floated word's window are not inspected,
//! mirroring the constraint encoding.

use crate::puzzle::grid::FilledGrid;
use crate::puzzle::letters::letter_index;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a line runs across or down the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Row,
    Column,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Row => write!(f, "row"),
            LineKind::Column => write!(f, "column"),
        }
    }
}

/// Find where `word` sits in a line of letter-domain values, if anywhere.
/// Returns the offset of the word's first letter.
pub fn match_word_in_line(line: &[usize], word: &str) -> Option<usize> {
    let n = line.len();
    let encoded: Vec<usize> = word.chars().map(letter_index).collect();
    let w = encoded.len();

    if w > n {
        return None;
    }

    if w == n {
        if line == encoded.as_slice() {
            return Some(0);
        }
        return None;
    }

    if w + 1 == n {
        if line[..w] == encoded[..] && line[w] == 0 {
            return Some(0);
        }
        if line[0] == 0 && line[1..] == encoded[..] {
            return Some(1);
        }
        return None;
    }

    // floating: a blank, the word, a blank; outer cells are not inspected
    for start in 0..=(n - w - 2) {
        if line[start] == 0 && line[start + 1..start + 1 + w] == encoded[..] && line[start + 1 + w] == 0
        {
            return Some(start + 1);
        }
    }

    None
}

/// First dictionary word matching a line, with its offset.
pub fn find_line_match<'a>(line: &[usize], words: &'a [String]) -> Option<(&'a str, usize)> {
    words
        .iter()
        .find_map(|word| match_word_in_line(line, word).map(|offset| (word.as_str(), offset)))
}

/// Validates decoded grids against the dictionary.
pub struct SolutionValidator {
    words: Vec<String>,
}

/// Result of validating one grid.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub line_reports: Vec<LineReport>,
    pub error_message: Option<String>,
}

/// Outcome for a single row or column.
#[derive(Debug, Clone)]
pub struct LineReport {
    pub kind: LineKind,
    pub index: usize,
    pub content: String,
    pub matched_word: Option<String>,
    pub offset: Option<usize>,
}

impl SolutionValidator {
    /// Create a validator over a dictionary.
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Check that every row and column of the grid matches some word.
    pub fn validate(&self, grid: &FilledGrid) -> ValidationResult {
        let size = grid.size;

        let lines: Vec<(LineKind, usize, Vec<usize>, String)> = (0..size)
            .map(|row| (LineKind::Row, row, grid.row_values(row), grid.row_string(row)))
            .chain(
                (0..size).map(|col| {
                    (LineKind::Column, col, grid.column_values(col), grid.column_string(col))
                }),
            )
            .collect();

        let line_reports: Vec<LineReport> = lines
            .into_par_iter()
            .map(|(kind, index, values, content)| {
                let matched = find_line_match(&values, &self.words);
                LineReport {
                    kind,
                    index,
                    content,
                    matched_word: matched.map(|(word, _)| word.to_string()),
                    offset: matched.map(|(_, offset)| offset),
                }
            })
            .collect();

        let failures: Vec<&LineReport> = line_reports
            .iter()
            .filter(|report| report.matched_word.is_none())
            .collect();

        let error_message = if failures.is_empty() {
            None
        } else {
            Some(
                failures
                    .iter()
                    .map(|report| {
                        format!("{} {} ('{}') matches no word", report.kind, report.index, report.content)
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };

        ValidationResult {
            is_valid: failures.is_empty(),
            line_reports,
            error_message,
        }
    }

    /// The dictionary this validator checks against.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Validation: {}",
            if self.is_valid { "valid" } else { "invalid" }
        )?;
        for report in &self.line_reports {
            match (&report.matched_word, report.offset) {
                (Some(word), Some(offset)) => writeln!(
                    f,
                    "  {} {}: '{}' matches '{}' at offset {}",
                    report.kind, report.index, report.content, word, offset
                )?,
                _ => writeln!(
                    f,
                    "  {} {}: '{}' matches no word",
                    report.kind, report.index, report.content
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn encode(s: &str) -> Vec<usize> {
        s.chars().map(letter_index).collect()
    }

    #[test]
    fn test_exact_fit_match() {
        assert_eq!(match_word_in_line(&encode("abcd"), "abcd"), Some(0));
        assert_eq!(match_word_in_line(&encode("abcd"), "abce"), None);
    }

    #[test]
    fn test_off_by_one_match() {
        assert_eq!(match_word_in_line(&encode("abc#"), "abc"), Some(0));
        assert_eq!(match_word_in_line(&encode("#abc"), "abc"), Some(1));
        assert_eq!(match_word_in_line(&encode("abcx"), "abc"), None);
    }

    #[test]
    fn test_floating_match_ignores_outer_cells() {
        assert_eq!(match_word_in_line(&encode("#ab#"), "ab"), Some(1));
        // the cell outside the window may hold anything
        assert_eq!(match_word_in_line(&encode("#ab#z"), "ab"), Some(1));
        assert_eq!(match_word_in_line(&encode("z#ab#"), "ab"), Some(2));
        // but the flanking blanks are required
        assert_eq!(match_word_in_line(&encode("zab##"), "ab"), None);
    }

    #[test]
    fn test_too_long_word_never_matches() {
        assert_eq!(match_word_in_line(&encode("ab"), "abc"), None);
    }

    #[test]
    fn test_find_line_match_prefers_first() {
        let dictionary = words(&["cd", "ab"]);
        let (word, offset) = find_line_match(&encode("#ab#"), &dictionary).unwrap();
        assert_eq!(word, "ab");
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_validate_good_grid() {
        let grid = FilledGrid::from_values(2, vec![1, 20, 20, 15]).unwrap(); // at / to
        let validator = SolutionValidator::new(words(&["at", "to"]));

        let result = validator.validate(&grid);
        assert!(result.is_valid);
        assert_eq!(result.line_reports.len(), 4);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_validate_corrupted_grid() {
        let mut grid = FilledGrid::from_values(2, vec![1, 20, 20, 15]).unwrap();
        grid.set(1, 1, 1).unwrap(); // now "ta" across the bottom

        let validator = SolutionValidator::new(words(&["at", "to"]));
        let result = validator.validate(&grid);

        assert!(!result.is_valid);
        assert!(result.error_message.is_some());
    }
}
