//! Placement-constraint generation over the puzzle grid
//!
//! [`GridModel`] owns one cell variable per grid position and one constant
//! per letter-domain value, and builds the formulas that tie them to a
//! dictionary: a single word pinned to exact indices, a word sliding
//! through a row or column with blank padding, a line matching any word in
//! the dictionary, and the whole grid matching on every row and column.
//!
//! All builders are pure: they relate variables to constants and never
//! assign anything. Assignment is the solver's job.

use super::formula::{CellVar, Formula, LetterConst};
use crate::puzzle::letters::{letter_index, BLANK, DOMAIN_SIZE};

/// Variable and constant tables for one puzzle instance, plus the
/// constraint builders over them.
pub struct GridModel {
    size: usize,
    cells: Vec<CellVar>,
    letters: Vec<LetterConst>,
}

impl GridModel {
    /// Create the model for a `size` x `size` grid: `size²` cell variables
    /// addressed by flat index, and 27 letter constants in ascending
    /// domain order. Both tables are fixed for the model's lifetime.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "grid size must be at least 1");

        Self {
            size,
            cells: (0..size * size).map(CellVar).collect(),
            letters: (0..DOMAIN_SIZE).map(LetterConst).collect(),
        }
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cell variables (`size²`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell variable at a flat index.
    pub fn cell(&self, index: usize) -> CellVar {
        self.cells[index]
    }

    /// Letter constant for a domain value (0 = blank, 1..=26 = 'a'..='z').
    pub fn letter(&self, value: usize) -> LetterConst {
        self.letters[value]
    }

    /// Restrict one cell to a set of letter-domain values.
    ///
    /// An empty `allowed` set yields an empty disjunction, which is
    /// constantly false: a legal way to force unsatisfiability.
    pub fn limit_node(&self, index: usize, allowed: &[usize]) -> Formula {
        Formula::Or(
            allowed
                .iter()
                .map(|&value| Formula::Eq {
                    cell: self.cell(index),
                    letter: self.letter(value),
                })
                .collect(),
        )
    }

    /// Pin a pattern to exact cell indices: the conjunction of
    /// `cell[indices[k]] == pattern[k]` for every position `k`.
    ///
    /// The pattern may contain blank markers; sliding placement uses this
    /// with padded patterns such as `"#cat#"`. The index and pattern
    /// lengths must match.
    pub fn constrain_indices_to_word(&self, indices: &[usize], pattern: &str) -> Formula {
        assert_eq!(
            indices.len(),
            pattern.chars().count(),
            "pattern '{}' does not fit {} indices",
            pattern,
            indices.len()
        );

        Formula::And(
            indices
                .iter()
                .zip(pattern.chars())
                .map(|(&index, c)| Formula::Eq {
                    cell: self.cell(index),
                    letter: self.letter(letter_index(c)),
                })
                .collect(),
        )
    }

    /// Place one word somewhere in an index sequence, padded with blanks.
    ///
    /// The result is a disjunction over every viable placement: an exact
    /// fit when the word spans the whole sequence, the two one-end-blank
    /// placements when it is one short, and otherwise every window of
    /// length `word + 2` holding the word flanked by blanks on both sides.
    /// In the windowed case, cells outside the chosen window are not
    /// constrained by that placement; a floated word pins only its own
    /// window.
    ///
    /// Words longer than the sequence are never dispatched here; the
    /// dictionary-level builder filters them first.
    pub fn constrain_seq_to_word(&self, indices: &[usize], word: &str) -> Formula {
        let n = indices.len();
        let w = word.chars().count();

        // seeded with false so every branch below can OR-append uniformly
        let mut placements = vec![Formula::Lit(false)];

        if w == n {
            placements.push(self.constrain_indices_to_word(indices, word));
        }

        if w + 1 == n {
            placements.push(self.constrain_indices_to_word(indices, &format!("{word}{BLANK}")));
            placements.push(self.constrain_indices_to_word(indices, &format!("{BLANK}{word}")));
        }

        if w + 1 < n {
            let padded = format!("{BLANK}{word}{BLANK}");
            for window in indices.windows(w + 2) {
                placements.push(self.constrain_indices_to_word(window, &padded));
            }
        }

        Formula::Or(placements)
    }

    /// Make a line match at least one dictionary word under some placement.
    ///
    /// Words longer than the line are filtered out; an empty survivor set
    /// yields an empty, constantly-false disjunction.
    pub fn constrain_seq_to_words(&self, indices: &[usize], words: &[String]) -> Formula {
        Formula::Or(
            words
                .iter()
                .filter(|word| word.chars().count() <= indices.len())
                .map(|word| self.constrain_seq_to_word(indices, word))
                .collect(),
        )
    }

    /// Make every row and every column of the grid match the dictionary:
    /// the conjunction of the line constraint over all `2 * size` lines.
    pub fn constrain_grid_to_words(&self, words: &[String]) -> Formula {
        let mut lines = Vec::with_capacity(2 * self.size);

        for row in 0..self.size {
            lines.push(self.constrain_seq_to_words(&self.row_indices(row), words));
        }
        for col in 0..self.size {
            lines.push(self.constrain_seq_to_words(&self.column_indices(col), words));
        }

        Formula::And(lines)
    }

    /// Flat indices of one row: `size` consecutive values.
    pub fn row_indices(&self, row: usize) -> Vec<usize> {
        let start = row * self.size;
        (start..start + self.size).collect()
    }

    /// Flat indices of one column: `size` values with stride `size`.
    pub fn column_indices(&self, col: usize) -> Vec<usize> {
        (0..self.size).map(|row| row * self.size + col).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_model_tables() {
        let model = GridModel::new(3);
        assert_eq!(model.cell_count(), 9);
        assert_eq!(model.cell(4).index(), 4);
        assert_eq!(model.letter(0).value(), 0);
        assert_eq!(model.letter(26).value(), 26);
    }

    #[test]
    fn test_row_and_column_indices() {
        let model = GridModel::new(3);
        assert_eq!(model.row_indices(1), vec![3, 4, 5]);
        assert_eq!(model.column_indices(1), vec![1, 4, 7]);
    }

    #[test]
    fn test_limit_node_shape() {
        let model = GridModel::new(2);

        match model.limit_node(0, &[3, 5]) {
            Formula::Or(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected disjunction, got {:?}", other),
        }

        // an empty allowed set is a constantly-false disjunction
        assert_eq!(model.limit_node(0, &[]), Formula::Or(vec![]));
    }

    #[test]
    fn test_exact_placement_atoms() {
        let model = GridModel::new(2);
        let f = model.constrain_indices_to_word(&[0, 1, 2, 3], "abcd");

        match f {
            Formula::And(parts) => {
                assert_eq!(parts.len(), 4);
                assert_eq!(
                    parts[0],
                    Formula::Eq {
                        cell: model.cell(0),
                        letter: model.letter(1),
                    }
                );
            }
            other => panic!("expected conjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_placement_accepts_padded_patterns() {
        let model = GridModel::new(2);
        let f = model.constrain_indices_to_word(&[0, 1, 2], "#a#");

        match f {
            Formula::And(parts) => {
                assert_eq!(
                    parts[0],
                    Formula::Eq {
                        cell: model.cell(0),
                        letter: model.letter(0),
                    }
                );
            }
            other => panic!("expected conjunction, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_exact_placement_length_mismatch_panics() {
        let model = GridModel::new(2);
        model.constrain_indices_to_word(&[0, 1], "abc");
    }

    #[test]
    fn test_sliding_placement_exact_fit() {
        let model = GridModel::new(2);
        // exact fit: the false seed plus one placement
        match model.constrain_seq_to_word(&[0, 1, 2, 3], "abcd") {
            Formula::Or(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], Formula::Lit(false));
            }
            other => panic!("expected disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_sliding_placement_off_by_one() {
        let model = GridModel::new(2);
        // word# and #word
        match model.constrain_seq_to_word(&[0, 1, 2, 3], "abc") {
            Formula::Or(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_sliding_placement_window_count() {
        let model = GridModel::new(3);
        // 2-letter word in a 4-slot line: one #word# window
        match model.constrain_seq_to_word(&[0, 1, 2, 3], "ab") {
            Formula::Or(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected disjunction, got {:?}", other),
        }

        // 2-letter word in a 6-slot line: windows at offsets 0, 1, 2
        match model.constrain_seq_to_word(&[0, 1, 2, 3, 4, 5], "ab") {
            Formula::Or(parts) => assert_eq!(parts.len(), 4),
            other => panic!("expected disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_line_constraint_filters_long_words() {
        let model = GridModel::new(2);
        let f = model.constrain_seq_to_words(&[0, 1], &words(&["ab", "abc", "a"]));

        // "abc" cannot fit a 2-slot line
        match f {
            Formula::Or(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_line_constraint_empty_survivors() {
        let model = GridModel::new(2);
        let f = model.constrain_seq_to_words(&[0, 1], &words(&["abc"]));
        assert_eq!(f, Formula::Or(vec![]));
    }

    #[test]
    fn test_grid_constraint_covers_all_lines() {
        let model = GridModel::new(3);
        match model.constrain_grid_to_words(&words(&["abc"])) {
            Formula::And(parts) => assert_eq!(parts.len(), 6),
            other => panic!("expected conjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_builders_do_not_mutate_model() {
        let model = GridModel::new(2);
        let before = model.constrain_seq_to_word(&[0, 1, 2, 3], "ab");
        let _ = model.constrain_grid_to_words(&words(&["at", "to"]));
        let after = model.constrain_seq_to_word(&[0, 1, 2, 3], "ab");
        assert_eq!(before, after);
    }
}
