//! Boolean formula trees produced by the constraint builders
//!
//! Formulas are plain immutable values over cell variables and letter
//! constants. Building a larger formula never mutates a smaller one, so
//! subtrees can be shared and re-asserted freely. Conversion to the
//! solver's clausal form happens in one place, [`crate::sat::encoder`].

/// One grid-cell unknown, identified by its flat index (`row * size + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellVar(pub(crate) usize);

impl CellVar {
    /// Flat grid index of this cell.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One letter-domain constant (0 = blank, 1..=26 = 'a'..='z').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterConst(pub(crate) usize);

impl LetterConst {
    /// Letter-domain value of this constant.
    pub fn value(&self) -> usize {
        self.0
    }
}

/// A boolean constraint over cell variables and letter constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// A boolean literal constant.
    Lit(bool),
    /// The atom `cell == letter`.
    Eq { cell: CellVar, letter: LetterConst },
    /// Conjunction; empty conjunctions are trivially true.
    And(Vec<Formula>),
    /// Disjunction; empty disjunctions are trivially false.
    Or(Vec<Formula>),
}

impl Formula {
    /// Number of equality atoms in the tree. Used for encoding statistics.
    pub fn atom_count(&self) -> usize {
        match self {
            Formula::Lit(_) => 0,
            Formula::Eq { .. } => 1,
            Formula::And(parts) | Formula::Or(parts) => {
                parts.iter().map(Formula::atom_count).sum()
            }
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Formula::Lit(_) | Formula::Eq { .. } => 1,
            Formula::And(parts) | Formula::Or(parts) => {
                1 + parts.iter().map(Formula::node_count).sum::<usize>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(cell: usize, letter: usize) -> Formula {
        Formula::Eq {
            cell: CellVar(cell),
            letter: LetterConst(letter),
        }
    }

    #[test]
    fn test_atom_count() {
        let f = Formula::Or(vec![
            Formula::Lit(false),
            Formula::And(vec![eq(0, 1), eq(1, 2)]),
            eq(2, 0),
        ]);
        assert_eq!(f.atom_count(), 3);
    }

    #[test]
    fn test_node_count() {
        let f = Formula::Or(vec![Formula::Lit(false), Formula::And(vec![eq(0, 1)])]);
        assert_eq!(f.node_count(), 4);
    }

    #[test]
    fn test_formulas_compare_by_value() {
        assert_eq!(eq(3, 5), eq(3, 5));
        assert_ne!(eq(3, 5), eq(3, 6));
        assert_eq!(
            Formula::And(vec![eq(0, 0)]),
            Formula::And(vec![eq(0, 0)])
        );
    }
}
