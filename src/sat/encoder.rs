//! CNF translation and solving for placement formulas
//!
//! [`SatEncoder`] is the single point where the pure [`Formula`] trees
//! built by [`super::constraints::GridModel`] meet the SAT backend. Each
//! cell becomes a 5-bit vector of SAT variables pinned to the 27-value
//! letter domain; equality atoms become bit-literal conjunctions; nested
//! connectives get one Tseitin definition variable each. Formulas are only
//! ever asserted positively, so one-sided definitions suffice.

use super::formula::Formula;
use super::solver::{Clause, SatSolver, SolverSolution};
use super::variables::{VariableManager, VariableStatistics, CELL_BITS};
use crate::puzzle::grid::FilledGrid;
use crate::puzzle::letters::DOMAIN_SIZE;
use anyhow::{Context, Result};

/// A subformula reduced to either a boolean constant or a single literal.
enum Encoded {
    Const(bool),
    Lit(i32),
}

/// Translates placement formulas to CNF and runs the SAT backend.
pub struct SatEncoder {
    variables: VariableManager,
    solver: SatSolver,
    size: usize,
}

impl SatEncoder {
    /// Create an encoder for a `size` x `size` grid. Allocates every
    /// cell's bit variables up front (so variable IDs are deterministic)
    /// and pins each cell to the valid letter-domain values.
    pub fn new(size: usize) -> Result<Self> {
        let mut encoder = Self {
            variables: VariableManager::new(size * size),
            solver: SatSolver::new(),
            size,
        };
        encoder
            .assert_domain_clauses()
            .context("Failed to pin cells to the letter domain")?;
        Ok(encoder)
    }

    /// Forbid the bit patterns above the last domain value, per cell. Cell
    /// variables are typed over the 27-value letter domain; the five
    /// patterns 27..=31 representable in 5 bits must never appear in a
    /// model, even for cells no constraint mentions.
    fn assert_domain_clauses(&mut self) -> Result<()> {
        for cell in 0..self.variables.cell_count() {
            let bits = self.variables.cell_bits(cell)?;
            for invalid in DOMAIN_SIZE..(1 << CELL_BITS) {
                let clause: Vec<i32> = bits
                    .iter()
                    .enumerate()
                    .map(|(bit, &var)| if invalid >> bit & 1 == 1 { -var } else { var })
                    .collect();
                self.solver.add_clause(&Clause::new(clause))?;
            }
        }
        Ok(())
    }

    /// Assert a formula: every model found afterwards satisfies it.
    /// Asserting the same formula twice is idempotent.
    pub fn assert_formula(&mut self, formula: &Formula) -> Result<()> {
        match formula {
            Formula::Lit(true) => Ok(()),
            Formula::Lit(false) => self.assert_false(),
            Formula::Eq { cell, letter } => {
                for literal in self.eq_literals(cell.index(), letter.value())? {
                    self.solver.add_clause(&Clause::unit(literal))?;
                }
                Ok(())
            }
            // a root-level conjunction asserts each part directly
            Formula::And(parts) => {
                for part in parts {
                    self.assert_formula(part)?;
                }
                Ok(())
            }
            // a root-level disjunction becomes one clause over its parts
            Formula::Or(parts) => {
                let mut literals = Vec::new();
                for part in parts {
                    match self.encode(part)? {
                        Encoded::Const(true) => return Ok(()),
                        Encoded::Const(false) => {}
                        Encoded::Lit(literal) => literals.push(literal),
                    }
                }
                if literals.is_empty() {
                    self.assert_false()
                } else {
                    self.solver.add_clause(&Clause::new(literals))
                }
            }
        }
    }

    /// Assert several formulas; equivalent to asserting their conjunction.
    pub fn assert_formulas(&mut self, formulas: &[Formula]) -> Result<()> {
        for formula in formulas {
            self.assert_formula(formula)?;
        }
        Ok(())
    }

    /// Encode the constantly-false formula without producing an empty
    /// clause, which the solver wrapper rejects.
    fn assert_false(&mut self) -> Result<()> {
        let var = self.variables.auxiliary();
        self.solver.add_clause(&Clause::unit(var))?;
        self.solver.add_clause(&Clause::unit(-var))?;
        Ok(())
    }

    /// The bit literals that hold exactly when `cell` carries `value`.
    fn eq_literals(&mut self, cell: usize, value: usize) -> Result<Vec<i32>> {
        let bits = self.variables.cell_bits(cell)?;
        Ok(bits
            .iter()
            .enumerate()
            .map(|(bit, &var)| if value >> bit & 1 == 1 { var } else { -var })
            .collect())
    }

    /// Reduce a nested subformula to one literal, emitting its one-sided
    /// Tseitin definition clauses. Boolean constants fold structurally, so
    /// the false-seeded disjunctions from the constraint builders cost
    /// nothing.
    fn encode(&mut self, formula: &Formula) -> Result<Encoded> {
        match formula {
            Formula::Lit(value) => Ok(Encoded::Const(*value)),
            Formula::Eq { cell, letter } => {
                let literals = self.eq_literals(cell.index(), letter.value())?;
                let definition = self.variables.auxiliary();
                for literal in literals {
                    self.solver.add_clause(&Clause::binary(-definition, literal))?;
                }
                Ok(Encoded::Lit(definition))
            }
            Formula::And(parts) => {
                let mut literals = Vec::new();
                for part in parts {
                    match self.encode(part)? {
                        Encoded::Const(false) => return Ok(Encoded::Const(false)),
                        Encoded::Const(true) => {}
                        Encoded::Lit(literal) => literals.push(literal),
                    }
                }
                match literals.len() {
                    0 => Ok(Encoded::Const(true)),
                    1 => Ok(Encoded::Lit(literals[0])),
                    _ => {
                        let definition = self.variables.auxiliary();
                        for literal in literals {
                            self.solver.add_clause(&Clause::binary(-definition, literal))?;
                        }
                        Ok(Encoded::Lit(definition))
                    }
                }
            }
            Formula::Or(parts) => {
                let mut literals = Vec::new();
                for part in parts {
                    match self.encode(part)? {
                        Encoded::Const(true) => return Ok(Encoded::Const(true)),
                        Encoded::Const(false) => {}
                        Encoded::Lit(literal) => literals.push(literal),
                    }
                }
                match literals.len() {
                    0 => Ok(Encoded::Const(false)),
                    1 => Ok(Encoded::Lit(literals[0])),
                    _ => {
                        let definition = self.variables.auxiliary();
                        let mut clause = vec![-definition];
                        clause.extend(literals);
                        self.solver.add_clause(&Clause::new(clause))?;
                        Ok(Encoded::Lit(definition))
                    }
                }
            }
        }
    }

    /// Set the advisory solving timeout on the backend.
    pub fn set_timeout(&mut self, timeout: std::time::Duration) {
        self.solver.set_timeout(timeout);
    }

    /// Run a single satisfiability check.
    pub fn check(&mut self) -> Result<Option<SolverSolution>> {
        self.solver.solve()
    }

    /// Enumerate up to `max_solutions` models, decoded to grids. Blocking
    /// happens over the cell bit variables only, so each returned grid is
    /// distinct in content.
    pub fn solve(&mut self, max_solutions: usize) -> Result<Vec<FilledGrid>> {
        let blocking = self.variables.all_cell_bits()?;
        let solutions = self
            .solver
            .solve_multiple(max_solutions, &blocking)
            .context("SAT solving failed")?;

        solutions
            .iter()
            .map(|solution| self.decode_grid(solution))
            .collect()
    }

    /// Decode a model into flat letter-domain values, one per cell.
    pub fn decode_values(&mut self, solution: &SolverSolution) -> Result<Vec<usize>> {
        let mut values = Vec::with_capacity(self.variables.cell_count());

        for cell in 0..self.variables.cell_count() {
            let bits = self.variables.cell_bits(cell)?;
            let mut value = 0usize;
            for (bit, &var) in bits.iter().enumerate() {
                if solution.assignment.get(&var).copied().unwrap_or(false) {
                    value |= 1 << bit;
                }
            }
            if value >= DOMAIN_SIZE {
                anyhow::bail!("model assigned cell {} the out-of-domain value {}", cell, value);
            }
            values.push(value);
        }

        Ok(values)
    }

    /// Decode a model into a [`FilledGrid`].
    pub fn decode_grid(&mut self, solution: &SolverSolution) -> Result<FilledGrid> {
        let values = self.decode_values(solution)?;
        FilledGrid::from_values(self.size, values)
    }

    /// Get encoding statistics.
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            grid_size: self.size,
            variables: self.variables.statistics(),
            clause_count: self.solver.clause_count(),
        }
    }
}

/// Statistics about the CNF encoding.
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub grid_size: usize,
    pub variables: VariableStatistics,
    pub clause_count: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "  Total variables: {}", self.variables.total_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.variables.auxiliary_variables)?;
        writeln!(f, "  Total clauses: {}", self.clause_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::constraints::GridModel;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    /// Solve once and decode all cell values, requiring satisfiability.
    fn solve_values(encoder: &mut SatEncoder) -> Vec<usize> {
        let solution = encoder.check().unwrap().expect("expected satisfiable");
        encoder.decode_values(&solution).unwrap()
    }

    #[test]
    fn test_fresh_encoder_is_satisfiable() {
        let mut encoder = SatEncoder::new(2).unwrap();
        let values = solve_values(&mut encoder);

        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|&v| v < DOMAIN_SIZE));
    }

    #[test]
    fn test_limit_node_single_value() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder.assert_formula(&model.limit_node(0, &[3])).unwrap();

        let values = solve_values(&mut encoder);
        assert_eq!(values[0], 3);
    }

    #[test]
    fn test_limit_node_empty_set_is_unsat() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder.assert_formula(&model.limit_node(0, &[])).unwrap();

        assert!(encoder.check().unwrap().is_none());
    }

    #[test]
    fn test_exact_word() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        let indices = [0, 1, 2, 3];
        encoder
            .assert_formula(&model.constrain_indices_to_word(&indices, "abcd"))
            .unwrap();

        assert_eq!(solve_values(&mut encoder), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_intersecting_words() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        // "ab" across the top row, "ac" down the left column, bottom-right blank
        encoder.assert_formula(&model.limit_node(3, &[0])).unwrap();
        encoder
            .assert_formula(&model.constrain_indices_to_word(&[0, 1], "ab"))
            .unwrap();
        encoder
            .assert_formula(&model.constrain_indices_to_word(&[0, 2], "ac"))
            .unwrap();

        assert_eq!(solve_values(&mut encoder), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_inconsistent_words_are_unsat() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        // both words claim cell 0: 'a' vs 'x'
        encoder.assert_formula(&model.limit_node(3, &[0])).unwrap();
        encoder
            .assert_formula(&model.constrain_indices_to_word(&[0, 1], "ab"))
            .unwrap();
        encoder
            .assert_formula(&model.constrain_indices_to_word(&[0, 2], "xy"))
            .unwrap();

        assert!(encoder.check().unwrap().is_none());
    }

    #[test]
    fn test_sliding_word_floats_with_padding() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_word(&[0, 1, 2, 3], "ab"))
            .unwrap();

        // the only 4-slot window is #ab#
        assert_eq!(solve_values(&mut encoder), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_sliding_word_exact_fit() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_word(&[0, 1, 2, 3], "abcd"))
            .unwrap();

        assert_eq!(solve_values(&mut encoder), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sliding_word_off_by_one_fit() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_word(&[0, 1, 2, 3], "abc"))
            .unwrap();

        let values = solve_values(&mut encoder);
        let abc_blank = vec![1, 2, 3, 0];
        let blank_abc = vec![0, 1, 2, 3];
        assert!(
            values == abc_blank || values == blank_abc,
            "unexpected assignment {:?}",
            values
        );
    }

    #[test]
    fn test_line_matches_one_of_words() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_words(&[0, 1, 2, 3], &words(&["abcd", "efgh"])))
            .unwrap();

        let values = solve_values(&mut encoder);
        let abcd = vec![1, 2, 3, 4];
        let efgh = vec![5, 6, 7, 8];
        assert!(
            values == abcd || values == efgh,
            "unexpected assignment {:?}",
            values
        );
    }

    #[test]
    fn test_line_with_no_fitting_words_is_unsat() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_words(&[0, 1], &words(&["abc"])))
            .unwrap();

        assert!(encoder.check().unwrap().is_none());
    }

    #[test]
    fn test_grid_to_words() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        let dictionary = words(&["at", "to", "zu", "pi", "mr", "ws"]);
        encoder
            .assert_formula(&model.constrain_grid_to_words(&dictionary))
            .unwrap();

        // a t / t o is the only consistent filling
        assert_eq!(solve_values(&mut encoder), vec![1, 20, 20, 15]);
    }

    #[test]
    fn test_reasserting_is_idempotent() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        let dictionary = words(&["at", "to", "zu", "pi", "mr", "ws"]);
        let formula = model.constrain_grid_to_words(&dictionary);
        encoder.assert_formula(&formula).unwrap();
        encoder.assert_formula(&formula).unwrap();

        assert_eq!(solve_values(&mut encoder), vec![1, 20, 20, 15]);
    }

    #[test]
    fn test_shrinking_dictionary_never_gains_models() {
        // with "at" removed the intersection letters no longer line up
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        let dictionary = words(&["to", "zu", "pi", "mr", "ws"]);
        encoder
            .assert_formula(&model.constrain_grid_to_words(&dictionary))
            .unwrap();

        assert!(encoder.check().unwrap().is_none());
    }

    #[test]
    fn test_floating_word_leaves_outer_cells_free() {
        // 5-slot line, 2-letter word: windows at offsets 0 and 1. Pinning
        // the last cell to 'z' rules out the second window but leaves the
        // first intact, because cells outside a chosen window are
        // unconstrained by that placement.
        let model = GridModel::new(3);
        let mut encoder = SatEncoder::new(3).unwrap();

        let line = [0, 1, 2, 3, 4];
        encoder
            .assert_formula(&model.constrain_seq_to_word(&line, "ab"))
            .unwrap();
        encoder.assert_formula(&model.limit_node(4, &[26])).unwrap();

        let values = solve_values(&mut encoder);
        assert_eq!(&values[0..5], &[0, 1, 2, 0, 26]);
    }

    #[test]
    fn test_enumerating_distinct_grids() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        encoder
            .assert_formula(&model.constrain_seq_to_words(&[0, 1, 2, 3], &words(&["abcd", "efgh"])))
            .unwrap();

        let grids = encoder.solve(10).unwrap();
        assert_eq!(grids.len(), 2);
        assert_ne!(grids[0], grids[1]);
    }

    #[test]
    fn test_statistics_track_growth() {
        let model = GridModel::new(2);
        let mut encoder = SatEncoder::new(2).unwrap();

        let before = encoder.statistics();
        assert_eq!(before.variables.cell_bit_variables, 4 * CELL_BITS);

        encoder
            .assert_formula(&model.constrain_seq_to_word(&[0, 1, 2, 3], "abc"))
            .unwrap();

        let after = encoder.statistics();
        assert!(after.clause_count > before.clause_count);
        assert!(after.variables.auxiliary_variables > 0);
    }
}
