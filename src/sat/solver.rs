//! SAT solver integration using CaDiCaL

use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A SAT clause: a disjunction of literals (positive for a variable,
/// negative for its negation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>,
}

impl Clause {
    /// Create a new clause from literals.
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal).
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals).
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if the clause is empty (unsatisfiable).
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// SAT solver wrapper for CaDiCaL.
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    timeout: Option<Duration>,
}

/// Result of SAT solving: a satisfying assignment.
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SatSolver {
    /// Create a new SAT solver instance.
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            timeout: None,
        }
    }

    /// Set the solving timeout. CaDiCaL exposes no direct timeout hook in
    /// this binding, so the limit is advisory; callers needing a hard
    /// bound must impose it outside the solve call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Add clauses to the solver.
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Solve and return the first satisfying assignment, if any.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let result = self.solver.solve();
        let solve_time = start_time.elapsed();

        if result == Some(true) {
            let assignment = self.extract_assignment();
            Ok(Some(SolverSolution {
                assignment,
                solve_time,
            }))
        } else {
            Ok(None)
        }
    }

    /// Enumerate up to `max_solutions` satisfying assignments. After each
    /// model, a blocking clause over `blocking_vars` forbids repeating the
    /// same assignment to those variables, so successive models differ on
    /// them specifically.
    pub fn solve_multiple(
        &mut self,
        max_solutions: usize,
        blocking_vars: &[i32],
    ) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();
        let start_time = Instant::now();

        for _ in 0..max_solutions {
            if self.solver.solve() != Some(true) {
                break;
            }

            let assignment = self.extract_assignment();
            let blocking: Vec<i32> = blocking_vars
                .iter()
                .filter_map(|&var| {
                    assignment
                        .get(&var)
                        .map(|&value| if value { -var } else { var })
                })
                .collect();

            solutions.push(SolverSolution {
                assignment,
                solve_time: start_time.elapsed(),
            });

            if blocking.is_empty() {
                break;
            }
            self.add_clause(&Clause::new(blocking))?;
        }

        Ok(solutions)
    }

    /// Extract the variable assignment from the solver.
    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    /// Get the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Get the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solution:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Variables assigned: {}", self.assignment.len())?;
        Ok(())
    }
}
