//! SAT variable allocation for the bit-vector cell encoding

use anyhow::Result;
use std::collections::HashMap;

/// Bits per cell value; the 27-value letter domain fits in 5 bits.
pub const CELL_BITS: usize = 5;

/// Types of named variables used in the encoding. Tseitin definition
/// variables are anonymous and allocated separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Bit `bit` (LSB = 0) of the value of cell `cell` (flat index).
    CellBit { cell: usize, bit: usize },
}

/// Manages SAT variables and their mapping to solver integers.
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Next available variable ID
    next_id: i32,
    /// Number of grid cells
    cell_count: usize,
    /// Anonymous Tseitin definition variables handed out so far
    auxiliary_count: usize,
}

impl VariableManager {
    /// Create a variable manager for `cell_count` grid cells.
    pub fn new(cell_count: usize) -> Self {
        Self {
            variable_map: HashMap::new(),
            next_id: 1, // SAT variables start from 1
            cell_count,
            auxiliary_count: 0,
        }
    }

    /// Get or create the variable ID for a named variable.
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        self.validate_variable(&var_type)?;

        let id = self.next_id;
        self.next_id += 1;
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    /// Variable ID for one bit of a cell's value.
    pub fn cell_bit(&mut self, cell: usize, bit: usize) -> Result<i32> {
        self.get_variable(VariableType::CellBit { cell, bit })
    }

    /// All bit variables of one cell, LSB first.
    pub fn cell_bits(&mut self, cell: usize) -> Result<Vec<i32>> {
        (0..CELL_BITS).map(|bit| self.cell_bit(cell, bit)).collect()
    }

    /// Bit variables of every cell, in flat-index order. Used for blocking
    /// clauses so enumerated solutions differ in grid content rather than
    /// in auxiliary variables.
    pub fn all_cell_bits(&mut self) -> Result<Vec<i32>> {
        let mut variables = Vec::with_capacity(self.cell_count * CELL_BITS);
        for cell in 0..self.cell_count {
            variables.extend(self.cell_bits(cell)?);
        }
        Ok(variables)
    }

    /// Allocate a fresh anonymous definition variable.
    pub fn auxiliary(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.auxiliary_count += 1;
        id
    }

    /// Total number of variables created so far.
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    /// Number of grid cells this manager allocates for.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    fn validate_variable(&self, var_type: &VariableType) -> Result<()> {
        match var_type {
            VariableType::CellBit { cell, bit } => {
                if *cell >= self.cell_count {
                    anyhow::bail!(
                        "cell index {} out of bounds (cell count: {})",
                        cell,
                        self.cell_count
                    );
                }
                if *bit >= CELL_BITS {
                    anyhow::bail!("bit index {} out of bounds (bits per cell: {})", bit, CELL_BITS);
                }
            }
        }
        Ok(())
    }

    /// Get statistics about variable usage.
    pub fn statistics(&self) -> VariableStatistics {
        VariableStatistics {
            total_variables: self.variable_count(),
            cell_bit_variables: self.variable_map.len(),
            auxiliary_variables: self.auxiliary_count,
        }
    }
}

/// Statistics about variable usage.
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub cell_bit_variables: usize,
    pub auxiliary_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Cell-bit variables: {}", self.cell_bit_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        Ok(())
    }
}
