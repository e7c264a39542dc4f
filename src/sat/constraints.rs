//! Constraint generation for the Sudoku SAT encoding

use super::VariableMap;
use crate::puzzle::Board;
use anyhow::Result;
use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }
}

/// Generates the CNF clauses expressing the Sudoku rules for one grid size
pub struct ConstraintGenerator {
    variables: VariableMap,
    size: usize,
    box_size: usize,
}

impl ConstraintGenerator {
    /// Create a constraint generator for a grid of side length `size`
    pub fn new(size: usize) -> Result<Self> {
        let box_size = crate::puzzle::board::box_size_for(size)?;

        Ok(Self {
            variables: VariableMap::new(size),
            size,
            box_size,
        })
    }

    /// Generate the base constraints encoding the Sudoku rules.
    ///
    /// Four clause families: each cell holds at least one digit, and each
    /// digit appears at most once per row, per column and per box. The
    /// result has exactly `base_clause_count(size)` clauses.
    pub fn generate_base_constraints(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(base_clause_count(self.size));

        clauses.extend(self.cell_constraints()?);
        clauses.extend(self.row_exclusivity_constraints()?);
        clauses.extend(self.column_exclusivity_constraints()?);
        clauses.extend(self.box_exclusivity_constraints()?);

        Ok(clauses)
    }

    /// Each cell contains at least one digit
    fn cell_constraints(&self) -> Result<Vec<Clause>> {
        let n = self.size;
        let mut clauses = Vec::with_capacity(n * n);

        for row in 1..=n {
            for column in 1..=n {
                let literals = (1..=n)
                    .map(|digit| self.variables.variable(row, column, digit))
                    .collect::<Result<Vec<i32>>>()?;
                clauses.push(Clause::new(literals));
            }
        }

        Ok(clauses)
    }

    /// Each digit appears at most once in each row
    fn row_exclusivity_constraints(&self) -> Result<Vec<Clause>> {
        let n = self.size;
        let mut clauses = Vec::new();

        for row in 1..=n {
            for digit in 1..=n {
                for (col1, col2) in (1..=n).tuple_combinations() {
                    clauses.push(Clause::binary(
                        -self.variables.variable(row, col1, digit)?,
                        -self.variables.variable(row, col2, digit)?,
                    ));
                }
            }
        }

        Ok(clauses)
    }

    /// Each digit appears at most once in each column
    fn column_exclusivity_constraints(&self) -> Result<Vec<Clause>> {
        let n = self.size;
        let mut clauses = Vec::new();

        for column in 1..=n {
            for digit in 1..=n {
                for (row1, row2) in (1..=n).tuple_combinations() {
                    clauses.push(Clause::binary(
                        -self.variables.variable(row1, column, digit)?,
                        -self.variables.variable(row2, column, digit)?,
                    ));
                }
            }
        }

        Ok(clauses)
    }

    /// Each digit appears at most once in each box
    fn box_exclusivity_constraints(&self) -> Result<Vec<Clause>> {
        let n = self.size;
        let b = self.box_size;
        let mut clauses = Vec::new();

        for box_row in 0..b {
            for box_col in 0..b {
                // 1-based coordinates of every cell in this box
                let cells: Vec<(usize, usize)> = (0..n)
                    .map(|pos| (box_row * b + pos / b + 1, box_col * b + pos % b + 1))
                    .collect();

                for digit in 1..=n {
                    for (&(r1, c1), &(r2, c2)) in cells.iter().tuple_combinations() {
                        clauses.push(Clause::binary(
                            -self.variables.variable(r1, c1, digit)?,
                            -self.variables.variable(r2, c2, digit)?,
                        ));
                    }
                }
            }
        }

        Ok(clauses)
    }

    /// Generate one unit clause per non-empty cell of the board.
    ///
    /// A positive cell value asserts the digit, a negative value (a removal
    /// under test) asserts its negation.
    pub fn clue_constraints(&self, board: &Board) -> Result<Vec<Clause>> {
        if board.size != self.size {
            anyhow::bail!("Board size {} doesn't match generator size {}",
                         board.size, self.size);
        }

        let mut clauses = Vec::new();

        for (row, column, value) in board.filled_cells() {
            let digit = value.unsigned_abs() as usize;
            let variable = self.variables.variable(row + 1, column + 1, digit)?;
            let literal = if value > 0 { variable } else { -variable };
            clauses.push(Clause::unit(literal));
        }

        Ok(clauses)
    }

    /// The variable map backing this generator
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }
}

/// Closed-form count of the base constraints for a grid of side length `n`:
/// `n^2` cell clauses plus `3 * n^2 * C(n, 2)` pairwise exclusivity clauses.
pub fn base_clause_count(n: usize) -> usize {
    let pairs = n * (n - 1) / 2;
    n * n + 3 * n * n * pairs
}
