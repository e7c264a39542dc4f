//! Variable numbering for the Sudoku SAT encoding

use anyhow::Result;

/// Maps (row, column, digit) triples to SAT variable IDs and back.
///
/// Rows, columns and digits are 1-based; the mapping is the closed form
/// `(row - 1) * n^2 + (column - 1) * n + digit`, yielding variables
/// 1 through n^3 with no gaps.
#[derive(Debug, Clone)]
pub struct VariableMap {
    size: usize,
}

impl VariableMap {
    /// Create a variable map for a grid of side length `size`
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Variable ID asserting that the cell at (row, column) holds digit
    pub fn variable(&self, row: usize, column: usize, digit: usize) -> Result<i32> {
        self.validate(row, column, digit)?;
        let n = self.size;
        Ok(((row - 1) * n * n + (column - 1) * n + digit) as i32)
    }

    /// Recover the (row, column, digit) triple a variable ID stands for
    pub fn decode(&self, variable: i32) -> Result<(usize, usize, usize)> {
        if variable < 1 || variable as usize > self.variable_count() {
            anyhow::bail!("Variable {} out of range 1..={}", variable, self.variable_count());
        }

        let n = self.size;
        let v = variable as usize - 1;
        let digit = v % n + 1;
        let column = (v / n) % n + 1;
        let row = v / (n * n) + 1;
        Ok((row, column, digit))
    }

    /// Total number of variables in the encoding (n^3)
    pub fn variable_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Grid side length
    pub fn size(&self) -> usize {
        self.size
    }

    fn validate(&self, row: usize, column: usize, digit: usize) -> Result<()> {
        if row == 0 || row > self.size {
            anyhow::bail!("Row {} out of bounds 1..={}", row, self.size);
        }
        if column == 0 || column > self.size {
            anyhow::bail!("Column {} out of bounds 1..={}", column, self.size);
        }
        if digit == 0 || digit > self.size {
            anyhow::bail!("Digit {} out of bounds 1..={}", digit, self.size);
        }
        Ok(())
    }
}
