//! Sudoku rule checks, independent of the SAT encoding

use super::Board;
use std::fmt;

/// Sudoku rules engine used for validating boards without a solver.
///
/// Only positive cell values participate: empty cells and tentatively
/// removed values are ignored by the duplicate scans.
pub struct SudokuRules;

/// The unit of the grid in which a rule violation occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Row,
    Column,
    Box,
}

/// A digit appearing more than once inside a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub unit: UnitKind,
    pub unit_index: usize,
    pub digit: i32,
    pub positions: Vec<(usize, usize)>,
}

impl SudokuRules {
    /// Find every duplicate-digit violation on the board
    pub fn find_violations(board: &Board) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for i in 0..board.size {
            let row_cells: Vec<(usize, usize)> = (0..board.size).map(|c| (i, c)).collect();
            violations.extend(Self::unit_violations(board, UnitKind::Row, i, &row_cells));

            let col_cells: Vec<(usize, usize)> = (0..board.size).map(|r| (r, i)).collect();
            violations.extend(Self::unit_violations(board, UnitKind::Column, i, &col_cells));

            violations.extend(Self::unit_violations(
                board,
                UnitKind::Box,
                i,
                &Self::box_cells(board, i),
            ));
        }

        violations
    }

    /// Check whether no digit repeats in any row, column or box
    pub fn is_valid(board: &Board) -> bool {
        Self::find_violations(board).is_empty()
    }

    /// Check whether the board is a complete, rule-conforming solution
    pub fn is_solved(board: &Board) -> bool {
        board.is_complete() && Self::is_valid(board)
    }

    /// Cell coordinates of the box with the given index
    fn box_cells(board: &Board, box_index: usize) -> Vec<(usize, usize)> {
        let row_start = (box_index / board.box_size) * board.box_size;
        let col_start = (box_index % board.box_size) * board.box_size;

        let mut cells = Vec::with_capacity(board.size);
        for dr in 0..board.box_size {
            for dc in 0..board.box_size {
                cells.push((row_start + dr, col_start + dc));
            }
        }
        cells
    }

    /// Scan one unit for digits that appear at more than one position
    fn unit_violations(
        board: &Board,
        unit: UnitKind,
        unit_index: usize,
        cells: &[(usize, usize)],
    ) -> Vec<RuleViolation> {
        let mut positions_per_digit: Vec<Vec<(usize, usize)>> = vec![Vec::new(); board.size + 1];

        for &(row, col) in cells {
            let value = board.get(row, col);
            if value > 0 {
                positions_per_digit[value as usize].push((row, col));
            }
        }

        positions_per_digit
            .into_iter()
            .enumerate()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(digit, positions)| RuleViolation {
                unit,
                unit_index,
                digit: digit as i32,
                positions,
            })
            .collect()
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit_name = match self.unit {
            UnitKind::Row => "row",
            UnitKind::Column => "column",
            UnitKind::Box => "box",
        };
        write!(
            f,
            "digit {} appears {} times in {} {} at {:?}",
            self.digit,
            self.positions.len(),
            unit_name,
            self.unit_index,
            self.positions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::io::parse_board_from_string;

    fn solved_4x4() -> Board {
        parse_board_from_string("1,2,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n").unwrap()
    }

    #[test]
    fn test_solved_board_is_valid() {
        let board = solved_4x4();
        assert!(SudokuRules::is_valid(&board));
        assert!(SudokuRules::is_solved(&board));
    }

    #[test]
    fn test_row_duplicate_detected() {
        let mut board = solved_4x4();
        board.set(0, 1, 1).unwrap(); // Row 0 now holds two 1s

        let violations = SudokuRules::find_violations(&board);
        assert!(!violations.is_empty());
        assert!(violations
            .iter()
            .any(|v| v.unit == UnitKind::Row && v.unit_index == 0 && v.digit == 1));
        assert!(!SudokuRules::is_valid(&board));
    }

    #[test]
    fn test_column_duplicate_detected() {
        let mut board = Board::new(4).unwrap();
        board.set(0, 2, 3).unwrap();
        board.set(3, 2, 3).unwrap();

        let violations = SudokuRules::find_violations(&board);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].unit, UnitKind::Column);
        assert_eq!(violations[0].unit_index, 2);
        assert_eq!(violations[0].positions, vec![(0, 2), (3, 2)]);
    }

    #[test]
    fn test_box_duplicate_detected() {
        let mut board = Board::new(9).unwrap();
        board.set(0, 0, 5).unwrap();
        board.set(2, 2, 5).unwrap(); // Same 3x3 box, different row and column

        let violations = SudokuRules::find_violations(&board);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].unit, UnitKind::Box);
        assert_eq!(violations[0].unit_index, 0);
    }

    #[test]
    fn test_partial_board_without_duplicates_is_valid() {
        let mut board = Board::new(9).unwrap();
        board.set(0, 0, 5).unwrap();
        board.set(4, 4, 5).unwrap();
        board.set(8, 8, 5).unwrap();

        assert!(SudokuRules::is_valid(&board));
        assert!(!SudokuRules::is_solved(&board)); // Valid but incomplete
    }

    #[test]
    fn test_tentative_values_are_ignored() {
        let mut board = solved_4x4();
        board.set(0, 1, 1).unwrap();
        assert!(!SudokuRules::is_valid(&board));

        // Marking the duplicate as tentatively removed clears the violation
        board.negate(0, 1).unwrap();
        assert!(SudokuRules::is_valid(&board));
    }
}
