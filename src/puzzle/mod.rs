//! Sudoku board core functionality

pub mod board;
pub mod io;
pub mod rules;

pub use board::Board;
pub use io::{load_board_from_file, save_board_to_file, create_example_boards};
pub use rules::{SudokuRules, RuleViolation};
