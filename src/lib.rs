//! Sudoku puzzles as SAT problems
//!
//! This library encodes Sudoku grids of any perfect-square size as DIMACS
//! CNF formulas, hands them to an external SAT solver binary, and uses the
//! resulting verdicts to check puzzles and to generate new ones by
//! uniqueness-preserving clue removal.

pub mod config;
pub mod puzzle;
pub mod sat;
pub mod generate;
pub mod utils;

pub use config::Settings;
pub use puzzle::Board;
pub use generate::{PuzzleProblem, CheckReport, GenerationReport};

use anyhow::Result;

/// Check the configured puzzle for satisfiability
pub fn check_puzzle(settings: Settings) -> Result<CheckReport> {
    let mut problem = PuzzleProblem::new(settings)?;
    problem.check()
}

/// Generate a puzzle from the configured board by randomized clue removal
pub fn generate_puzzle(settings: Settings) -> Result<GenerationReport> {
    let mut problem = PuzzleProblem::new(settings)?;
    problem.generate()
}
