//! Puzzle checking and uniqueness-preserving generation

use super::{CheckReport, GenerationReport};
use crate::config::Settings;
use crate::puzzle::{load_board_from_file, Board};
use crate::sat::SatEncoder;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A Sudoku board together with the encoder that checks it.
///
/// Supports a one-shot satisfiability check and the randomized removal
/// loop: a clue is tentatively negated (asserting the cell does NOT hold
/// that digit) and the formula re-solved. A satisfiable formula means some
/// other digit fits the cell, so removing the clue would lose uniqueness
/// and it is restored; an unsatisfiable one means the digit is forced and
/// the cell can be blanked.
pub struct PuzzleProblem {
    settings: Settings,
    board: Board,
    encoder: SatEncoder,
}

impl PuzzleProblem {
    /// Create a problem by loading the board named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let board = load_board_from_file(&settings.puzzle.puzzle_file)
            .context("Failed to load puzzle file")?;
        Self::with_board(settings, board)
    }

    /// Create a problem with an explicit board (useful for testing)
    pub fn with_board(settings: Settings, board: Board) -> Result<Self> {
        if board.size != settings.puzzle.grid_size {
            anyhow::bail!("Board size {} doesn't match configured grid size {}",
                         board.size, settings.puzzle.grid_size);
        }

        let encoder = SatEncoder::new(&settings)?;

        Ok(Self {
            settings,
            board,
            encoder,
        })
    }

    /// Encode the board, run the solver once and report the verdict
    pub fn check(&mut self) -> Result<CheckReport> {
        let statistics = self.encoder.statistics(&self.board)?;
        let run = self.encoder.check(&self.board)?;

        Ok(CheckReport {
            grid_size: self.board.size,
            clue_count: self.board.clue_count(),
            variables: statistics.variables,
            total_clauses: statistics.total_clauses,
            satisfiable: run.outcome.is_satisfiable(),
            final_line: run.final_line,
            solve_time_ms: run.solve_time.as_millis() as u64,
        })
    }

    /// Run the randomized removal loop and return the generated puzzle.
    ///
    /// The input board must be satisfiable to begin with. Cells are visited
    /// in a shuffled order; the loop stops once the configured number of
    /// removal attempts has failed.
    pub fn generate(&mut self) -> Result<GenerationReport> {
        let initial = self.encoder.check(&self.board)?;
        if !initial.outcome.is_satisfiable() {
            anyhow::bail!("Input board is not satisfiable; cannot generate a puzzle from it");
        }

        let initial_clues = self.board.clue_count();
        let max_failed = self.settings.generation.max_failed_removals;

        let mut cells_removed = 0;
        let mut failed_removals = 0;

        for (row, col) in self.removal_order() {
            if self.board.get(row, col) == 0 {
                continue;
            }

            self.board.negate(row, col)?;
            let run = self.encoder.check(&self.board)?;

            if run.outcome.is_satisfiable() {
                // Some other digit fits this cell; the clue is load-bearing
                self.board.negate(row, col)?;
                failed_removals += 1;
                if failed_removals >= max_failed {
                    break;
                }
            } else {
                self.board.set(row, col, 0)?;
                cells_removed += 1;
            }
        }

        Ok(GenerationReport {
            grid_size: self.board.size,
            initial_clues,
            final_clues: self.board.clue_count(),
            cells_removed,
            failed_removals,
            solver_invocations: self.encoder.solver_invocations(),
            total_solve_time_ms: self.encoder.total_solve_time().as_millis() as u64,
            seed: self.settings.generation.seed,
            board: self.board.clone(),
        })
    }

    /// Every cell coordinate in a shuffled order, seeded when configured
    pub fn removal_order(&self) -> Vec<(usize, usize)> {
        let n = self.board.size;
        let mut cells: Vec<(usize, usize)> = (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .collect();

        let mut rng = match self.settings.generation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        cells.shuffle(&mut rng);
        cells
    }

    /// The current board state
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Encoding statistics for the current board
    pub fn encoding_statistics(&self) -> Result<crate::sat::EncodingStatistics> {
        self.encoder.statistics(&self.board)
    }
}
