//! Encode-and-solve orchestration for Sudoku boards

use super::{write_dimacs_file, Clause, ConstraintGenerator, ExternalSolver, SolverRun};
use crate::config::Settings;
use crate::puzzle::Board;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Ties the pipeline together: base constraints are generated once per grid
/// size, then each board check appends its clue clauses, rewrites the
/// scratch DIMACS file and invokes the external solver.
pub struct SatEncoder {
    generator: ConstraintGenerator,
    base_clauses: Vec<Clause>,
    solver: ExternalSolver,
    cnf_path: PathBuf,
    size: usize,
}

/// Statistics about the SAT encoding of one board
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub grid_size: usize,
    pub variables: usize,
    pub base_clauses: usize,
    pub clue_clauses: usize,
    pub total_clauses: usize,
}

impl SatEncoder {
    /// Create an encoder for the grid size and solver named in the settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let size = settings.puzzle.grid_size;
        let generator = ConstraintGenerator::new(size)
            .context("Failed to create constraint generator")?;
        let base_clauses = generator
            .generate_base_constraints()
            .context("Failed to generate base constraints")?;

        Ok(Self {
            generator,
            base_clauses,
            solver: ExternalSolver::from_config(&settings.solver),
            cnf_path: settings.output.cnf_file.clone(),
            size,
        })
    }

    /// Encode the board and ask the external solver for a verdict
    pub fn check(&mut self, board: &Board) -> Result<SolverRun> {
        let cnf_path = self.cnf_path.clone();
        self.write_cnf_to(board, &cnf_path)?;
        self.solver
            .solve(&self.cnf_path)
            .context("SAT solver invocation failed")
    }

    /// Write the DIMACS encoding of the board to an arbitrary path
    pub fn write_cnf_to<P: AsRef<Path>>(&self, board: &Board, path: P) -> Result<()> {
        let clauses = self.all_clauses(board)?;
        write_dimacs_file(path, &clauses, self.generator.variables().variable_count())
    }

    /// Base constraints followed by the board's clue clauses
    fn all_clauses(&self, board: &Board) -> Result<Vec<Clause>> {
        let clues = self
            .generator
            .clue_constraints(board)
            .context("Failed to generate clue constraints")?;

        let mut clauses = self.base_clauses.clone();
        clauses.extend(clues);
        Ok(clauses)
    }

    /// Get encoding statistics for a board
    pub fn statistics(&self, board: &Board) -> Result<EncodingStatistics> {
        let clue_clauses = self.generator.clue_constraints(board)?.len();

        Ok(EncodingStatistics {
            grid_size: self.size,
            variables: self.generator.variables().variable_count(),
            base_clauses: self.base_clauses.len(),
            clue_clauses,
            total_clauses: self.base_clauses.len() + clue_clauses,
        })
    }

    /// How many times the external solver has been invoked
    pub fn solver_invocations(&self) -> usize {
        self.solver.invocations()
    }

    /// Cumulative wall-clock time spent in the external solver
    pub fn total_solve_time(&self) -> std::time::Duration {
        self.solver.total_solve_time()
    }
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Base clauses: {}", self.base_clauses)?;
        writeln!(f, "  Clue clauses: {}", self.clue_clauses)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}
