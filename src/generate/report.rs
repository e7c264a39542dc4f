//! Result reporting for check and generation runs

use crate::puzzle::Board;
use serde::{Deserialize, Serialize};

/// Outcome of a single satisfiability check of a puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub grid_size: usize,
    pub clue_count: usize,
    pub variables: usize,
    pub total_clauses: usize,
    pub satisfiable: bool,
    /// Final solver output line, verbatim
    pub final_line: String,
    pub solve_time_ms: u64,
}

/// Outcome of a puzzle generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub grid_size: usize,
    pub initial_clues: usize,
    pub final_clues: usize,
    pub cells_removed: usize,
    pub failed_removals: usize,
    pub solver_invocations: usize,
    pub total_solve_time_ms: u64,
    /// RNG seed used for the removal order, when one was configured
    pub seed: Option<u64>,
    /// The generated puzzle
    pub board: Board,
}

impl CheckReport {
    /// Serialize the report to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl GenerationReport {
    /// Serialize the report to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Check Report:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "  Clues: {}", self.clue_count)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clauses: {}", self.total_clauses)?;
        writeln!(f, "  Result: {}", self.final_line)?;
        writeln!(f, "  Solve time: {}ms", self.solve_time_ms)?;
        Ok(())
    }
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Generation Report:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "  Clues: {} → {}", self.initial_clues, self.final_clues)?;
        writeln!(f, "  Cells removed: {}", self.cells_removed)?;
        writeln!(f, "  Failed removals: {}", self.failed_removals)?;
        writeln!(f, "  Solver invocations: {}", self.solver_invocations)?;
        writeln!(f, "  Total solve time: {}ms", self.total_solve_time_ms)?;
        if let Some(seed) = self.seed {
            writeln!(f, "  Seed: {}", seed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_report_json_round_trip() {
        let report = GenerationReport {
            grid_size: 4,
            initial_clues: 16,
            final_clues: 10,
            cells_removed: 6,
            failed_removals: 1,
            solver_invocations: 8,
            total_solve_time_ms: 120,
            seed: Some(42),
            board: Board::new(4).unwrap(),
        };

        let json = report.to_json().unwrap();
        let parsed: GenerationReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.final_clues, 10);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.board.size, 4);
    }

    #[test]
    fn test_check_report_display() {
        let report = CheckReport {
            grid_size: 9,
            clue_count: 30,
            variables: 729,
            total_clauses: 8859,
            satisfiable: true,
            final_line: "SATISFIABLE".to_string(),
            solve_time_ms: 15,
        };

        let text = report.to_string();
        assert!(text.contains("9x9"));
        assert!(text.contains("SATISFIABLE"));
        assert!(text.contains("729"));
    }
}
