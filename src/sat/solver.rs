//! External SAT solver invocation

use crate::config::SolverConfig;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

/// Runs an external SAT solver binary on DIMACS files and classifies the
/// final line of its standard output.
///
/// SAT solvers conventionally exit with status 10 (satisfiable) or
/// 20 (unsatisfiable), so a non-zero exit status is not treated as a
/// failure; only failing to launch the binary or producing an
/// unrecognizable final line is.
pub struct ExternalSolver {
    command: String,
    extra_args: Vec<String>,
    satisfiable_token: String,
    unsatisfiable_token: String,
    invocations: usize,
    total_solve_time: Duration,
}

/// Verdict of a single solver invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverOutcome {
    Satisfiable,
    Unsatisfiable,
}

/// Result of a single solver invocation
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub outcome: SolverOutcome,
    pub solve_time: Duration,
    pub final_line: String,
}

impl SolverOutcome {
    /// Whether this outcome is satisfiable
    pub fn is_satisfiable(self) -> bool {
        self == SolverOutcome::Satisfiable
    }
}

impl ExternalSolver {
    /// Create a solver from its configuration section
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            command: config.command.clone(),
            extra_args: config.extra_args.clone(),
            satisfiable_token: config.satisfiable_token.clone(),
            unsatisfiable_token: config.unsatisfiable_token.clone(),
            invocations: 0,
            total_solve_time: Duration::ZERO,
        }
    }

    /// Run the solver on a CNF file and classify its final output line
    pub fn solve<P: AsRef<Path>>(&mut self, cnf_path: P) -> Result<SolverRun> {
        let start_time = Instant::now();

        let output = Command::new(&self.command)
            .args(&self.extra_args)
            .arg(cnf_path.as_ref())
            .output()
            .with_context(|| format!("Failed to run solver command '{}'", self.command))?;

        let solve_time = start_time.elapsed();
        self.invocations += 1;
        self.total_solve_time += solve_time;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let final_line = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .with_context(|| format!("Solver '{}' produced no output", self.command))?;

        let outcome = if final_line == self.satisfiable_token {
            SolverOutcome::Satisfiable
        } else if final_line == self.unsatisfiable_token {
            SolverOutcome::Unsatisfiable
        } else {
            anyhow::bail!(
                "Unrecognized solver output line '{}' (expected '{}' or '{}')",
                final_line,
                self.satisfiable_token,
                self.unsatisfiable_token
            );
        };

        Ok(SolverRun {
            outcome,
            solve_time,
            final_line,
        })
    }

    /// How many times the solver has been invoked
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Cumulative wall-clock time spent in the solver
    pub fn total_solve_time(&self) -> Duration {
        self.total_solve_time
    }
}
