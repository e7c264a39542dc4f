//! SAT encoding and external solver plumbing

pub mod variables;
pub mod constraints;
pub mod dimacs;
pub mod solver;
pub mod encoder;

pub use variables::VariableMap;
pub use constraints::{Clause, ConstraintGenerator, base_clause_count};
pub use dimacs::{render_dimacs, write_dimacs_file};
pub use solver::{ExternalSolver, SolverOutcome, SolverRun};
pub use encoder::{SatEncoder, EncodingStatistics};
