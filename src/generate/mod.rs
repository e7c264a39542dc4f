//! Puzzle checking and generation built on the SAT pipeline

pub mod problem;
pub mod report;

pub use problem::PuzzleProblem;
pub use report::{CheckReport, GenerationReport};
