//! Configuration management for the Sudoku SAT encoder

pub mod settings;

pub use settings::{
    Settings, PuzzleConfig, SolverConfig, GenerationConfig, OutputConfig,
    OutputFormat, CliOverrides,
};
