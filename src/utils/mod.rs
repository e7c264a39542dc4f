//! Shared display helpers

pub mod display;

pub use display::{PuzzleFormatter, ColorOutput};
