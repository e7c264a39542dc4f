//! Configuration settings for the Sudoku SAT encoder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub solver: SolverConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Side length of the grid; must be a perfect square (4, 9, 16, ...)
    pub grid_size: usize,
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Name or path of the external SAT solver binary
    pub command: String,
    /// Extra arguments placed before the CNF file path
    pub extra_args: Vec<String>,
    /// Final output line that signals a satisfiable formula
    pub satisfiable_token: String,
    /// Final output line that signals an unsatisfiable formula
    pub unsatisfiable_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// How many failed removal attempts are tolerated before the loop stops
    pub max_failed_removals: usize,
    /// RNG seed for a reproducible removal order
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Scratch CNF file handed to the solver, overwritten per invocation
    pub cnf_file: PathBuf,
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig {
                grid_size: 9,
                puzzle_file: PathBuf::from("input/puzzles/solved_9x9.txt"),
            },
            solver: SolverConfig {
                command: "minisat".to_string(),
                extra_args: Vec::new(),
                satisfiable_token: "SATISFIABLE".to_string(),
                unsatisfiable_token: "UNSATISFIABLE".to_string(),
            },
            generation: GenerationConfig {
                max_failed_removals: 1,
                seed: None,
            },
            output: OutputConfig {
                cnf_file: PathBuf::from("output/sudoku.cnf"),
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/reports"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let n = self.puzzle.grid_size;
        let root = (n as f64).sqrt() as usize;
        if n < 4 || root * root != n {
            anyhow::bail!("Grid size {} is not a perfect square of at least 4", n);
        }

        if self.solver.command.trim().is_empty() {
            anyhow::bail!("Solver command must not be empty");
        }

        if self.solver.satisfiable_token == self.solver.unsatisfiable_token {
            anyhow::bail!("Satisfiable and unsatisfiable tokens must differ");
        }

        if self.generation.max_failed_removals == 0 {
            anyhow::bail!("Maximum failed removals must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.puzzle.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref command) = cli_overrides.solver_command {
            self.solver.command = command.clone();
        }
        if let Some(max_failed) = cli_overrides.max_failed_removals {
            self.generation.max_failed_removals = max_failed;
        }
        if let Some(seed) = cli_overrides.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub solver_command: Option<String>,
    pub max_failed_removals: Option<usize>,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.puzzle.grid_size, 9);
        assert_eq!(settings.generation.max_failed_removals, 1);
    }

    #[test]
    fn test_grid_size_validation() {
        let mut settings = Settings::default();

        settings.puzzle.grid_size = 4;
        assert!(settings.validate().is_ok());

        settings.puzzle.grid_size = 16;
        assert!(settings.validate().is_ok());

        settings.puzzle.grid_size = 6;
        assert!(settings.validate().is_err());

        settings.puzzle.grid_size = 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_solver_validation() {
        let mut settings = Settings::default();

        settings.solver.command = "  ".to_string();
        assert!(settings.validate().is_err());

        settings.solver.command = "minisat".to_string();
        settings.solver.unsatisfiable_token = "SATISFIABLE".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.puzzle.grid_size = 4;
        settings.generation.seed = Some(42);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.puzzle.grid_size, 4);
        assert_eq!(loaded.generation.seed, Some(42));
        assert_eq!(loaded.solver.command, "minisat");
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_file: Some(PathBuf::from("custom.txt")),
            solver_command: Some("kissat".to_string()),
            max_failed_removals: Some(5),
            seed: Some(7),
            output_dir: None,
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.puzzle.puzzle_file, PathBuf::from("custom.txt"));
        assert_eq!(settings.solver.command, "kissat");
        assert_eq!(settings.generation.max_failed_removals, 5);
        assert_eq!(settings.generation.seed, Some(7));
        assert_eq!(settings.output.output_directory, PathBuf::from("output/reports"));
    }
}
