//! Main CLI application for the Sudoku SAT encoder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use sudoku_sat::{
    config::{CliOverrides, Settings},
    generate::PuzzleProblem,
    puzzle::{create_example_boards, load_board_from_file, save_board_to_file, SudokuRules},
    sat::SatEncoder,
    utils::{ColorOutput, PuzzleFormatter},
};

#[derive(Parser)]
#[command(name = "sudoku_sat")]
#[command(about = "Sudoku SAT encoder and puzzle generator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a puzzle for satisfiability with the external solver
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Solver command (overrides config)
        #[arg(short, long)]
        solver: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a puzzle by randomized uniqueness-preserving clue removal
    Generate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Solved board to start from (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Solver command (overrides config)
        #[arg(short, long)]
        solver: Option<String>,

        /// RNG seed for a reproducible removal order (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Failed removal budget before the loop stops (overrides config)
        #[arg(short, long)]
        max_failed: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the DIMACS CNF encoding of a puzzle without solving
    Encode {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// CNF output path (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a board against the Sudoku rules without a solver
    Validate {
        /// Board file to validate
        #[arg(short, long)]
        puzzle: PathBuf,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            config,
            puzzle,
            solver,
            verbose,
        } => check_command(config, puzzle, solver, verbose),
        Commands::Generate {
            config,
            puzzle,
            solver,
            seed,
            max_failed,
            output,
            verbose,
        } => generate_command(config, puzzle, solver, seed, max_failed, output, verbose),
        Commands::Encode {
            config,
            puzzle,
            output,
        } => encode_command(config, puzzle, output),
        Commands::Validate { puzzle } => validate_command(puzzle),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn check_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    solver_command: Option<String>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🧩 Checking puzzle satisfiability"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file,
        solver_command,
        ..Default::default()
    });
    settings.validate().context("Configuration validation failed")?;

    let mut problem = PuzzleProblem::new(settings.clone())
        .context("Failed to create puzzle problem")?;

    if verbose {
        println!("Puzzle:");
        println!("{}", PuzzleFormatter::format_board(problem.board()));
        println!("{}", problem.encoding_statistics()?);
    }

    let report = problem.check().context("Satisfiability check failed")?;
    println!("{}", report);

    if report.satisfiable {
        println!("{}", ColorOutput::success("✅ Puzzle is satisfiable"));
    } else {
        println!("{}", ColorOutput::error("❌ Puzzle is not satisfiable"));
    }

    let report_path = PuzzleFormatter::save_check_report(
        &report,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save check report")?;
    println!("Report saved to {}", report_path.display());

    Ok(())
}

fn generate_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    solver_command: Option<String>,
    seed: Option<u64>,
    max_failed: Option<usize>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🧩 Generating puzzle by clue removal"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file,
        solver_command,
        seed,
        max_failed_removals: max_failed,
        output_dir,
    });
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Puzzle file: {}", settings.puzzle.puzzle_file.display());
        println!("  Solver: {}", settings.solver.command);
        println!("  Max failed removals: {}", settings.generation.max_failed_removals);
        if let Some(seed) = settings.generation.seed {
            println!("  Seed: {}", seed);
        }
        println!();
    }

    let start_time = Instant::now();
    let mut problem = PuzzleProblem::new(settings.clone())
        .context("Failed to create puzzle problem")?;

    println!("{}", ColorOutput::info("🧮 Running solver-guided removal loop..."));
    let report = problem.generate().context("Puzzle generation failed")?;
    let total_time = start_time.elapsed();

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Removed {} of {} clues in {:.3}s ({} solver calls)",
            report.cells_removed,
            report.initial_clues,
            total_time.as_secs_f64(),
            report.solver_invocations
        ))
    );

    println!("\n{}", report);
    println!("Generated puzzle:");
    println!("{}", PuzzleFormatter::format_board(&report.board));

    let report_path = PuzzleFormatter::save_generation_report(
        &report,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save generation report")?;
    println!("Report saved to {}", report_path.display());

    let puzzle_path = settings.output.output_directory.join("generated_puzzle.txt");
    save_board_to_file(&report.board, &puzzle_path)
        .context("Failed to save generated puzzle")?;
    println!("Puzzle saved to {}", puzzle_path.display());

    Ok(())
}

fn encode_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("{}", ColorOutput::info("📝 Encoding puzzle as DIMACS CNF"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file,
        ..Default::default()
    });
    settings.validate().context("Configuration validation failed")?;

    let board = load_board_from_file(&settings.puzzle.puzzle_file)
        .context("Failed to load puzzle file")?;

    let encoder = SatEncoder::new(&settings).context("Failed to create encoder")?;
    let cnf_path = output.unwrap_or_else(|| settings.output.cnf_file.clone());

    encoder.write_cnf_to(&board, &cnf_path)
        .context("Failed to write CNF file")?;

    println!("{}", encoder.statistics(&board)?);
    println!(
        "{}",
        ColorOutput::success(&format!("CNF written to {}", cnf_path.display()))
    );

    Ok(())
}

fn validate_command(puzzle_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating board against Sudoku rules"));

    let board = load_board_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load board from {}", puzzle_path.display()))?;

    println!("Board ({}x{}, {} clues):", board.size, board.size, board.clue_count());
    println!("{}", PuzzleFormatter::format_board(&board));

    let violations = SudokuRules::find_violations(&board);

    if violations.is_empty() {
        if SudokuRules::is_solved(&board) {
            println!("{}", ColorOutput::success("✅ Board is a valid complete solution"));
        } else {
            println!(
                "{}",
                ColorOutput::success("✅ No rule violations (board is incomplete)")
            );
        }
    } else {
        println!("{}", ColorOutput::error("❌ Board violates the Sudoku rules:"));
        for violation in &violations {
            println!("  - {}", violation);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/reports");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_boards(&input_dir).context("Failed to create example boards")?;
    println!("Created example boards in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // 4x4 configuration for quick experiments
    let mut small_config = Settings::default();
    small_config.puzzle.grid_size = 4;
    small_config.puzzle.puzzle_file = PathBuf::from("input/puzzles/solved_4x4.txt");
    small_config.to_file(&examples_dir.join("small_4x4.yaml"))?;

    // Reproducible generation with a larger removal budget
    let mut repro_config = Settings::default();
    repro_config.generation.seed = Some(42);
    repro_config.generation.max_failed_removals = 3;
    repro_config.to_file(&examples_dir.join("reproducible.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Make sure a SAT solver (e.g. minisat) is on your PATH");
    println!("2. Edit configuration files in {}", config_dir.display());
    println!("3. Run: cargo run -- generate --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "sudoku_sat",
            "generate",
            "--config",
            "test.yaml",
            "--seed",
            "42",
            "--max-failed",
            "3",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        let cli = Cli::try_parse_from(["sudoku_sat", "frobnicate"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/solved_9x9.txt").exists());
        assert!(temp_dir.path().join("config/examples/small_4x4.yaml").exists());
    }

    #[test]
    fn test_validate_command() {
        let temp_dir = tempdir().unwrap();
        let board_path = temp_dir.path().join("board.txt");
        std::fs::write(&board_path, "1,2,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n").unwrap();

        assert!(validate_command(board_path).is_ok());
        assert!(validate_command(temp_dir.path().join("missing.txt")).is_err());
    }
}
