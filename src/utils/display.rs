//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::generate::{CheckReport, GenerationReport};
use crate::puzzle::Board;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Formats boards and reports for console and file output
pub struct PuzzleFormatter;

impl PuzzleFormatter {
    /// Format a board with box separators, e.g. for 9x9:
    ///
    /// ```text
    /// 5 3 . | . 7 . | . . .
    /// ```
    pub fn format_board(board: &Board) -> String {
        let cell_width = if board.size > 9 { 2 } else { 1 };
        let mut output = String::new();
        let mut separator = String::new();

        for row in 0..board.size {
            let line = Self::format_row(board, row, cell_width);

            if row > 0 && row % board.box_size == 0 {
                if separator.is_empty() {
                    separator = line
                        .chars()
                        .map(|c| if c == '|' { '+' } else { '-' })
                        .collect();
                }
                output.push_str(&separator);
                output.push('\n');
            }

            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    fn format_row(board: &Board, row: usize, cell_width: usize) -> String {
        let mut line = String::new();
        for col in 0..board.size {
            if col > 0 {
                line.push(' ');
                if col % board.box_size == 0 {
                    line.push_str("| ");
                }
            }
            let value = board.get(row, col);
            if value == 0 {
                line.push_str(&format!("{:>width$}", ".", width = cell_width));
            } else {
                line.push_str(&format!("{:>width$}", value.abs(), width = cell_width));
            }
        }
        line
    }

    /// Save a check report to the output directory, returning the file path
    pub fn save_check_report<P: AsRef<Path>>(
        report: &CheckReport,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join("check_report.txt");
                std::fs::write(&path, report.to_string())?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join("check_report.json");
                std::fs::write(&path, report.to_json()?)?;
                path
            }
        };

        Ok(path)
    }

    /// Save a generation report to the output directory, returning the file path
    pub fn save_generation_report<P: AsRef<Path>>(
        report: &GenerationReport,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join("generation_report.txt");
                let mut content = report.to_string();
                content.push('\n');
                content.push_str(&Self::format_board(&report.board));
                std::fs::write(&path, content)?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join("generation_report.json");
                std::fs::write(&path, report.to_json()?)?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    fn enabled() -> bool {
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    fn paint(text: &str, code: u8) -> String {
        if Self::enabled() {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::paint(text, 32)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::paint(text, 31)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::paint(text, 33)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::paint(text, 34)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::io::parse_board_from_string;
    use tempfile::tempdir;

    #[test]
    fn test_board_formatting() {
        let board = parse_board_from_string("1,0,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n").unwrap();
        let formatted = PuzzleFormatter::format_board(&board);

        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 5); // 4 rows + 1 separator
        assert_eq!(lines[0], "1 . | 3 4");
        assert_eq!(lines[2], "----+----");

        // Separator aligns with the rows
        assert_eq!(lines[0].len(), lines[2].len());
    }

    #[test]
    fn test_save_check_report() {
        let temp_dir = tempdir().unwrap();
        let report = CheckReport {
            grid_size: 4,
            clue_count: 16,
            variables: 64,
            total_clauses: 320,
            satisfiable: true,
            final_line: "SATISFIABLE".to_string(),
            solve_time_ms: 3,
        };

        let text_path =
            PuzzleFormatter::save_check_report(&report, temp_dir.path(), &OutputFormat::Text)
                .unwrap();
        assert!(std::fs::read_to_string(&text_path)
            .unwrap()
            .contains("SATISFIABLE"));

        let json_path =
            PuzzleFormatter::save_check_report(&report, temp_dir.path(), &OutputFormat::Json)
                .unwrap();
        let parsed: CheckReport =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.variables, 64);
    }

    #[test]
    fn test_save_generation_report_text_includes_board() {
        let temp_dir = tempdir().unwrap();
        let board = parse_board_from_string("1,0,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n").unwrap();
        let report = GenerationReport {
            grid_size: 4,
            initial_clues: 16,
            final_clues: 15,
            cells_removed: 1,
            failed_removals: 1,
            solver_invocations: 3,
            total_solve_time_ms: 9,
            seed: None,
            board,
        };

        let path = PuzzleFormatter::save_generation_report(
            &report,
            temp_dir.path(),
            &OutputFormat::Text,
        )
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Cells removed: 1"));
        assert!(content.contains("1 . | 3 4"));
    }

    #[test]
    fn test_color_output() {
        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));

        let error = ColorOutput::error("bad");
        assert!(error.contains("bad"));
    }
}
