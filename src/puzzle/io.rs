//! File I/O operations for Sudoku boards

use super::Board;
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// Errors raised while parsing a board file
#[derive(Debug, Error)]
pub enum BoardParseError {
    #[error("board file is empty or contains no valid rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) holds '{token}' which is not an integer")]
    InvalidCell {
        row: usize,
        col: usize,
        token: String,
    },
}

/// Load a board from a comma-separated text file, one row per line
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_board_from_string(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a board from its comma-separated string representation
pub fn parse_board_from_string(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(BoardParseError::Empty.into());
    }

    let size = lines.len();
    let mut rows = Vec::with_capacity(size);

    for (row_idx, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split(',').map(|t| t.trim()).collect();
        if tokens.len() != size {
            return Err(BoardParseError::RaggedRow {
                row: row_idx,
                found: tokens.len(),
                expected: size,
            }
            .into());
        }

        let mut row = Vec::with_capacity(size);
        for (col_idx, token) in tokens.iter().enumerate() {
            let value: i32 = token.parse().map_err(|_| BoardParseError::InvalidCell {
                row: row_idx,
                col: col_idx,
                token: (*token).to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    Board::from_rows(rows)
}

/// Save a board to a comma-separated text file
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    let content = board_to_string(board);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a board to its comma-separated string representation
pub fn board_to_string(board: &Board) -> String {
    let mut result = String::with_capacity(board.size * board.size * 2);

    for row in 0..board.size {
        for col in 0..board.size {
            if col > 0 {
                result.push(',');
            }
            result.push_str(&board.get(row, col).to_string());
        }
        result.push('\n');
    }

    result
}

/// Create example board files for the setup command
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let solved_9x9 = "\
5,3,4,6,7,8,9,1,2
6,7,2,1,9,5,3,4,8
1,9,8,3,4,2,5,6,7
8,5,9,7,6,1,4,2,3
4,2,6,8,5,3,7,9,1
7,1,3,9,2,4,8,5,6
9,6,1,5,3,7,2,8,4
2,8,7,4,1,9,6,3,5
3,4,5,2,8,6,1,7,9
";
    std::fs::write(dir.join("solved_9x9.txt"), solved_9x9)
        .context("Failed to write solved_9x9.txt")?;

    let puzzle_9x9 = "\
5,3,0,0,7,0,0,0,0
6,0,0,1,9,5,0,0,0
0,9,8,0,0,0,0,6,0
8,0,0,0,6,0,0,0,3
4,0,0,8,0,3,0,0,1
7,0,0,0,2,0,0,0,6
0,6,0,0,0,0,2,8,0
0,0,0,4,1,9,0,0,5
0,0,0,0,8,0,0,7,9
";
    std::fs::write(dir.join("puzzle_9x9.txt"), puzzle_9x9)
        .context("Failed to write puzzle_9x9.txt")?;

    let solved_4x4 = "\
1,2,3,4
3,4,1,2
2,1,4,3
4,3,2,1
";
    std::fs::write(dir.join("solved_4x4.txt"), solved_4x4)
        .context("Failed to write solved_4x4.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_board_from_string() {
        let content = "1,2,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n";
        let board = parse_board_from_string(content).unwrap();

        assert_eq!(board.size, 4);
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(3, 3), 1);
        assert!(board.is_complete());
    }

    #[test]
    fn test_parse_with_empty_cells_and_whitespace() {
        let content = " 1, 0,3,4 \n3,4,0,2\n\n2,1,4,3\n4,3,2,0\n";
        let board = parse_board_from_string(content).unwrap();

        assert_eq!(board.size, 4);
        assert_eq!(board.empty_count(), 3);
        assert_eq!(board.get(0, 1), 0);
    }

    #[test]
    fn test_board_to_string_round_trip() {
        let content = "1,0,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,0\n";
        let board = parse_board_from_string(content).unwrap();
        assert_eq!(board_to_string(&board), content);
    }

    #[test]
    fn test_invalid_input() {
        // Non-integer cell
        assert!(parse_board_from_string("1,2,3,4\n3,x,1,2\n2,1,4,3\n4,3,2,1\n").is_err());

        // Ragged rows
        assert!(parse_board_from_string("1,2,3,4\n3,4\n2,1,4,3\n4,3,2,1\n").is_err());

        // Empty content
        assert!(parse_board_from_string("").is_err());

        // Not a perfect-square size
        assert!(parse_board_from_string("1,2\n2,1\n").is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_board.txt");

        let content = "1,2,3,4\n3,4,1,2\n2,1,4,3\n4,3,2,1\n";
        let original = parse_board_from_string(content).unwrap();

        save_board_to_file(&original, &file_path).unwrap();
        let loaded = load_board_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_create_example_boards() {
        let temp_dir = tempdir().unwrap();
        create_example_boards(temp_dir.path()).unwrap();

        let solved = load_board_from_file(temp_dir.path().join("solved_9x9.txt")).unwrap();
        assert_eq!(solved.size, 9);
        assert!(solved.is_complete());

        let puzzle = load_board_from_file(temp_dir.path().join("puzzle_9x9.txt")).unwrap();
        assert_eq!(puzzle.clue_count(), 30);

        let small = load_board_from_file(temp_dir.path().join("solved_4x4.txt")).unwrap();
        assert_eq!(small.size, 4);
        assert!(small.is_complete());
    }
}
