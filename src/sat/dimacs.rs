//! DIMACS CNF serialization

use super::constraints::Clause;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Render clauses as a DIMACS CNF document.
///
/// Layout matches what every DIMACS-conformant solver expects: a
/// `p cnf <variables> <clauses>` header, then one line per clause with
/// space-separated literals terminated by `0`.
pub fn render_dimacs(clauses: &[Clause], variable_count: usize) -> Result<String> {
    // Rough estimate: header plus ~4 bytes per literal of mostly-binary clauses
    let mut output = String::with_capacity(32 + clauses.len() * 12);

    writeln!(output, "p cnf {} {}", variable_count, clauses.len())?;

    for clause in clauses {
        if clause.is_empty() {
            anyhow::bail!("Cannot serialize empty clause (unsatisfiable)");
        }
        for &literal in &clause.literals {
            write!(output, "{} ", literal)?;
        }
        output.push_str("0\n");
    }

    Ok(output)
}

/// Write clauses to a DIMACS CNF file, creating parent directories as needed
pub fn write_dimacs_file<P: AsRef<Path>>(
    path: P,
    clauses: &[Clause],
    variable_count: usize,
) -> Result<()> {
    let content = render_dimacs(clauses, variable_count)?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write CNF file: {}", path.as_ref().display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_format() {
        let clauses = vec![Clause::new(vec![1, -2, 3]), Clause::unit(-4)];
        let output = render_dimacs(&clauses, 4).unwrap();

        assert_eq!(output, "p cnf 4 2\n1 -2 3 0\n-4 0\n");
    }

    #[test]
    fn test_header_matches_body() {
        let clauses = vec![
            Clause::binary(-1, -2),
            Clause::binary(-1, -3),
            Clause::new(vec![1, 2, 3]),
        ];
        let output = render_dimacs(&clauses, 3).unwrap();

        let mut lines = output.lines();
        let header: Vec<&str> = lines.next().unwrap().split_whitespace().collect();
        assert_eq!(header, vec!["p", "cnf", "3", "3"]);

        let body: Vec<&str> = lines.collect();
        assert_eq!(body.len(), 3);
        for line in &body {
            assert!(line.ends_with(" 0"));
            let max_var = line
                .split_whitespace()
                .map(|t| t.parse::<i32>().unwrap().abs())
                .max()
                .unwrap();
            assert!(max_var <= 3);
        }
    }

    #[test]
    fn test_empty_clause_rejected() {
        let clauses = vec![Clause::new(vec![])];
        assert!(render_dimacs(&clauses, 1).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/problem.cnf");

        let clauses = vec![Clause::unit(1)];
        write_dimacs_file(&path, &clauses, 1).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "p cnf 1 1\n1 0\n");
    }
}
