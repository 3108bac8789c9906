//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `GridError` and `SolverError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use crossfill::errors::{DegenerateReason, GridError};
use crossfill::solver::SolverError;
use crossfill::word::Location;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**");
                let _ = writeln!($out, "```\n{help_text}\n```\n");
            }

            let _ = writeln!($out, "**Example error message:**");
            let _ = writeln!($out, "```\n{error}\n```\n");

            let _ = writeln!($out, "**Detailed format:**");
            let _ = writeln!($out, "```\n{}\n```\n", error.display_detailed());

            let _ = writeln!($out, "---\n");
        }
    };
}

/// Helper to create all `GridError` variants for documentation
fn all_grid_error_variants() -> Vec<GridError> {
    vec![
        GridError::NoLetters { strip: "-------".to_string() },
        // RegexError--create by attempting to compile an invalid regex
        GridError::RegexError(fancy_regex::Regex::new("(?P<invalid").unwrap_err()),
        GridError::DegenerateLine { location: Location::column(4), reason: DegenerateReason::FullyBlocked },
        GridError::OutOfBounds { location: Location::row(2), offset: 6, len: 5, size: 9 },
        GridError::LetterConflict { row: 3, col: 4, existing: 'A', attempted: 'E' },
        GridError::AlreadyPlaced { word: "WORD".to_string() },
        GridError::UnknownWord { index: 42 },
    ]
}

/// Helper to create all `SolverError` variants for documentation
fn all_solver_error_variants() -> Vec<SolverError> {
    vec![
        SolverError::GridFailure(Box::new(GridError::UnknownWord { index: 42 })),
        SolverError::InvalidGridSize { size: 1 },
        SolverError::SeedFailure { pool: 0, eligible: 12 },
    ]
}

fn error_docs() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Solver Errors (S001–S003)](#solver-errors)");
    let _ = writeln!(out, "- [Grid Errors (E001–E007)](#grid-errors)");
    let _ = writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n");

    let _ = writeln!(out, "## Solver Errors\n");
    let _ = writeln!(out, "Top-level errors from the fill loop. These wrap lower-level grid errors or indicate solver-specific issues.\n");
    generate_error_docs!(out, all_solver_error_variants());

    let _ = writeln!(out, "## Grid Errors\n");
    let _ = writeln!(out, "Errors from pattern derivation, dictionary matching, and word placement.\n");
    generate_error_docs!(out, all_grid_error_variants());

    let _ = writeln!(out, "\n## How to Use Error Codes\n");
    let _ = writeln!(out, "When you see an error like:\n");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "Error: grid size 1 is too small (S002)");
    let _ = writeln!(out, "Use a grid size of at least 2, e.g. '--grid-size 15'");
    let _ = writeln!(out, "```\n");
    let _ = writeln!(out, "1. Note the error code (e.g., `S002`)");
    let _ = writeln!(out, "2. Look it up in this document for detailed explanation");
    let _ = writeln!(out, "3. Follow the suggested resolution steps");
    out
}

fn main() {
    print!("{}", error_docs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented_once() {
        let docs = error_docs();
        for code in ["S001", "S002", "S003", "E001", "E002", "E003", "E004", "E005", "E006", "E007"] {
            assert_eq!(
                docs.matches(&format!("### {code}:")).count(),
                1,
                "{code} should have exactly one section"
            );
        }
    }

    #[test]
    fn test_variant_lists_are_complete() {
        assert_eq!(all_grid_error_variants().len(), 7);
        assert_eq!(all_solver_error_variants().len(), 3);
    }
}
