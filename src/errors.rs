//! Error types for pattern derivation, matching and placement, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E007) for documentation lookup:
//!
//! - E001: `NoLetters` (Strip has no anchor letter)
//! - E002: `RegexError` (Match expression failed to compile or run)
//! - E003: `DegenerateLine` (Line pattern cannot be interpreted)
//! - E004: `OutOfBounds` (Placement does not fit in the grid)
//! - E005: `LetterConflict` (Placement would overwrite a different letter)
//! - E006: `AlreadyPlaced` (Word already has a placement)
//! - E007: `UnknownWord` (Word index is not in the candidate list)
//!
//! `NoLetters` and `DegenerateLine` are raised by the pattern layer and are
//! converted into line sentinels by [`crate::grid::Board::subpatterns`]; during a
//! normal fill they never reach the caller.
//!
//! # Examples
//!
//! ```
//! use crossfill::errors::GridError;
//! use crossfill::pattern::{count_letters, Strip};
//!
//! let strip: Strip = "-------".parse().unwrap();
//! match count_letters(&strip) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::fmt::{self, Display, Formatter};

use crate::word::Location;

/// Why a line pattern could not be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// The whole line holds no letter at all.
    Empty,
    /// Every cell of the line is blocked.
    FullyBlocked,
}

impl Display for DegenerateReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::Empty => write!(f, "no letter on the line"),
            DegenerateReason::FullyBlocked => write!(f, "every cell is blocked"),
        }
    }
}

/// Custom error type for grid operations
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("No letters in strip \"{strip}\"")]
    NoLetters { strip: String },

    #[error("Invalid match expression: {0}")]
    RegexError(#[from] fancy_regex::Error),

    #[error("Degenerate line at {location}: {reason}")]
    DegenerateLine { location: Location, reason: DegenerateReason },

    #[error("Word of length {len} at offset {offset} does not fit on {location} (grid size {size})")]
    OutOfBounds {
        location: Location,
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("Cell ({row}, {col}) holds '{existing}', cannot write '{attempted}'")]
    LetterConflict {
        row: usize,
        col: usize,
        existing: char,
        attempted: char,
    },

    #[error("Word \"{word}\" is already placed")]
    AlreadyPlaced { word: String },

    #[error("No candidate word with index {index}")]
    UnknownWord { index: usize },
}

impl From<Box<fancy_regex::Error>> for Box<GridError> {
    fn from(e: Box<fancy_regex::Error>) -> Self {
        Box::new(GridError::RegexError(*e))
    }
}

impl From<fancy_regex::Error> for Box<GridError> {
    fn from(e: fancy_regex::Error) -> Self {
        Box::new(GridError::RegexError(e))
    }
}

impl GridError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::NoLetters { .. } => "E001",
            GridError::RegexError(_) => "E002",
            GridError::DegenerateLine { .. } => "E003",
            GridError::OutOfBounds { .. } => "E004",
            GridError::LetterConflict { .. } => "E005",
            GridError::AlreadyPlaced { .. } => "E006",
            GridError::UnknownWord { .. } => "E007",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GridError::NoLetters { .. } => "Strip has no anchor letter",
            GridError::RegexError(_) => "Match expression failed to compile or run",
            GridError::DegenerateLine { .. } => "Line pattern cannot be interpreted",
            GridError::OutOfBounds { .. } => "Placement does not fit in the grid",
            GridError::LetterConflict { .. } => "Placement would overwrite a different letter",
            GridError::AlreadyPlaced { .. } => "Word already has a placement",
            GridError::UnknownWord { .. } => "Word index is not in the candidate list",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GridError::NoLetters { .. } => "A match expression is anchored on at least one known letter. A strip made only of fillable cells cannot be turned into an expression; the grid layer reports such lines as blocked instead.",
            GridError::RegexError(_) => "The expression built from a strip was rejected by the regex engine, or the search hit the engine's backtracking limit. This is an internal error.",
            GridError::DegenerateLine { .. } => "The line pattern was requested for a line that holds no letter, or whose every cell is blocked. The grid layer converts this into a blocked or complete sentinel.",
            GridError::OutOfBounds { .. } => "The word would run past the edge of the grid from the requested offset.",
            GridError::LetterConflict { .. } => "A cell covered by the word already holds a different letter. Crossing words must agree on their shared cell.",
            GridError::AlreadyPlaced { .. } => "A word's placement is set exactly once and never moved.",
            GridError::UnknownWord { .. } => "The index does not refer to an eligible candidate word.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::NoLetters { .. } => Some("Include at least one letter in the strip, e.g. '--R--' rather than '-----'"),
            GridError::OutOfBounds { .. } => Some("Choose an offset such that offset + word length <= grid size"),
            GridError::LetterConflict { .. } => Some("Place the word where every occupied cell already holds the same letter"),
            GridError::AlreadyPlaced { .. } => Some("Words cannot be repositioned; start a new puzzle to try another layout"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<GridError> {
        vec![
            GridError::NoLetters { strip: "---".to_string() },
            GridError::RegexError(fancy_regex::Regex::new("(").unwrap_err()),
            GridError::DegenerateLine { location: Location::row(2), reason: DegenerateReason::Empty },
            GridError::OutOfBounds { location: Location::column(1), offset: 7, len: 4, size: 9 },
            GridError::LetterConflict { row: 1, col: 2, existing: 'A', attempted: 'B' },
            GridError::AlreadyPlaced { word: "WORD".to_string() },
            GridError::UnknownWord { index: 42 },
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = GridError::NoLetters { strip: "-----".to_string() };
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("-----"));
    }

    /// Test that all `GridError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in sample_errors() {
            let code = err.code();
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 7);
    }

    /// Test that all error codes follow the format E0XX
    #[test]
    fn test_error_code_format() {
        for err in sample_errors() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"), "Error code '{}' should start with 'E0'", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = GridError::UnknownWord { index: 42 };
        assert_eq!(err.display_detailed(), "No candidate word with index 42 (E007)");
    }

    #[test]
    fn test_conflict_message_names_cell_and_letters() {
        let err = GridError::LetterConflict { row: 1, col: 2, existing: 'A', attempted: 'B' };
        let detailed = err.display_detailed();
        assert!(detailed.contains("(1, 2)"));
        assert!(detailed.contains("'A'") && detailed.contains("'B'"));
        assert!(detailed.contains("E005"));
    }

    #[test]
    fn test_degenerate_line_message() {
        let err = GridError::DegenerateLine {
            location: Location::column(4),
            reason: DegenerateReason::FullyBlocked,
        };
        assert_eq!(err.to_string(), "Degenerate line at column 4: every cell is blocked");
    }

    #[test]
    fn test_descriptions_and_details_are_substantial() {
        for err in sample_errors() {
            assert!(err.description().len() > 10, "description for {:?} too short", err);
            assert!(err.details().len() > err.description().len());
        }
    }
}
