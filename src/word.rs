//! Candidate words, grid lines and placements.
//!
//! A [`Location`] names one full row or column of the grid. A [`Word`] is a
//! candidate entry which, once placed, carries an immutable [`Placement`]: the
//! line it sits on and the offset of its first cell along that line.

use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::errors::GridError;
use crate::word_char::canonicalize;

/// Orientation of a line, and of the words placed along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Row-wise ("across") words; a row line.
    Across,
    /// Column-wise ("down") words; a column line.
    Down,
}

impl Axis {
    /// Both axes, across first.
    pub const ALL: [Axis; 2] = [Axis::Across, Axis::Down];

    #[must_use]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Across => write!(f, "across"),
            Axis::Down => write!(f, "down"),
        }
    }
}

/// One grid line: a row (for [`Axis::Across`]) or a column (for [`Axis::Down`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub axis: Axis,
    pub index: usize,
}

impl Location {
    #[must_use]
    pub const fn new(axis: Axis, index: usize) -> Self {
        Self { axis, index }
    }

    #[must_use]
    pub const fn row(index: usize) -> Self {
        Self::new(Axis::Across, index)
    }

    #[must_use]
    pub const fn column(index: usize) -> Self {
        Self::new(Axis::Down, index)
    }

    /// Every line of a `size` × `size` grid: all rows, then all columns.
    pub fn all(size: usize) -> impl Iterator<Item = Location> {
        Axis::ALL
            .into_iter()
            .flat_map(move |axis| (0..size).map(move |index| Location::new(axis, index)))
    }

    /// The parallel lines directly before and after this one, when inside the grid.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Location> {
        let before = self.index.checked_sub(1);
        let after = (self.index + 1 < size).then_some(self.index + 1);
        before
            .into_iter()
            .chain(after)
            .map(move |index| Location::new(self.axis, index))
    }

    /// (row, col) of the cell at `offset` along this line.
    #[must_use]
    pub const fn cell(self, offset: usize) -> (usize, usize) {
        match self.axis {
            Axis::Across => (self.index, offset),
            Axis::Down => (offset, self.index),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Across => write!(f, "row {}", self.index),
            Axis::Down => write!(f, "column {}", self.index),
        }
    }
}

/// Where a word sits: the line and the offset of its first cell along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub location: Location,
    pub offset: usize,
}

impl Placement {
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.location.axis
    }

    /// (row, col) of the first cell.
    #[must_use]
    pub fn start(&self) -> (usize, usize) {
        self.location.cell(self.offset)
    }
}

/// A candidate entry from the input word/clue list.
#[derive(Debug, Clone)]
pub struct Word {
    /// Text as supplied
    pub text: String,
    /// Form written into the grid (uppercase)
    pub canonical: String,
    pub clue: String,
    /// Length of `canonical`, in characters
    pub size: usize,
    placement: OnceCell<Placement>,
}

impl Word {
    pub fn new(text: impl Into<String>, clue: impl Into<String>) -> Self {
        let text = text.into();
        let canonical = canonicalize(&text);
        let size = canonical.chars().count();
        Self {
            text,
            canonical,
            clue: clue.into(),
            size,
            placement: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.get()
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placement.get().is_some()
    }

    /// Record where this word sits. Placement happens exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::AlreadyPlaced`] if the word already has a placement.
    pub(crate) fn set_placement(&self, placement: Placement) -> Result<(), Box<GridError>> {
        self.placement.set(placement).map_err(|_| {
            Box::new(GridError::AlreadyPlaced { word: self.canonical.clone() })
        })
    }

    /// Grid offsets covered by this word along its own line.
    ///
    /// With `padded`, the span grows by one cell on each side, clamped to
    /// `0..grid_size`. Returns an empty range for an unplaced word.
    #[must_use]
    pub fn span(&self, padded: bool, grid_size: usize) -> Range<usize> {
        self.placement().map_or(0..0, |p| span_of(p.offset, self.size, padded, grid_size))
    }

    /// Iterate over the (row, col, letter) cells of a placed word.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.placement().into_iter().flat_map(move |p| {
            self.canonical.chars().enumerate().map(move |(i, c)| {
                let (row, col) = p.location.cell(p.offset + i);
                (row, col, c)
            })
        })
    }
}

/// Offsets covered by a word of `len` cells starting at `offset`,
/// optionally padded by one cell each side (clamped to the grid).
#[must_use]
pub fn span_of(offset: usize, len: usize, padded: bool, grid_size: usize) -> Range<usize> {
    if padded {
        offset.saturating_sub(1)..(offset + len + 1).min(grid_size)
    } else {
        offset..(offset + len).min(grid_size)
    }
}

/// A placed word, flattened for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub direction: Axis,
    pub row: usize,
    pub col: usize,
    pub length: usize,
}

impl PlacedWord {
    /// Flatten a word; `None` if it has not been placed.
    #[must_use]
    pub fn from_word(word: &Word) -> Option<Self> {
        let p = word.placement()?;
        let (row, col) = p.start();
        Some(Self {
            word: word.canonical.clone(),
            clue: word.clue.clone(),
            direction: p.axis(),
            row,
            col,
            length: word.size,
        })
    }
}

impl Display for PlacedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) {}: {}",
            self.direction, self.row, self.col, self.word, self.clue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(text: &str, location: Location, offset: usize) -> Word {
        let w = Word::new(text, "");
        w.set_placement(Placement { location, offset }).unwrap();
        w
    }

    #[test]
    fn test_word_canonical_and_size() {
        let w = Word::new("straße", "street");
        assert_eq!(w.canonical, "STRASSE");
        assert_eq!(w.size, 7);
        assert_eq!(w.clue, "street");
        assert!(!w.is_placed());
    }

    #[test]
    fn test_placement_is_set_once() {
        let w = placed("word", Location::column(3), 2);
        let err = w
            .set_placement(Placement { location: Location::row(0), offset: 0 })
            .unwrap_err();
        assert!(matches!(*err, GridError::AlreadyPlaced { ref word } if word == "WORD"));
        // the first placement is untouched
        assert_eq!(w.placement().unwrap().location, Location::column(3));
    }

    #[test]
    fn test_span_unpadded_and_padded() {
        let w = placed("word", Location::column(3), 2);
        assert_eq!(w.span(false, 9), 2..6);
        assert_eq!(w.span(true, 9), 1..7);
    }

    #[test]
    fn test_padded_span_clamped_to_grid() {
        let w = placed("abc", Location::row(0), 0);
        assert_eq!(w.span(true, 3), 0..3);
        let w = placed("ab", Location::row(0), 7);
        assert_eq!(w.span(true, 9), 6..9);
    }

    #[test]
    fn test_unplaced_span_is_empty() {
        assert!(Word::new("abc", "").span(true, 9).is_empty());
    }

    #[test]
    fn test_cells() {
        let down = placed("dog", Location::column(4), 1);
        let cells: Vec<_> = down.cells().collect();
        assert_eq!(cells, vec![(1, 4, 'D'), (2, 4, 'O'), (3, 4, 'G')]);
    }

    #[test]
    fn test_location_all_and_neighbors() {
        let all: Vec<_> = Location::all(2).collect();
        assert_eq!(
            all,
            vec![Location::row(0), Location::row(1), Location::column(0), Location::column(1)]
        );
        let n: Vec<_> = Location::row(0).neighbors(3).collect();
        assert_eq!(n, vec![Location::row(1)]);
        let n: Vec<_> = Location::column(1).neighbors(3).collect();
        assert_eq!(n, vec![Location::column(0), Location::column(2)]);
        let n: Vec<_> = Location::column(2).neighbors(3).collect();
        assert_eq!(n, vec![Location::column(1)]);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::row(3).to_string(), "row 3");
        assert_eq!(Location::column(5).to_string(), "column 5");
    }

    #[test]
    fn test_placed_word_view() {
        let w = placed("word", Location::column(3), 2);
        let view = PlacedWord::from_word(&w).unwrap();
        assert_eq!(view.direction, Axis::Down);
        assert_eq!((view.row, view.col), (2, 3));
        assert_eq!(view.length, 4);
        assert!(PlacedWord::from_word(&Word::new("x", "")).is_none());
    }
}
