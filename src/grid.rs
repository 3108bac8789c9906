//! Grid occupancy and line-pattern derivation.
//!
//! [`Grid`] is the raw cell matrix. [`Board`] pairs it with the per-line index
//! of placed words and derives, for any row or column, the [`Strip`] of cells
//! a new word on that line may use.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::errors::{DegenerateReason, GridError};
use crate::pattern::{Mark, Strip};
use crate::word::{Location, span_of};
use crate::word_char::EMPTY_MARKER;

/// Square matrix of cells, each empty or holding an uppercase letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![None; size * size] }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at (`row`, `col`); `None` for empty or out-of-range cells.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    /// Letter at `offset` along `location`.
    #[must_use]
    pub fn at(&self, location: Location, offset: usize) -> Option<char> {
        let (row, col) = location.cell(offset);
        self.get(row, col)
    }

    /// Cells of one full line, in order.
    pub fn line(&self, location: Location) -> impl Iterator<Item = Option<char>> + '_ {
        (0..self.size).map(move |offset| self.at(location, offset))
    }

    fn set(&mut self, row: usize, col: usize, c: char) {
        self.cells[row * self.size + col] = Some(c);
    }

    /// Number of cells holding a letter.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Rows as strings of letters and `-`, without separators.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.unwrap_or(EMPTY_MARKER)).collect())
            .collect()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: Vec<String> = (0..self.size)
                .map(|col| self.get(row, col).unwrap_or(EMPTY_MARKER).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A word anchored on a line: its candidate index and its extent along the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSpan {
    pub word: usize,
    pub offset: usize,
    pub len: usize,
}

/// One fillable stretch of a line, with its start offset along the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPattern {
    pub strip: Strip,
    pub offset: usize,
}

/// What a line offers to the next word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStatus {
    /// Stretches that could take a word, longest first
    Open(Vec<SubPattern>),
    /// No stretch is long enough for any remaining word
    Complete,
    /// Long stretches exist but none has a letter to attach to (yet)
    Blocked,
}

/// The grid together with the index of words placed on each line.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    placements: BTreeMap<Location, Vec<PlacedSpan>>,
}

impl Board {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { grid: Grid::new(size), placements: BTreeMap::new() }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Words anchored on `location`, in placement order.
    #[must_use]
    pub fn spans(&self, location: Location) -> &[PlacedSpan] {
        self.placements.get(&location).map_or(&[], Vec::as_slice)
    }

    /// Derive the full pattern of a line.
    ///
    /// A cell is blocked when it is
    /// (a) inside the padded span of a word on this same line,
    /// (b) empty and inside the span of a word on an adjacent parallel line, or
    /// (c) empty and next to a letter on an adjacent parallel line which may
    ///     end a perpendicular word (only checked two or more lines from the edge).
    ///
    /// # Errors
    ///
    /// [`GridError::DegenerateLine`] with [`DegenerateReason::Empty`] if the line
    /// holds no letter, or [`DegenerateReason::FullyBlocked`] if every cell ends
    /// up blocked.
    pub fn entire_pattern(&self, location: Location) -> Result<Strip, Box<GridError>> {
        let size = self.grid.size;
        let mut marks: Vec<Mark> =
            self.grid.line(location).map(|c| c.map_or(Mark::Empty, Mark::Letter)).collect();

        if marks.iter().all(|m| *m == Mark::Empty) {
            return Err(Box::new(GridError::DegenerateLine {
                location,
                reason: DegenerateReason::Empty,
            }));
        }

        for span in self.spans(location) {
            for i in span_of(span.offset, span.len, true, size) {
                marks[i] = Mark::Blocked;
            }
        }

        for neighbor in location.neighbors(size) {
            for span in self.spans(neighbor) {
                for i in span_of(span.offset, span.len, false, size) {
                    if marks[i] == Mark::Empty {
                        marks[i] = Mark::Blocked;
                    }
                }
            }
        }

        let before = (location.index >= 2).then(|| Location::new(location.axis, location.index - 1));
        let after = (location.index + 3 <= size).then(|| Location::new(location.axis, location.index + 1));
        for (offset, mark) in marks.iter_mut().enumerate() {
            if *mark == Mark::Empty
                && [before, after].into_iter().flatten().any(|l| self.grid.at(l, offset).is_some())
            {
                *mark = Mark::Blocked;
            }
        }

        let strip = Strip::new(marks);
        if strip.is_fully_blocked() {
            return Err(Box::new(GridError::DegenerateLine {
                location,
                reason: DegenerateReason::FullyBlocked,
            }));
        }
        Ok(strip)
    }

    /// Split a line into the stretches a word of at least `min_size` cells could use.
    ///
    /// # Errors
    ///
    /// Only errors other than [`GridError::DegenerateLine`] are propagated; a
    /// degenerate line is reported as [`LineStatus::Blocked`] (no letter yet) or
    /// [`LineStatus::Complete`] (every cell blocked).
    pub fn subpatterns(&self, location: Location, min_size: usize) -> Result<LineStatus, Box<GridError>> {
        let strip = match self.entire_pattern(location) {
            Ok(strip) => strip,
            Err(e) => {
                return match *e {
                    GridError::DegenerateLine { reason: DegenerateReason::Empty, .. } => Ok(LineStatus::Blocked),
                    GridError::DegenerateLine { reason: DegenerateReason::FullyBlocked, .. } => {
                        Ok(LineStatus::Complete)
                    }
                    other => Err(Box::new(other)),
                };
            }
        };

        let mut long_enough = false;
        let mut open: Vec<SubPattern> = Vec::new();
        for (segment, offset) in strip.segments() {
            if segment.len() < min_size {
                continue;
            }
            long_enough = true;
            if segment.iter().any(|m| m.is_anchor()) {
                open.push(SubPattern { strip: Strip::new(segment.to_vec()), offset });
            }
        }

        if !long_enough {
            return Ok(LineStatus::Complete);
        }
        if open.is_empty() {
            return Ok(LineStatus::Blocked);
        }
        open.sort_by(|a, b| b.strip.len().cmp(&a.strip.len()));
        Ok(LineStatus::Open(open))
    }

    /// Write `letters` along `location` from `offset` and index the span.
    ///
    /// Nothing is written unless every cell is empty or already holds the same letter.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if the word runs past the grid edge, or
    /// [`GridError::LetterConflict`] on the first conflicting cell.
    pub fn place(&mut self, word: usize, letters: &str, location: Location, offset: usize) -> Result<(), Box<GridError>> {
        let size = self.grid.size;
        let len = letters.chars().count();
        if location.index >= size || offset + len > size {
            return Err(Box::new(GridError::OutOfBounds { location, offset, len, size }));
        }

        for (i, attempted) in letters.chars().enumerate() {
            let (row, col) = location.cell(offset + i);
            if let Some(existing) = self.grid.get(row, col)
                && existing != attempted
            {
                return Err(Box::new(GridError::LetterConflict { row, col, existing, attempted }));
            }
        }

        for (i, c) in letters.chars().enumerate() {
            let (row, col) = location.cell(offset + i);
            self.grid.set(row, col, c);
        }
        self.placements.entry(location).or_default().push(PlacedSpan { word, offset, len });
        debug!("placed {letters} on {location} at offset {offset}");
        Ok(())
    }
}
