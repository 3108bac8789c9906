//! One puzzle under construction: the candidate words and everything derived
//! from them while the grid fills up.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use log::{debug, warn};
use serde::Serialize;

use crate::bookkeeping::LocationBook;
use crate::dictionary::{Dictionary, WordMatch};
use crate::errors::GridError;
use crate::grid::{Board, Grid, LineStatus, SubPattern};
use crate::solver::SolverError;
use crate::word::{Location, PlacedWord, Placement, Word};
use crate::word_char::{MIN_WORD_LEN, is_all_word_chars};

/// Why a candidate was left out of the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooLong,
    TooShort,
    InvalidCharacters,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooLong => write!(f, "longer than the grid"),
            RejectReason::TooShort => write!(f, "shorter than {MIN_WORD_LEN} letters"),
            RejectReason::InvalidCharacters => write!(f, "contains characters other than letters or digits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub text: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone)]
pub struct Puzzle {
    size: usize,
    /// Eligible candidates, longest first (stable on ties)
    words: Vec<Word>,
    rejected: Vec<Rejected>,
    offered: usize,
    board: Board,
    dictionary: Dictionary,
    book: LocationBook,
    /// Word indices in the order they were placed
    placed: Vec<usize>,
}

impl Puzzle {
    /// Set up an empty `grid_size` × `grid_size` puzzle for the given `(text, clue)` candidates.
    ///
    /// Candidates that cannot be placed on this grid are kept aside in
    /// [`Puzzle::rejected`] and never reach the dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidGridSize`] if the grid cannot hold even the
    /// shortest allowed word.
    pub fn new<I, T, C>(grid_size: usize, candidates: I) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        if grid_size < MIN_WORD_LEN {
            return Err(SolverError::InvalidGridSize { size: grid_size });
        }

        let mut words = Vec::new();
        let mut rejected = Vec::new();
        let mut offered = 0;
        for (text, clue) in candidates {
            offered += 1;
            let word = Word::new(text, clue);
            let reason = if !is_all_word_chars(&word.canonical) {
                Some(RejectReason::InvalidCharacters)
            } else if word.size < MIN_WORD_LEN {
                Some(RejectReason::TooShort)
            } else if word.size > grid_size {
                Some(RejectReason::TooLong)
            } else {
                None
            };
            match reason {
                Some(reason) => {
                    warn!("skipping \"{}\": {reason}", word.text);
                    rejected.push(Rejected { text: word.text, reason });
                }
                None => words.push(word),
            }
        }

        // stable: equal lengths keep their input order
        words.sort_by(|a, b| b.size.cmp(&a.size));
        let dictionary = Dictionary::new(&words);
        debug!("dictionary: {}", dictionary.encoded());

        Ok(Self {
            size: grid_size,
            words,
            rejected,
            offered,
            board: Board::new(grid_size),
            dictionary,
            book: LocationBook::new(grid_size),
            placed: Vec::new(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Eligible candidates, in dictionary index order.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    /// Number of candidates supplied, eligible or not.
    #[must_use]
    pub fn offered(&self) -> usize {
        self.offered
    }

    #[must_use]
    pub fn eligible(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.placed.is_empty()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn book(&self) -> &LocationBook {
        &self.book
    }

    /// Length of the shortest word still to place; past the grid size once
    /// every word is placed, so no line can take another.
    #[must_use]
    pub fn min_size(&self) -> usize {
        self.dictionary.min_len().unwrap_or(self.size + 1)
    }

    /// Lines with a letter to attach to and room for a remaining word.
    #[must_use]
    pub fn available_locations(&self) -> BTreeSet<Location> {
        self.book.available()
    }

    /// Current status of a line for the shortest remaining word.
    ///
    /// # Errors
    ///
    /// See [`Board::subpatterns`].
    pub fn subpatterns(&self, location: Location) -> Result<LineStatus, Box<GridError>> {
        self.board.subpatterns(location, self.min_size())
    }

    /// Best remaining word for one stretch of a line.
    ///
    /// # Errors
    ///
    /// See [`Dictionary::find_match`].
    pub fn find_match(&self, sub: &SubPattern) -> Result<Option<WordMatch>, Box<GridError>> {
        self.dictionary.find_match(&sub.strip, sub.offset, self.min_size())
    }

    pub(crate) fn mark_complete(&mut self, location: Location) -> bool {
        self.book.mark_complete(location)
    }

    /// Place word `index` on `location` starting at `offset`.
    ///
    /// Writes the grid, fixes the word's placement, drops it from the
    /// dictionary and updates the line bookkeeping.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownWord`], [`GridError::AlreadyPlaced`],
    /// [`GridError::OutOfBounds`] or [`GridError::LetterConflict`]; the puzzle
    /// is unchanged when any of them is returned.
    pub fn place_word(&mut self, index: usize, location: Location, offset: usize) -> Result<(), Box<GridError>> {
        let word = self.words.get(index).ok_or_else(|| Box::new(GridError::UnknownWord { index }))?;
        if word.is_placed() {
            return Err(Box::new(GridError::AlreadyPlaced { word: word.canonical.clone() }));
        }

        self.board.place(index, &word.canonical, location, offset)?;
        word.set_placement(Placement { location, offset })?;
        self.dictionary.remove(index);
        self.placed.push(index);
        debug!("{} placed {} on {location} at {offset}", word.canonical, location.axis);

        let span = word.span(false, self.size);
        let min_size = self.min_size();
        self.book.refresh_after_place(&self.board, location, span, min_size)?;
        Ok(())
    }

    /// Placed words, in placement order.
    #[must_use]
    pub fn placed_words(&self) -> Vec<PlacedWord> {
        self.placed.iter().filter_map(|&i| PlacedWord::from_word(&self.words[i])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_words() -> Vec<(&'static str, &'static str)> {
        vec![
            ("WORD", ""),
            ("WTESBER", ""),
            ("SORSDELA", ""),
            ("BADA", ""),
            ("ECOLOS", ""),
            ("MOTSDESFA", ""),
            ("SMALL", ""),
            ("DATAVAULT", ""),
            ("SHORT", ""),
            ("SM", ""),
            ("Tooooolonnnnnnnggg", ""),
        ]
    }

    #[test]
    fn test_initial_stream_is_sorted_longest_first() {
        let puzzle = Puzzle::new(9, scenario_words()).unwrap();
        assert_eq!(
            puzzle.dictionary().encoded(),
            "[0]MOTSDESFA[1]DATAVAULT[2]SORSDELA[3]WTESBER[4]ECOLOS[5]SMALL[6]SHORT[7]WORD[8]BADA[9]SM"
        );
        assert_eq!(puzzle.offered(), 11);
        assert_eq!(puzzle.eligible(), 10);
        assert_eq!(
            puzzle.rejected(),
            &[Rejected { text: "Tooooolonnnnnnnggg".to_string(), reason: RejectReason::TooLong }]
        );
        assert_eq!(puzzle.min_size(), 2);
    }

    #[test]
    fn test_rejects_short_and_invalid_candidates() {
        let puzzle = Puzzle::new(9, vec![("a", ""), ("ice cream", ""), ("[1]X", ""), ("ok", "")]).unwrap();
        let reasons: Vec<RejectReason> = puzzle.rejected().iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![RejectReason::TooShort, RejectReason::InvalidCharacters, RejectReason::InvalidCharacters]
        );
        assert_eq!(puzzle.dictionary().encoded(), "[0]OK");
    }

    #[test]
    fn test_rejects_characters_wildcards_cannot_match() {
        let puzzle = Puzzle::new(9, vec![("a²b", ""), ("ok", "")]).unwrap();
        assert_eq!(
            puzzle.rejected(),
            &[Rejected { text: "a²b".to_string(), reason: RejectReason::InvalidCharacters }]
        );
        assert_eq!(puzzle.eligible(), 1);
        assert_eq!(puzzle.dictionary().encoded(), "[0]OK");
    }

    #[test]
    fn test_invalid_grid_size() {
        let err = Puzzle::new(1, vec![("ab", "")]).unwrap_err();
        assert_eq!(err.code(), "S002");
    }

    #[test]
    fn test_place_word_updates_everything() {
        let mut puzzle = Puzzle::new(9, scenario_words()).unwrap();
        puzzle.place_word(7, Location::column(3), 2).unwrap();

        assert_eq!(puzzle.placed_count(), 1);
        assert!(!puzzle.dictionary().contains(7));
        assert!(!puzzle.dictionary().encoded().contains("WORD"));
        assert_eq!(puzzle.board().entire_pattern(Location::column(3)).unwrap().to_string(), "-######--");
        let available: Vec<_> = puzzle.available_locations().into_iter().collect();
        assert_eq!(
            available,
            vec![Location::row(2), Location::row(3), Location::row(4), Location::row(5)]
        );

        let placed = puzzle.placed_words();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].word, "WORD");
        assert_eq!((placed[0].row, placed[0].col), (2, 3));
    }

    #[test]
    fn test_place_word_twice_fails() {
        let mut puzzle = Puzzle::new(9, scenario_words()).unwrap();
        puzzle.place_word(7, Location::column(3), 2).unwrap();
        let err = puzzle.place_word(7, Location::row(0), 0).unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(puzzle.placed_count(), 1);
    }

    #[test]
    fn test_failed_placement_leaves_puzzle_unchanged() {
        let mut puzzle = Puzzle::new(9, scenario_words()).unwrap();
        puzzle.place_word(7, Location::column(3), 2).unwrap();
        // BADA across row 2 would put B on the W
        let err = puzzle.place_word(8, Location::row(2), 3).unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(puzzle.dictionary().contains(8));
        assert!(!puzzle.words()[8].is_placed());
        assert_eq!(puzzle.placed_count(), 1);

        let err = puzzle.place_word(42, Location::row(0), 0).unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[test]
    fn test_min_size_tracks_remaining_words() {
        let mut puzzle = Puzzle::new(9, vec![("abc", ""), ("de", "")]).unwrap();
        assert_eq!(puzzle.min_size(), 2);
        puzzle.place_word(1, Location::row(0), 0).unwrap();
        assert_eq!(puzzle.min_size(), 3);
        puzzle.place_word(0, Location::row(4), 0).unwrap();
        assert_eq!(puzzle.min_size(), 10);
    }
}
