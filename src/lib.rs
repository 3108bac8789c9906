//! Fill a square crossword grid from a word/clue list.
//!
//! The engine keeps every unplaced word in one `[index]WORD` stream
//! ([`dictionary`]), derives a fillable skeleton for a row or column from the
//! grid ([`grid`]), turns it into regex expressions ([`pattern`]) and places
//! the first (longest) word that fits. [`solver`] drives the randomized loop.

pub mod bookkeeping;
pub mod dictionary;
pub mod entry_list;
pub mod errors;
pub mod grid;
pub mod log;
pub mod pattern;
pub mod puzzle;
pub mod solver;
pub mod word;
pub mod word_char;
