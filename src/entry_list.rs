//! `entry_list`: load the word/clue list a puzzle is built from
//!
//! Each non-blank line holds one entry: the word, then its clue, separated
//! either by a `;` or by the first run of whitespace:
//!
//! ```text
//! # comment lines start with '#'
//! crossword A puzzle of intersecting words
//! anagram;A word formed by rearranging another
//! solo
//! ```
//!
//! The parsing logic:
//! - Blank lines and lines starting with `#` are skipped.
//! - A missing clue defaults to the word itself.
//! - Entries are deduplicated case-insensitively; the first occurrence wins.
//! - Order is preserved: the puzzle does its own longest-first sort.
//!
//! Words are *not* validated here (length, characters). That is the puzzle's
//! job, because what fits depends on the grid size.

use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::word_char::canonicalize;

/// Default grid size for short lists
const SMALL_LIST_GRID: usize = 17;
/// Default grid size for long lists
const LARGE_LIST_GRID: usize = 41;

/// One word with its clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub word: String,
    pub clue: String,
}

/// A processed, ready-to-use word list.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    pub entries: Vec<Entry>,
}

impl WordList {
    /// Parse a word list from an in-memory string.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut seen = std::collections::HashSet::new();
        let entries = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let (word, clue) = match line.split_once(';') {
                    Some((word, clue)) => (word.trim(), clue.trim()),
                    None => line
                        .split_once(char::is_whitespace)
                        .map_or((line, ""), |(word, clue)| (word, clue.trim())),
                };
                if word.is_empty() || !seen.insert(canonicalize(word)) {
                    return None;
                }
                let clue = if clue.is_empty() { word } else { clue };
                Some(Entry { word: word.to_string(), clue: clue.to_string() })
            })
            .collect();

        WordList { entries }
    }

    /// Read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;
        Ok(Self::parse_from_str(&data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(word, clue)` pairs, in list order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries.iter().map(|e| (e.word.as_str(), e.clue.as_str())).collect()
    }

    /// Keep a random subset of `n` entries (in their original order).
    /// Lists of `n` entries or fewer are left alone.
    pub fn sample<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) {
        if self.entries.len() <= n {
            return;
        }
        let mut keep = rand::seq::index::sample(rng, self.entries.len(), n).into_vec();
        keep.sort_unstable();
        let mut keep = keep.into_iter().peekable();
        let mut i = 0;
        self.entries.retain(|_| {
            let kept = keep.next_if_eq(&i).is_some();
            i += 1;
            kept
        });
    }

    /// Replace every clue with a lowercase anagram of its word.
    pub fn scramble_clues<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for entry in &mut self.entries {
            entry.clue = anagram(&entry.word, rng);
        }
    }

    /// Grid size that suits the number (and length) of the words.
    ///
    /// 17 for up to 20 words, growing by 2 for every 8 words more, capped at
    /// 41 past 100 words; always larger than the longest word.
    #[must_use]
    pub fn suggested_grid_size(&self) -> usize {
        let n = self.entries.len();
        let size = if n <= 20 {
            SMALL_LIST_GRID
        } else if n <= 100 {
            // banker's rounding: 36 words is 2.0, 28 words is 1.0, 44 words is 3.0
            let steps = ((n - 20) as f64 / 8.0).round_ties_even() as usize;
            steps * 2 + 19
        } else {
            LARGE_LIST_GRID
        };

        let longest = self
            .entries
            .iter()
            .map(|e| canonicalize(&e.word).chars().count())
            .max()
            .unwrap_or(0);
        if size <= longest { longest + 2 } else { size }
    }
}

/// Shuffle the letters of `word` (lowercased), trying a few times to get
/// something different from the word itself.
fn anagram<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let original: Vec<char> = word.to_lowercase().chars().collect();
    let mut letters = original.clone();
    for _ in 0..3 {
        letters.shuffle(rng);
        if letters != original {
            break;
        }
    }
    letters.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &WordList) -> Vec<&str> {
        list.entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_parse_basic() {
        let input = "cat A pet\ndog;Another pet\nbird";
        let list = WordList::parse_from_str(input);

        assert_eq!(
            list.entries,
            vec![
                Entry { word: "cat".into(), clue: "A pet".into() },
                Entry { word: "dog".into(), clue: "Another pet".into() },
                Entry { word: "bird".into(), clue: "bird".into() },
            ]
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let input = "# animals\ncat pet\n\n   \n#dog\nowl bird\n";
        let list = WordList::parse_from_str(input);

        assert_eq!(words(&list), vec!["cat", "owl"]);
    }

    #[test]
    fn test_parse_deduplicates_case_insensitively() {
        let input = "cat first\nCAT second\ndog\nCat third";
        let list = WordList::parse_from_str(input);

        assert_eq!(words(&list), vec!["cat", "dog"]);
        assert_eq!(list.entries[0].clue, "first");
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let input = "  cat \t A small   feline  \n  dog  ;  loyal  ";
        let list = WordList::parse_from_str(input);

        assert_eq!(list.entries[0].clue, "A small   feline");
        assert_eq!(list.entries[1], Entry { word: "dog".into(), clue: "loyal".into() });
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(WordList::parse_from_str("").is_empty());
        assert!(WordList::parse_from_str(";no word").is_empty());
    }

    #[test]
    fn test_sample_keeps_order_and_size() {
        let input: String = (0..30).map(|i| format!("w{i:02}\n")).collect();
        let mut list = WordList::parse_from_str(&input);
        let mut rng = StdRng::seed_from_u64(1);
        list.sample(10, &mut rng);

        assert_eq!(list.len(), 10);
        let w = words(&list);
        let mut sorted = w.clone();
        sorted.sort_unstable();
        assert_eq!(w, sorted);

        // short lists are untouched
        let mut small = WordList::parse_from_str("a\nb");
        small.sample(10, &mut rng);
        assert_eq!(small.len(), 2);
    }

    #[test]
    fn test_scramble_clues_are_anagrams() {
        let mut list = WordList::parse_from_str("Puzzle clue\nletters clue");
        let mut rng = StdRng::seed_from_u64(7);
        list.scramble_clues(&mut rng);

        for e in &list.entries {
            let mut a: Vec<char> = e.word.to_lowercase().chars().collect();
            let mut b: Vec<char> = e.clue.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_suggested_grid_size() {
        let list_of = |n: usize| {
            let input: String = (0..n).map(|i| format!("w{i}\n")).collect();
            WordList::parse_from_str(&input)
        };
        assert_eq!(list_of(5).suggested_grid_size(), 17);
        assert_eq!(list_of(20).suggested_grid_size(), 17);
        assert_eq!(list_of(28).suggested_grid_size(), 21);
        // 2.5 rounds to 2
        assert_eq!(list_of(40).suggested_grid_size(), 23);
        // 3.5 rounds to 4
        assert_eq!(list_of(48).suggested_grid_size(), 27);
        assert_eq!(list_of(100).suggested_grid_size(), 39);
        assert_eq!(list_of(101).suggested_grid_size(), 41);
    }

    #[test]
    fn test_suggested_grid_size_fits_longest_word() {
        let list = WordList::parse_from_str("supercalifragilistic long one\nab");
        assert_eq!(list.suggested_grid_size(), 22);
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = WordList::load_from_path("/nonexistent/words.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
