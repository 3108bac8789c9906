//! `dictionary`: the encoded index of words that have not been placed yet.
//!
//! All remaining candidates live in one string of `[index]WORD` segments,
//! longest words first:
//!
//! ```text
//! [0]MOTSDESFA[1]DATAVAULT[2]SORSDELA[3]WTESBER ... [9]SM
//! ```
//!
//! A strip expression (see [`crate::pattern`]) is matched against the whole
//! stream in a single regex search, so "is there any remaining word that fits
//! this skeleton, and which is the longest" is one linear scan. Indexes are the
//! positions in the full sorted candidate list and never change; removing a
//! word deletes its segment and leaves every other tag alone.

use std::fmt::Write;

use log::debug;

use crate::errors::GridError;
use crate::pattern::expression::{INDEX_GROUP, LEAD_GROUP, WORD_GROUP};
use crate::pattern::{Expression, Mark, generate_subexpressions};
use crate::word::Word;

/// A remaining word that fits a strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    /// Index of the word in the sorted candidate list
    pub index: usize,
    /// The matched canonical text
    pub text: String,
    /// Offset along the line of the word's first cell
    pub start: usize,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    stream: String,
    /// Canonical length of every candidate, by index
    sizes: Vec<usize>,
    present: Vec<bool>,
}

impl Dictionary {
    /// Encode `words` (already sorted longest-first) as the initial stream.
    #[must_use]
    pub fn new(words: &[Word]) -> Self {
        let mut stream = String::with_capacity(words.iter().map(|w| w.canonical.len() + 4).sum());
        for (i, w) in words.iter().enumerate() {
            let _ = write!(stream, "[{i}]{}", w.canonical);
        }
        debug_assert!(
            words.windows(2).all(|p| p[0].size >= p[1].size),
            "candidate words must be sorted longest-first"
        );
        Self {
            stream,
            sizes: words.iter().map(|w| w.size).collect(),
            present: vec![true; words.len()],
        }
    }

    /// The current encoded stream.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.stream
    }

    /// Number of words not yet placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    /// Length of the shortest remaining word.
    ///
    /// Words are sorted longest-first, so this is the size of the last
    /// remaining segment.
    #[must_use]
    pub fn min_len(&self) -> Option<usize> {
        self.present.iter().rposition(|p| *p).map(|i| self.sizes[i])
    }

    /// Search the stream for the first word matching `expression`.
    ///
    /// `offset` is the absolute position of the strip the expression was
    /// built from; the returned match carries the absolute start of the word.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RegexError`] if the expression fails to compile or
    /// the search aborts.
    pub fn find(&self, expression: &Expression, offset: usize) -> Result<Option<WordMatch>, Box<GridError>> {
        if self.stream.is_empty() {
            return Ok(None);
        }
        let re = expression.regex()?;
        let Some(caps) = re.captures(&self.stream)? else {
            return Ok(None);
        };

        let (Some(index), Some(word), Some(lead)) =
            (caps.name(INDEX_GROUP), caps.name(WORD_GROUP), caps.name(LEAD_GROUP))
        else {
            debug_assert!(false, "expression {expression} lacks its named groups");
            return Ok(None);
        };
        let Ok(index) = index.as_str().parse::<usize>() else {
            return Ok(None);
        };
        let lead_len = lead.as_str().chars().count();

        debug_assert!(
            lead_len <= expression.first_letter(),
            "leading wildcards cannot exceed the room before the first letter"
        );
        Ok(Some(WordMatch {
            index,
            text: word.as_str().to_string(),
            start: offset + expression.first_letter() - lead_len,
        }))
    }

    /// Find the best remaining word for a strip found at `offset` on its line.
    ///
    /// Tries the strip's expressions from most to least constrained
    /// (see [`generate_subexpressions`]) and returns the first hit. An empty
    /// dictionary never matches.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoLetters`] if the strip has no anchor letter, or
    /// [`GridError::RegexError`] if a search fails.
    pub fn find_match(
        &self,
        marks: &[Mark],
        offset: usize,
        min_size: usize,
    ) -> Result<Option<WordMatch>, Box<GridError>> {
        if self.stream.is_empty() {
            return Ok(None);
        }
        for sub in generate_subexpressions(marks, offset, min_size)? {
            if let Some(found) = self.find(&sub.expression, sub.offset)? {
                debug!("{} matched {} at offset {}", sub.expression, found.text, found.start);
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Delete the segment of word `index`. Returns `false` if it was not present.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        let tag = format!("[{index}]");
        let Some(start) = self.stream.find(&tag) else {
            debug_assert!(false, "present word {index} has no segment");
            return false;
        };
        let end = self.stream[start + tag.len()..]
            .find('[')
            .map_or(self.stream.len(), |i| start + tag.len() + i);
        self.stream.replace_range(start..end, "");
        self.present[index] = false;
        true
    }
}
