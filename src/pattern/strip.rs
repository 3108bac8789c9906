use std::convert::Infallible;
use std::fmt::{self, Display, Formatter, Write};
use std::ops::Deref;
use std::str::FromStr;

use crate::errors::GridError;
use crate::word_char::{BLOCKED_MARKER, EMPTY_MARKER, WordChar};

/// State of one cell as seen from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Fillable cell (no letter yet)
    Empty,
    /// Cell no new word on this line may use
    Blocked,
    /// Cell already holding a letter
    Letter(char),
}

impl Mark {
    /// True for letters that can anchor an expression.
    #[must_use]
    pub fn is_anchor(self) -> bool {
        matches!(self, Mark::Letter(c) if c.is_word_char())
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => EMPTY_MARKER,
            Mark::Blocked => BLOCKED_MARKER,
            Mark::Letter(c) => c,
        }
    }
}

impl From<char> for Mark {
    fn from(c: char) -> Self {
        if c.is_marker() {
            if c == BLOCKED_MARKER { Mark::Blocked } else { Mark::Empty }
        } else {
            Mark::Letter(c)
        }
    }
}

/// The sequence of marks along a line, or along part of a line.
///
/// Renders as text with `-` for fillable cells and `#` for blocked cells,
/// e.g. `--R----G--E` or `-######--`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Strip {
    marks: Vec<Mark>,
}

impl Strip {
    #[must_use]
    pub fn new(marks: Vec<Mark>) -> Self {
        Self { marks }
    }

    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Maximal runs of non-blocked cells, with their start offsets.
    pub fn segments(&self) -> impl Iterator<Item = (&[Mark], usize)> {
        let mut start = 0;
        self.marks
            .split(|m| *m == Mark::Blocked)
            .map(move |segment| {
                let offset = start;
                start += segment.len() + 1;
                (segment, offset)
            })
            .filter(|(segment, _)| !segment.is_empty())
    }

    #[must_use]
    pub fn is_fully_blocked(&self) -> bool {
        self.marks.iter().all(|m| *m == Mark::Blocked)
    }
}

impl Deref for Strip {
    type Target = [Mark];

    fn deref(&self) -> &[Mark] {
        &self.marks
    }
}

impl FromIterator<Mark> for Strip {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        Self { marks: iter.into_iter().collect() }
    }
}

impl FromStr for Strip {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.chars().map(Mark::from).collect())
    }
}

impl Display for Strip {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&render_marks(&self.marks))
    }
}

pub(crate) fn render_marks(marks: &[Mark]) -> String {
    let mut s = String::with_capacity(marks.len());
    for m in marks {
        let _ = s.write_char(m.to_char());
    }
    s
}

/// Number of anchor letters in a strip, with the offsets of the first and last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterCount {
    pub count: usize,
    pub first: usize,
    pub last: usize,
}

/// Count the anchor letters of `marks`.
///
/// # Errors
///
/// Returns [`GridError::NoLetters`] if the strip holds no anchor letter.
pub fn count_letters(marks: &[Mark]) -> Result<LetterCount, Box<GridError>> {
    let mut anchors = marks
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_anchor())
        .map(|(i, _)| i);

    let Some(first) = anchors.next() else {
        return Err(Box::new(GridError::NoLetters { strip: render_marks(marks) }));
    };
    let (count, last) = anchors.fold((1, first), |(n, _), i| (n + 1, i));

    Ok(LetterCount { count, first, last })
}
