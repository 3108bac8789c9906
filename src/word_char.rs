use crate::pattern::expression::get_regex;

// Marker characters used when a strip is rendered as text
pub const EMPTY_MARKER: char = '-';
pub const BLOCKED_MARKER: char = '#';

/// The shortest word the engine will place (a single letter never crosses anything).
pub const MIN_WORD_LEN: usize = 2;

/// Classification helpers for grid and word characters.
///
/// A "word character" is an alphanumeric (any script) or the underscore.
/// Extended letters such as `ß` or `中` count; separators, punctuation,
/// whitespace and the `[`/`]` delimiters of the dictionary encoding do not.
///
/// This is close to the regex `\w` class but not equal to it: `²` is
/// alphanumeric yet not `\w`, and combining marks are `\w` yet not
/// alphanumeric. Candidates are screened with [`is_all_word_chars`], which uses
/// `\w` itself, so every letter that reaches the grid can be matched by a
/// wildcard. A grid letter that fails this test only loses its anchor role.
pub(crate) trait WordChar {
    fn is_word_char(&self) -> bool;
    fn is_marker(&self) -> bool;
}

impl WordChar for char {
    fn is_word_char(&self) -> bool {
        self.is_alphanumeric() || *self == '_'
    }
    fn is_marker(&self) -> bool {
        *self == EMPTY_MARKER || *self == BLOCKED_MARKER
    }
}

/// Canonical grid form of a raw word: trimmed and uppercased.
///
/// Uppercasing may change the length (`ß` becomes `SS`); callers
/// must measure the canonical form, never the raw text.
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Whole-string form of the class the dictionary expressions match with
const WORD_PATTERN: &str = r"^\w+$";

/// True if `s` is non-empty and made only of characters the regex `\w` class
/// accepts, i.e. of characters a dictionary expression can match.
pub(crate) fn is_all_word_chars(s: &str) -> bool {
    get_regex(WORD_PATTERN).is_ok_and(|re| re.is_match(s).unwrap_or(false))
}
