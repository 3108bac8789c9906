use std::collections::HashMap;
use std::fmt::{self, Display, Formatter, Write};
use std::sync::{Mutex, OnceLock};

use fancy_regex::Regex;

use crate::errors::GridError;

use super::strip::{LetterCount, Mark, count_letters};

/// Opening tag of every dictionary segment; captures the word's index.
pub(crate) const INDEX_TAG: &str = r"\[(?P<index>\d+)\]";
/// A word ends where the next segment's tag starts, or at the end of the stream.
pub(crate) const SEGMENT_END: &str = r"(?=\[\d+\]|$)";

/// Capture group names used by every expression
pub(crate) const INDEX_GROUP: &str = "index";
pub(crate) const WORD_GROUP: &str = "word";
pub(crate) const LEAD_GROUP: &str = "lead";

/// Global, lazily initialized cache of compiled expressions.
///
/// Line skeletons recur constantly during a fill (the same `\w{0,3}A\w{0,2}`
/// shows up on many lines), so compiled regexes are kept for the life of the
/// process. `Regex` clones are cheap (internally ref-counted).
static REGEX_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Return a compiled `Regex` for `pattern`, caching the result.
pub(crate) fn get_regex(pattern: &str) -> Result<Regex, Box<fancy_regex::Error>> {
    let cache = REGEX_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    // check cache first; if lock is poisoned, recover and continue
    if let Ok(guard) = cache.lock()
        && let Some(re) = guard.get(pattern).cloned()
    {
        return Ok(re);
    }

    // Compile outside the lock.
    let compiled = Regex::new(pattern)?;

    if let Ok(mut guard) = cache.lock() {
        if let Some(existing) = guard.get(pattern).cloned() {
            return Ok(existing);
        }
        guard.insert(pattern.to_string(), compiled.clone());
    }
    Ok(compiled)
}

/// A search expression for one strip, matched against the dictionary encoding.
///
/// For `--R----G--E` the expression is
/// `\[(?P<index>\d+)\](?P<word>(?P<lead>\w{0,2})R\w{4}G\w{2}E)(?=\[\d+\]|$)`:
/// up to two letters before the `R`, then the fixed skeleton, then nothing
/// (the `E` touches the end of the strip).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    source: String,
    /// Offset of the first anchor letter within the strip
    first_letter: usize,
}

impl Expression {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn first_letter(&self) -> usize {
        self.first_letter
    }

    /// Compile (or fetch from the cache) the regex for this expression.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RegexError`] if the expression does not compile.
    pub fn regex(&self) -> Result<Regex, Box<GridError>> {
        Ok(get_regex(&self.source)?)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Build the search expression for a strip of fillable cells and letters.
///
/// # Errors
///
/// Returns [`GridError::NoLetters`] if the strip has no anchor letter.
pub fn build_expression(marks: &[Mark]) -> Result<Expression, Box<GridError>> {
    let counts = count_letters(marks)?;
    Ok(render_expression(marks, &counts))
}

/// Render an expression once the letters have been counted.
pub(crate) fn render_expression(marks: &[Mark], counts: &LetterCount) -> Expression {
    debug_assert!(counts.last < marks.len(), "last letter must lie inside the strip");
    debug_assert!(
        !marks.contains(&Mark::Blocked),
        "strips handed to the codec must not contain blocked cells"
    );

    let mut source = String::with_capacity(INDEX_TAG.len() + SEGMENT_END.len() + 4 * marks.len());
    source.push_str(INDEX_TAG);
    let _ = write!(source, "(?P<{WORD_GROUP}>(?P<{LEAD_GROUP}>");
    if counts.first > 0 {
        let _ = write!(source, r"\w{{0,{}}}", counts.first);
    }
    source.push(')');

    let mut fillable_run = 0;
    for mark in &marks[counts.first..=counts.last] {
        match mark {
            Mark::Letter(c) if mark.is_anchor() => {
                if fillable_run > 0 {
                    let _ = write!(source, r"\w{{{fillable_run}}}");
                    fillable_run = 0;
                }
                let mut buf = [0u8; 4];
                source.push_str(&fancy_regex::escape(c.encode_utf8(&mut buf)));
            }
            _ => fillable_run += 1,
        }
    }

    let trailing = marks.len() - 1 - counts.last;
    if trailing > 0 {
        let _ = write!(source, r"\w{{0,{trailing}}}");
    }
    source.push(')');
    source.push_str(SEGMENT_END);

    Expression { source, first_letter: counts.first }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Strip;

    fn expr(s: &str) -> String {
        let strip: Strip = s.parse().unwrap();
        build_expression(&strip).unwrap().as_str().to_string()
    }

    #[test]
    fn test_expression_ascii() {
        assert_eq!(
            expr("--R----G--E"),
            r"\[(?P<index>\d+)\](?P<word>(?P<lead>\w{0,2})R\w{4}G\w{2}E)(?=\[\d+\]|$)"
        );
    }

    #[test]
    fn test_expression_extended_letters() {
        assert_eq!(
            expr("F-ß---K---中--"),
            r"\[(?P<index>\d+)\](?P<word>(?P<lead>)F\w{1}ß\w{3}K\w{3}中\w{0,2})(?=\[\d+\]|$)"
        );
    }

    #[test]
    fn test_expression_single_letter() {
        assert_eq!(
            expr("--中--"),
            r"\[(?P<index>\d+)\](?P<word>(?P<lead>\w{0,2})中\w{0,2})(?=\[\d+\]|$)"
        );
    }

    #[test]
    fn test_expression_without_letters_fails() {
        let strip: Strip = "-------".parse().unwrap();
        let err = build_expression(&strip).unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_first_letter_is_recorded() {
        let strip: Strip = "---G--E".parse().unwrap();
        assert_eq!(build_expression(&strip).unwrap().first_letter(), 3);
    }

    #[test]
    fn test_expression_matches_whole_segments_only() {
        let strip: Strip = "--R--".parse().unwrap();
        let re = build_expression(&strip).unwrap().regex().unwrap();

        // "CARDIO" runs three cells past the R, one more than the strip has
        assert!(!re.is_match("[0]CARDIO").unwrap());
        // "CAR" ends on the R, with two letters before it
        let caps = re.captures("[0]CARDIO[1]CAR").unwrap().unwrap();
        assert_eq!(&caps[INDEX_GROUP], "1");
        assert_eq!(&caps[WORD_GROUP], "CAR");
        assert_eq!(&caps[LEAD_GROUP], "CA");
    }

    #[test]
    fn test_expression_matches_last_segment() {
        let strip: Strip = "-A-".parse().unwrap();
        let re = build_expression(&strip).unwrap().regex().unwrap();
        let caps = re.captures("[0]XYZW[1]AT").unwrap().unwrap();
        assert_eq!(&caps[WORD_GROUP], "AT");
    }

    #[test]
    fn test_regex_cache_returns_equivalent_regex() {
        let a = get_regex(r"\w{0,2}Q").unwrap();
        let b = get_regex(r"\w{0,2}Q").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }
}
