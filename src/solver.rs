//! The fill loop: seed one word, then keep attaching words to lines that
//! already carry a letter until nothing more can be placed.
//!
//! # Error Handling
//!
//! The solver uses [`SolverError`] with three variants:
//!
//! - S001: `GridFailure` (Grid operation failed (wraps [`GridError`]))
//! - S002: `InvalidGridSize` (Grid is too small for any word)
//! - S003: `SeedFailure` (No word could be chosen to start the fill)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! Running out of words, lines or time is not an error: the run ends with a
//! [`FillStatus`] in its [`FillReport`].
//!
//! # Examples
//!
//! ```
//! use crossfill::solver::{self, FillConfig, FillStatus};
//!
//! let words = vec![("crossword", "Grid puzzle"), ("word", "Unit of speech"), ("code", "Program text")];
//! let config = FillConfig { seed: Some(7), ..FillConfig::default() };
//! let (puzzle, report) = solver::generate(11, words, &config)?;
//!
//! assert!(report.placed >= 1);
//! assert!(!matches!(report.status, FillStatus::TimedOut { .. }));
//! println!("{}", puzzle.grid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use instant::Instant;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::errors::GridError;
use crate::grid::LineStatus;
use crate::puzzle::Puzzle;
use crate::word::{Axis, Location};

// The amount of time (in seconds) a fill may run
const TIME_BUDGET: u64 = 30;
/// How many of the longest words the first word is drawn from
pub const DEFAULT_SEED_POOL: usize = 5;
/// Fraction of the words an automatic run must place before it stops growing the grid
pub const GROWTH_TARGET: f64 = 0.9;
/// How many times an automatic run may grow the grid
pub const MAX_GROWTHS: usize = 5;
/// Cells added to each side per growth
pub const GROWTH_STEP: usize = 2;

/// Knobs for a fill run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillConfig {
    /// Wall-clock limit for one fill
    pub time_budget: Duration,
    /// Seed for a reproducible run; `None` uses the thread RNG
    pub seed: Option<u64>,
    /// Number of longest words the first word is drawn from
    pub seed_pool: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(TIME_BUDGET),
            seed: None,
            seed_pool: DEFAULT_SEED_POOL,
        }
    }
}

/// Why the fill loop stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
    /// Every eligible word has been placed.
    NoMoreWords,

    /// Every line is either complete or has no letter to attach to.
    AllCompletedOrEmpty,

    /// Every remaining line was tried since the last placement and none could take a word yet.
    AllBlocked,

    /// The time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Outcome of a fill run (even if it stopped early).
#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    pub status: FillStatus,
    /// Words on the grid
    pub placed: usize,
    /// Candidates that passed validation
    pub eligible: usize,
    /// Candidates supplied, valid or not
    pub offered: usize,
    /// Lines visited by the loop
    pub iterations: usize,
    /// Visits that found long stretches but no letter in them
    pub blocked_attempts: usize,
    /// Visits that found stretches but no word for any of them
    pub missed_lines: usize,
    pub elapsed: Duration,
}

impl FillReport {
    /// Share of the offered words that made it onto the grid.
    #[must_use]
    pub fn placed_ratio(&self) -> f64 {
        if self.offered == 0 {
            return 1.0;
        }
        self.placed as f64 / self.offered as f64
    }
}

/// Unified error type for the fill pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A grid operation failed. These originate from the grid layer
    /// (`GridError`), which we box to keep the error type size stable.
    #[error("grid failure: {0}")]
    GridFailure(#[from] Box<GridError>),

    /// The grid cannot hold a word of the minimum length.
    #[error("grid size {size} is too small")]
    InvalidGridSize { size: usize },

    /// The first word could not be chosen.
    #[error("cannot seed the grid: pool of {pool} from {eligible} eligible words")]
    SeedFailure { pool: usize, eligible: usize },
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::GridFailure(_) => "S001",
            SolverError::InvalidGridSize { .. } => "S002",
            SolverError::SeedFailure { .. } => "S003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::GridFailure(_) => "Grid operation failed",
            SolverError::InvalidGridSize { .. } => "Grid is too small for any word",
            SolverError::SeedFailure { .. } => "No word could be chosen to start the fill",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::GridFailure(_) => "A placement or pattern operation failed inside the fill loop. This wraps an underlying GridError (see Grid Errors section for specific error codes).",
            SolverError::InvalidGridSize { .. } => "Words have at least two letters, so the grid must be at least 2x2.",
            SolverError::SeedFailure { .. } => "The first word is drawn from the longest eligible words. The pool it is drawn from was empty, which happens when the configured seed pool is zero.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::InvalidGridSize { .. } => Some("Use a grid size of at least 2, e.g. '--grid-size 15'"),
            SolverError::SeedFailure { .. } => Some("Use a seed pool of at least 1 (the default is 5)"),
            SolverError::GridFailure(_) => None, // GridError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::GridFailure(ge) => {
                // delegate to GridError's detailed display
                format!("{}\n  caused by: {}", self.code(), ge.display_detailed())
            }
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Simple helper to enforce a wall-clock time limit.
///
/// Usage:
/// ```ignore
///  let budget = TimeBudget::new(Duration::from_secs(30));
///  while !budget.expired() {
///    // do some work
///  }
/// ```
struct TimeBudget {
    start: Instant,  // when the budget began
    limit: Duration, // maximum allowed elapsed time
}

impl TimeBudget {
    fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// Place the first word: one of the `pool` longest words, on a random line
/// and axis, at a random offset where it fits.
///
/// # Errors
///
/// [`SolverError::SeedFailure`] if the pool is empty, or
/// [`SolverError::GridFailure`] if the placement is rejected.
pub fn seed_first_word<R: Rng + ?Sized>(puzzle: &mut Puzzle, pool: usize, rng: &mut R) -> Result<(), SolverError> {
    let pool = pool.min(puzzle.eligible());
    if pool == 0 {
        return Err(SolverError::SeedFailure { pool, eligible: puzzle.eligible() });
    }

    let index = rng.gen_range(0..pool);
    let len = puzzle.words()[index].size;
    let axis = if rng.gen_bool(0.5) { Axis::Across } else { Axis::Down };
    let line = rng.gen_range(0..puzzle.size());
    let offset = rng.gen_range(0..=puzzle.size() - len);
    let location = Location::new(axis, line);

    puzzle.place_word(index, location, offset)?;
    info!("seeded with {} on {location} at offset {offset}", puzzle.words()[index].canonical);
    Ok(())
}

/// Fill `puzzle` until one of the stop conditions holds.
///
/// Each iteration picks a line at random among those that have a letter to
/// attach to, are not complete, and have not been found blocked since the
/// last placement. The line's stretches are tried longest first; the first
/// matching word is placed. A line with stretches but no matching word is
/// marked complete.
///
/// # Errors
///
/// Returns a [`SolverError`] if seeding fails or a grid operation fails. The
/// stop conditions themselves are reported through [`FillReport::status`].
pub fn fill_puzzle<R: Rng + ?Sized>(
    puzzle: &mut Puzzle,
    config: &FillConfig,
    rng: &mut R,
) -> Result<FillReport, SolverError> {
    let budget = TimeBudget::new(config.time_budget);

    if puzzle.is_blank() && puzzle.eligible() > 0 {
        seed_first_word(puzzle, config.seed_pool, rng)?;
    }

    let mut currently_blocked: BTreeSet<Location> = BTreeSet::new();
    let mut iterations = 0;
    let mut blocked_attempts = 0;
    let mut missed_lines = 0;

    let status = loop {
        if budget.expired() {
            break FillStatus::TimedOut { elapsed: budget.elapsed() };
        }
        if puzzle.placed_count() == puzzle.eligible() {
            break FillStatus::NoMoreWords;
        }
        let available = puzzle.available_locations();
        if available.is_empty() {
            break FillStatus::AllCompletedOrEmpty;
        }
        let open: Vec<Location> = available.difference(&currently_blocked).copied().collect();
        let Some(&location) = open.choose(rng) else {
            break FillStatus::AllBlocked;
        };
        iterations += 1;

        match puzzle.subpatterns(location)? {
            LineStatus::Blocked => {
                blocked_attempts += 1;
                currently_blocked.insert(location);
            }
            LineStatus::Complete => {
                puzzle.mark_complete(location);
            }
            LineStatus::Open(subs) => {
                let mut found = None;
                for sub in &subs {
                    if let Some(m) = puzzle.find_match(sub)? {
                        found = Some(m);
                        break;
                    }
                }
                match found {
                    Some(m) => {
                        puzzle.place_word(m.index, location, m.start)?;
                        currently_blocked.clear();
                    }
                    None => {
                        debug!("no word fits {location}");
                        missed_lines += 1;
                        puzzle.mark_complete(location);
                    }
                }
            }
        }
    };

    let report = FillReport {
        status,
        placed: puzzle.placed_count(),
        eligible: puzzle.eligible(),
        offered: puzzle.offered(),
        iterations,
        blocked_attempts,
        missed_lines,
        elapsed: budget.elapsed(),
    };
    info!(
        "fill stopped ({:?}): {}/{} words placed after {} iterations",
        report.status, report.placed, report.eligible, report.iterations
    );
    debug!(
        "{} lines complete, {} lines never crossed",
        puzzle.book().complete_locations().len(),
        puzzle.book().empty_locations().len()
    );
    Ok(report)
}

/// Fill `puzzle` with the RNG the configuration asks for.
///
/// # Errors
///
/// See [`fill_puzzle`].
pub fn fill(puzzle: &mut Puzzle, config: &FillConfig) -> Result<FillReport, SolverError> {
    match config.seed {
        Some(seed) => fill_puzzle(puzzle, config, &mut StdRng::seed_from_u64(seed)),
        None => fill_puzzle(puzzle, config, &mut rand::thread_rng()),
    }
}

/// Build a puzzle of `grid_size` from `(text, clue)` candidates and fill it.
///
/// # Errors
///
/// See [`Puzzle::new`] and [`fill_puzzle`].
pub fn generate<I, T, C>(grid_size: usize, candidates: I, config: &FillConfig) -> Result<(Puzzle, FillReport), SolverError>
where
    I: IntoIterator<Item = (T, C)>,
    T: Into<String>,
    C: Into<String>,
{
    let mut puzzle = Puzzle::new(grid_size, candidates)?;
    let report = fill(&mut puzzle, config)?;
    Ok((puzzle, report))
}

/// Fill repeatedly, growing the grid by [`GROWTH_STEP`] each time, until at
/// least [`GROWTH_TARGET`] of the words are placed or [`MAX_GROWTHS`] growths
/// have been tried. Returns the run that placed the largest share of words
/// (the smallest grid on ties).
///
/// Each attempt gets the full time budget.
///
/// # Errors
///
/// See [`Puzzle::new`] and [`fill_puzzle`].
pub fn generate_with_growth<T, C>(
    grid_size: usize,
    candidates: &[(T, C)],
    config: &FillConfig,
) -> Result<(Puzzle, FillReport), SolverError>
where
    T: AsRef<str>,
    C: AsRef<str>,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut best: Option<(Puzzle, FillReport)> = None;
    let mut size = grid_size;
    for growth in 0..=MAX_GROWTHS {
        let mut puzzle = Puzzle::new(size, candidates.iter().map(|(t, c)| (t.as_ref(), c.as_ref())))?;
        let report = fill_puzzle(&mut puzzle, config, &mut rng)?;
        let ratio = report.placed_ratio();
        info!("grid {size}: placed {:.0}% of the words", ratio * 100.0);

        if best.as_ref().is_none_or(|(_, r)| ratio > r.placed_ratio()) {
            best = Some((puzzle, report));
        }
        if ratio >= GROWTH_TARGET || growth == MAX_GROWTHS {
            break;
        }
        size += GROWTH_STEP;
    }

    best.ok_or(SolverError::InvalidGridSize { size: grid_size })
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
        ]
    }

    fn seeded(seed: u64) -> FillConfig {
        FillConfig { seed: Some(seed), ..FillConfig::default() }
    }

    /// Every placed word reads back from the grid, so crossings agree.
    fn assert_grid_consistent(puzzle: &Puzzle) {
        for w in puzzle.words().iter().filter(|w| w.is_placed()) {
            for (row, col, c) in w.cells() {
                assert_eq!(puzzle.grid().get(row, col), Some(c), "{} at ({row}, {col})", w.canonical);
            }
        }
    }

    #[test]
    fn test_fill_places_words_consistently() {
        for seed in 0..20 {
            let (puzzle, report) = generate(9, scenario_words(), &seeded(seed)).unwrap();
            assert!(report.placed >= 1);
            assert_eq!(report.placed, puzzle.placed_count());
            assert_eq!(report.eligible, 10);
            assert!(!matches!(report.status, FillStatus::TimedOut { .. }));
            assert_grid_consistent(&puzzle);
        }
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let (a, ra) = generate(9, scenario_words(), &seeded(42)).unwrap();
        let (b, rb) = generate(9, scenario_words(), &seeded(42)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.placed_words(), b.placed_words());
        assert_eq!(ra.status, rb.status);
        assert_eq!(ra.iterations, rb.iterations);
    }

    #[test]
    fn test_seed_draws_from_longest_words() {
        for seed in 0..10 {
            let mut puzzle = Puzzle::new(9, scenario_words()).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            seed_first_word(&mut puzzle, 2, &mut rng).unwrap();
            let first = &puzzle.placed_words()[0];
            assert!(first.word == "MOTSDESFA" || first.word == "DATAVAULT");
        }
    }

    #[test]
    fn test_empty_seed_pool_fails() {
        let mut puzzle = Puzzle::new(9, scenario_words()).unwrap();
        let config = FillConfig { seed_pool: 0, ..seeded(1) };
        let err = fill(&mut puzzle, &config).unwrap_err();
        assert_eq!(err.code(), "S003");
        assert!(err.display_detailed().contains("seed pool"));
    }

    #[test]
    fn test_no_candidates_stops_immediately() {
        let (puzzle, report) = generate(5, Vec::<(&str, &str)>::new(), &seeded(1)).unwrap();
        assert_eq!(report.status, FillStatus::NoMoreWords);
        assert_eq!(report.placed, 0);
        assert_eq!(puzzle.grid().filled(), 0);
    }

    #[test]
    fn test_single_word_is_no_more_words() {
        let (_, report) = generate(5, vec![("hello", "greeting")], &seeded(3)).unwrap();
        assert_eq!(report.status, FillStatus::NoMoreWords);
        assert_eq!(report.placed, 1);
    }

    #[test]
    fn test_unplaceable_short_word_completes_lines() {
        // after the seed only "ZZ" remains and it shares no letter with it:
        // every crossed line is tried, misses, and is marked complete
        let config = FillConfig { seed_pool: 1, ..seeded(9) };
        let (puzzle, report) = generate(5, vec![("abcde", ""), ("zz", "")], &config).unwrap();
        assert_eq!(report.placed, 1);
        assert_eq!(report.status, FillStatus::AllCompletedOrEmpty);
        assert!(report.missed_lines >= 1);
        assert!(puzzle.dictionary().contains(1));
    }

    #[test]
    fn test_zero_budget_times_out() {
        let config = FillConfig { time_budget: Duration::ZERO, ..seeded(5) };
        let (_, report) = generate(9, scenario_words(), &config).unwrap();
        assert!(matches!(report.status, FillStatus::TimedOut { .. }));
    }

    #[test]
    fn test_growth_stops_when_target_met() {
        let words = vec![("cat", ""), ("tab", "")];
        let config = seeded(11);
        let (puzzle, report) = generate_with_growth(5, &words, &config).unwrap();
        assert!(puzzle.size() >= 5);
        assert!(report.placed >= 1);
        assert_grid_consistent(&puzzle);
    }

    #[test]
    fn test_growth_admits_long_words() {
        // the 7-letter word is rejected on a 5x5 grid but fits after one growth
        let words = vec![("letters", "")];
        let (puzzle, report) = generate_with_growth(5, &words, &seeded(2)).unwrap();
        assert_eq!(puzzle.size(), 7);
        assert_eq!(report.placed, 1);
        assert_eq!(report.status, FillStatus::NoMoreWords);
    }

    #[test]
    fn test_solver_error_codes() {
        let errors = [
            SolverError::GridFailure(Box::new(GridError::UnknownWord { index: 1 })),
            SolverError::InvalidGridSize { size: 1 },
            SolverError::SeedFailure { pool: 0, eligible: 3 },
        ];
        let codes: Vec<_> = errors.iter().map(SolverError::code).collect();
        assert_eq!(codes, vec!["S001", "S002", "S003"]);
        assert!(errors[0].display_detailed().contains("E007"));
        for e in &errors {
            assert!(e.details().len() > e.description().len());
        }
    }
}
