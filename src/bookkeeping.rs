//! Which lines are worth visiting.
//!
//! A line is *empty* while no perpendicular word crosses it (there is no letter
//! to attach to) and *complete* once no remaining word can fit on it. Both sets
//! are updated after each placement rather than recomputed.

use std::collections::BTreeSet;
use std::ops::Range;

use log::debug;

use crate::errors::GridError;
use crate::grid::{Board, LineStatus};
use crate::word::Location;

#[derive(Debug, Clone)]
pub struct LocationBook {
    size: usize,
    empty: BTreeSet<Location>,
    complete: BTreeSet<Location>,
}

impl LocationBook {
    /// Every line starts out empty and incomplete.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            empty: Location::all(size).collect(),
            complete: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn empty_locations(&self) -> &BTreeSet<Location> {
        &self.empty
    }

    #[must_use]
    pub fn complete_locations(&self) -> &BTreeSet<Location> {
        &self.complete
    }

    #[must_use]
    pub fn is_complete(&self, location: Location) -> bool {
        self.complete.contains(&location)
    }

    /// Record that no remaining word fits on `location`. Returns `false` if it
    /// was already complete.
    pub fn mark_complete(&mut self, location: Location) -> bool {
        let added = self.complete.insert(location);
        if added {
            debug!("{location} is complete");
        }
        added
    }

    /// Lines that are neither empty nor complete, in a fixed order.
    #[must_use]
    pub fn available(&self) -> BTreeSet<Location> {
        Location::all(self.size)
            .filter(|l| !self.empty.contains(l) && !self.is_complete(*l))
            .collect()
    }

    /// Update both sets after a word was placed on `location` over `span`.
    ///
    /// Perpendicular lines crossed by the word stop being empty. The placed
    /// line and its two neighbours are re-checked for completeness against
    /// `min_size`, the length of the shortest word still unplaced.
    ///
    /// # Errors
    ///
    /// Propagates non-degenerate errors from [`Board::subpatterns`].
    pub fn refresh_after_place(
        &mut self,
        board: &Board,
        location: Location,
        span: Range<usize>,
        min_size: usize,
    ) -> Result<(), Box<GridError>> {
        let crossed = location.axis.perpendicular();
        for index in span {
            self.empty.remove(&Location::new(crossed, index));
        }

        for line in std::iter::once(location).chain(location.neighbors(self.size)) {
            if self.is_complete(line) {
                continue;
            }
            if board.subpatterns(line, min_size)? == LineStatus::Complete {
                self.mark_complete(line);
            }
        }
        Ok(())
    }
}
