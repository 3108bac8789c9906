use super::expression::{Expression, render_expression};
use super::strip::{Mark, count_letters};

use crate::errors::GridError;

/// One expression produced by [`generate_subexpressions`], tagged with the
/// absolute offset (along the grid line) of the sub-strip it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubExpression {
    pub expression: Expression,
    pub offset: usize,
}

/// Lazy, depth-first walk over a strip and its trimmed sub-strips.
///
/// Order: the strip itself, then everything derived from the strip with its
/// last letter (and the cell before it) trimmed off, then everything derived
/// from the strip with its first letter (and the cell after it) trimmed off.
/// The trimmed-away neighbour cell keeps a shorter word from ending flush
/// against the dropped letter.
#[derive(Debug, Clone)]
pub struct SubExpressions<'a> {
    stack: Vec<(&'a [Mark], usize)>,
    min_size: usize,
}

impl<'a> Iterator for SubExpressions<'a> {
    type Item = SubExpression;

    fn next(&mut self) -> Option<SubExpression> {
        while let Some((marks, offset)) = self.stack.pop() {
            if marks.len() < self.min_size {
                continue;
            }
            // sub-strips may have lost every letter while trimming
            let Ok(counts) = count_letters(marks) else {
                continue;
            };

            if counts.count > 1 {
                // pushed first, popped last
                let left_start = counts.first + 2;
                if marks.len().saturating_sub(left_start) > 1 {
                    self.stack.push((&marks[left_start..], offset + left_start));
                }
                let right_end = counts.last - 1;
                if right_end > 1 {
                    self.stack.push((&marks[..right_end], offset));
                }
            }

            return Some(SubExpression {
                expression: render_expression(marks, &counts),
                offset,
            });
        }
        None
    }
}

/// Generate the expressions for `marks` (found at `offset` along its line)
/// and for its sub-strips, most constrained first.
///
/// Sub-strips shorter than `min_size` (the shortest remaining word), shorter
/// than two cells, or without any letter are skipped.
///
/// # Errors
///
/// Returns [`GridError::NoLetters`] if `marks` itself has no anchor letter.
pub fn generate_subexpressions(
    marks: &[Mark],
    offset: usize,
    min_size: usize,
) -> Result<SubExpressions<'_>, Box<GridError>> {
    count_letters(marks)?;
    Ok(SubExpressions { stack: vec![(marks, offset)], min_size })
}
