pub mod expression;
pub mod strip;
pub mod subexpressions;

// Re-export the public API so call sites can use `crate::pattern::*`.
pub use expression::{Expression, build_expression};
pub use strip::{LetterCount, Mark, Strip, count_letters};
pub use subexpressions::{SubExpression, SubExpressions, generate_subexpressions};
