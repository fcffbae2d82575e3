//! The statement executor: a single-pass recursive walk over a parsed
//! program.

pub mod evaluator;
pub mod expr;

pub use evaluator::{ErrorMode, Evaluator, RunOutcome};
pub use expr::{compare_values, eval_expr, read_property, Value};
