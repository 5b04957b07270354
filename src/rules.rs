#![forbid(unsafe_code)]

//! The compiled rule data model
//!
//! Everything the compiler emits is plain data: value types with structural
//! copy semantics, so OR-group expansion can clone freely without sharing
//! mutable state between rule variants.

mod antipattern;
mod category;
mod pattern_rule;
mod token;

pub use antipattern::{AntiPatternAction, AntiPatternRule};
pub use category::Category;
pub use pattern_rule::{IncorrectExample, PatternRule, RuleFilter, SuggestionMatch};
pub use token::{ExceptionScope, MatchToken, TokenException, Unification};
