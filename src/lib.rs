#![forbid(unsafe_code)]

//! Rulebook: a compiler for declarative grammar-rule patterns
//!
//! Rulebook turns a markup-based grammar-rule definition language into
//! executable pattern-matching rule objects for a natural-language style
//! checker. An external tokenizer feeds the compiler a stream of
//! open/close/text events; the compiler tracks the nested category, rule
//! group, rule, and pattern scopes, expands OR-groups into the Cartesian
//! product of concrete rules, splices phrase references, cascades
//! attribute inheritance, and emits a list of fully resolved
//! [`PatternRule`] objects for a downstream matching engine.
//!
//! ```
//! use rulebook::{Event, RuleCompiler, Tag};
//!
//! let compiler = RuleCompiler::new();
//! let rules = compiler
//!     .compile([
//!         Event::open(Tag::Rules, [("lang", "en")]),
//!         Event::open(Tag::Category, [("name", "Grammar")]),
//!         Event::open(Tag::Rule, [("id", "DUPLICATE_THE"), ("name", "Duplicate 'the'")]),
//!         Event::open_empty(Tag::Pattern),
//!         Event::open_empty(Tag::Token),
//!         Event::text("the"),
//!         Event::close(Tag::Token),
//!         Event::open_empty(Tag::Token),
//!         Event::text("the"),
//!         Event::close(Tag::Token),
//!         Event::close(Tag::Pattern),
//!         Event::close(Tag::Rule),
//!         Event::close(Tag::Category),
//!         Event::close(Tag::Rules),
//!     ])
//!     .unwrap();
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules[0].id, "DUPLICATE_THE");
//! ```

pub mod compiler;
pub mod error;
pub mod events;
pub mod rules;
pub mod types;

// Re-export the compiler entry point
pub use compiler::RuleCompiler;

// Re-export the input interface
pub use events::{Attributes, Event, Tag};

// Re-export error types for convenient access
pub use error::CompileError;

// Re-export the compiled rule model
pub use rules::{
    AntiPatternAction, AntiPatternRule, Category, ExceptionScope, IncorrectExample, MatchToken,
    PatternRule, RuleFilter, SuggestionMatch, TokenException, Unification,
};

// Re-export core domain types
pub use types::{CategoryLocation, IssueType, Language};
