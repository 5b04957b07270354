#![forbid(unsafe_code)]

//! The event-driven rule compiler
//!
//! The resolver dispatches incoming events to the token builder, the
//! message compiler, and the phrase registry depending on the open scope,
//! and finalizes rules as their scopes close.

pub(crate) mod antipattern;
pub(crate) mod expansion;
pub(crate) mod message;
pub(crate) mod phrases;
mod resolver;
pub(crate) mod scope;
pub(crate) mod tokens;

pub use resolver::RuleCompiler;
