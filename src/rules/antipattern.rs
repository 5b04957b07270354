#![forbid(unsafe_code)]

//! Anti-patterns: token sequences that immunize a rule's match

use crate::rules::MatchToken;
use serde::Serialize;

/// What an anti-pattern does when its token sequence matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiPatternAction {
    /// Suppress the owning rule's match over the same span
    #[default]
    Immunize,
}

/// A compiled anti-pattern attached to one or more rules
///
/// Anti-patterns are exposed as a sub-list on their owning rule, never as
/// standalone top-level rules. The token sequence is cloned from the
/// compiler's working state and shares nothing with the owning rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntiPatternRule {
    /// `<rule-or-group-id>_antipattern:<n>`, n counted per enclosing group
    pub id: String,
    /// The immunizing action
    pub action: AntiPatternAction,
    /// Independent token sequence
    pub tokens: Vec<MatchToken>,
    /// Marker start correction
    pub start_position_correction: i32,
    /// Marker end correction (zero or negative)
    pub end_position_correction: i32,
}
