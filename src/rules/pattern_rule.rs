#![forbid(unsafe_code)]

//! The compiled pattern rule

use crate::rules::{AntiPatternRule, Category, MatchToken};
use crate::types::{IssueType, Language};
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// A correction reference extracted from message or suggestion text
///
/// References appear as `\N` placeholders in the finished template; the
/// descriptor links the placeholder to the pattern token it echoes and an
/// optional lemma to substitute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionMatch {
    /// 1-based number of the referenced pattern token
    pub token_ref: usize,
    /// Lemma to substitute instead of the matched form
    pub lemma: Option<String>,
}

impl SuggestionMatch {
    /// Creates a plain reference to the given token with no lemma
    pub fn new(token_ref: usize) -> Self {
        SuggestionMatch {
            token_ref,
            lemma: None,
        }
    }
}

/// An incorrect-usage example with its expected corrections
///
/// `<marker>` bounds are kept literally inside the text. Corrections come
/// from splitting the `correction` attribute on `|`; a trailing empty
/// alternative is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncorrectExample {
    /// Example sentence, markers kept literal
    pub text: String,
    /// Ordered alternative corrections
    pub corrections: Vec<String>,
}

/// A named filter attached to a rule
///
/// The compiler only records the name and raw argument string; resolving
/// the implementation is the loader's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFilter {
    /// Filter class name as written in the markup
    pub class_name: String,
    /// Raw, unparsed argument string
    pub args: String,
}

/// A fully resolved, ready-to-match pattern rule
///
/// OR-groups are expanded away: every `PatternRule` carries one concrete
/// token sequence. Rules compiled from the same source rule share their
/// category (by `Arc`) but own everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRule {
    /// Rule id, inherited from the rule group when absent
    pub id: String,
    /// Per-group sequence number; `"1"` outside any group
    pub sub_id: String,
    /// Display name, inherited from the group description when absent
    pub name: String,
    /// Compilation language
    pub language: Language,
    /// Final ordered token sequence
    pub tokens: Vec<MatchToken>,
    /// Message template, embedded suggestion markup kept literal
    pub message: String,
    /// Short message, falling back to the group's template
    pub short_message: String,
    /// Suggestion template declared outside the message
    pub suggestions_out_msg: String,
    /// Correction references extracted from the message, in encounter order
    pub suggestion_matches: Vec<SuggestionMatch>,
    /// Correction references from out-of-message suggestions
    pub suggestion_matches_out_msg: Vec<SuggestionMatch>,
    /// Immunizing anti-patterns owned by this rule
    pub antipatterns: Vec<AntiPatternRule>,
    /// Shared category descriptor
    pub category: Arc<Category>,
    /// Issue type after rule → group → category inheritance
    pub issue_type: Option<IssueType>,
    /// Enabled state after inheritance
    pub enabled: bool,
    /// Marker start correction
    pub start_position_correction: i32,
    /// Marker end correction (zero or negative)
    pub end_position_correction: i32,
    /// Reference URLs, rule-level list or the group's fallback
    pub urls: Vec<Url>,
    /// Named filter, unresolved
    pub filter: Option<RuleFilter>,
    /// Correct-usage examples, markers kept literal
    pub correct_examples: Vec<String>,
    /// Incorrect-usage examples with corrections
    pub incorrect_examples: Vec<IncorrectExample>,
}

impl PatternRule {
    /// Full identifier including the sub-id, e.g. `AGREEMENT[2]`
    pub fn full_id(&self) -> String {
        format!("{}[{}]", self.id, self.sub_id)
    }
}
