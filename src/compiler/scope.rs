#![forbid(unsafe_code)]

//! Explicit scope tracking for the event dispatcher
//!
//! The dispatcher never consults ad-hoc booleans: every open element pushes
//! a tagged scope, every close pops it, and questions like "where does this
//! text run go" are answered by walking the stack from the top. Per-scope
//! state (sub-id counters, anti-pattern sequences, accumulated buffers)
//! lives on the scope structs themselves, so sibling scopes cannot leak
//! state into each other.

use crate::rules::{AntiPatternRule, Category, IncorrectExample, RuleFilter, SuggestionMatch};
use std::sync::Arc;
use url::Url;

/// One open scope on the dispatcher's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    Category,
    RuleGroup,
    Rule,
    Pattern,
    AntiPattern,
    AndGroup,
    OrGroup,
    Token,
    Exception,
    Unify,
    UnifyIgnore,
    Marker,
    Message,
    Suggestion,
    Short,
    Url,
    Match,
    CorrectExample,
    IncorrectExample,
    IgnoredExample,
    Phrases,
    Phrase,
}

/// Where the single text-event handler routes a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextTarget {
    Token,
    Exception,
    MatchLemma,
    Message,
    SuggestionOut,
    ShortRule,
    ShortGroup,
    UrlRule,
    UrlGroup,
    CorrectExample,
    IncorrectExample,
    Ignore,
}

/// Which construct an opening `marker` element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerContext {
    TokenSequence,
    CorrectExample,
    IncorrectExample,
    Other,
}

/// Stack of open scopes
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    scopes: Vec<ScopeKind>,
}

impl ScopeStack {
    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(kind);
    }

    /// Pops the topmost occurrence of `kind`
    ///
    /// The event stream is assumed well-nested; tolerating a stray close
    /// here beats desynchronizing the whole stack.
    pub fn pop(&mut self, kind: ScopeKind) {
        if let Some(pos) = self.scopes.iter().rposition(|&k| k == kind) {
            self.scopes.remove(pos);
        }
    }

    pub fn contains(&self, kind: ScopeKind) -> bool {
        self.scopes.contains(&kind)
    }

    /// Resolves the active accumulation target for a text run
    ///
    /// Walks from the innermost scope outward; transparent scopes (markers,
    /// unification brackets, AND/OR groups) defer to what encloses them.
    /// Exactly one target is active at a time.
    pub fn text_target(&self) -> TextTarget {
        for kind in self.scopes.iter().rev() {
            match kind {
                ScopeKind::Token => return TextTarget::Token,
                ScopeKind::Exception => return TextTarget::Exception,
                ScopeKind::Match => return TextTarget::MatchLemma,
                ScopeKind::Message => return TextTarget::Message,
                ScopeKind::Suggestion => {
                    return if self.contains(ScopeKind::Message) {
                        TextTarget::Message
                    } else {
                        TextTarget::SuggestionOut
                    };
                }
                ScopeKind::Short => {
                    return if self.contains(ScopeKind::Rule) {
                        TextTarget::ShortRule
                    } else {
                        TextTarget::ShortGroup
                    };
                }
                ScopeKind::Url => {
                    return if self.contains(ScopeKind::Rule) {
                        TextTarget::UrlRule
                    } else {
                        TextTarget::UrlGroup
                    };
                }
                ScopeKind::CorrectExample => return TextTarget::CorrectExample,
                ScopeKind::IncorrectExample => return TextTarget::IncorrectExample,
                ScopeKind::IgnoredExample => return TextTarget::Ignore,
                ScopeKind::Marker
                | ScopeKind::Unify
                | ScopeKind::UnifyIgnore
                | ScopeKind::AndGroup
                | ScopeKind::OrGroup => continue,
                _ => return TextTarget::Ignore,
            }
        }
        TextTarget::Ignore
    }

    /// Resolves what an opening `marker` element marks
    pub fn marker_context(&self) -> MarkerContext {
        for kind in self.scopes.iter().rev() {
            match kind {
                ScopeKind::Pattern | ScopeKind::AntiPattern => {
                    return MarkerContext::TokenSequence;
                }
                ScopeKind::CorrectExample => return MarkerContext::CorrectExample,
                ScopeKind::IncorrectExample => return MarkerContext::IncorrectExample,
                _ => continue,
            }
        }
        MarkerContext::Other
    }
}

/// State of the open category
#[derive(Debug)]
pub(crate) struct CategoryScope {
    /// Shared descriptor handed to every rule compiled in this category
    pub category: Arc<Category>,
    /// Raw issue-type override, inherited by rules without their own
    pub issue_type: Option<String>,
}

/// State of the open rule group
#[derive(Debug, Default)]
pub(crate) struct GroupScope {
    pub id: Option<String>,
    /// Doubles as the default name of contained rules
    pub description: Option<String>,
    pub default_off: bool,
    pub issue_type: Option<String>,
    /// Group-level reference URLs, used by rules that declare none
    pub urls: Vec<Url>,
    /// Group-level short message, used by rules that declare none
    pub short_message: String,
    /// Strictly increasing 1-based sub-identifier of contained rules
    pub sub_id: u32,
    /// Anti-patterns shared by every rule compiled in this group
    pub antipatterns: Vec<AntiPatternRule>,
    /// 1-based sequence for anti-pattern ids, owned by the group
    pub antipattern_seq: u32,
}

/// Per-rule transient state, reset at every rule open
#[derive(Debug, Default)]
pub(crate) struct RuleScope {
    pub id: Option<String>,
    pub name: Option<String>,
    pub default_off: bool,
    pub default_on: bool,
    pub issue_type: Option<String>,
    pub message: String,
    pub suggestions_out: String,
    pub short_message: String,
    pub urls: Vec<Url>,
    pub correct_examples: Vec<String>,
    pub incorrect_examples: Vec<IncorrectExample>,
    pub filter: Option<RuleFilter>,
    pub antipatterns: Vec<AntiPatternRule>,
    /// Explicit `match` elements seen in the message, pending extraction
    pub pending_msg_matches: Vec<SuggestionMatch>,
    /// Explicit `match` elements in out-of-message suggestions
    pub pending_out_matches: Vec<SuggestionMatch>,
    /// Final message-scoped matches, rebuilt when the message closes
    pub suggestion_matches: Vec<SuggestionMatch>,
    /// Token list of the rule's pattern, kept after the pattern closes
    pub pattern: Option<super::tokens::PatternBuilder>,
    /// Combined token lists produced by phrase references
    pub phrase_variants: Vec<Vec<crate::rules::MatchToken>>,
}
