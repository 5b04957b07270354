#![forbid(unsafe_code)]

//! Match tokens: the unit of a rule's pattern

use serde::Serialize;
use std::collections::BTreeMap;

/// Which neighboring position an exception applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionScope {
    /// The position of the owning token itself
    #[default]
    Current,
    /// The position after the owning token
    Next,
    /// The position before the owning token
    Previous,
}

impl ExceptionScope {
    /// Parses the `scope` attribute value; unknown values mean `Current`
    pub fn from_name(name: &str) -> ExceptionScope {
        match name {
            "next" => ExceptionScope::Next,
            "previous" => ExceptionScope::Previous,
            _ => ExceptionScope::Current,
        }
    }
}

/// An exclusion predicate attached to a token
///
/// When the exception matches, the owning token does not, regardless of its
/// own text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenException {
    /// Literal or regex text to match against
    pub text: String,
    /// Whether `text` is a regular expression
    pub regexp: bool,
    /// Whether the exception condition itself is negated
    pub negate: bool,
    /// Whether to match against all inflected forms
    pub inflected: bool,
    /// Case-sensitive comparison
    pub case_sensitive: bool,
    /// Neighboring position the exception guards
    pub scope: ExceptionScope,
}

/// Unification linkage carried by tokens inside a `unify` scope
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Unification {
    /// Feature name to equivalence-type names, as declared by the scope
    pub features: BTreeMap<String, Vec<String>>,
    /// Token is inside a `unify-ignore` sub-scope (ignored by the unifier)
    pub neutral: bool,
    /// Set only on the last token of the unification scope
    pub last: bool,
    /// Negated agreement, set only on the last token of the scope
    pub negation: bool,
}

/// One unit of a rule's pattern, matched against one input token
///
/// A token carrying an `or_group` is itself the first alternative; rule
/// expansion replaces it with each alternative in turn. A token carrying an
/// `and_group` requires all members to match at the same input position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchToken {
    /// Literal or regex text to match against
    pub text: String,
    /// Whether `text` is a regular expression
    pub regexp: bool,
    /// Match is negated
    pub negate: bool,
    /// Match against all inflected forms of `text`
    pub inflected: bool,
    /// Case-sensitive comparison
    pub case_sensitive: bool,
    /// Maximum number of input tokens that may be skipped before this one
    /// (`0` = adjacent, `-1` = any distance)
    pub skip: i32,
    /// Token lies inside the highlighted marker span
    pub inside_marker: bool,
    /// Exclusion predicates, in declaration order
    pub exceptions: Vec<TokenException>,
    /// Further tokens that must match at the same position
    pub and_group: Vec<MatchToken>,
    /// Alternative tokens; this token is the implicit first alternative
    pub or_group: Vec<MatchToken>,
    /// Unification linkage when inside a `unify` scope
    pub unification: Option<Unification>,
}

impl MatchToken {
    /// Creates a token with the given text and defaults for the rest
    pub fn with_text(text: impl Into<String>) -> Self {
        MatchToken {
            text: text.into(),
            ..MatchToken::default()
        }
    }

    /// True when rule expansion has alternatives to branch on here
    pub fn has_or_group(&self) -> bool {
        !self.or_group.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_scope_from_name() {
        assert_eq!(ExceptionScope::from_name("next"), ExceptionScope::Next);
        assert_eq!(
            ExceptionScope::from_name("previous"),
            ExceptionScope::Previous
        );
        assert_eq!(ExceptionScope::from_name("current"), ExceptionScope::Current);
        assert_eq!(ExceptionScope::from_name("bogus"), ExceptionScope::Current);
    }

    #[test]
    fn test_token_defaults() {
        let token = MatchToken::with_text("walk");
        assert_eq!(token.text, "walk");
        assert!(!token.regexp);
        assert!(!token.inside_marker);
        assert_eq!(token.skip, 0);
        assert!(token.exceptions.is_empty());
        assert!(!token.has_or_group());
    }

    #[test]
    fn test_token_clone_is_deep() {
        let mut token = MatchToken::with_text("go");
        token.or_group.push(MatchToken::with_text("went"));
        token.exceptions.push(TokenException {
            text: "gone".to_string(),
            ..TokenException::default()
        });

        let mut clone = token.clone();
        clone.or_group[0].text = "walked".to_string();
        clone.exceptions[0].text = "walked".to_string();

        // The original is untouched: branch isolation is structural
        assert_eq!(token.or_group[0].text, "went");
        assert_eq!(token.exceptions[0].text, "gone");
    }
}
