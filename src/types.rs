#![forbid(unsafe_code)]

//! Core domain types shared between the compiler and the compiled rule model

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Localization quality issue types (ITS) a rule can be tagged with
///
/// Issue types cascade through three levels: a rule-level value wins,
/// otherwise the rule group's value applies, otherwise the category's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Addition,
    Characters,
    Duplication,
    Formatting,
    Grammar,
    Inconsistency,
    InconsistentEntities,
    Internationalization,
    Legal,
    Length,
    LocaleSpecificContent,
    LocaleViolation,
    Markup,
    Misspelling,
    Mistranslation,
    NonConformance,
    Numbers,
    Omission,
    Other,
    PatternProblem,
    Register,
    Style,
    Terminology,
    Typographical,
    Uncategorized,
    Untranslated,
    Whitespace,
}

impl IssueType {
    /// Resolves an issue-type name as written in rule markup
    ///
    /// Lookup is case-insensitive; unrecognized names fall back to
    /// `Uncategorized` rather than failing, since rule files in the wild
    /// carry issue types from several revisions of the ITS vocabulary.
    pub fn from_name(name: &str) -> IssueType {
        match name.to_ascii_lowercase().as_str() {
            "addition" => IssueType::Addition,
            "characters" => IssueType::Characters,
            "duplication" => IssueType::Duplication,
            "formatting" => IssueType::Formatting,
            "grammar" => IssueType::Grammar,
            "inconsistency" => IssueType::Inconsistency,
            "inconsistent-entities" => IssueType::InconsistentEntities,
            "internationalization" => IssueType::Internationalization,
            "legal" => IssueType::Legal,
            "length" => IssueType::Length,
            "locale-specific-content" => IssueType::LocaleSpecificContent,
            "locale-violation" => IssueType::LocaleViolation,
            "markup" => IssueType::Markup,
            "misspelling" => IssueType::Misspelling,
            "mistranslation" => IssueType::Mistranslation,
            "non-conformance" => IssueType::NonConformance,
            "numbers" => IssueType::Numbers,
            "omission" => IssueType::Omission,
            "other" => IssueType::Other,
            "pattern-problem" => IssueType::PatternProblem,
            "register" => IssueType::Register,
            "style" => IssueType::Style,
            "terminology" => IssueType::Terminology,
            "typographical" => IssueType::Typographical,
            "untranslated" => IssueType::Untranslated,
            "whitespace" => IssueType::Whitespace,
            _ => IssueType::Uncategorized,
        }
    }
}

/// Where a category's rules come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLocation {
    /// Shipped with the checker itself
    #[default]
    Internal,
    /// Loaded from an external rule file
    External,
}

/// A language descriptor resolved from a short code
///
/// Resolution is a pure lookup: the compiler never inspects the descriptor
/// beyond carrying it on compiled rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    code: String,
    name: String,
}

/// Built-in short-code registry, safe for concurrent read access
static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ast", "Asturian"),
        ("be", "Belarusian"),
        ("br", "Breton"),
        ("ca", "Catalan"),
        ("da", "Danish"),
        ("de", "German"),
        ("el", "Greek"),
        ("en", "English"),
        ("eo", "Esperanto"),
        ("es", "Spanish"),
        ("fa", "Persian"),
        ("fr", "French"),
        ("gl", "Galician"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("km", "Khmer"),
        ("nl", "Dutch"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("ro", "Romanian"),
        ("ru", "Russian"),
        ("sk", "Slovak"),
        ("sl", "Slovenian"),
        ("sv", "Swedish"),
        ("ta", "Tamil"),
        ("tl", "Tagalog"),
        ("uk", "Ukrainian"),
        ("zh", "Chinese"),
    ])
});

impl Language {
    /// Creates a descriptor directly, bypassing the registry
    ///
    /// Callers embedding the compiler can use this to support languages the
    /// built-in table does not know about.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Language {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Resolves a short code (e.g. `"en"` or `"en-US"`) against the registry
    ///
    /// A regional variant falls back to its primary subtag, keeping the full
    /// code on the descriptor. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Language> {
        if let Some(name) = LANGUAGES.get(code) {
            return Some(Language::new(code, *name));
        }
        let primary = code.split('-').next().unwrap_or(code);
        LANGUAGES
            .get(primary)
            .map(|name| Language::new(code, *name))
    }

    /// Returns the short code this descriptor was resolved from
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the language's display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.code)
    }
}
