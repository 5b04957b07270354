#![forbid(unsafe_code)]

//! Message & suggestion compiler
//!
//! Message and suggestion text accumulate verbatim, with embedded
//! `<suggestion>` markup preserved as literal template text. Correction
//! references surface as `\N` placeholders in the finished template and are
//! rebuilt into an ordered `SuggestionMatch` list when the owning scope
//! closes. Examples are collected here too, including the `|`-separated
//! correction lists of incorrect examples.

use crate::events::Attributes;
use crate::rules::SuggestionMatch;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel prepended to the message template when a suggestion suppresses
/// misspelled corrections, detected downstream by the spell checker
pub(crate) const SUPPRESS_MISSPELLED: &str = "<pleasespellme/>";

/// Literal marker bounds kept inside example text
pub(crate) const MARKER_OPEN: &str = "<marker>";
pub(crate) const MARKER_CLOSE: &str = "</marker>";

static BACKREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(\d+)").unwrap());

/// Rebuilds the ordered suggestion-match list from finished template text
///
/// The text is scanned left-to-right for `\N` references. The i-th
/// reference consumes the i-th explicit `match` element seen in the scope;
/// references beyond that are bare legacy backreferences and synthesize a
/// plain match on their token number.
pub(crate) fn extract_matches(
    text: &str,
    pending: Vec<SuggestionMatch>,
) -> Vec<SuggestionMatch> {
    let mut pending = pending.into_iter();
    BACKREF
        .captures_iter(text)
        .map(|cap| {
            let token_ref = cap[1].parse().unwrap_or(0);
            pending
                .next()
                .unwrap_or_else(|| SuggestionMatch::new(token_ref))
        })
        .collect()
}

/// Splits an incorrect example's `correction` attribute on `|`
///
/// A trailing `|` means an empty alternative and is preserved; an absent
/// attribute means no corrections at all.
pub(crate) fn split_corrections(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(raw) => raw.split('|').map(str::to_string).collect(),
    }
}

/// Classification of an `example` element
#[derive(Debug, PartialEq)]
pub(crate) enum ExampleKind {
    Correct,
    Incorrect { corrections: Vec<String> },
    /// `type="triggers_error"` examples are dropped entirely
    Ignored,
}

/// An example being accumulated
#[derive(Debug)]
pub(crate) struct ExampleState {
    pub kind: ExampleKind,
    pub text: String,
}

impl ExampleState {
    /// Classifies an example from its attributes
    ///
    /// A `correction` attribute or `type="incorrect"` makes it an incorrect
    /// example; anything else without a recognized type is a correct one.
    pub fn from_attrs(attrs: &Attributes) -> ExampleState {
        let kind = if attrs.get("type") == Some("incorrect") || attrs.get("correction").is_some()
        {
            ExampleKind::Incorrect {
                corrections: split_corrections(attrs.get("correction")),
            }
        } else if attrs.get("type") == Some("triggers_error") {
            ExampleKind::Ignored
        } else {
            ExampleKind::Correct
        };
        ExampleState {
            kind,
            text: String::new(),
        }
    }
}
