#![forbid(unsafe_code)]

//! Phrase registry
//!
//! Stores named alternative token sequences defined inside a `phrases`
//! scope and splices them into referencing patterns. Marker membership of
//! spliced tokens is computed at the reference site, never at the
//! definition site: the same phrase can lie inside the highlighted span in
//! one rule and outside it in another.

use crate::rules::MatchToken;
use std::collections::HashMap;

/// Named alternative token-sequence definitions
#[derive(Debug, Default)]
pub(crate) struct PhraseRegistry {
    map: HashMap<String, Vec<Vec<MatchToken>>>,
}

impl PhraseRegistry {
    /// Registers one alternative under a phrase id
    ///
    /// A phrase defined with several patterns accumulates one alternative
    /// per pattern.
    pub fn register(&mut self, id: &str, tokens: Vec<MatchToken>) {
        self.map.entry(id.to_string()).or_default().push(tokens);
    }

    /// Looks up the alternatives of a phrase id
    pub fn alternatives(&self, id: &str) -> Option<&[Vec<MatchToken>]> {
        self.map.get(id).map(|alts| alts.as_slice())
    }
}

/// Folds a phrase reference into the variant set of the current pattern
///
/// Tokens accumulated since the last fold (`pending`) are appended to every
/// existing variant, then each registered alternative is appended with its
/// marker membership recomputed from the reference site. Multiple
/// references compose as a Cartesian product of variants.
pub(crate) fn compose_variants(
    existing: Vec<Vec<MatchToken>>,
    pending: Vec<MatchToken>,
    alternatives: &[Vec<MatchToken>],
    in_marker: bool,
) -> Vec<Vec<MatchToken>> {
    let bases = if existing.is_empty() {
        vec![Vec::new()]
    } else {
        existing
    };
    let mut variants = Vec::with_capacity(bases.len() * alternatives.len());
    for base in &bases {
        for alternative in alternatives {
            let mut variant = base.clone();
            variant.extend(pending.iter().cloned());
            variant.extend(alternative.iter().cloned().map(|mut token| {
                token.inside_marker = in_marker;
                token
            }));
            variants.push(variant);
        }
    }
    variants
}
