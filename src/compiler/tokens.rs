#![forbid(unsafe_code)]

//! Token & group builder
//!
//! Assembles the ordered token sequence of one `pattern` or `antipattern`
//! scope: AND-subgroups, OR-alternative sets, exception predicates, marker
//! bounds, and unification linkage. A fresh builder is created when the
//! scope opens and its state dies with the scope, so marker counters can
//! never leak between sibling patterns.

use crate::error::CompileError;
use crate::events::Attributes;
use crate::rules::{ExceptionScope, MatchToken, TokenException, Unification};
use std::collections::BTreeMap;

/// State of an open `unify` scope
#[derive(Debug, Default)]
pub(crate) struct UnifyScope {
    pub negation: bool,
    /// Feature name → equivalence type names declared by `feature`/`type`
    pub features: BTreeMap<String, Vec<String>>,
    current_feature: Option<String>,
    current_types: Vec<String>,
    /// Inside a `unify-ignore` sub-scope
    pub neutral: bool,
}

/// Builds the token sequence of one pattern or anti-pattern scope
#[derive(Debug, Default)]
pub(crate) struct PatternBuilder {
    /// Pattern-level case sensitivity, the default for contained tokens
    case_sensitive: bool,
    /// Finalized top-level tokens
    pub tokens: Vec<MatchToken>,
    /// Token currently open
    current: Option<MatchToken>,
    /// Exception currently open on the current token
    current_exception: Option<TokenException>,
    /// Top-level units closed so far; feeds the marker *start* index
    token_index: usize,
    /// Top-level units opened so far (groups and phrase references count
    /// once); feeds the marker *end* correction
    pub marker_units: usize,
    start_pos: Option<usize>,
    end_pos: Option<usize>,
    pub in_marker: bool,
    in_and_group: bool,
    and_count: usize,
    in_or_group: bool,
    or_count: usize,
    unify: Option<UnifyScope>,
}

impl PatternBuilder {
    pub fn new(case_sensitive: bool) -> Self {
        PatternBuilder {
            case_sensitive,
            ..PatternBuilder::default()
        }
    }

    /// Starts a new token from its attributes
    pub fn open_token(&mut self, attrs: &Attributes) -> Result<(), CompileError> {
        let mut token = MatchToken {
            regexp: attrs.is_yes("regexp"),
            negate: attrs.is_yes("negate"),
            inflected: attrs.is_yes("inflected"),
            case_sensitive: attrs.is_yes("case_sensitive") || self.case_sensitive,
            skip: parse_skip(attrs)?,
            inside_marker: self.in_marker,
            ..MatchToken::default()
        };
        if let Some(unify) = &self.unify {
            token.unification = Some(Unification {
                features: unify.features.clone(),
                neutral: unify.neutral,
                last: false,
                negation: false,
            });
        }
        if !self.in_and_group && !self.in_or_group {
            self.marker_units += 1;
        }
        self.current = Some(token);
        Ok(())
    }

    /// Appends a text run to the open token
    pub fn token_text(&mut self, run: &str) {
        if let Some(token) = &mut self.current {
            token.text.push_str(run);
        }
    }

    /// Finalizes the open token, validating regex text
    pub fn close_token(&mut self, owner: &str) -> Result<(), CompileError> {
        let Some(mut token) = self.current.take() else {
            return Ok(());
        };
        token.text = token.text.trim().to_string();
        validate_regex(owner, token.regexp, &token.text)?;

        if self.in_and_group {
            if self.and_count == 0 {
                self.tokens.push(token);
            } else if let Some(base) = self.tokens.last_mut() {
                base.and_group.push(token);
            }
            self.and_count += 1;
        } else if self.in_or_group {
            if self.or_count == 0 {
                self.tokens.push(token);
            } else if let Some(base) = self.tokens.last_mut() {
                base.or_group.push(token);
            }
            self.or_count += 1;
        } else {
            self.tokens.push(token);
            self.token_index += 1;
        }
        Ok(())
    }

    /// Brackets tokens that must all match at the same position
    pub fn open_and_group(&mut self) {
        self.in_and_group = true;
        self.marker_units += 1;
    }

    /// Closes the AND bracket; the group counts once toward the span
    pub fn close_and_group(&mut self) {
        self.in_and_group = false;
        self.and_count = 0;
        self.token_index += 1;
    }

    /// Brackets mutually exclusive alternative tokens
    pub fn open_or_group(&mut self) {
        self.in_or_group = true;
        self.marker_units += 1;
    }

    /// Closes the OR bracket; the group counts once toward the span
    pub fn close_or_group(&mut self) {
        self.in_or_group = false;
        self.or_count = 0;
        self.token_index += 1;
    }

    /// Starts an exclusion predicate on the open token
    pub fn open_exception(&mut self, attrs: &Attributes) {
        self.current_exception = Some(TokenException {
            regexp: attrs.is_yes("regexp"),
            negate: attrs.is_yes("negate"),
            inflected: attrs.is_yes("inflected"),
            case_sensitive: attrs.is_yes("case_sensitive") || self.case_sensitive,
            scope: attrs
                .get("scope")
                .map(ExceptionScope::from_name)
                .unwrap_or_default(),
            ..TokenException::default()
        });
    }

    /// Appends a text run to the open exception
    pub fn exception_text(&mut self, run: &str) {
        if let Some(exception) = &mut self.current_exception {
            exception.text.push_str(run);
        }
    }

    /// Finalizes the open exception and attaches it to the open token
    pub fn close_exception(&mut self, owner: &str) -> Result<(), CompileError> {
        let Some(mut exception) = self.current_exception.take() else {
            return Ok(());
        };
        exception.text = exception.text.trim().to_string();
        validate_regex(owner, exception.regexp, &exception.text)?;
        if let Some(token) = &mut self.current {
            token.exceptions.push(exception);
        }
        Ok(())
    }

    /// Opens the highlighted sub-span at the current position
    pub fn open_marker(&mut self) {
        self.start_pos = Some(self.token_index);
        self.in_marker = true;
    }

    /// Closes the highlighted sub-span
    pub fn close_marker(&mut self) {
        self.end_pos = Some(self.marker_units);
        self.in_marker = false;
    }

    /// Marker start/end corrections, when an explicit marker was present
    ///
    /// The end correction converts the end index into an offset from the
    /// end of the token sequence: `end - marker_units`, zero or negative.
    pub fn marker_corrections(&self) -> Option<(i32, i32)> {
        match (self.start_pos, self.end_pos) {
            (Some(start), Some(end)) => {
                Some((start as i32, end as i32 - self.marker_units as i32))
            }
            _ => None,
        }
    }

    /// Opens a unification scope over the following tokens
    pub fn open_unify(&mut self, negation: bool) {
        self.unify = Some(UnifyScope {
            negation,
            ..UnifyScope::default()
        });
    }

    /// Starts collecting equivalence types for a feature
    pub fn open_feature(&mut self, id: &str) {
        if let Some(unify) = &mut self.unify {
            unify.current_feature = Some(id.to_string());
        }
    }

    /// Records one equivalence type under the current feature
    pub fn add_feature_type(&mut self, id: &str) {
        if let Some(unify) = &mut self.unify {
            unify.current_types.push(id.to_string());
        }
    }

    /// Finishes the current feature's type list
    pub fn close_feature(&mut self) {
        if let Some(unify) = &mut self.unify {
            if let Some(feature) = unify.current_feature.take() {
                unify
                    .features
                    .insert(feature, std::mem::take(&mut unify.current_types));
            }
        }
    }

    /// Marks following tokens as ignored by the unifier
    pub fn set_unify_neutral(&mut self, neutral: bool) {
        if let Some(unify) = &mut self.unify {
            unify.neutral = neutral;
        }
    }

    /// Closes the unification scope
    ///
    /// Negation and the end-of-scope flag land on the last token only.
    pub fn close_unify(&mut self) {
        let Some(unify) = self.unify.take() else {
            return;
        };
        if let Some(last) = self.tokens.last_mut() {
            let linkage = last.unification.get_or_insert_with(|| Unification {
                features: unify.features.clone(),
                ..Unification::default()
            });
            linkage.last = true;
            linkage.negation = unify.negation;
        }
    }
}

/// Parses the `skip` attribute (`0` adjacent, `-1` any distance)
fn parse_skip(attrs: &Attributes) -> Result<i32, CompileError> {
    match attrs.get("skip") {
        None => Ok(0),
        Some(raw) => raw
            .parse()
            .map_err(|_| CompileError::InvalidAttribute {
                tag: "token",
                attribute: "skip",
                value: raw.to_string(),
            }),
    }
}

/// Validates regex-flagged text at build time instead of match time
fn validate_regex(owner: &str, regexp: bool, text: &str) -> Result<(), CompileError> {
    if regexp && !text.is_empty() {
        regex::Regex::new(text).map_err(|source| CompileError::InvalidRegex {
            owner: owner.to_string(),
            pattern: text.to_string(),
            source,
        })?;
    }
    Ok(())
}
