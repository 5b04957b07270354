#![forbid(unsafe_code)]

//! Scope & inheritance resolver
//!
//! The top-level dispatcher: consumes one structured event at a time,
//! strictly in arrival order with no lookahead, and routes it to the token
//! builder, the message compiler, or the phrase registry depending on the
//! open scope. On rule close it runs phrase splicing, OR-group expansion,
//! and finalization (inheritance, anti-patterns, suggestion matches,
//! examples, URLs, marker corrections) before appending the produced rules
//! to the output list in source encounter order.

use crate::compiler::antipattern::build_antipattern;
use crate::compiler::expansion::expand_or_groups;
use crate::compiler::message::{
    ExampleKind, ExampleState, MARKER_CLOSE, MARKER_OPEN, SUPPRESS_MISSPELLED, extract_matches,
};
use crate::compiler::phrases::{PhraseRegistry, compose_variants};
use crate::compiler::scope::{
    CategoryScope, GroupScope, MarkerContext, RuleScope, ScopeKind, ScopeStack, TextTarget,
};
use crate::compiler::tokens::PatternBuilder;
use crate::error::CompileError;
use crate::events::{Attributes, Event, Tag};
use crate::rules::{Category, IncorrectExample, MatchToken, PatternRule, RuleFilter, SuggestionMatch};
use crate::types::{CategoryLocation, IssueType, Language};
use log::{debug, warn};
use std::sync::Arc;
use url::Url;

/// Event-driven compiler for pattern-rule markup
///
/// One instance compiles one event stream; a fatal error aborts the run
/// and discards any rules already produced. Instances share no mutable
/// state, so independent streams may compile on separate threads.
#[derive(Debug, Default)]
pub struct RuleCompiler {
    /// Substitute empty ids/names instead of failing (rule-editing tools)
    relaxed: bool,
    language: Option<Language>,
    scopes: ScopeStack,
    category: Option<CategoryScope>,
    group: Option<GroupScope>,
    rule: Option<RuleScope>,
    /// Builder of the open `pattern` or `antipattern` scope
    builder: Option<PatternBuilder>,
    phrases: PhraseRegistry,
    current_phrase: Option<String>,
    example: Option<ExampleState>,
    url_buf: String,
    match_buf: String,
    /// Anti-pattern sequence for rules outside any group
    antipattern_seq: u32,
    rules_out: Vec<PatternRule>,
}

impl RuleCompiler {
    /// Creates a compiler; the language is set by the `rules` element
    pub fn new() -> Self {
        RuleCompiler::default()
    }

    /// Creates a compiler with a preset language
    ///
    /// Useful when feeding rule fragments that carry no `rules` wrapper.
    pub fn for_language(language: Language) -> Self {
        RuleCompiler {
            language: Some(language),
            ..RuleCompiler::default()
        }
    }

    /// Enables or disables relaxed mode
    ///
    /// In relaxed mode a missing rule id or name becomes an empty string
    /// instead of a fatal error.
    pub fn set_relaxed_mode(&mut self, relaxed: bool) {
        self.relaxed = relaxed;
    }

    /// Processes one event
    pub fn handle(&mut self, event: Event) -> Result<(), CompileError> {
        match event {
            Event::Open { tag, attrs } => self.open_tag(tag, &attrs),
            Event::Close(tag) => self.close_tag(tag),
            Event::Text(run) => {
                self.text(&run);
                Ok(())
            }
        }
    }

    /// Finishes the run and hands over the compiled rules
    pub fn finish(self) -> Result<Vec<PatternRule>, CompileError> {
        Ok(self.rules_out)
    }

    /// Compiles a whole event stream in one call
    pub fn compile<I>(mut self, events: I) -> Result<Vec<PatternRule>, CompileError>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            self.handle(event)?;
        }
        self.finish()
    }

    fn open_tag(&mut self, tag: Tag, attrs: &Attributes) -> Result<(), CompileError> {
        match tag {
            Tag::Rules => {
                let code = attrs.get("lang").unwrap_or("");
                let language = Language::from_code(code).ok_or_else(|| {
                    CompileError::UnknownLanguage {
                        code: code.to_string(),
                    }
                })?;
                debug!("compiling rules for {language}");
                self.language = Some(language);
            }
            Tag::Category => {
                self.open_category(attrs)?;
                self.scopes.push(ScopeKind::Category);
            }
            Tag::RuleGroup => {
                self.group = Some(GroupScope {
                    id: attrs.get("id").map(String::from),
                    description: attrs.get("name").map(String::from),
                    default_off: attrs.is_off("default"),
                    issue_type: attrs.get("type").map(String::from),
                    ..GroupScope::default()
                });
                self.scopes.push(ScopeKind::RuleGroup);
            }
            Tag::Rule => {
                self.open_rule(attrs)?;
                self.scopes.push(ScopeKind::Rule);
            }
            Tag::Pattern => {
                self.builder = Some(PatternBuilder::new(attrs.is_yes("case_sensitive")));
                self.scopes.push(ScopeKind::Pattern);
            }
            Tag::AntiPattern => {
                self.builder = Some(PatternBuilder::new(attrs.is_yes("case_sensitive")));
                self.scopes.push(ScopeKind::AntiPattern);
            }
            Tag::And => {
                if let Some(builder) = &mut self.builder {
                    builder.open_and_group();
                }
                self.scopes.push(ScopeKind::AndGroup);
            }
            Tag::Or => {
                if let Some(builder) = &mut self.builder {
                    builder.open_or_group();
                }
                self.scopes.push(ScopeKind::OrGroup);
            }
            Tag::Token => {
                if let Some(builder) = &mut self.builder {
                    builder.open_token(attrs)?;
                }
                self.scopes.push(ScopeKind::Token);
            }
            Tag::Exception => {
                if let Some(builder) = &mut self.builder {
                    builder.open_exception(attrs);
                }
                self.scopes.push(ScopeKind::Exception);
            }
            Tag::Unify => {
                if let Some(builder) = &mut self.builder {
                    builder.open_unify(attrs.is_yes("negate"));
                }
                self.scopes.push(ScopeKind::Unify);
            }
            Tag::UnifyIgnore => {
                if let Some(builder) = &mut self.builder {
                    builder.set_unify_neutral(true);
                }
                self.scopes.push(ScopeKind::UnifyIgnore);
            }
            Tag::Feature => {
                if let (Some(builder), Some(id)) = (&mut self.builder, attrs.get("id")) {
                    builder.open_feature(id);
                }
            }
            Tag::Type => {
                if let (Some(builder), Some(id)) = (&mut self.builder, attrs.get("id")) {
                    builder.add_feature_type(id);
                }
            }
            Tag::Marker => {
                self.open_marker();
                self.scopes.push(ScopeKind::Marker);
            }
            Tag::Message => {
                if let Some(rule) = &mut self.rule {
                    rule.message.clear();
                    rule.pending_msg_matches.clear();
                }
                self.scopes.push(ScopeKind::Message);
            }
            Tag::Suggestion => {
                self.open_suggestion(attrs);
                self.scopes.push(ScopeKind::Suggestion);
            }
            Tag::Short => {
                if self.scopes.contains(ScopeKind::Rule) {
                    if let Some(rule) = &mut self.rule {
                        rule.short_message.clear();
                    }
                } else if let Some(group) = &mut self.group {
                    group.short_message.clear();
                }
                self.scopes.push(ScopeKind::Short);
            }
            Tag::Url => {
                self.url_buf.clear();
                self.scopes.push(ScopeKind::Url);
            }
            Tag::Match => {
                self.open_match(attrs)?;
                self.scopes.push(ScopeKind::Match);
            }
            Tag::Example => {
                let example = ExampleState::from_attrs(attrs);
                self.scopes.push(match example.kind {
                    ExampleKind::Correct => ScopeKind::CorrectExample,
                    ExampleKind::Incorrect { .. } => ScopeKind::IncorrectExample,
                    ExampleKind::Ignored => ScopeKind::IgnoredExample,
                });
                self.example = Some(example);
            }
            Tag::Filter => {
                if let Some(rule) = &mut self.rule {
                    rule.filter = Some(RuleFilter {
                        class_name: attrs.get("class").unwrap_or("").to_string(),
                        args: attrs.get("args").unwrap_or("").to_string(),
                    });
                }
            }
            Tag::Phrases => {
                self.scopes.push(ScopeKind::Phrases);
            }
            Tag::Phrase => {
                if self.scopes.contains(ScopeKind::Phrases) {
                    self.current_phrase = attrs.get("id").map(String::from);
                }
                self.scopes.push(ScopeKind::Phrase);
            }
            Tag::PhraseRef => {
                self.splice_phrase(attrs);
            }
            Tag::IncludePhrases => {}
        }
        Ok(())
    }

    fn close_tag(&mut self, tag: Tag) -> Result<(), CompileError> {
        match tag {
            Tag::Rules => {}
            Tag::Category => {
                self.category = None;
                self.scopes.pop(ScopeKind::Category);
            }
            Tag::RuleGroup => {
                self.group = None;
                self.scopes.pop(ScopeKind::RuleGroup);
            }
            Tag::Rule => {
                self.scopes.pop(ScopeKind::Rule);
                self.close_rule()?;
            }
            Tag::Pattern => {
                self.scopes.pop(ScopeKind::Pattern);
                if let Some(builder) = self.builder.take() {
                    if self.scopes.contains(ScopeKind::Phrase) {
                        if let Some(id) = self.current_phrase.clone() {
                            self.phrases.register(&id, builder.tokens);
                        }
                    } else if let Some(rule) = &mut self.rule {
                        rule.pattern = Some(builder);
                    }
                }
            }
            Tag::AntiPattern => {
                self.scopes.pop(ScopeKind::AntiPattern);
                self.close_antipattern();
            }
            Tag::And => {
                if let Some(builder) = &mut self.builder {
                    builder.close_and_group();
                }
                self.scopes.pop(ScopeKind::AndGroup);
            }
            Tag::Or => {
                if let Some(builder) = &mut self.builder {
                    builder.close_or_group();
                }
                self.scopes.pop(ScopeKind::OrGroup);
            }
            Tag::Token => {
                let owner = self.owner_id();
                if let Some(builder) = &mut self.builder {
                    builder.close_token(&owner)?;
                }
                self.scopes.pop(ScopeKind::Token);
            }
            Tag::Exception => {
                let owner = self.owner_id();
                if let Some(builder) = &mut self.builder {
                    builder.close_exception(&owner)?;
                }
                self.scopes.pop(ScopeKind::Exception);
            }
            Tag::Unify => {
                if let Some(builder) = &mut self.builder {
                    builder.close_unify();
                }
                self.scopes.pop(ScopeKind::Unify);
            }
            Tag::UnifyIgnore => {
                if let Some(builder) = &mut self.builder {
                    builder.set_unify_neutral(false);
                }
                self.scopes.pop(ScopeKind::UnifyIgnore);
            }
            Tag::Feature => {
                if let Some(builder) = &mut self.builder {
                    builder.close_feature();
                }
            }
            Tag::Type => {}
            Tag::Marker => {
                self.close_marker();
                self.scopes.pop(ScopeKind::Marker);
            }
            Tag::Message => {
                self.scopes.pop(ScopeKind::Message);
                if let Some(rule) = &mut self.rule {
                    rule.suggestion_matches = extract_matches(
                        &rule.message,
                        std::mem::take(&mut rule.pending_msg_matches),
                    );
                }
            }
            Tag::Suggestion => {
                let in_message = self.scopes.contains(ScopeKind::Message);
                if let Some(rule) = &mut self.rule {
                    if in_message {
                        rule.message.push_str("</suggestion>");
                    } else {
                        rule.suggestions_out.push_str("</suggestion>");
                    }
                }
                self.scopes.pop(ScopeKind::Suggestion);
            }
            Tag::Short => {
                self.scopes.pop(ScopeKind::Short);
            }
            Tag::Url => {
                let in_rule = self.scopes.contains(ScopeKind::Rule);
                self.scopes.pop(ScopeKind::Url);
                self.close_url(in_rule)?;
            }
            Tag::Match => {
                self.close_match();
                self.scopes.pop(ScopeKind::Match);
            }
            Tag::Example => {
                if let Some(example) = self.example.take() {
                    self.scopes.pop(match example.kind {
                        ExampleKind::Correct => ScopeKind::CorrectExample,
                        ExampleKind::Incorrect { .. } => ScopeKind::IncorrectExample,
                        ExampleKind::Ignored => ScopeKind::IgnoredExample,
                    });
                    if let Some(rule) = &mut self.rule {
                        match example.kind {
                            ExampleKind::Correct => rule.correct_examples.push(example.text),
                            ExampleKind::Incorrect { corrections } => {
                                rule.incorrect_examples.push(IncorrectExample {
                                    text: example.text,
                                    corrections,
                                });
                            }
                            ExampleKind::Ignored => {}
                        }
                    }
                }
            }
            Tag::Filter => {}
            Tag::Phrases => {
                self.scopes.pop(ScopeKind::Phrases);
            }
            Tag::Phrase => {
                self.current_phrase = None;
                self.scopes.pop(ScopeKind::Phrase);
            }
            Tag::PhraseRef => {}
            Tag::IncludePhrases => {
                if let Some(builder) = &mut self.builder {
                    builder.tokens.clear();
                }
            }
        }
        Ok(())
    }

    /// Routes a text run to the single active accumulation target
    fn text(&mut self, run: &str) {
        match self.scopes.text_target() {
            TextTarget::Token => {
                if let Some(builder) = &mut self.builder {
                    builder.token_text(run);
                }
            }
            TextTarget::Exception => {
                if let Some(builder) = &mut self.builder {
                    builder.exception_text(run);
                }
            }
            TextTarget::MatchLemma => self.match_buf.push_str(run),
            TextTarget::Message => {
                if let Some(rule) = &mut self.rule {
                    rule.message.push_str(run);
                }
            }
            TextTarget::SuggestionOut => {
                if let Some(rule) = &mut self.rule {
                    rule.suggestions_out.push_str(run);
                }
            }
            TextTarget::ShortRule => {
                if let Some(rule) = &mut self.rule {
                    rule.short_message.push_str(run);
                }
            }
            TextTarget::ShortGroup => {
                if let Some(group) = &mut self.group {
                    group.short_message.push_str(run);
                }
            }
            TextTarget::UrlRule | TextTarget::UrlGroup => self.url_buf.push_str(run),
            TextTarget::CorrectExample | TextTarget::IncorrectExample => {
                if let Some(example) = &mut self.example {
                    example.text.push_str(run);
                }
            }
            TextTarget::Ignore => {}
        }
    }

    fn open_category(&mut self, attrs: &Attributes) -> Result<(), CompileError> {
        let priority = match attrs.get("priority") {
            None => None,
            Some(raw) => Some(raw.parse().map_err(|_| CompileError::InvalidAttribute {
                tag: "category",
                attribute: "priority",
                value: raw.to_string(),
            })?),
        };
        let category = Category {
            name: attrs.get("name").unwrap_or("").to_string(),
            priority,
            location: if attrs.is_yes("external") {
                CategoryLocation::External
            } else {
                CategoryLocation::Internal
            },
            on_by_default: !attrs.is_off("default"),
        };
        debug!("category '{}' opened", category.name);
        self.category = Some(CategoryScope {
            category: Arc::new(category),
            issue_type: attrs.get("type").map(String::from),
        });
        Ok(())
    }

    fn open_rule(&mut self, attrs: &Attributes) -> Result<(), CompileError> {
        let mut rule = RuleScope {
            id: attrs.get("id").map(String::from),
            name: attrs.get("name").map(String::from),
            issue_type: attrs.get("type").map(String::from),
            ..RuleScope::default()
        };
        if let Some(group) = &mut self.group {
            group.sub_id += 1;
            if rule.id.is_none() {
                rule.id = group.id.clone();
            }
            if rule.name.is_none() {
                rule.name = group.description.clone();
            }
            if group.default_off && attrs.get("default").is_some() {
                return Err(CompileError::DefaultInOffGroup {
                    group_id: group.id.clone().unwrap_or_default(),
                    rule_id: rule.id.clone().unwrap_or_default(),
                });
            }
            if group.default_off {
                // Inherited, not explicit: the rule is off but not "on"
                rule.default_off = true;
                rule.default_on = false;
            } else {
                rule.default_off = attrs.is_off("default");
                rule.default_on = attrs.is_on("default");
            }
        } else {
            rule.default_off = attrs.is_off("default");
            rule.default_on = attrs.is_on("default");
        }
        self.rule = Some(rule);
        Ok(())
    }

    fn open_marker(&mut self) {
        match self.scopes.marker_context() {
            MarkerContext::TokenSequence => {
                if let Some(builder) = &mut self.builder {
                    builder.open_marker();
                }
            }
            MarkerContext::CorrectExample | MarkerContext::IncorrectExample => {
                if let Some(example) = &mut self.example {
                    example.text.push_str(MARKER_OPEN);
                }
            }
            MarkerContext::Other => {}
        }
    }

    fn close_marker(&mut self) {
        match self.scopes.marker_context() {
            MarkerContext::TokenSequence => {
                if let Some(builder) = &mut self.builder {
                    builder.close_marker();
                }
            }
            MarkerContext::CorrectExample | MarkerContext::IncorrectExample => {
                if let Some(example) = &mut self.example {
                    example.text.push_str(MARKER_CLOSE);
                }
            }
            MarkerContext::Other => {}
        }
    }

    fn open_suggestion(&mut self, attrs: &Attributes) {
        let in_message = self.scopes.contains(ScopeKind::Message);
        if let Some(rule) = &mut self.rule {
            if attrs.is_yes("suppress_misspelled") {
                rule.message.push_str(SUPPRESS_MISSPELLED);
            }
            if in_message {
                rule.message.push_str("<suggestion>");
            } else {
                rule.suggestions_out.push_str("<suggestion>");
            }
        }
    }

    fn open_match(&mut self, attrs: &Attributes) -> Result<(), CompileError> {
        self.match_buf.clear();
        let token_ref = match attrs.get("no") {
            None => 0,
            Some(raw) => raw.parse().map_err(|_| CompileError::InvalidAttribute {
                tag: "match",
                attribute: "no",
                value: raw.to_string(),
            })?,
        };
        let in_message = self.scopes.contains(ScopeKind::Message);
        let in_suggestion = self.scopes.contains(ScopeKind::Suggestion);
        if let Some(rule) = &mut self.rule {
            if in_message {
                rule.message.push_str(&format!("\\{token_ref}"));
                rule.pending_msg_matches.push(SuggestionMatch::new(token_ref));
            } else if in_suggestion {
                rule.suggestions_out.push_str(&format!("\\{token_ref}"));
                rule.pending_out_matches.push(SuggestionMatch::new(token_ref));
            }
        }
        Ok(())
    }

    fn close_match(&mut self) {
        let lemma = self.match_buf.trim().to_string();
        self.match_buf.clear();
        if lemma.is_empty() {
            return;
        }
        let in_message = self.scopes.contains(ScopeKind::Message);
        let in_suggestion = self.scopes.contains(ScopeKind::Suggestion);
        if let Some(rule) = &mut self.rule {
            let pending = if in_message {
                &mut rule.pending_msg_matches
            } else if in_suggestion {
                &mut rule.pending_out_matches
            } else {
                return;
            };
            if let Some(last) = pending.last_mut() {
                last.lemma = Some(lemma);
            }
        }
    }

    fn close_url(&mut self, in_rule: bool) -> Result<(), CompileError> {
        let raw = std::mem::take(&mut self.url_buf);
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }
        let parsed = Url::parse(raw).map_err(|source| CompileError::MalformedUrl {
            owner: self.owner_id(),
            url: raw.to_string(),
            source,
        })?;
        if in_rule {
            if let Some(rule) = &mut self.rule {
                rule.urls.push(parsed);
            }
        } else if let Some(group) = &mut self.group {
            group.urls.push(parsed);
        }
        Ok(())
    }

    fn splice_phrase(&mut self, attrs: &Attributes) {
        let Some(idref) = attrs.get("idref") else {
            return;
        };
        let Some(builder) = &mut self.builder else {
            return;
        };
        match self.phrases.alternatives(idref) {
            None => warn!("phraseref to unknown phrase '{idref}' ignored"),
            Some(alternatives) => {
                builder.marker_units += 1;
                let pending = std::mem::take(&mut builder.tokens);
                let in_marker = builder.in_marker;
                if let Some(rule) = &mut self.rule {
                    let existing = std::mem::take(&mut rule.phrase_variants);
                    rule.phrase_variants =
                        compose_variants(existing, pending, alternatives, in_marker);
                }
            }
        }
    }

    fn close_antipattern(&mut self) {
        let Some(builder) = self.builder.take() else {
            return;
        };
        let seq = if let Some(group) = &mut self.group {
            group.antipattern_seq += 1;
            group.antipattern_seq
        } else {
            self.antipattern_seq += 1;
            self.antipattern_seq
        };
        let owner = self.antipattern_owner_id();
        let antipattern = build_antipattern(&owner, seq, builder);
        debug!("compiled anti-pattern '{}'", antipattern.id);
        if let Some(rule) = &mut self.rule {
            rule.antipatterns.push(antipattern);
        } else if let Some(group) = &mut self.group {
            group.antipatterns.push(antipattern);
        } else {
            warn!("anti-pattern outside any rule or rule group dropped");
        }
    }

    /// Finalizes the closed rule: splicing, expansion, inheritance
    fn close_rule(&mut self) -> Result<(), CompileError> {
        let Some(mut rule) = self.rule.take() else {
            return Ok(());
        };
        let id = match rule.id.take() {
            Some(id) => id,
            None if self.relaxed => String::new(),
            None => return Err(CompileError::MissingIdentifier { what: "id" }),
        };
        let name = match rule.name.take() {
            Some(name) => name,
            None if self.relaxed => String::new(),
            None => return Err(CompileError::MissingIdentifier { what: "name" }),
        };

        let category = match &self.category {
            Some(scope) => Arc::clone(&scope.category),
            None => return Err(CompileError::RuleOutsideCategory { id }),
        };
        let language = match &self.language {
            Some(language) => language.clone(),
            None => return Err(CompileError::MissingLanguage { id }),
        };

        // Out-of-message references are extracted only now, once the whole
        // rule body has been seen
        let mut out_matches = extract_matches(
            &rule.suggestions_out,
            std::mem::take(&mut rule.pending_out_matches),
        );
        let mut msg_matches = std::mem::take(&mut rule.suggestion_matches);

        let builder = rule.pattern.take().unwrap_or_default();
        let (start_correction, end_correction) = builder.marker_corrections().unwrap_or((0, 0));

        // Each phrase variant gets the pattern's trailing tokens appended
        // and expands independently; without phrases the pattern's own
        // token list is the single variant
        let variant_count = rule.phrase_variants.len();
        let token_lists: Vec<Vec<MatchToken>> = if variant_count == 0 {
            vec![builder.tokens.clone()]
        } else {
            rule.phrase_variants
                .iter()
                .map(|variant| {
                    let mut list = variant.clone();
                    list.extend(builder.tokens.iter().cloned());
                    list
                })
                .collect()
        };

        let issue_type = rule
            .issue_type
            .as_deref()
            .or_else(|| self.group.as_ref().and_then(|g| g.issue_type.as_deref()))
            .or_else(|| self.category.as_ref().and_then(|c| c.issue_type.as_deref()))
            .map(IssueType::from_name);
        let enabled = !(rule.default_off || (!category.on_by_default && !rule.default_on));
        let sub_id = match &self.group {
            Some(group) => group.sub_id.to_string(),
            None => "1".to_string(),
        };
        let short_message = if !rule.short_message.is_empty() {
            rule.short_message.clone()
        } else {
            self.group
                .as_ref()
                .map(|g| g.short_message.clone())
                .unwrap_or_default()
        };
        let urls = if !rule.urls.is_empty() {
            rule.urls.clone()
        } else {
            self.group.as_ref().map(|g| g.urls.clone()).unwrap_or_default()
        };
        // Rule-scoped anti-patterns take precedence over group-scoped ones
        let antipatterns = if !rule.antipatterns.is_empty() {
            rule.antipatterns.clone()
        } else {
            self.group
                .as_ref()
                .map(|g| g.antipatterns.clone())
                .unwrap_or_default()
        };

        for token_list in &token_lists {
            for draft in expand_or_groups(token_list) {
                let compiled = PatternRule {
                    id: id.clone(),
                    sub_id: sub_id.clone(),
                    name: name.clone(),
                    language: language.clone(),
                    tokens: draft,
                    message: rule.message.clone(),
                    short_message: short_message.clone(),
                    suggestions_out_msg: rule.suggestions_out.clone(),
                    // Message-scoped matches are consumed by the first
                    // produced rule unless a phrase expanded to several
                    // variants, which all reuse them
                    suggestion_matches: if variant_count > 1 {
                        msg_matches.clone()
                    } else {
                        std::mem::take(&mut msg_matches)
                    },
                    suggestion_matches_out_msg: std::mem::take(&mut out_matches),
                    antipatterns: antipatterns.clone(),
                    category: Arc::clone(&category),
                    issue_type,
                    enabled,
                    start_position_correction: start_correction,
                    end_position_correction: end_correction,
                    urls: urls.clone(),
                    filter: rule.filter.clone(),
                    correct_examples: rule.correct_examples.clone(),
                    incorrect_examples: rule.incorrect_examples.clone(),
                };
                debug!(
                    "compiled rule '{}' with {} tokens",
                    compiled.full_id(),
                    compiled.tokens.len()
                );
                self.rules_out.push(compiled);
            }
        }
        Ok(())
    }

    /// Best identifier for error messages at the current position
    fn owner_id(&self) -> String {
        self.rule
            .as_ref()
            .and_then(|r| r.id.clone())
            .or_else(|| self.group.as_ref().and_then(|g| g.id.clone()))
            .unwrap_or_default()
    }

    /// Identifier an anti-pattern is filed under
    fn antipattern_owner_id(&self) -> String {
        if let Some(group) = &self.group {
            let group_id = group.id.clone().unwrap_or_default();
            if group.sub_id > 0 {
                format!("{group_id}[{}]", group.sub_id)
            } else {
                group_id
            }
        } else {
            self.rule
                .as_ref()
                .and_then(|r| r.id.clone())
                .unwrap_or_default()
        }
    }
}
