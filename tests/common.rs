//! Test utilities for rulebook integration tests

#![allow(dead_code)]

use rulebook::{Attributes, CompileError, Event, PatternRule, RuleCompiler, Tag};

/// Builds an open event from name/value attribute pairs
pub fn open(tag: Tag, attrs: &[(&str, &str)]) -> Event {
    let mut built = Attributes::new();
    for (name, value) in attrs {
        built.set(*name, *value);
    }
    Event::open(tag, built)
}

/// Builds an open event with no attributes
pub fn open_empty(tag: Tag) -> Event {
    Event::open_empty(tag)
}

/// Builds a close event
pub fn close(tag: Tag) -> Event {
    Event::close(tag)
}

/// Builds a text event
pub fn text(run: &str) -> Event {
    Event::text(run)
}

/// A complete `<token>text</token>` element
pub fn token(run: &str) -> Vec<Event> {
    vec![open_empty(Tag::Token), text(run), close(Tag::Token)]
}

/// A `<pattern>` element wrapping one token per text
pub fn pattern(texts: &[&str]) -> Vec<Event> {
    let mut events = vec![open_empty(Tag::Pattern)];
    for run in texts {
        events.extend(token(run));
    }
    events.push(close(Tag::Pattern));
    events
}

/// Opens `<rules lang="en"><category name="Test">`
pub fn preamble() -> Vec<Event> {
    vec![
        open(Tag::Rules, &[("lang", "en")]),
        open(Tag::Category, &[("name", "Test")]),
    ]
}

/// Closes the category and rules elements
pub fn postamble() -> Vec<Event> {
    vec![close(Tag::Category), close(Tag::Rules)]
}

/// Wraps rule-body events in the standard preamble and a `<rule>` element
pub fn single_rule(id: &str, body: Vec<Event>) -> Vec<Event> {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", id), ("name", id)]));
    events.extend(body);
    events.push(close(Tag::Rule));
    events.extend(postamble());
    events
}

/// Compiles an event stream with a fresh compiler
pub fn compile(events: Vec<Event>) -> Result<Vec<PatternRule>, CompileError> {
    let _ = env_logger::builder().is_test(true).try_init();
    RuleCompiler::new().compile(events)
}

/// Compiles and unwraps, for streams expected to succeed
pub fn compile_ok(events: Vec<Event>) -> Vec<PatternRule> {
    compile(events).expect("compilation should succeed")
}

/// Token texts of a compiled rule, for order assertions
pub fn token_texts(rule: &PatternRule) -> Vec<&str> {
    rule.tokens.iter().map(|t| t.text.as_str()).collect()
}
