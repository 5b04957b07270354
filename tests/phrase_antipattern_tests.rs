//! Integration tests for phrase splicing, anti-patterns, and unification

mod common;

use common::*;
use rulebook::{AntiPatternAction, Event, Tag};

/// `<phrases><phrase id=..><pattern>tokens</pattern></phrase></phrases>`
fn phrase_definition(id: &str, alternatives: &[&[&str]]) -> Vec<Event> {
    let mut events = vec![open_empty(Tag::Phrases)];
    events.push(open(Tag::Phrase, &[("id", id)]));
    for alternative in alternatives {
        events.extend(pattern(alternative));
    }
    events.push(close(Tag::Phrase));
    events.push(close(Tag::Phrases));
    events
}

// Phrase splicing

#[test]
fn test_phrase_reference_splices_tokens_in_order() {
    let mut events = preamble();
    events.extend(phrase_definition("GREETING", &[&["good", "morning"]]));
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.extend(token("say"));
    events.push(open(Tag::PhraseRef, &[("idref", "GREETING")]));
    events.extend(token("now"));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules.len(), 1);
    assert_eq!(token_texts(&rules[0]), ["say", "good", "morning", "now"]);
}

#[test]
fn test_phrase_alternatives_produce_one_rule_each() {
    let mut events = preamble();
    events.extend(phrase_definition("WAYS", &[&["a", "b"], &["c"]]));
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open(Tag::PhraseRef, &[("idref", "WAYS")]));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules.len(), 2);
    assert_eq!(token_texts(&rules[0]), ["a", "b"]);
    assert_eq!(token_texts(&rules[1]), ["c"]);
}

#[test]
fn test_phrase_marker_membership_follows_reference_site() {
    let mut events = preamble();
    events.extend(phrase_definition("PH", &[&["x"]]));

    // Referenced inside a marker: spliced tokens are inside the span
    events.push(open(Tag::Rule, &[("id", "IN"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open_empty(Tag::Marker));
    events.push(open(Tag::PhraseRef, &[("idref", "PH")]));
    events.push(close(Tag::Marker));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));

    // Referenced outside any marker: spliced tokens are outside
    events.push(open(Tag::Rule, &[("id", "OUT"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open(Tag::PhraseRef, &[("idref", "PH")]));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert!(rules[0].tokens[0].inside_marker);
    assert!(!rules[1].tokens[0].inside_marker);
}

#[test]
fn test_unknown_phrase_reference_is_tolerated() {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.extend(token("kept"));
    events.push(open(Tag::PhraseRef, &[("idref", "NO_SUCH_PHRASE")]));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules.len(), 1);
    assert_eq!(token_texts(&rules[0]), ["kept"]);
}

#[test]
fn test_suggestion_matches_reused_across_phrase_variants() {
    // With more than one phrase variant, message-scoped matches are
    // intentionally shared by every produced rule
    let mut events = preamble();
    events.extend(phrase_definition("VAR", &[&["a"], &["b"]]));
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open(Tag::PhraseRef, &[("idref", "VAR")]));
    events.push(close(Tag::Pattern));
    events.push(open_empty(Tag::Message));
    events.push(open(Tag::Match, &[("no", "1")]));
    events.push(close(Tag::Match));
    events.push(close(Tag::Message));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].suggestion_matches.len(), 1);
    assert_eq!(rules[1].suggestion_matches.len(), 1);
}

#[test]
fn test_two_phrase_references_compose() {
    let mut events = preamble();
    events.extend(phrase_definition("P1", &[&["a"], &["b"]]));
    events.extend(phrase_definition("P2", &[&["x"], &["y"]]));
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open(Tag::PhraseRef, &[("idref", "P1")]));
    events.extend(token("mid"));
    events.push(open(Tag::PhraseRef, &[("idref", "P2")]));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules.len(), 4);
    assert_eq!(token_texts(&rules[0]), ["a", "mid", "x"]);
    assert_eq!(token_texts(&rules[3]), ["b", "mid", "y"]);
}

// Anti-patterns

#[test]
fn test_antipattern_without_marker_forces_all_tokens_inside() {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("for"));
    events.extend(token("example"));
    events.push(close(Tag::AntiPattern));
    events.extend(pattern(&["example"]));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    let anti = &rules[0].antipatterns[0];
    assert_eq!(anti.id, "R_antipattern:1");
    assert_eq!(anti.action, AntiPatternAction::Immunize);
    assert!(anti.tokens.iter().all(|t| t.inside_marker));
    assert_eq!(anti.start_position_correction, 0);
    assert_eq!(anti.end_position_correction, 0);
}

#[test]
fn test_antipattern_with_marker_computes_corrections() {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", "R"), ("name", "n")]));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("a"));
    events.push(open_empty(Tag::Marker));
    events.extend(token("b"));
    events.push(close(Tag::Marker));
    events.extend(token("c"));
    events.push(close(Tag::AntiPattern));
    events.extend(pattern(&["b"]));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    let anti = &rules[0].antipatterns[0];
    assert_eq!(anti.start_position_correction, 1);
    assert_eq!(anti.end_position_correction, -1);
    assert!(!anti.tokens[0].inside_marker);
    assert!(anti.tokens[1].inside_marker);
}

#[test]
fn test_group_antipatterns_shared_by_contained_rules() {
    let mut events = preamble();
    events.push(open(Tag::RuleGroup, &[("id", "G"), ("name", "n")]));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("skip"));
    events.push(close(Tag::AntiPattern));
    events.push(open_empty(Tag::Rule));
    events.extend(pattern(&["a"]));
    events.push(close(Tag::Rule));
    events.push(open_empty(Tag::Rule));
    events.extend(pattern(&["b"]));
    events.push(close(Tag::Rule));
    events.push(close(Tag::RuleGroup));
    // A rule after the group sees none of the group's anti-patterns
    events.push(open(Tag::Rule, &[("id", "AFTER"), ("name", "n")]));
    events.extend(pattern(&["c"]));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules[0].antipatterns.len(), 1);
    assert_eq!(rules[1].antipatterns.len(), 1);
    assert_eq!(rules[0].antipatterns[0].id, "G_antipattern:1");
    assert!(rules[2].antipatterns.is_empty());
}

#[test]
fn test_rule_antipatterns_take_precedence_over_group() {
    let mut events = preamble();
    events.push(open(Tag::RuleGroup, &[("id", "G"), ("name", "n")]));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("group"));
    events.push(close(Tag::AntiPattern));
    // First rule declares its own anti-pattern
    events.push(open_empty(Tag::Rule));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("own"));
    events.push(close(Tag::AntiPattern));
    events.extend(pattern(&["a"]));
    events.push(close(Tag::Rule));
    // Second rule falls back to the group's
    events.push(open_empty(Tag::Rule));
    events.extend(pattern(&["b"]));
    events.push(close(Tag::Rule));
    events.push(close(Tag::RuleGroup));
    events.extend(postamble());

    let rules = compile_ok(events);
    assert_eq!(rules[0].antipatterns.len(), 1);
    assert_eq!(rules[0].antipatterns[0].tokens[0].text, "own");
    assert_eq!(rules[1].antipatterns.len(), 1);
    assert_eq!(rules[1].antipatterns[0].tokens[0].text, "group");
}

#[test]
fn test_antipattern_ids_count_per_group() {
    let mut events = preamble();
    events.push(open(Tag::RuleGroup, &[("id", "G"), ("name", "n")]));
    events.push(open_empty(Tag::Rule));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("one"));
    events.push(close(Tag::AntiPattern));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("two"));
    events.push(close(Tag::AntiPattern));
    events.extend(pattern(&["x"]));
    events.push(close(Tag::Rule));
    events.push(close(Tag::RuleGroup));
    // A fresh group restarts the sequence
    events.push(open(Tag::RuleGroup, &[("id", "H"), ("name", "n")]));
    events.push(open_empty(Tag::Rule));
    events.push(open_empty(Tag::AntiPattern));
    events.extend(token("three"));
    events.push(close(Tag::AntiPattern));
    events.extend(pattern(&["y"]));
    events.push(close(Tag::Rule));
    events.push(close(Tag::RuleGroup));
    events.extend(postamble());

    let rules = compile_ok(events);
    let first_ids: Vec<&str> = rules[0].antipatterns.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(first_ids, ["G[1]_antipattern:1", "G[1]_antipattern:2"]);
    assert_eq!(rules[1].antipatterns[0].id, "H[1]_antipattern:1");
}

// Unification

#[test]
fn test_unify_negation_lands_on_last_token_only() {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", "U"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open(Tag::Unify, &[("negate", "yes")]));
    events.push(open(Tag::Feature, &[("id", "number")]));
    events.push(open(Tag::Type, &[("id", "singular")]));
    events.push(close(Tag::Type));
    events.push(open(Tag::Type, &[("id", "plural")]));
    events.push(close(Tag::Type));
    events.push(close(Tag::Feature));
    events.extend(token("det"));
    events.extend(token("noun"));
    events.push(close(Tag::Unify));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    let tokens = &rules[0].tokens;
    let first = tokens[0].unification.as_ref().unwrap();
    assert!(!first.last);
    assert!(!first.negation);
    assert_eq!(first.features["number"], vec!["singular", "plural"]);
    let last = tokens[1].unification.as_ref().unwrap();
    assert!(last.last);
    assert!(last.negation);
}

#[test]
fn test_unify_ignore_marks_tokens_neutral() {
    let mut events = preamble();
    events.push(open(Tag::Rule, &[("id", "U2"), ("name", "n")]));
    events.push(open_empty(Tag::Pattern));
    events.push(open_empty(Tag::Unify));
    events.extend(token("det"));
    events.push(open_empty(Tag::UnifyIgnore));
    events.extend(token("adv"));
    events.push(close(Tag::UnifyIgnore));
    events.extend(token("noun"));
    events.push(close(Tag::Unify));
    events.push(close(Tag::Pattern));
    events.push(close(Tag::Rule));
    events.extend(postamble());

    let rules = compile_ok(events);
    let tokens = &rules[0].tokens;
    assert!(!tokens[0].unification.as_ref().unwrap().neutral);
    assert!(tokens[1].unification.as_ref().unwrap().neutral);
    assert!(!tokens[2].unification.as_ref().unwrap().neutral);
}
