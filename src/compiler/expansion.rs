#![forbid(unsafe_code)]

//! Rule expansion engine
//!
//! Expands OR-groups into the Cartesian product of concrete token
//! sequences. Pure recursion over a token index: every branch receives its
//! own copy of the accumulator built so far, so sibling branches share no
//! state. Complexity is the product of the OR-group arities, accepted by
//! design (rule authors keep OR-groups small).

use crate::rules::MatchToken;

/// Produces one concrete token sequence per OR-alternative combination
///
/// A token carrying an OR-group branches once per alternative and once for
/// the token itself; tokens without alternatives are appended unchanged.
/// Relative token order is preserved in every draft, and drafts come out in
/// expansion order: alternatives first, the carrying token last.
pub(crate) fn expand_or_groups(tokens: &[MatchToken]) -> Vec<Vec<MatchToken>> {
    let mut drafts = Vec::new();
    expand_from(tokens, Vec::new(), 0, &mut drafts);
    drafts
}

fn expand_from(
    tokens: &[MatchToken],
    mut acc: Vec<MatchToken>,
    index: usize,
    drafts: &mut Vec<Vec<MatchToken>>,
) {
    if index >= tokens.len() {
        drafts.push(acc);
        return;
    }
    let token = &tokens[index];
    if token.has_or_group() {
        for alternative in &token.or_group {
            let mut branch = acc.clone();
            branch.push(alternative.clone());
            expand_from(tokens, branch, index + 1, drafts);
        }
    }
    let mut base = token.clone();
    base.or_group.clear();
    acc.push(base);
    expand_from(tokens, acc, index + 1, drafts);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> MatchToken {
        MatchToken::with_text(text)
    }

    fn or_token(text: &str, alternatives: &[&str]) -> MatchToken {
        let mut t = token(text);
        t.or_group = alternatives.iter().map(|a| token(a)).collect();
        t
    }

    fn texts(draft: &[MatchToken]) -> Vec<&str> {
        draft.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_no_or_groups_yields_single_draft() {
        let tokens = vec![token("the"), token("cat")];
        let drafts = expand_or_groups(&tokens);
        assert_eq!(drafts.len(), 1);
        assert_eq!(texts(&drafts[0]), ["the", "cat"]);
    }

    #[test]
    fn test_empty_sequence_yields_one_empty_draft() {
        let drafts = expand_or_groups(&[]);
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].is_empty());
    }

    #[test]
    fn test_single_or_group_arity() {
        // "cat" with alternative "dog": two drafts, alternatives first
        let tokens = vec![token("the"), or_token("cat", &["dog"])];
        let drafts = expand_or_groups(&tokens);
        assert_eq!(drafts.len(), 2);
        assert_eq!(texts(&drafts[0]), ["the", "dog"]);
        assert_eq!(texts(&drafts[1]), ["the", "cat"]);
    }

    #[test]
    fn test_two_or_groups_cartesian_product() {
        let tokens = vec![
            or_token("a", &["b", "c"]),
            token("x"),
            or_token("d", &["e"]),
        ];
        let drafts = expand_or_groups(&tokens);
        // 3 × 2 combinations
        assert_eq!(drafts.len(), 6);
        // Non-OR tokens are identical across drafts, order preserved
        for draft in &drafts {
            assert_eq!(draft.len(), 3);
            assert_eq!(draft[1].text, "x");
        }
        assert_eq!(texts(&drafts[0]), ["b", "x", "e"]);
        assert_eq!(texts(&drafts[5]), ["a", "x", "d"]);
    }

    #[test]
    fn test_drafts_share_no_tokens() {
        let tokens = vec![or_token("cat", &["dog"])];
        let mut drafts = expand_or_groups(&tokens);
        drafts[0][0].text = "mutated".to_string();
        assert_eq!(drafts[1][0].text, "cat");
    }

    #[test]
    fn test_expanded_tokens_drop_or_group() {
        let tokens = vec![or_token("cat", &["dog"])];
        let drafts = expand_or_groups(&tokens);
        for draft in &drafts {
            assert!(!draft[0].has_or_group());
        }
    }

    #[test]
    fn test_and_groups_survive_expansion() {
        let mut t = token("walk");
        t.and_group.push(token("VB"));
        let drafts = expand_or_groups(&[t]);
        assert_eq!(drafts[0][0].and_group.len(), 1);
    }
}
