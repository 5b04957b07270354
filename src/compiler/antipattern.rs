#![forbid(unsafe_code)]

//! Anti-pattern compiler
//!
//! Turns the token sequence of a closed `antipattern` scope into an
//! immunizing rule. Ids are `<rule-or-group-id>_antipattern:<n>` with `n`
//! counted per enclosing group (or per compilation run outside groups).

use crate::compiler::tokens::PatternBuilder;
use crate::rules::{AntiPatternAction, AntiPatternRule};

/// Builds the immunizing rule for a closed anti-pattern scope
///
/// With an explicit marker, span corrections are computed exactly like a
/// normal rule's. Without one, every token is forced inside the marker
/// span so the immunized region covers the whole sequence.
pub(crate) fn build_antipattern(
    owner_id: &str,
    seq: u32,
    mut builder: PatternBuilder,
) -> AntiPatternRule {
    let (start, end) = match builder.marker_corrections() {
        Some(corrections) => corrections,
        None => {
            for token in &mut builder.tokens {
                token.inside_marker = true;
            }
            (0, 0)
        }
    };
    AntiPatternRule {
        id: format!("{owner_id}_antipattern:{seq}"),
        action: AntiPatternAction::Immunize,
        tokens: builder.tokens,
        start_position_correction: start,
        end_position_correction: end,
    }
}
