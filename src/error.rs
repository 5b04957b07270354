//! Error types for the rule compiler
//!
//! All fatal conditions abort compilation of the current event stream; a
//! malformed rule file is not partially usable, so there is no partial
//! success mode. Unknown filter names are deliberately *not* errors: the
//! compiler only records them for an external resolver.

/// Errors raised while compiling a rule event stream
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A rule was closed while no category scope was open
    #[error("cannot activate rule '{id}': it is outside of a category")]
    RuleOutsideCategory { id: String },

    /// A rule inside an always-off rule group declared its own default state
    #[error(
        "rule group '{group_id}' is off by default, so rule '{rule_id}' cannot specify 'default'"
    )]
    DefaultInOffGroup { group_id: String, rule_id: String },

    /// A rule id or name was absent and relaxed mode is disabled
    #[error("missing rule {what} (set relaxed mode to allow empty identifiers)")]
    MissingIdentifier { what: &'static str },

    /// No `rules` element set a compilation language before a rule closed
    #[error("no compilation language in effect for rule '{id}'")]
    MissingLanguage { id: String },

    /// A language short code did not resolve against the registry
    #[error("unknown language code '{code}'")]
    UnknownLanguage { code: String },

    /// A `url` element body failed address-syntax validation
    #[error("could not parse URL '{url}' for '{owner}': {source}")]
    MalformedUrl {
        owner: String,
        url: String,
        source: url::ParseError,
    },

    /// Token or exception text flagged as a regex failed to compile
    #[error("invalid regex '{pattern}' in '{owner}': {source}")]
    InvalidRegex {
        owner: String,
        pattern: String,
        source: regex::Error,
    },

    /// An attribute value could not be interpreted (e.g. a non-numeric priority)
    #[error("invalid value '{value}' for attribute '{attribute}' on <{tag}>")]
    InvalidAttribute {
        tag: &'static str,
        attribute: &'static str,
        value: String,
    },
}
