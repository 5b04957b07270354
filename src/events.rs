#![forbid(unsafe_code)]

//! The compiler's input interface: structured markup events
//!
//! An external markup tokenizer turns raw rule files into a stream of
//! open/close/text events. The compiler consumes that stream strictly in
//! arrival order with no lookahead. Tag names the tokenizer does not
//! recognize (`Tag::from_name` returns `None`) are simply not forwarded.

/// Recognized rule-markup elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Category,
    Rules,
    RuleGroup,
    Rule,
    Pattern,
    AntiPattern,
    And,
    Or,
    Token,
    Exception,
    Unify,
    UnifyIgnore,
    Feature,
    Type,
    Marker,
    Message,
    Suggestion,
    Short,
    Url,
    Match,
    Example,
    Filter,
    Phrases,
    Phrase,
    PhraseRef,
    IncludePhrases,
}

impl Tag {
    /// Maps a markup element name to its tag, `None` for unrecognized names
    pub fn from_name(name: &str) -> Option<Tag> {
        let tag = match name {
            "category" => Tag::Category,
            "rules" => Tag::Rules,
            "rulegroup" => Tag::RuleGroup,
            "rule" => Tag::Rule,
            "pattern" => Tag::Pattern,
            "antipattern" => Tag::AntiPattern,
            "and" => Tag::And,
            "or" => Tag::Or,
            "token" => Tag::Token,
            "exception" => Tag::Exception,
            "unify" => Tag::Unify,
            "unify-ignore" => Tag::UnifyIgnore,
            "feature" => Tag::Feature,
            "type" => Tag::Type,
            "marker" => Tag::Marker,
            "message" => Tag::Message,
            "suggestion" => Tag::Suggestion,
            "short" => Tag::Short,
            "url" => Tag::Url,
            "match" => Tag::Match,
            "example" => Tag::Example,
            "filter" => Tag::Filter,
            "phrases" => Tag::Phrases,
            "phrase" => Tag::Phrase,
            "phraseref" => Tag::PhraseRef,
            "includephrases" => Tag::IncludePhrases,
            _ => return None,
        };
        Some(tag)
    }

    /// Returns the element name as written in rule markup
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Category => "category",
            Tag::Rules => "rules",
            Tag::RuleGroup => "rulegroup",
            Tag::Rule => "rule",
            Tag::Pattern => "pattern",
            Tag::AntiPattern => "antipattern",
            Tag::And => "and",
            Tag::Or => "or",
            Tag::Token => "token",
            Tag::Exception => "exception",
            Tag::Unify => "unify",
            Tag::UnifyIgnore => "unify-ignore",
            Tag::Feature => "feature",
            Tag::Type => "type",
            Tag::Marker => "marker",
            Tag::Message => "message",
            Tag::Suggestion => "suggestion",
            Tag::Short => "short",
            Tag::Url => "url",
            Tag::Match => "match",
            Tag::Example => "example",
            Tag::Filter => "filter",
            Tag::Phrases => "phrases",
            Tag::Phrase => "phrase",
            Tag::PhraseRef => "phraseref",
            Tag::IncludePhrases => "includephrases",
        }
    }
}

/// Attributes carried by an open-tag event
///
/// Order-preserving name/value pairs with the accessors the rule grammar
/// actually needs: raw lookup plus the `yes`/`off`/`on` switches used by
/// `default=`, `case_sensitive=`, and friends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty attribute set
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Appends an attribute, keeping arrival order
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Looks up an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when the attribute is present with value `yes`
    pub fn is_yes(&self, name: &str) -> bool {
        self.get(name) == Some("yes")
    }

    /// True when the attribute is present with value `on`
    pub fn is_on(&self, name: &str) -> bool {
        self.get(name) == Some("on")
    }

    /// True when the attribute is present with value `off`
    pub fn is_off(&self, name: &str) -> bool {
        self.get(name) == Some("off")
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no attributes are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in pairs {
            attrs.set(name, value);
        }
        attrs
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Attributes {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One structured markup event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An element opened, with its attributes
    Open { tag: Tag, attrs: Attributes },
    /// An element closed
    Close(Tag),
    /// A text run between markup
    Text(String),
}

impl Event {
    /// Builds an open event
    pub fn open(tag: Tag, attrs: impl Into<Attributes>) -> Event {
        Event::Open {
            tag,
            attrs: attrs.into(),
        }
    }

    /// Builds an open event with no attributes
    pub fn open_empty(tag: Tag) -> Event {
        Event::Open {
            tag,
            attrs: Attributes::new(),
        }
    }

    /// Builds a close event
    pub fn close(tag: Tag) -> Event {
        Event::Close(tag)
    }

    /// Builds a text event
    pub fn text(run: impl Into<String>) -> Event {
        Event::Text(run.into())
    }
}
