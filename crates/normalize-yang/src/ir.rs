//! Statement tree consumed by the writer.
//!
//! The tree is produced elsewhere (a YANG parser, or the JSON form read by the
//! CLI) and is only read here. Arguments keep the layout metadata the parser
//! recorded: whether the source split them into `+`-joined fragments and how
//! each fragment was quoted.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Keyword of the internal comment pseudo-statement.
pub const COMMENT_KEYWORD: &str = "_comment";

/// Statement keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Keyword {
    /// Built-in keyword such as `container`.
    Simple(String),
    /// Extension keyword, written `prefix:name`.
    Namespaced { prefix: String, name: String },
}

impl Keyword {
    /// Built-in keyword. `name` must not carry a prefix; use
    /// `Keyword::from` for keyword text that may be `prefix:name`.
    pub fn simple(name: impl Into<String>) -> Self {
        Keyword::Simple(name.into())
    }

    pub fn namespaced(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Keyword::Namespaced {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    /// The built-in keyword name, or `None` for extension keywords.
    pub fn builtin(&self) -> Option<&str> {
        match self {
            Keyword::Simple(name) => Some(name.as_str()),
            Keyword::Namespaced { .. } => None,
        }
    }

    /// True if this is the built-in keyword `name`.
    pub fn is(&self, name: &str) -> bool {
        self.builtin() == Some(name)
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, Keyword::Namespaced { .. })
    }

    pub fn is_comment(&self) -> bool {
        self.is(COMMENT_KEYWORD)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Simple(name) => f.write_str(name),
            Keyword::Namespaced { prefix, name } => write!(f, "{prefix}:{name}"),
        }
    }
}

/// Error for keyword text that cannot name a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid keyword {0:?}")]
pub struct InvalidKeyword(pub String);

impl FromStr for Keyword {
    type Err = InvalidKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if !s.is_empty() => Ok(Keyword::simple(s)),
            Some((prefix, name)) if !prefix.is_empty() && !name.is_empty() => {
                Ok(Keyword::namespaced(prefix, name))
            }
            _ => Err(InvalidKeyword(s.to_string())),
        }
    }
}

/// Keyword text as written: `prefix:name` is an extension keyword, anything
/// else is built-in.
impl From<&str> for Keyword {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Keyword::simple(s))
    }
}

impl TryFrom<String> for Keyword {
    type Error = InvalidKeyword;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        keyword.to_string()
    }
}

/// Quote character of a string in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

/// One quoted fragment of a `+`-concatenated argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub quote: Quote,
}

impl Segment {
    pub fn new(text: impl Into<String>, quote: Quote) -> Self {
        Self {
            text: text.into(),
            quote,
        }
    }
}

/// Statement argument as recorded by the parser.
///
/// Plain text with embedded newlines is a multi-line literal; that is decided
/// at layout time from the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Plain(String),
    MultiSegment(Vec<Segment>),
}

impl Argument {
    /// The argument value with all fragments joined.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Argument::Plain(text) => Cow::Borrowed(text),
            Argument::MultiSegment(segments) => match segments.as_slice() {
                [single] => Cow::Borrowed(&single.text),
                _ => Cow::Owned(segments.iter().map(|s| s.text.as_str()).collect()),
            },
        }
    }

    /// Fragments of a pre-split argument, if it has more than one.
    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            Argument::MultiSegment(segments) if segments.len() > 1 => Some(segments),
            _ => None,
        }
    }
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Argument::Plain(text.to_string())
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Argument::Plain(text)
    }
}

/// A node in the statement tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub keyword: Keyword,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Argument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Statement>,
}

impl Statement {
    pub fn new(keyword: Keyword, argument: Option<Argument>) -> Self {
        Self {
            keyword,
            argument,
            children: Vec::new(),
        }
    }

    /// Statement with a plain argument. `keyword` may be `prefix:name`.
    pub fn leaf(keyword: &str, argument: impl Into<Argument>) -> Self {
        Self::new(Keyword::from(keyword), Some(argument.into()))
    }

    /// Statement without an argument. `keyword` may be `prefix:name`.
    pub fn bare(keyword: &str) -> Self {
        Self::new(Keyword::from(keyword), None)
    }

    /// Comment pseudo-statement carrying the comment text verbatim.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(Keyword::simple(COMMENT_KEYWORD), Some(Argument::Plain(text.into())))
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Statement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_child(mut self, child: Statement) -> Self {
        self.children.push(child);
        self
    }

    /// Argument of the first child with the built-in keyword `keyword`.
    pub fn child_argument(&self, keyword: &str) -> Option<Cow<'_, str>> {
        self.children
            .iter()
            .find(|c| c.keyword.is(keyword))
            .and_then(|c| c.argument.as_ref())
            .map(Argument::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_parse_and_display() {
        let kw: Keyword = "ex:annotation".parse().unwrap();
        assert_eq!(kw, Keyword::namespaced("ex", "annotation"));
        assert_eq!(kw.to_string(), "ex:annotation");
        assert!(kw.is_extension());
        assert_eq!(kw.builtin(), None);

        let kw: Keyword = "leaf-list".parse().unwrap();
        assert!(kw.is("leaf-list"));
        assert!("".parse::<Keyword>().is_err());
        assert!(":x".parse::<Keyword>().is_err());
    }

    #[test]
    fn builders_split_prefixed_keywords() {
        let stmt = Statement::leaf("ex:note", "n");
        assert_eq!(stmt.keyword, Keyword::namespaced("ex", "note"));
        assert_eq!(
            crate::keyword::classify(&stmt.keyword),
            crate::keyword::KeywordClass::Extension
        );
        assert_eq!(Statement::bare("ex:flag").keyword, Keyword::namespaced("ex", "flag"));
        assert_eq!(Statement::bare("input").keyword, Keyword::simple("input"));
        // malformed text stays a plain keyword
        assert_eq!(Keyword::from("ex:"), Keyword::simple("ex:"));
    }

    #[test]
    fn argument_text_joins_segments() {
        let arg = Argument::MultiSegment(vec![
            Segment::new("foo", Quote::Double),
            Segment::new("bar", Quote::Single),
        ]);
        assert_eq!(arg.text(), "foobar");
        assert_eq!(arg.segments().map(<[Segment]>::len), Some(2));

        let single = Argument::MultiSegment(vec![Segment::new("only", Quote::Double)]);
        assert_eq!(single.text(), "only");
        assert!(single.segments().is_none());
    }

    #[test]
    fn statement_json_form() {
        let json = r#"{
            "keyword": "container",
            "argument": "foo",
            "children": [
                { "keyword": "ex:flag" },
                { "keyword": "pattern", "argument": [
                    { "text": "[a-z]+", "quote": "single" },
                    { "text": "[0-9]*", "quote": "double" }
                ] }
            ]
        }"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        assert!(stmt.keyword.is("container"));
        assert_eq!(stmt.argument, Some(Argument::from("foo")));
        assert_eq!(stmt.children[0].keyword, Keyword::namespaced("ex", "flag"));
        assert!(stmt.children[0].argument.is_none());
        assert_eq!(
            stmt.children[1].argument.as_ref().and_then(Argument::segments),
            Some(
                &[
                    Segment::new("[a-z]+", Quote::Single),
                    Segment::new("[0-9]*", Quote::Double),
                ][..]
            )
        );

        let back = serde_json::to_value(&stmt.children[0]).unwrap();
        assert_eq!(back, serde_json::json!({ "keyword": "ex:flag" }));
    }
}
