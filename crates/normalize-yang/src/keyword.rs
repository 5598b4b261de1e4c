//! Keyword classes and the keyword sets that drive layout.

use crate::ir::Keyword;

/// Coarse statement category, used to place blank lines between top-level
/// statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    Header,
    Meta,
    Linkage,
    Revision,
    Defs,
    Comment,
    Body,
    Extension,
    /// `module` and `submodule`; they start a tree and never get a blank line.
    Root,
}

/// Classify a keyword.
pub fn classify(keyword: &Keyword) -> KeywordClass {
    match keyword.builtin() {
        None => KeywordClass::Extension,
        Some(name) => builtin_class(name),
    }
}

fn builtin_class(name: &str) -> KeywordClass {
    match name {
        "yang-version" | "namespace" | "prefix" | "belongs-to" => KeywordClass::Header,
        "organization" | "contact" | "description" | "reference" => KeywordClass::Meta,
        "import" | "include" => KeywordClass::Linkage,
        "revision" => KeywordClass::Revision,
        "typedef" | "grouping" | "identity" | "feature" | "extension" => KeywordClass::Defs,
        crate::ir::COMMENT_KEYWORD => KeywordClass::Comment,
        "module" | "submodule" => KeywordClass::Root,
        _ => KeywordClass::Body,
    }
}

/// Arguments always start on their own line.
pub const FORCE_NEWLINE_ARG: &[&str] = &["description", "reference", "contact", "organization"];

/// Single-quoted arguments where possible (XPath and regular expressions).
pub const PREFER_SINGLE_QUOTE_ARG: &[&str] = &["must", "when", "pattern"];

/// Preceded by a blank line when they appear directly under the module.
pub const BLANK_LINE_TOPLEVEL: &[&str] = &[
    "description",
    "identity",
    "feature",
    "extension",
    "rpc",
    "augment",
    "deviation",
];

/// Preceded by a blank line at any depth.
pub const BLANK_LINE_ANY_LEVEL: &[&str] = &["typedef", "grouping", "notification", "action"];

pub(crate) fn is_in(keyword: &Keyword, set: &[&str]) -> bool {
    keyword.builtin().is_some_and(|name| set.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_classes() {
        let cases = [
            ("yang-version", KeywordClass::Header),
            ("belongs-to", KeywordClass::Header),
            ("contact", KeywordClass::Meta),
            ("include", KeywordClass::Linkage),
            ("revision", KeywordClass::Revision),
            ("extension", KeywordClass::Defs),
            ("_comment", KeywordClass::Comment),
            ("submodule", KeywordClass::Root),
            ("container", KeywordClass::Body),
            ("no-such-keyword", KeywordClass::Body),
        ];
        for (name, class) in cases {
            assert_eq!(classify(&Keyword::simple(name)), class, "{name}");
        }
    }

    #[test]
    fn test_namespaced_is_always_extension() {
        // even when the local name collides with a built-in keyword
        assert_eq!(
            classify(&Keyword::namespaced("ex", "prefix")),
            KeywordClass::Extension
        );
        assert!(!is_in(&Keyword::namespaced("ex", "must"), PREFER_SINGLE_QUOTE_ARG));
    }
}
