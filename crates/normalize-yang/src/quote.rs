//! Escaping and quote selection for string arguments.

use crate::ir::Quote;

/// Substrings that make an unquoted or re-quoted argument unsafe.
const NEED_QUOTE: &[&str] = &[
    " ", "}", "{", ";", "\"", "'", "\n", "\t", "\r", "//", "/*", "*/",
];

/// Escape text for a double-quoted string.
///
/// Backslashes go first so the escapes inserted afterwards are not doubled.
/// Single-quoted strings cannot contain escapes and are never passed here.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
}

/// True if `text` cannot be written without quotes.
pub fn needs_quoting(text: &str) -> bool {
    NEED_QUOTE.iter().any(|pat| text.contains(pat))
}

/// Pick the quote for a fragment originally written with `original`, when
/// the keyword prefers `preferred`.
///
/// The original quote is kept whenever switching would change what escapes
/// the text needs.
pub fn select_quote(text: &str, original: Quote, preferred: Quote) -> Quote {
    if original == preferred {
        return original;
    }
    match preferred {
        Quote::Single if text.contains('\'') => Quote::Double,
        Quote::Single => Quote::Single,
        Quote::Double if needs_quoting(text) => Quote::Single,
        Quote::Double => Quote::Double,
    }
}

/// Render `text` inside `quote`, escaping for double quotes.
pub fn quoted(text: &str, quote: Quote) -> String {
    let q = quote.as_char();
    match quote {
        Quote::Double => format!("{q}{}{q}", escape(text)),
        Quote::Single => format!("{q}{text}{q}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\\b\"c\td"), "a\\\\b\\\"c\\td");
        assert_eq!(escape("plain"), "plain");
        // newlines are laid out, not escaped
        assert_eq!(escape("a\nb"), "a\nb");
    }

    #[test]
    fn test_needs_quoting() {
        for s in [" ", "//", "a;b", "{", "x*/", "it's", "\r"] {
            assert!(needs_quoting(s), "{s:?}");
        }
        for s in ["abc123", "a/b", "a*b", "ex:foo", ""] {
            assert!(!needs_quoting(s), "{s:?}");
        }
    }

    #[test]
    fn test_select_quote() {
        assert_eq!(select_quote("abc", Quote::Double, Quote::Single), Quote::Single);
        assert_eq!(select_quote("a'b", Quote::Double, Quote::Single), Quote::Double);
        assert_eq!(select_quote("abc", Quote::Single, Quote::Double), Quote::Double);
        assert_eq!(select_quote("a b", Quote::Single, Quote::Double), Quote::Single);
        assert_eq!(select_quote("a\\d", Quote::Single, Quote::Single), Quote::Single);
    }

    #[test]
    fn test_quoted() {
        assert_eq!(quoted("a\"b", Quote::Double), "\"a\\\"b\"");
        assert_eq!(quoted("a\\d", Quote::Single), "'a\\d'");
    }
}
