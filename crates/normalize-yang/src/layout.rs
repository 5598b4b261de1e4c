//! Argument layout: quoting, and where an argument breaks across lines.
//!
//! Each rendering starts right after the keyword and stops before the
//! statement terminator, so the caller owns the rest of the line.

use crate::grammar::{ArgType, Quoting};
use crate::ir::{Argument, Keyword, Quote, Segment};
use crate::keyword::{FORCE_NEWLINE_ARG, PREFER_SINGLE_QUOTE_ARG, is_in};
use crate::quote::{escape, needs_quoting, quoted, select_quote};

/// Display width, in characters.
pub(crate) fn width(s: &str) -> usize {
    s.chars().count()
}

/// True if the argument should move to its own line.
///
/// Short keywords stay on the argument's line even when it overflows:
/// `must` alone on a line reads worse than a long line.
pub fn needs_new_line(
    keyword: &str,
    max_line_length: Option<usize>,
    line_len: usize,
    argument: &str,
) -> bool {
    match max_line_length {
        Some(max) => line_len + width(argument) > max && width(keyword) > 8,
        None => false,
    }
}

/// Layout context for one statement's argument.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentLayout<'a> {
    pub keyword: &'a Keyword,
    /// Keyword as written, `prefix:name` for extensions.
    pub keyword_text: &'a str,
    pub indent: &'a str,
    pub step: &'a str,
    /// Statement terminator, `;` or ` {`.
    pub eol: &'a str,
    pub max_line_length: Option<usize>,
    pub arg_type: Option<ArgType>,
    /// Use the path wrapping heuristic.
    pub path_arg: bool,
}

impl ArgumentLayout<'_> {
    /// Length of the statement line without the argument text: indent,
    /// keyword, the separating space, two quotes and the terminator.
    pub fn line_len(&self) -> usize {
        width(self.indent) + width(self.keyword_text) + 1 + 2 + width(self.eol)
    }

    /// Render `argument` into `out`. Returns true if the argument was placed
    /// on its own line, in which case children get an extra indent step.
    pub fn render(&self, argument: &Argument, out: &mut String) -> bool {
        let text = argument.text();

        if is_in(self.keyword, PREFER_SINGLE_QUOTE_ARG) && !text.contains('\'') {
            if let Some(segments) = argument.segments() {
                self.multi_segment(segments, Quote::Single, out);
                return false;
            }
            if !needs_new_line(self.keyword_text, self.max_line_length, self.line_len(), &text) {
                out.push_str(" '");
                out.push_str(&text);
                out.push('\'');
                return false;
            }
            // a single-quoted string cannot be split, so just move it down
            self.push_own_line(out);
            out.push('\'');
            out.push_str(&text);
            out.push('\'');
            return true;
        }

        if let Some(segments) = argument.segments() {
            self.multi_segment(segments, Quote::Double, out);
            return false;
        }
        if text.contains('\n') {
            return self.double_quoted(&text, out);
        }
        if self.path_arg {
            self.path(&text, out);
            return false;
        }
        match self.arg_type.map(ArgType::quoting) {
            Some(Quoting::Never) => self.unquoted(&text, out),
            Some(Quoting::IfNeeded) if !needs_quoting(&text) => self.unquoted(&text, out),
            _ => self.double_quoted(&text, out),
        }
    }

    fn push_own_line(&self, out: &mut String) {
        out.push('\n');
        out.push_str(self.indent);
        out.push_str(self.step);
    }

    fn unquoted(&self, text: &str, out: &mut String) -> bool {
        if needs_new_line(self.keyword_text, self.max_line_length, self.line_len(), text) {
            self.push_own_line(out);
            out.push_str(text);
            true
        } else {
            out.push(' ');
            out.push_str(text);
            false
        }
    }

    /// Double-quoted string, re-indenting embedded lines.
    fn double_quoted(&self, text: &str, out: &mut String) -> bool {
        let arg = escape(text);
        let force_newline = is_in(self.keyword, FORCE_NEWLINE_ARG);
        let lines: Vec<&str> = arg.split_inclusive('\n').collect();

        if lines.len() <= 1 {
            let arg = match arg.strip_suffix('\n') {
                Some(body) => format!("{body}\\n"),
                None => arg.clone(),
            };
            if force_newline
                || needs_new_line(self.keyword_text, self.max_line_length, self.line_len(), &arg)
            {
                self.push_own_line(out);
                out.push('"');
                out.push_str(&arg);
                out.push('"');
                return true;
            }
            out.push_str(" \"");
            out.push_str(&arg);
            out.push('"');
            return false;
        }

        // continuation lines start one column past the opening quote
        let prefix = if force_newline {
            self.push_own_line(out);
            format!("{}{}", self.indent, self.step)
        } else {
            out.push(' ');
            format!("{}{} ", self.indent, " ".repeat(width(self.keyword_text)))
        };
        out.push('"');
        out.push_str(lines[0]);
        for line in &lines[1..] {
            if *line == "\n" {
                out.push('\n');
            } else {
                out.push_str(&prefix);
                out.push(' ');
                out.push_str(line);
            }
        }
        if arg.ends_with('\n') {
            out.push_str(&prefix);
        }
        out.push('"');
        true
    }

    /// Fragments of a pre-split argument, one per line, aligned on one column.
    fn multi_segment(&self, segments: &[Segment], preferred: Quote, out: &mut String) {
        let fragments: Vec<String> = segments
            .iter()
            .map(|s| quoted(&s.text, select_quote(&s.text, s.quote, preferred)))
            .collect();

        // line_len already counts the quotes
        let line_len = self.line_len();
        let new_line = self.max_line_length.is_some_and(|max| {
            width(self.keyword_text) > 6
                && fragments
                    .iter()
                    .any(|f| (line_len + width(f)).saturating_sub(2) > max)
        });

        let prefix = if new_line {
            self.push_own_line(out);
            let column = (width(self.indent) + width(self.step)).saturating_sub(2);
            format!("{}+ ", " ".repeat(column))
        } else {
            out.push(' ');
            format!(
                "{}{}+ ",
                self.indent,
                " ".repeat(width(self.keyword_text).saturating_sub(1))
            )
        };

        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(&prefix);
            }
            out.push_str(fragment);
        }
    }

    /// Wrap a path-like argument, breaking only between tokens.
    fn path(&self, text: &str, out: &mut String) {
        let escaped = escape(text);
        let line_len = self.line_len();
        let max = match self.max_line_length {
            Some(max) if needs_new_line(self.keyword_text, Some(max), line_len, &escaped) => max,
            _ => {
                push_double_quoted(out, " ", &escaped);
                return;
            }
        };
        if max <= line_len {
            tracing::debug!(
                keyword = self.keyword_text,
                max,
                "no room to split path argument"
            );
            push_double_quoted(out, " ", &escaped);
            return;
        }

        let chars: Vec<char> = escaped.chars().collect();
        let n = break_point(&chars, max - line_len);
        push_double_quoted(out, " ", &chars[..n].iter().collect::<String>());
        let mut rest = &chars[n..];

        let cont = format!(
            "\n{}{}+ ",
            self.indent,
            " ".repeat(width(self.keyword_text).saturating_sub(1))
        );
        // indent, `+`, space, quotes, terminator
        let overhead = width(self.indent) + width(self.keyword_text) + 1 + 2 + width(self.eol);
        while !rest.is_empty() {
            let n = match max.checked_sub(overhead) {
                Some(budget) if budget > 0 && budget < rest.len() => break_point(rest, budget),
                _ => rest.len(),
            };
            push_double_quoted(out, &cont, &rest[..n].iter().collect::<String>());
            rest = &rest[n..];
        }
    }
}

fn push_double_quoted(out: &mut String, lead: &str, body: &str) {
    out.push_str(lead);
    out.push('"');
    out.push_str(body);
    out.push('"');
}

/// Back a break position off so the line does not end inside an identifier
/// or between a backslash and the character it escapes.
fn break_point(chars: &[char], mut n: usize) -> usize {
    while n > 2 && chars[n - 1].is_alphanumeric() {
        n -= 1;
    }
    let backslashes = chars[..n].iter().rev().take_while(|&&c| c == '\\').count();
    if backslashes % 2 == 1 && n > 1 {
        n -= 1;
    }
    n
}
