//! YANG writer for statement trees.
//!
//! Emits a [`Statement`] tree as YANG source in one depth-first pass. Each
//! statement line is rendered into a small buffer and written to the sink
//! as soon as it is complete; write errors are returned as-is.

use crate::config::FormattingOptions;
use crate::grammar::{CORE_GRAMMAR, Grammar};
use crate::imports::{ImportAnalysis, PrefixUsage};
use crate::ir::Statement;
use crate::keyword::{BLANK_LINE_ANY_LEVEL, BLANK_LINE_TOPLEVEL, KeywordClass, classify, is_in};
use crate::layout::ArgumentLayout;
use std::io::Write;

/// Deepest statement nesting the writer descends into.
pub const MAX_DEPTH: usize = 256;

/// Error that can occur while emitting.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("emitted text is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("statements nested deeper than {depth} levels")]
    TooDeep { depth: usize },
}

/// Emits statement trees as YANG source.
pub struct YangWriter<'a> {
    options: &'a FormattingOptions,
    grammar: &'a dyn Grammar,
    imports: Option<&'a dyn ImportAnalysis>,
}

impl<'a> YangWriter<'a> {
    /// Writer using the YANG 1.1 core grammar. Unused imports, if requested,
    /// are found with [`PrefixUsage`].
    pub fn new(options: &'a FormattingOptions) -> Self {
        Self {
            options,
            grammar: &CORE_GRAMMAR,
            imports: None,
        }
    }

    pub fn with_grammar(mut self, grammar: &'a dyn Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Use `analysis` instead of the built-in prefix usage scan.
    pub fn with_import_analysis(mut self, analysis: &'a dyn ImportAnalysis) -> Self {
        self.imports = Some(analysis);
        self
    }

    /// Emit `root` to `out`.
    pub fn write<W: Write>(&self, root: &Statement, out: &mut W) -> Result<(), EmitError> {
        let usage;
        let imports = match self.imports {
            Some(imports) => Some(imports),
            None if self.options.remove_unused_imports => {
                usage = PrefixUsage::analyze(root);
                Some(&usage as &dyn ImportAnalysis)
            }
            None => None,
        };
        let mut emitter = Emitter {
            options: self.options,
            grammar: self.grammar,
            imports,
            step: " ".repeat(self.options.indent),
            out,
        };
        emitter.statement(root, None, 0, KeywordClass::Root, "")?;
        Ok(())
    }

    /// Emit `root` to a string.
    pub fn write_to_string(&self, root: &Statement) -> Result<String, EmitError> {
        let mut buf = Vec::new();
        self.write(root, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Emit `root` with the core grammar.
pub fn emit<W: Write>(
    root: &Statement,
    options: &FormattingOptions,
    out: &mut W,
) -> Result<(), EmitError> {
    YangWriter::new(options).write(root, out)
}

/// Emit `root` with the core grammar into a string.
pub fn to_yang(root: &Statement, options: &FormattingOptions) -> Result<String, EmitError> {
    YangWriter::new(options).write_to_string(root)
}

struct Emitter<'e, W> {
    options: &'e FormattingOptions,
    grammar: &'e dyn Grammar,
    imports: Option<&'e dyn ImportAnalysis>,
    step: String,
    out: &'e mut W,
}

impl<W: Write> Emitter<'_, W> {
    /// Emit one statement and its subtree.
    ///
    /// `prev` is the class of the previous emitted sibling. Returns this
    /// statement's class, or `None` if it was skipped.
    fn statement(
        &mut self,
        stmt: &Statement,
        parent: Option<&Statement>,
        level: usize,
        prev: KeywordClass,
        indent: &str,
    ) -> Result<Option<KeywordClass>, EmitError> {
        if level > MAX_DEPTH {
            return Err(EmitError::TooDeep { depth: MAX_DEPTH });
        }
        if self.is_dropped_import(stmt, parent) {
            tracing::debug!(import = ?stmt.argument, "dropping unused import");
            return Ok(None);
        }

        let keyword = &stmt.keyword;
        let class = classify(keyword);
        // top-level grouping only applies inside a module or submodule
        let toplevel =
            level == 1 && parent.is_some_and(|p| classify(&p.keyword) == KeywordClass::Root);
        let mut line = String::new();
        if (toplevel && class != prev && class != KeywordClass::Extension)
            || (toplevel && is_in(keyword, BLANK_LINE_TOPLEVEL))
            || is_in(keyword, BLANK_LINE_ANY_LEVEL)
        {
            line.push('\n');
        }

        if keyword.is_comment() {
            if let Some(text) = &stmt.argument {
                push_comment(&mut line, &text.text(), indent);
            }
            line.push('\n');
            self.out.write_all(line.as_bytes())?;
            return Ok(Some(class));
        }

        let keyword_text = keyword.to_string();
        let eol = if stmt.children.is_empty() { ";" } else { " {" };
        line.push_str(indent);
        line.push_str(&keyword_text);
        let mut arg_on_own_line = false;
        if let Some(argument) = &stmt.argument {
            let layout = ArgumentLayout {
                keyword,
                keyword_text: &keyword_text,
                indent,
                step: &self.step,
                eol,
                max_line_length: self.options.max_line_length,
                arg_type: self.grammar.argument_type(keyword),
                path_arg: self.options.path_keywords.iter().any(|k| keyword.is(k)),
            };
            arg_on_own_line = layout.render(argument, &mut line);
        }
        line.push_str(eol);
        line.push('\n');
        tracing::trace!(keyword = %keyword_text, level, "emit statement");
        self.out.write_all(line.as_bytes())?;

        if stmt.children.is_empty() {
            return Ok(Some(class));
        }

        let children = if self.options.canonical_order {
            let sorted = self.grammar.canonical_order(keyword, &stmt.children);
            if sorted.iter().zip(&stmt.children).any(|(a, b)| !std::ptr::eq(*a, b)) {
                tracing::debug!(keyword = %keyword_text, "reordered substatements");
            }
            sorted
        } else {
            stmt.children.iter().collect()
        };
        let steps = if arg_on_own_line { 2 } else { 1 };
        let child_indent = format!("{indent}{}", self.step.repeat(steps));
        let first_prev = if level == 0 { KeywordClass::Header } else { class };
        children.into_iter().try_fold(first_prev, |prev, child| {
            let emitted = self.statement(child, Some(stmt), level + 1, prev, &child_indent)?;
            Ok::<_, EmitError>(emitted.unwrap_or(prev))
        })?;
        writeln!(self.out, "{indent}}}")?;
        Ok(Some(class))
    }

    fn is_dropped_import(&self, stmt: &Statement, parent: Option<&Statement>) -> bool {
        self.options.remove_unused_imports
            && stmt.keyword.is("import")
            && parent
                .zip(self.imports)
                .is_some_and(|(parent, imports)| imports.is_unused_import(parent, stmt))
    }
}

/// Comment lines at the current indent; lines continuing a block comment
/// (`* ...`) shift one column to line up under `/*`.
fn push_comment(out: &mut String, text: &str, indent: &str) {
    for line in text.split_inclusive('\n') {
        out.push_str(indent);
        if line.starts_with('*') {
            out.push(' ');
        }
        out.push_str(line);
    }
}
