//! Unused import detection.

use crate::ir::{Argument, Statement};
use std::collections::{BTreeMap, BTreeSet};

/// Decides which `import` statements may be dropped.
pub trait ImportAnalysis {
    /// True if `import` is the representative unused import of its prefix
    /// among the children of `parent`.
    fn is_unused_import(&self, parent: &Statement, import: &Statement) -> bool;
}

/// Statements whose arguments are free text, not references.
const FREE_TEXT: &[&str] = &[
    "description",
    "reference",
    "contact",
    "organization",
    "namespace",
    crate::ir::COMMENT_KEYWORD,
];

/// Textual prefix-usage analysis over one module.
///
/// A prefix counts as used when it qualifies an extension keyword or
/// appears as `prefix:` in an argument anywhere in the module. Free-text
/// arguments are not scanned.
#[derive(Debug)]
pub struct PrefixUsage<'a> {
    module: &'a Statement,
    /// Unused prefix -> index of its first import among the module's children.
    unused: BTreeMap<String, usize>,
}

impl<'a> PrefixUsage<'a> {
    pub fn analyze(module: &'a Statement) -> Self {
        let mut imports: BTreeMap<String, usize> = BTreeMap::new();
        for (i, child) in module.children.iter().enumerate() {
            if !child.keyword.is("import") {
                continue;
            }
            if let Some(prefix) = child.child_argument("prefix") {
                imports.entry(prefix.into_owned()).or_insert(i);
            }
        }

        let mut used = BTreeSet::new();
        for child in &module.children {
            if child.keyword.is("import") || child.keyword.is("prefix") {
                continue;
            }
            collect_prefixes(child, &mut used);
        }

        imports.retain(|prefix, _| !used.contains(prefix.as_str()));
        if !imports.is_empty() {
            tracing::debug!(unused = ?imports.keys().collect::<Vec<_>>(), "unused import prefixes");
        }
        Self {
            module,
            unused: imports,
        }
    }

    /// Unused prefixes, sorted.
    pub fn unused_prefixes(&self) -> impl Iterator<Item = &str> {
        self.unused.keys().map(String::as_str)
    }
}

impl ImportAnalysis for PrefixUsage<'_> {
    fn is_unused_import(&self, parent: &Statement, import: &Statement) -> bool {
        std::ptr::eq(parent, self.module)
            && self
                .unused
                .values()
                .any(|&i| std::ptr::eq(&parent.children[i], import))
    }
}

fn collect_prefixes(stmt: &Statement, used: &mut BTreeSet<String>) {
    if let crate::ir::Keyword::Namespaced { prefix, .. } = &stmt.keyword {
        used.insert(prefix.clone());
    }
    let free_text = stmt
        .keyword
        .builtin()
        .is_some_and(|kw| FREE_TEXT.contains(&kw));
    if !free_text && let Some(arg) = stmt.argument.as_ref().map(Argument::text) {
        used.extend(referenced_prefixes(&arg));
    }
    for child in &stmt.children {
        collect_prefixes(child, used);
    }
}

/// Identifiers directly followed by `:` in `text`.
fn referenced_prefixes(text: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match c {
            ':' => {
                if let Some(s) = start.take() {
                    let ident = &text[s..i];
                    if ident.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
                        prefixes.push(ident.to_string());
                    }
                }
            }
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') => {
                start.get_or_insert(i);
            }
            _ => start = None,
        }
    }
    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(module: &str, prefix: &str) -> Statement {
        Statement::leaf("import", module).with_child(Statement::leaf("prefix", prefix))
    }

    #[test]
    fn test_referenced_prefixes() {
        assert_eq!(
            referenced_prefixes("/if:interfaces/if:interface[ip:name = current()]"),
            ["if", "if", "ip"]
        );
        assert_eq!(referenced_prefixes("inet:ipv4-address"), ["inet"]);
        assert!(referenced_prefixes("string").is_empty());
        assert!(referenced_prefixes("2024-01-01:x").is_empty());
    }

    #[test]
    fn test_prefix_usage() {
        let module = Statement::leaf("module", "m").with_children([
            Statement::leaf("prefix", "m"),
            import("ietf-inet-types", "inet"),
            import("ietf-yang-types", "yang"),
            import("ex-ext", "ex"),
            import("unused-again", "yang"),
            Statement::leaf("description", "mentions yang:counter32 in prose"),
            Statement::leaf("leaf", "addr")
                .with_child(Statement::leaf("type", "inet:ip-address"))
                .with_child(Statement::leaf("ex:note", "n")),
        ]);
        let analysis = PrefixUsage::analyze(&module);
        assert_eq!(analysis.unused_prefixes().collect::<Vec<_>>(), ["yang"]);

        // only the first import of the prefix is the representative
        assert!(analysis.is_unused_import(&module, &module.children[2]));
        assert!(!analysis.is_unused_import(&module, &module.children[4]));
        assert!(!analysis.is_unused_import(&module, &module.children[1]));
        assert!(!analysis.is_unused_import(&module, &module.children[3]));
    }

    #[test]
    fn test_other_parent_never_matches() {
        let module = Statement::leaf("module", "m").with_child(import("a", "a"));
        let copy = module.clone();
        let analysis = PrefixUsage::analyze(&module);
        assert!(analysis.is_unused_import(&module, &module.children[0]));
        assert!(!analysis.is_unused_import(&copy, &copy.children[0]));
    }
}
