//! Grammar knowledge the writer needs: argument types and canonical
//! substatement order.
//!
//! The built-in [`CoreGrammar`] covers the YANG 1.1 core statements.
//! Other grammars (e.g. with extension-aware ordering) plug in through the
//! [`Grammar`] trait.

use crate::ir::{Keyword, Statement};

/// Argument type of a built-in statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Identifier,
    IdentifierRef,
    Boolean,
    Integer,
    NonNegativeInteger,
    MaxValue,
    Date,
    Version,
    Status,
    OrderedBy,
    FractionDigits,
    Deviate,
    Enum,
    IfFeatureExpr,
    Uri,
    Range,
    Length,
    Modifier,
    Path,
    Key,
    Unique,
    SchemaNodeId,
    DescendantSchemaNodeId,
}

/// How an argument of a given type is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Never quoted.
    Never,
    /// Unquoted unless the value contains characters that require quotes.
    IfNeeded,
    /// Always double-quoted.
    Always,
}

impl ArgType {
    pub fn quoting(self) -> Quoting {
        use ArgType::*;
        match self {
            Identifier | IdentifierRef | Boolean | Integer | NonNegativeInteger | MaxValue
            | Date | OrderedBy | FractionDigits | Deviate | Version | Status => Quoting::Never,
            Enum | IfFeatureExpr => Quoting::IfNeeded,
            String | Uri | Range | Length | Modifier | Path | Key | Unique | SchemaNodeId
            | DescendantSchemaNodeId => Quoting::Always,
        }
    }
}

/// Ordered groups of substatement keywords. Statements within one group keep
/// their relative order.
pub type SubstatementOrder = &'static [&'static [&'static str]];

/// Grammar collaborator consulted by the writer.
pub trait Grammar: Send + Sync {
    /// Argument type of `keyword`, `None` for unknown and extension keywords.
    fn argument_type(&self, keyword: &Keyword) -> Option<ArgType>;

    /// Canonical substatement groups under `keyword`, if it declares any.
    fn substatement_order(&self, keyword: &str) -> Option<SubstatementOrder>;

    /// Children of a `parent` statement in canonical order.
    ///
    /// Stable: statements in the same group keep their relative order.
    /// Keywords without a group (extensions, unknown statements) go last.
    /// A comment travels with the statement that follows it.
    fn canonical_order<'a>(
        &self,
        parent: &Keyword,
        children: &'a [Statement],
    ) -> Vec<&'a Statement> {
        let order = match parent.builtin().and_then(|kw| self.substatement_order(kw)) {
            Some(order) => order,
            None => return children.iter().collect(),
        };
        let rank_of = |stmt: &Statement| -> usize {
            stmt.keyword
                .builtin()
                .and_then(|kw| order.iter().position(|group| group.contains(&kw)))
                .unwrap_or(order.len())
        };

        // Comments take the rank of the next statement, so walk backwards.
        let mut ranks = vec![order.len(); children.len()];
        let mut next_rank = order.len();
        for (i, stmt) in children.iter().enumerate().rev() {
            if !stmt.keyword.is_comment() {
                next_rank = rank_of(stmt);
            }
            ranks[i] = next_rank;
        }

        let mut ranked: Vec<(usize, &Statement)> = ranks.into_iter().zip(children).collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, stmt)| stmt).collect()
    }
}

/// YANG 1.1 (RFC 7950) core statements.
pub struct CoreGrammar;

/// Static instance used when no other grammar is supplied.
pub static CORE_GRAMMAR: CoreGrammar = CoreGrammar;

impl Grammar for CoreGrammar {
    fn argument_type(&self, keyword: &Keyword) -> Option<ArgType> {
        keyword.builtin().and_then(core_argument_type)
    }

    fn substatement_order(&self, keyword: &str) -> Option<SubstatementOrder> {
        core_substatement_order(keyword)
    }
}

fn core_argument_type(keyword: &str) -> Option<ArgType> {
    use ArgType::*;
    let ty = match keyword {
        "module" | "submodule" | "import" | "include" | "prefix" | "belongs-to" | "extension"
        | "argument" | "identity" | "feature" | "typedef" | "bit" | "grouping" | "container"
        | "leaf" | "leaf-list" | "list" | "choice" | "case" | "anydata" | "anyxml" | "rpc"
        | "action" | "notification" => Identifier,
        "type" | "base" | "uses" => IdentifierRef,
        "yin-element" | "require-instance" | "config" | "mandatory" => Boolean,
        "value" => Integer,
        "position" | "min-elements" => NonNegativeInteger,
        "max-elements" => MaxValue,
        "revision" | "revision-date" => Date,
        "yang-version" => Version,
        "status" => Status,
        "ordered-by" => OrderedBy,
        "fraction-digits" => FractionDigits,
        "deviate" => Deviate,
        "enum" => Enum,
        "if-feature" => IfFeatureExpr,
        "namespace" => Uri,
        "range" => Range,
        "length" => Length,
        "modifier" => Modifier,
        "path" => Path,
        "key" => Key,
        "unique" => Unique,
        "augment" | "deviation" => SchemaNodeId,
        "refine" => DescendantSchemaNodeId,
        "organization" | "contact" | "description" | "reference" | "units" | "default"
        | "pattern" | "presence" | "must" | "when" | "error-message" | "error-app-tag" => String,
        _ => return None,
    };
    Some(ty)
}

const DATA_DEF: &[&str] = &[
    "container",
    "leaf",
    "leaf-list",
    "list",
    "choice",
    "anydata",
    "anyxml",
    "uses",
];

const DATA_DEF_OR_CASE: &[&str] = &[
    "container",
    "leaf",
    "leaf-list",
    "list",
    "choice",
    "anydata",
    "anyxml",
    "uses",
    "case",
];

const SHORT_CASE_OR_CASE: &[&str] = &[
    "choice",
    "container",
    "leaf",
    "leaf-list",
    "list",
    "anydata",
    "anyxml",
    "case",
];

const TYPEDEF_GROUPING: &[&str] = &["typedef", "grouping"];

const BODY: &[&str] = &[
    "extension",
    "feature",
    "identity",
    "typedef",
    "grouping",
    "container",
    "leaf",
    "leaf-list",
    "list",
    "choice",
    "anydata",
    "anyxml",
    "uses",
    "augment",
    "rpc",
    "notification",
    "deviation",
];

fn core_substatement_order(keyword: &str) -> Option<SubstatementOrder> {
    let order: SubstatementOrder = match keyword {
        "module" => &[
            &["yang-version"],
            &["namespace"],
            &["prefix"],
            &["import"],
            &["include"],
            &["organization"],
            &["contact"],
            &["description"],
            &["reference"],
            &["revision"],
            BODY,
        ],
        "submodule" => &[
            &["yang-version"],
            &["belongs-to"],
            &["import"],
            &["include"],
            &["organization"],
            &["contact"],
            &["description"],
            &["reference"],
            &["revision"],
            BODY,
        ],
        "revision" | "when" => &[&["description"], &["reference"]],
        "import" => &[
            &["prefix"],
            &["revision-date"],
            &["description"],
            &["reference"],
        ],
        "include" => &[&["revision-date"], &["description"], &["reference"]],
        "belongs-to" => &[&["prefix"]],
        "extension" => &[&["argument"], &["status"], &["description"], &["reference"]],
        "argument" => &[&["yin-element"]],
        "identity" => &[
            &["if-feature"],
            &["base"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "feature" => &[&["if-feature"], &["status"], &["description"], &["reference"]],
        "typedef" => &[
            &["type"],
            &["units"],
            &["default"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "type" => &[
            &["fraction-digits"],
            &["range"],
            &["length"],
            &["pattern"],
            &["enum"],
            &["bit"],
            &["path"],
            &["require-instance"],
            &["base"],
            &["type"],
        ],
        "range" | "length" | "must" => &[
            &["error-message"],
            &["error-app-tag"],
            &["description"],
            &["reference"],
        ],
        "pattern" => &[
            &["modifier"],
            &["error-message"],
            &["error-app-tag"],
            &["description"],
            &["reference"],
        ],
        "enum" => &[
            &["if-feature"],
            &["value"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "bit" => &[
            &["if-feature"],
            &["position"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "container" => &[
            &["when"],
            &["if-feature"],
            &["must"],
            &["presence"],
            &["config"],
            &["status"],
            &["description"],
            &["reference"],
            TYPEDEF_GROUPING,
            DATA_DEF,
            &["action"],
            &["notification"],
        ],
        "leaf" => &[
            &["when"],
            &["if-feature"],
            &["type"],
            &["units"],
            &["must"],
            &["default"],
            &["config"],
            &["mandatory"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "leaf-list" => &[
            &["when"],
            &["if-feature"],
            &["type"],
            &["units"],
            &["must"],
            &["default"],
            &["config"],
            &["min-elements"],
            &["max-elements"],
            &["ordered-by"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "list" => &[
            &["when"],
            &["if-feature"],
            &["must"],
            &["key"],
            &["unique"],
            &["config"],
            &["min-elements"],
            &["max-elements"],
            &["ordered-by"],
            &["status"],
            &["description"],
            &["reference"],
            TYPEDEF_GROUPING,
            DATA_DEF,
            &["action"],
            &["notification"],
        ],
        "choice" => &[
            &["when"],
            &["if-feature"],
            &["default"],
            &["config"],
            &["mandatory"],
            &["status"],
            &["description"],
            &["reference"],
            SHORT_CASE_OR_CASE,
        ],
        "case" => &[
            &["when"],
            &["if-feature"],
            &["status"],
            &["description"],
            &["reference"],
            DATA_DEF,
        ],
        "anydata" | "anyxml" => &[
            &["when"],
            &["if-feature"],
            &["must"],
            &["config"],
            &["mandatory"],
            &["status"],
            &["description"],
            &["reference"],
        ],
        "grouping" => &[
            &["status"],
            &["description"],
            &["reference"],
            TYPEDEF_GROUPING,
            DATA_DEF,
            &["action"],
            &["notification"],
        ],
        "uses" => &[
            &["when"],
            &["if-feature"],
            &["status"],
            &["description"],
            &["reference"],
            &["refine"],
            &["augment"],
        ],
        "refine" => &[
            &["if-feature"],
            &["must"],
            &["presence"],
            &["default"],
            &["config"],
            &["mandatory"],
            &["min-elements"],
            &["max-elements"],
            &["description"],
            &["reference"],
        ],
        "augment" => &[
            &["when"],
            &["if-feature"],
            &["status"],
            &["description"],
            &["reference"],
            DATA_DEF_OR_CASE,
            &["action"],
            &["notification"],
        ],
        "rpc" | "action" => &[
            &["if-feature"],
            &["status"],
            &["description"],
            &["reference"],
            TYPEDEF_GROUPING,
            &["input"],
            &["output"],
        ],
        "input" | "output" => &[&["must"], TYPEDEF_GROUPING, DATA_DEF],
        "notification" => &[
            &["if-feature"],
            &["must"],
            &["status"],
            &["description"],
            &["reference"],
            TYPEDEF_GROUPING,
            DATA_DEF,
        ],
        "deviation" => &[&["description"], &["reference"], &["deviate"]],
        "deviate" => &[
            &["type"],
            &["units"],
            &["must"],
            &["unique"],
            &["default"],
            &["config"],
            &["mandatory"],
            &["min-elements"],
            &["max-elements"],
        ],
        _ => return None,
    };
    Some(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(stmts: &[&Statement]) -> Vec<String> {
        stmts.iter().map(|s| s.keyword.to_string()).collect()
    }

    #[test]
    fn test_argument_types() {
        let g = &CORE_GRAMMAR;
        assert_eq!(g.argument_type(&Keyword::simple("type")), Some(ArgType::IdentifierRef));
        assert_eq!(g.argument_type(&Keyword::simple("enum")), Some(ArgType::Enum));
        assert_eq!(g.argument_type(&Keyword::simple("description")), Some(ArgType::String));
        assert_eq!(g.argument_type(&Keyword::simple("frobnicate")), None);
        assert_eq!(g.argument_type(&Keyword::namespaced("ex", "type")), None);
        assert_eq!(ArgType::MaxValue.quoting(), Quoting::Never);
        assert_eq!(ArgType::Key.quoting(), Quoting::Always);
    }

    #[test]
    fn test_canonical_leaf_order() {
        let leaf = Statement::leaf("leaf", "x").with_children([
            Statement::leaf("description", "d"),
            Statement::leaf("ex:note", "n"),
            Statement::leaf("mandatory", "true"),
            Statement::leaf("type", "string"),
        ]);
        let sorted = CORE_GRAMMAR.canonical_order(&leaf.keyword, &leaf.children);
        assert_eq!(keywords(&sorted), ["type", "mandatory", "description", "ex:note"]);
    }

    #[test]
    fn test_group_keeps_relative_order() {
        let container = Statement::leaf("container", "c").with_children([
            Statement::leaf("leaf", "b"),
            Statement::leaf("uses", "g"),
            Statement::leaf("leaf", "a"),
            Statement::leaf("typedef", "t"),
            Statement::leaf("config", "false"),
        ]);
        let sorted = CORE_GRAMMAR.canonical_order(&container.keyword, &container.children);
        let args: Vec<_> = sorted
            .iter()
            .map(|s| s.argument.as_ref().unwrap().text().into_owned())
            .collect();
        assert_eq!(args, ["false", "t", "b", "g", "a"]);
    }

    #[test]
    fn test_comment_travels_with_next_statement() {
        let leaf = Statement::leaf("leaf", "x").with_children([
            Statement::leaf("description", "d"),
            Statement::comment("// the type"),
            Statement::leaf("type", "string"),
            Statement::comment("// trailing"),
        ]);
        let sorted = CORE_GRAMMAR.canonical_order(&leaf.keyword, &leaf.children);
        assert_eq!(keywords(&sorted), ["_comment", "type", "description", "_comment"]);
        assert_eq!(sorted[0].argument, Some("// the type".into()));
    }

    #[test]
    fn test_canonical_order_is_idempotent() {
        let module = Statement::leaf("module", "m").with_children([
            Statement::leaf("container", "c"),
            Statement::leaf("revision", "2024-01-01"),
            Statement::leaf("ex:ext", "e"),
            Statement::leaf("prefix", "m"),
            Statement::comment("// ns"),
            Statement::leaf("namespace", "urn:m"),
            Statement::leaf("import", "a"),
            Statement::leaf("yang-version", "1.1"),
            Statement::leaf("typedef", "t"),
        ]);
        let once: Vec<Statement> = CORE_GRAMMAR
            .canonical_order(&module.keyword, &module.children)
            .into_iter()
            .cloned()
            .collect();
        let twice = CORE_GRAMMAR.canonical_order(&module.keyword, &once);
        assert_eq!(
            keywords(&twice),
            keywords(&once.iter().collect::<Vec<_>>())
        );
        assert_eq!(
            keywords(&twice),
            [
                "yang-version",
                "_comment",
                "namespace",
                "prefix",
                "import",
                "revision",
                "container",
                "typedef",
                "ex:ext",
            ]
        );
    }

    #[test]
    fn test_unordered_parent_is_untouched() {
        let ext = Statement::leaf("ex:thing", "x")
            .with_children([Statement::leaf("leaf", "b"), Statement::leaf("description", "d")]);
        let sorted = CORE_GRAMMAR.canonical_order(&ext.keyword, &ext.children);
        assert_eq!(keywords(&sorted), ["leaf", "description"]);
    }
}
