//! Canonical YANG output for statement trees.
//!
//! `normalize-yang` renders a parsed YANG statement tree back into YANG
//! source with deterministic quoting, optional canonical substatement order,
//! optional removal of unused imports, and heuristic wrapping at a maximum
//! line length.
//!
//! # Architecture
//!
//! ```text
//! Statement tree          Writer                      Output
//! ──────────────     ─────────────────────────     ──────────
//! ir::Statement ───> writer::YangWriter ─────────> io::Write
//!                      ├─ keyword  (classes, blank lines)
//!                      ├─ layout   (quoting, wrapping)
//!                      │    └─ quote (escape, quote choice)
//!                      ├─ grammar  (argument types, canonical order)
//!                      └─ imports  (unused import analysis)
//! ```
//!
//! # Example
//!
//! ```
//! use normalize_yang::{FormattingOptions, Statement, to_yang};
//!
//! let leaf = Statement::leaf("leaf", "name")
//!     .with_child(Statement::leaf("type", "string"))
//!     .with_child(Statement::leaf("description", "The name."));
//!
//! let yang = to_yang(&leaf, &FormattingOptions::default()).unwrap();
//! assert_eq!(
//!     yang,
//!     "leaf name {\n  type string;\n  description\n    \"The name.\";\n}\n"
//! );
//! ```
//!
//! # Fidelity
//!
//! Output is syntactically equivalent to the input tree, not a byte-for-byte
//! copy of the original source: arguments may be re-quoted and re-wrapped.

pub mod config;
pub mod grammar;
pub mod imports;
pub mod ir;
pub mod keyword;
pub mod layout;
pub mod quote;
pub mod writer;

// Re-exports: IR types
pub use ir::{Argument, COMMENT_KEYWORD, Keyword, Quote, Segment, Statement};

// Re-exports: Writer
pub use writer::{EmitError, YangWriter, emit, to_yang};

// Re-exports: Collaborators
pub use grammar::{ArgType, CORE_GRAMMAR, CoreGrammar, Grammar};
pub use imports::{ImportAnalysis, PrefixUsage};

// Re-exports: Configuration
pub use config::{ConfigError, FormattingOptions, YangConfig};

pub use keyword::{KeywordClass, classify};
pub use layout::needs_new_line;
pub use quote::{escape, needs_quoting, select_quote};
