#![warn(missing_docs)]
//! Indent Core - Decision-Tree Indentation Engine for Java-like Sources
//!
//! # Overview
//!
//! `indent-core` decides the leading whitespace of a line in a curly-brace language and applies
//! it as a single edit. It is headless: the host editor owns key handling and rendering, and
//! calls into the engine whenever a line should be (re-)indented.
//!
//! # Core Features
//!
//! - **Reduced lexical model**: per-character code/comment/string shading, updated incrementally
//!   after each edit
//! - **Decision tree**: closed [`Question`] and [`Action`] rule sets wired into an arena-backed
//!   [`IndentTree`] whose nodes can be shared between parents
//! - **Default policy**: Java-style block, paren, ternary and `case` indentation, plus block
//!   comment continuation with optional auto-closing of `/*`
//! - **Trace recording**: the `(rule, Yes|No)` path taken for each request, for debugging and
//!   tests
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Indenter (driver, range re-indent)         │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Policy (default tree assembly)             │  ← Rules
//! ├─────────────────────────────────────────────┤
//! │  IndentTree / Question / Action / Trace     │  ← Evaluation
//! ├─────────────────────────────────────────────┤
//! │  Document (lexical context queries, edits)  │  ← Context
//! ├─────────────────────────────────────────────┤
//! │  Rope + reduced lexical model               │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use indent_core::{Document, IndentConfig, IndentReason, Indenter, Trace};
//!
//! let indenter = Indenter::new(IndentConfig::new(4));
//!
//! // Re-indent the line holding the cursor.
//! let mut doc = Document::with_cursor("class A {\nint x;\n}", 10).unwrap();
//! indenter.indent(&mut doc, IndentReason::Other);
//! assert_eq!(doc.text(), "class A {\n    int x;\n}");
//!
//! // Ask which rules fired.
//! let mut trace = Trace::enabled();
//! indenter.indent_traced(&mut doc, IndentReason::Other, &mut trace);
//! assert_eq!(trace.path().last(), Some(&("AlignToEnclosingBraceStatementStart", "")));
//! ```
//!
//! # Module Description
//!
//! - [`document`] - text buffer and lexical context queries
//! - [`question`] - predicates over the current line
//! - [`action`] - line edits at the leaves of the tree
//! - [`tree`] - node arena, builder and evaluation
//! - [`policy`] - the default decision tree
//! - [`indenter`] - evaluation driver
//! - [`trace`] - decision path recording
//!
//! # Offsets
//!
//! All offsets are character offsets into the document, with `'\n'` as the only line break.
//! Alignment under an opening paren uses display width, so CJK text before the paren counts
//! two columns per character.

pub mod action;
pub mod delta;
pub mod document;
mod error;
pub mod indenter;
pub mod line_ending;
pub mod policy;
pub mod question;
mod reduced;
mod text;
pub mod trace;
pub mod tree;

pub use action::{Action, CursorSuffix, LineTemplate, TemplatePoint};
pub use delta::{TextDelta, TextDeltaEdit};
pub use document::{BraceKind, Document, IndentInfo};
pub use error::{IndentError, Result};
pub use indent_core_config::IndentConfig;
pub use indenter::{IndentReason, Indenter};
pub use line_ending::LineEnding;
pub use policy::build_tree;
pub use question::Question;
pub use reduced::LexicalState;
pub use trace::{Direction, Trace, TraceEntry};
pub use tree::{IndentTree, Node, NodeId, TreeBuilder};
