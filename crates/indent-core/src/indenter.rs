//! The evaluation driver.

use std::ops::Range;

use crate::document::Document;
use crate::error::Result;
use crate::policy::build_tree;
use crate::trace::Trace;
use crate::tree::IndentTree;
use indent_core_config::IndentConfig;

/// Why an indent was requested.
///
/// Only the comment-continuation rules look at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentReason {
    /// The user just pressed Enter; the cursor sits on the new line.
    EnterKeyPressed,
    /// Any other request (explicit re-indent, tab, range formatting).
    #[default]
    Other,
}

/// Runs a decision tree against a document.
#[derive(Debug, Clone)]
pub struct Indenter {
    config: IndentConfig,
    tree: IndentTree,
}

impl Indenter {
    /// An indenter using the default policy for `config`.
    pub fn new(config: IndentConfig) -> Self {
        let tree = build_tree(&config);
        Self { config, tree }
    }

    /// An indenter running a custom tree.
    ///
    /// Passing a non-default configuration to [`Indenter::set_config`] replaces the tree with
    /// the default policy.
    pub fn from_tree(tree: IndentTree) -> Self {
        Self {
            config: IndentConfig::default(),
            tree,
        }
    }

    /// Configuration the current tree was built from.
    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    /// The decision tree in use.
    pub fn tree(&self) -> &IndentTree {
        &self.tree
    }

    /// Switch to `config`, rebuilding the default tree if anything changed.
    ///
    /// Returns `true` if the tree was rebuilt.
    pub fn set_config(&mut self, config: IndentConfig) -> bool {
        if config == self.config {
            return false;
        }
        tracing::debug!(
            spaces_per_level = config.spaces_per_level,
            auto_close_block_comments = config.auto_close_block_comments,
            "rebuilding indent tree"
        );
        self.tree = build_tree(&config);
        self.config = config;
        true
    }

    /// Indent the line holding the cursor.
    pub fn indent(&self, doc: &mut Document, reason: IndentReason) {
        self.indent_traced(doc, reason, &mut Trace::disabled());
    }

    /// Indent the line holding the cursor, recording the decision path in `trace`.
    pub fn indent_traced(&self, doc: &mut Document, reason: IndentReason, trace: &mut Trace) {
        let pos = doc.cursor();
        if self.tree.evaluate(doc, pos, reason, trace)
            && let Err(err) = skip_leading_whitespace(doc)
        {
            tracing::debug!(%err, "could not move cursor past indentation");
        }
    }

    /// Re-indent every line in `lines` (clamped to the document).
    ///
    /// Lines inserted by templates are skipped and the range grows with them. The cursor stays
    /// on its line at the same distance from the line end, but never inside the indentation.
    pub fn indent_lines(&self, doc: &mut Document, lines: Range<usize>) {
        self.indent_lines_traced(doc, lines, &mut Trace::disabled(), |_, _| {});
    }

    /// [`Indenter::indent_lines`], calling `visit` with the line index and the trace of each
    /// line right after it has been indented.
    pub fn indent_lines_traced<F>(
        &self,
        doc: &mut Document,
        lines: Range<usize>,
        trace: &mut Trace,
        mut visit: F,
    ) where
        F: FnMut(usize, &Trace),
    {
        let Some(mut anchor) = CursorAnchor::capture(doc) else {
            return;
        };

        let mut line = lines.start;
        let mut end = lines.end.min(doc.line_count());
        while line < end {
            let Ok(start) = doc.line_to_char(line) else {
                break;
            };
            let before = doc.line_count();
            self.tree.evaluate(doc, start, IndentReason::Other, trace);
            visit(line, trace);

            let added = doc.line_count().saturating_sub(before);
            if anchor.line > line {
                anchor.line += added;
            }
            end += added;
            line += 1 + added;
        }

        if let Err(err) = anchor.restore(doc) {
            tracing::debug!(%err, "could not restore cursor after range indent");
        }
    }
}

impl Default for Indenter {
    fn default() -> Self {
        Self::new(IndentConfig::default())
    }
}

/// Cursor position as line and distance from that line's end.
struct CursorAnchor {
    line: usize,
    from_end: usize,
}

impl CursorAnchor {
    fn capture(doc: &Document) -> Option<Self> {
        let cursor = doc.cursor();
        let line = doc.char_to_line(cursor).ok()?;
        let end = doc.line_end(cursor).ok()?;
        Some(Self {
            line,
            from_end: end - cursor,
        })
    }

    fn restore(&self, doc: &mut Document) -> Result<()> {
        let start = doc.line_to_char(self.line)?;
        let end = doc.line_end(start)?;
        let text_start = start + doc.leading_whitespace(start)?.chars().count();
        doc.set_cursor(end.saturating_sub(self.from_end).max(text_start).min(end))
    }
}

/// Move a cursor that sits inside the leading whitespace of its line to the first character
/// after it.
fn skip_leading_whitespace(doc: &mut Document) -> Result<()> {
    let cursor = doc.cursor();
    let start = doc.line_start(cursor)?;
    let text_start = start + doc.leading_whitespace(start)?.chars().count();
    if cursor < text_start {
        doc.set_cursor(text_start)?;
    }
    Ok(())
}
