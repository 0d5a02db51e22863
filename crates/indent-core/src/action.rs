//! Action nodes: the leaves of the decision tree, which rewrite the current line.
//!
//! Every action computes the complete replacement first and applies it as a single edit.
//! [`Action::apply`] returns `true` when the caller still has to place the cursor, and `false`
//! when the action positioned it (or did nothing).

use crate::document::{Document, STATEMENT_DELIMITERS, STATEMENT_DELIMITERS_WITH_COLON};
use crate::error::Result;
use crate::indenter::IndentReason;
use crate::text::{byte_index, is_blank, str_width};

/// A suffix together with a cursor offset inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSuffix {
    suffix: String,
    cursor_offset: usize,
}

impl CursorSuffix {
    /// # Panics
    ///
    /// Panics if `cursor_offset` is past the end of `suffix`.
    pub fn new(suffix: impl Into<String>, cursor_offset: usize) -> Self {
        let suffix = suffix.into();
        let len = suffix.chars().count();
        assert!(
            cursor_offset <= len,
            "cursor offset {cursor_offset} is outside suffix {suffix:?} of length {len}"
        );
        Self {
            suffix,
            cursor_offset,
        }
    }

    /// The text appended after the previous line's indentation.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Where the cursor lands, in characters from the start of the suffix.
    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }
}

/// A position inside a [`LineTemplate`], in characters of the template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatePoint {
    /// Template line index.
    pub line: usize,
    /// Character column within the template line, before the indentation prefix is added.
    pub column: usize,
}

impl TemplatePoint {
    /// Shorthand constructor.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Lines that replace the current line, with a cursor target and a point where the line's
/// previous text is spliced back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    lines: Vec<String>,
    cursor: TemplatePoint,
    preserve: TemplatePoint,
}

impl LineTemplate {
    /// # Panics
    ///
    /// Panics if `lines` is empty or either point lies outside the template.
    pub fn new<S: Into<String>>(
        lines: impl IntoIterator<Item = S>,
        cursor: TemplatePoint,
        preserve: TemplatePoint,
    ) -> Self {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        assert!(!lines.is_empty(), "a line template needs at least one line");
        for (what, point) in [("cursor", cursor), ("preserve", preserve)] {
            let line = lines.get(point.line).unwrap_or_else(|| {
                panic!("{what} line {} is outside a {}-line template", point.line, lines.len())
            });
            let width = line.chars().count();
            assert!(
                point.column <= width,
                "{what} column {} is outside template line {line:?}",
                point.column
            );
        }
        Self {
            lines,
            cursor,
            preserve,
        }
    }

    /// Template lines, without indentation and line breaks.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor target.
    pub fn cursor(&self) -> TemplatePoint {
        self.cursor
    }

    /// Where the line's previous text is re-inserted.
    pub fn preserve(&self) -> TemplatePoint {
        self.preserve
    }
}

/// An edit of the line containing the evaluation offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Indent to the column of the enclosing delimiter, plus `suffix`.
    AlignToEnclosingDelimiter {
        /// Appended after the alignment.
        suffix: String,
    },
    /// Indent like the line on which the current statement begins, plus `suffix`.
    AlignToStatementStart {
        /// Appended after the statement's indentation.
        suffix: String,
    },
    /// Indent like the line on which the previous statement begins, plus `suffix`.
    AlignToPrecedingStatementStart {
        /// Appended after the statement's indentation.
        suffix: String,
        /// Also end statements at `:` (case labels).
        colon_is_delimiter: bool,
    },
    /// Indent like the statement that opens the enclosing brace, plus `suffix`.
    AlignToEnclosingBraceStatementStart {
        /// Appended after the statement's indentation.
        suffix: String,
    },
    /// Indent like the previous line, plus `suffix`.
    RepeatPreviousLineIndent {
        /// Appended after the previous line's indentation.
        suffix: String,
    },
    /// [`Action::RepeatPreviousLineIndent`], then place the cursor inside the suffix.
    RepeatPreviousLineIndentAndRelocateCursor(CursorSuffix),
    /// Replace the line with templated lines, keeping its text.
    InsertTemplatedLinesPreservingCurrentText(LineTemplate),
    /// Leave the document unchanged.
    NoOp,
}

impl Action {
    /// `AlignToEnclosingDelimiter`.
    pub fn align_to_enclosing_delimiter(suffix: impl Into<String>) -> Self {
        Self::AlignToEnclosingDelimiter {
            suffix: suffix.into(),
        }
    }

    /// `AlignToStatementStart`.
    pub fn align_to_statement_start(suffix: impl Into<String>) -> Self {
        Self::AlignToStatementStart {
            suffix: suffix.into(),
        }
    }

    /// `AlignToPrecedingStatementStart`.
    pub fn align_to_preceding_statement_start(
        suffix: impl Into<String>,
        colon_is_delimiter: bool,
    ) -> Self {
        Self::AlignToPrecedingStatementStart {
            suffix: suffix.into(),
            colon_is_delimiter,
        }
    }

    /// `AlignToEnclosingBraceStatementStart`.
    pub fn align_to_enclosing_brace_statement_start(suffix: impl Into<String>) -> Self {
        Self::AlignToEnclosingBraceStatementStart {
            suffix: suffix.into(),
        }
    }

    /// `RepeatPreviousLineIndent`.
    pub fn repeat_previous_line_indent(suffix: impl Into<String>) -> Self {
        Self::RepeatPreviousLineIndent {
            suffix: suffix.into(),
        }
    }

    /// `RepeatPreviousLineIndentAndRelocateCursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor_offset` is past the end of `suffix`.
    pub fn repeat_previous_line_indent_and_relocate_cursor(
        suffix: impl Into<String>,
        cursor_offset: usize,
    ) -> Self {
        Self::RepeatPreviousLineIndentAndRelocateCursor(CursorSuffix::new(suffix, cursor_offset))
    }

    /// Rule name used in traces and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AlignToEnclosingDelimiter { .. } => "AlignToEnclosingDelimiter",
            Self::AlignToStatementStart { .. } => "AlignToStatementStart",
            Self::AlignToPrecedingStatementStart { .. } => "AlignToPrecedingStatementStart",
            Self::AlignToEnclosingBraceStatementStart { .. } => {
                "AlignToEnclosingBraceStatementStart"
            }
            Self::RepeatPreviousLineIndent { .. } => "RepeatPreviousLineIndent",
            Self::RepeatPreviousLineIndentAndRelocateCursor(_) => {
                "RepeatPreviousLineIndentAndRelocateCursor"
            }
            Self::InsertTemplatedLinesPreservingCurrentText(_) => {
                "InsertTemplatedLinesPreservingCurrentText"
            }
            Self::NoOp => "NoOp",
        }
    }

    /// Rewrite the line containing `pos`.
    ///
    /// Returns `true` if the cursor still has to be moved by the caller. Failed lookups leave
    /// the document untouched and return `false`.
    pub fn apply(&self, doc: &mut Document, pos: usize, _reason: IndentReason) -> bool {
        match self.run(doc, pos) {
            Ok(caller_moves_cursor) => caller_moves_cursor,
            Err(err) => {
                tracing::debug!(rule = self.name(), %err, "action failed, leaving the line alone");
                false
            }
        }
    }

    fn run(&self, doc: &mut Document, pos: usize) -> Result<bool> {
        let start = doc.line_start(pos)?;
        match self {
            Self::AlignToEnclosingDelimiter { suffix } => {
                let Some(brace) = doc.enclosing_open(start)? else {
                    return Ok(false);
                };
                let brace_line = doc.line_start(brace)?;
                let brace_indent = doc.leading_whitespace(brace_line)?;
                let ws_end = brace_line + brace_indent.chars().count();
                let span = if ws_end < brace {
                    str_width(&doc.slice(ws_end, brace)?)
                } else {
                    0
                };
                let indent = format!("{brace_indent}{}{suffix}", " ".repeat(span));
                indent_line(doc, start, &indent)
            }
            Self::AlignToStatementStart { suffix } => {
                let base = doc.indent_of_stmt_containing(start, STATEMENT_DELIMITERS)?;
                indent_line(doc, start, &format!("{base}{suffix}"))
            }
            Self::AlignToPrecedingStatementStart {
                suffix,
                colon_is_delimiter,
            } => {
                let delims = if *colon_is_delimiter {
                    STATEMENT_DELIMITERS_WITH_COLON
                } else {
                    STATEMENT_DELIMITERS
                };
                let Some(delim) = doc.find_prev_delimiter(start, delims, true)? else {
                    return indent_line(doc, start, suffix);
                };
                let anchor = block_anchor(doc, delim)?;
                let base = doc.indent_of_stmt_containing(anchor, delims)?;
                indent_line(doc, start, &format!("{base}{suffix}"))
            }
            Self::AlignToEnclosingBraceStatementStart { suffix } => {
                let Some(brace) = doc.enclosing_open(start)? else {
                    return indent_line(doc, start, suffix);
                };
                let base = block_statement_indent(doc, brace)?;
                indent_line(doc, start, &format!("{base}{suffix}"))
            }
            Self::RepeatPreviousLineIndent { suffix } => {
                let base = previous_line_indent(doc, start)?;
                indent_line(doc, start, &format!("{base}{suffix}"))
            }
            Self::RepeatPreviousLineIndentAndRelocateCursor(target) => {
                let base = previous_line_indent(doc, start)?;
                let indent = format!("{base}{}", target.suffix);
                let run = marker_run(doc, start, target.suffix.trim())?;
                if doc.slice(start, start + run)? != indent {
                    doc.replace(start, run, &indent)?;
                }
                doc.set_cursor(start + base.chars().count() + target.cursor_offset)?;
                Ok(false)
            }
            Self::InsertTemplatedLinesPreservingCurrentText(template) => {
                insert_template(doc, start, template)?;
                Ok(false)
            }
            Self::NoOp => Ok(false),
        }
    }
}

fn indent_line(doc: &mut Document, line_start: usize, indent: &str) -> Result<bool> {
    doc.replace_leading_whitespace(line_start, indent)?;
    Ok(true)
}

fn previous_line_indent(doc: &Document, line_start: usize) -> Result<String> {
    match doc.prev_line_start(line_start)? {
        Some(prev) => doc.leading_whitespace(prev),
        None => Ok(String::new()),
    }
}

/// Length of the line's leading whitespace, extended over `marker` and the blanks after it when
/// the line text already starts with `marker`. A marker followed by `/` is a comment terminator
/// and is left alone.
fn marker_run(doc: &Document, line_start: usize, marker: &str) -> Result<usize> {
    let ws = doc.leading_whitespace(line_start)?.chars().count();
    if marker.is_empty() {
        return Ok(ws);
    }
    let rest = doc.slice(line_start + ws, doc.line_end(line_start)?)?;
    match rest.strip_prefix(marker) {
        Some(after) if !after.starts_with('/') => {
            let blanks = after.chars().take_while(|&ch| is_blank(ch)).count();
            Ok(ws + marker.chars().count() + blanks)
        }
        _ => Ok(ws),
    }
}

/// Leading whitespace of the statement that opens the block at `brace`.
///
/// The colon of a `case` or a label ends the statement before the block; a ternary colon does
/// not.
fn block_statement_indent(doc: &Document, brace: usize) -> Result<String> {
    if let Some(delim) = doc.find_prev_delimiter(brace, STATEMENT_DELIMITERS_WITH_COLON, true)?
        && doc.char_at(delim) == Some(':')
        && !doc.find_char_in_stmt_before('?', delim)?
    {
        return doc.indent_of_stmt_containing(brace, STATEMENT_DELIMITERS_WITH_COLON);
    }
    doc.indent_of_stmt_containing(brace, STATEMENT_DELIMITERS)
}

/// A closed block counts as one statement: `}` and `};` anchor on the matching `{`.
fn block_anchor(doc: &Document, delim: usize) -> Result<usize> {
    let close = match doc.char_at(delim) {
        Some('}') => Some(delim),
        Some(';') => doc
            .prev_non_ws(delim, true)?
            .filter(|&at| doc.char_at(at) == Some('}')),
        _ => None,
    };
    match close {
        Some(close) => Ok(doc.matching_open(close)?.unwrap_or(delim)),
        None => Ok(delim),
    }
}

fn insert_template(doc: &mut Document, start: usize, template: &LineTemplate) -> Result<()> {
    let end = doc.line_end(start)?;
    let line = doc.slice(start, end)?;
    let cut = line.trim_start_matches(is_blank);
    let prefix = previous_line_indent(doc, start)?;

    let lines: Vec<String> = template
        .lines
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let mut rendered = format!("{prefix}{body}");
            if i == template.preserve.line {
                rendered.insert_str(prefix.len() + byte_index(body, template.preserve.column), cut);
            }
            rendered
        })
        .collect();

    let mut cursor = start
        + lines[..template.cursor.line]
            .iter()
            .map(|line| line.chars().count() + 1)
            .sum::<usize>()
        + prefix.chars().count()
        + template.cursor.column;
    if template.cursor.line == template.preserve.line
        && template.cursor.column > template.preserve.column
    {
        cursor += cut.chars().count();
    }

    doc.replace(start, end - start, &lines.join("\n"))?;
    doc.set_cursor(cursor)
}
