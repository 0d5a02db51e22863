//! Text buffer and lexical context queries.
//!
//! [`Document`] keeps the text in a [`Rope`] (O(log N) line access), a cursor, and a
//! [`ReducedModel`](crate::reduced) that classifies every character as code, comment or quoted
//! literal. On top of that it answers the small set of questions the decision tree asks:
//! line bounds, the nearest enclosing brace, the previous statement delimiter, and so on.
//!
//! All offsets are **character offsets**. Only `'\n'` terminates a line; CRLF and CR input is
//! normalized on construction. Every query validates its offsets and fails with
//! [`IndentError::BadLocation`] instead of panicking.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::error::{IndentError, Result};
use crate::line_ending::LineEnding;
use crate::reduced::{LexicalState, ReducedModel, Shade};
use crate::text::is_blank;
use ropey::Rope;

/// Delimiters that end a statement.
pub const STATEMENT_DELIMITERS: &[char] = &[';', '{', '}'];

/// Statement delimiters plus the colon of `case x:` and labels.
pub const STATEMENT_DELIMITERS_WITH_COLON: &[char] = &[';', '{', '}', ':'];

/// Kind of an opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceKind {
    /// `(`
    Paren,
    /// `[`
    Bracket,
    /// `{`
    Curly,
}

impl BraceKind {
    /// Classify an opening delimiter character.
    pub fn from_open_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Paren),
            '[' => Some(Self::Bracket),
            '{' => Some(Self::Curly),
            _ => None,
        }
    }

    /// The opening character of this kind.
    pub fn open_char(self) -> char {
        match self {
            Self::Paren => '(',
            Self::Bracket => '[',
            Self::Curly => '{',
        }
    }

    /// `true` for `(` and `[`.
    pub fn is_paren_or_bracket(self) -> bool {
        matches!(self, Self::Paren | Self::Bracket)
    }
}

/// The nearest unshadowed opening delimiter enclosing the start of a line.
///
/// Computed fresh for every request; it is never cached across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndentInfo {
    /// Kind of the enclosing delimiter, if any.
    pub brace: Option<BraceKind>,
    /// Distance in characters from the line start back to the delimiter.
    pub dist_to_brace: Option<usize>,
    /// Distance in characters from the line start back to the start of the line that holds the
    /// delimiter.
    pub dist_to_newline: Option<usize>,
}

impl IndentInfo {
    /// Character column of the delimiter within its own line.
    pub fn brace_column(&self) -> Option<usize> {
        Some(self.dist_to_newline? - self.dist_to_brace?)
    }
}

/// A text buffer with a cursor and a reduced lexical model.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
    cursor: usize,
    model: ReducedModel,
    line_ending: LineEnding,
    last_delta: Option<TextDelta>,
}

impl Document {
    /// Build a document from text. The cursor starts at offset 0.
    pub fn new(text: &str) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        let rope = Rope::from_str(&LineEnding::normalize(text));
        let model = ReducedModel::from_rope(&rope);
        Self {
            rope,
            cursor: 0,
            model,
            line_ending,
            last_delta: None,
        }
    }

    /// Create an empty document.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Build a document and place the cursor.
    pub fn with_cursor(text: &str, cursor: usize) -> Result<Self> {
        let mut doc = Self::new(text);
        doc.set_cursor(cursor)?;
        Ok(doc)
    }

    /// Full text (LF line endings).
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Full text converted back to the line ending the input used.
    pub fn text_with_original_line_endings(&self) -> String {
        self.line_ending.apply_to_text(&self.text())
    }

    /// Line ending detected in the constructor input.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns `true` if the document holds no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Current cursor offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `pos`.
    pub fn set_cursor(&mut self, pos: usize) -> Result<()> {
        self.check(pos)?;
        self.cursor = pos;
        Ok(())
    }

    /// Move the cursor by a signed number of characters.
    pub fn move_cursor_by(&mut self, delta: isize) -> Result<()> {
        match self.cursor.checked_add_signed(delta) {
            Some(target) if target <= self.len_chars() => {
                self.cursor = target;
                Ok(())
            }
            _ => Err(IndentError::BadCursorMove {
                cursor: self.cursor,
                delta,
                len: self.len_chars(),
            }),
        }
    }

    /// The last edit applied to the document, if any.
    pub fn last_delta(&self) -> Option<&TextDelta> {
        self.last_delta.as_ref()
    }

    /// Take (and clear) the last edit applied to the document.
    pub fn take_last_delta(&mut self) -> Option<TextDelta> {
        self.last_delta.take()
    }

    /// Character at `pos`, or `None` past the end.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.rope.get_char(pos)
    }

    /// Text of `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check(end)?;
        if start > end {
            return Err(self.bad(start));
        }
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Text of a line without its terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let start = self.line_to_char(line).ok()?;
        let end = self.line_end(start).ok()?;
        self.slice(start, end).ok()
    }

    /// Offset of the first character of a line.
    pub fn line_to_char(&self, line: usize) -> Result<usize> {
        if line >= self.rope.len_lines() {
            return Err(IndentError::BadLine {
                line,
                line_count: self.rope.len_lines(),
            });
        }
        Ok(self.rope.line_to_char(line))
    }

    /// Zero-based line index of the line containing `pos`.
    pub fn char_to_line(&self, pos: usize) -> Result<usize> {
        self.check(pos)?;
        Ok(self.rope.char_to_line(pos))
    }

    // ---------------------------------------------------------------------------------------
    // Lexical state
    // ---------------------------------------------------------------------------------------

    /// Lexical state of the gap just before `pos`.
    pub fn lexical_state_at(&self, pos: usize) -> Result<LexicalState> {
        self.check(pos)?;
        Ok(self.model.state_at(pos))
    }

    /// `true` if the character at `pos` is inside a comment or a quoted literal.
    pub fn is_shadowed(&self, pos: usize) -> bool {
        pos < self.model.len() && self.model.is_shadowed(pos)
    }

    fn is_comment(&self, pos: usize) -> bool {
        pos < self.model.len() && self.model.shade(pos) == Shade::Comment
    }

    // ---------------------------------------------------------------------------------------
    // Line queries
    // ---------------------------------------------------------------------------------------

    /// Start of the line containing `pos`.
    pub fn line_start(&self, pos: usize) -> Result<usize> {
        self.check(pos)?;
        Ok(self.rope.line_to_char(self.rope.char_to_line(pos)))
    }

    /// End of the line containing `pos` (the offset of its `'\n'`, or the document length).
    pub fn line_end(&self, pos: usize) -> Result<usize> {
        self.check(pos)?;
        let next = self.rope.char_to_line(pos) + 1;
        if next < self.rope.len_lines() {
            Ok(self.rope.line_to_char(next) - 1)
        } else {
            Ok(self.rope.len_chars())
        }
    }

    /// Start of the line before the one containing `pos`, or `None` on the first line.
    pub fn prev_line_start(&self, pos: usize) -> Result<Option<usize>> {
        self.check(pos)?;
        let line = self.rope.char_to_line(pos);
        if line == 0 {
            return Ok(None);
        }
        Ok(Some(self.rope.line_to_char(line - 1)))
    }

    /// Leading spaces and tabs of the line containing `pos`.
    pub fn leading_whitespace(&self, pos: usize) -> Result<String> {
        let start = self.line_start(pos)?;
        Ok(self.rope.chars_at(start).take_while(|&ch| is_blank(ch)).collect())
    }

    /// `true` if the line containing `pos` holds nothing but whitespace.
    pub fn line_is_blank(&self, pos: usize) -> Result<bool> {
        let start = self.line_start(pos)?;
        let end = self.line_end(pos)?;
        Ok(self
            .rope
            .chars_at(start)
            .take(end - start)
            .all(char::is_whitespace))
    }

    /// First non-whitespace character at or after `pos` on the same line.
    ///
    /// With `skip_comments`, comment text (delimiters included) is treated like whitespace.
    pub fn first_non_ws_on_line(&self, pos: usize, skip_comments: bool) -> Result<Option<usize>> {
        self.check(pos)?;
        for (i, ch) in self.rope.chars_at(pos).enumerate() {
            if ch == '\n' {
                break;
            }
            let at = pos + i;
            if ch.is_whitespace() || (skip_comments && self.is_comment(at)) {
                continue;
            }
            return Ok(Some(at));
        }
        Ok(None)
    }

    /// First non-whitespace character at or after `pos`, crossing line boundaries.
    pub fn next_non_ws(&self, pos: usize, skip_comments: bool) -> Result<Option<usize>> {
        self.check(pos)?;
        for (i, ch) in self.rope.chars_at(pos).enumerate() {
            let at = pos + i;
            if ch.is_whitespace() || (skip_comments && self.is_comment(at)) {
                continue;
            }
            return Ok(Some(at));
        }
        Ok(None)
    }

    /// Last non-whitespace character strictly before `pos`, crossing line boundaries.
    pub fn prev_non_ws(&self, pos: usize, skip_comments: bool) -> Result<Option<usize>> {
        self.check(pos)?;
        let mut chars = self.rope.chars_at(pos);
        let mut at = pos;
        while let Some(ch) = chars.prev() {
            at -= 1;
            if ch.is_whitespace() || (skip_comments && self.is_comment(at)) {
                continue;
            }
            return Ok(Some(at));
        }
        Ok(None)
    }

    // ---------------------------------------------------------------------------------------
    // Delimiter searches
    // ---------------------------------------------------------------------------------------

    /// Nearest unshadowed opening delimiter that is still open at `pos`.
    ///
    /// Only the current line is scanned; delimiters opened on earlier lines come from the
    /// per-line nesting recorded by the lexical model.
    pub fn enclosing_open(&self, pos: usize) -> Result<Option<usize>> {
        self.check(pos)?;
        let line = self.rope.char_to_line(pos);
        let start = self.rope.line_to_char(line);

        let mut local = Vec::new();
        let mut closed_outer = 0usize;
        for (i, ch) in self.rope.chars_at(start).take(pos - start).enumerate() {
            let at = start + i;
            if self.model.is_shadowed(at) {
                continue;
            }
            match ch {
                '(' | '[' | '{' => local.push(at),
                ')' | ']' | '}' => {
                    if local.pop().is_none() {
                        closed_outer += 1;
                    }
                }
                _ => {}
            }
        }
        if let Some(&open) = local.last() {
            return Ok(Some(open));
        }

        let outer = self.model.opens_at_line(line);
        let Some(level) = outer.len().checked_sub(closed_outer + 1) else {
            return Ok(None);
        };
        Ok(self.open_at_level(outer[level], level))
    }

    /// The delimiter on `line` that opens nesting level `level` and is still open at the end
    /// of the line.
    fn open_at_level(&self, line: usize, level: usize) -> Option<usize> {
        let start = self.rope.line_to_char(line);
        let mut depth = self.model.opens_at_line(line).len();
        let mut found = None;
        for (i, ch) in self.rope.line(line).chars().enumerate() {
            let at = start + i;
            if self.model.is_shadowed(at) {
                continue;
            }
            match ch {
                '(' | '[' | '{' => {
                    if depth == level {
                        found = Some(at);
                    }
                    depth += 1;
                }
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        found
    }

    /// The opening delimiter matched by the closing delimiter at `close`.
    pub fn matching_open(&self, close: usize) -> Result<Option<usize>> {
        match self.char_at(close) {
            Some(')' | ']' | '}') if !self.is_shadowed(close) => self.enclosing_open(close),
            Some(_) => Ok(None),
            None => Err(self.bad(close)),
        }
    }

    /// Nearest unshadowed character from `delims` strictly before `pos`.
    ///
    /// When `skip_paren_phrases` is set, complete `(...)`/`[...]` phrases before `pos` are
    /// jumped over, so delimiters inside them are never reported.
    pub fn find_prev_delimiter(
        &self,
        pos: usize,
        delims: &[char],
        skip_paren_phrases: bool,
    ) -> Result<Option<usize>> {
        self.check(pos)?;
        let mut at = pos;
        while at > 0 {
            at -= 1;
            if self.model.is_shadowed(at) {
                continue;
            }
            let ch = self.rope.char(at);
            if skip_paren_phrases && (ch == ')' || ch == ']') {
                match self.enclosing_open(at)? {
                    Some(open) => {
                        at = open;
                        continue;
                    }
                    None => return Ok(None),
                }
            }
            if delims.contains(&ch) {
                return Ok(Some(at));
            }
        }
        Ok(None)
    }

    /// First unshadowed `target` on the line containing `pos`.
    pub fn find_char_on_line(&self, pos: usize, target: char) -> Result<Option<usize>> {
        let start = self.line_start(pos)?;
        let end = self.line_end(pos)?;
        Ok(self
            .rope
            .chars_at(start)
            .take(end - start)
            .enumerate()
            .find(|&(i, ch)| ch == target && !self.model.is_shadowed(start + i))
            .map(|(i, _)| start + i))
    }

    /// `true` if an unshadowed `target` occurs between `end` and the nearest preceding
    /// statement delimiter (or the document start).
    pub fn find_char_in_stmt_before(&self, target: char, end: usize) -> Result<bool> {
        self.check(end)?;
        let mut chars = self.rope.chars_at(end);
        let mut at = end;
        while let Some(ch) = chars.prev() {
            at -= 1;
            if self.model.is_shadowed(at) {
                continue;
            }
            if ch == target {
                return Ok(true);
            }
            if STATEMENT_DELIMITERS.contains(&ch) {
                return Ok(false);
            }
        }
        Ok(false)
    }

    /// `true` if a `*/` follows `pos` before any `/*`.
    ///
    /// Inside a block comment this tells a comment that has its own terminator from one that only
    /// ends at the terminator of a later comment.
    pub fn block_comment_closed_after(&self, pos: usize) -> Result<bool> {
        self.check(pos)?;
        let mut prev = None;
        for ch in self.rope.chars_at(pos) {
            match (prev, ch) {
                (Some('*'), '/') => return Ok(true),
                (Some('/'), '*') => return Ok(false),
                _ => prev = Some(ch),
            }
        }
        Ok(false)
    }

    /// Describe the delimiter enclosing the start of the line containing `pos`.
    pub fn indent_info(&self, pos: usize) -> Result<IndentInfo> {
        let start = self.line_start(pos)?;
        let Some(brace) = self.enclosing_open(start)? else {
            return Ok(IndentInfo::default());
        };
        Ok(IndentInfo {
            brace: BraceKind::from_open_char(self.rope.char(brace)),
            dist_to_brace: Some(start - brace),
            dist_to_newline: Some(start - self.line_start(brace)?),
        })
    }

    /// Offset of the first character of the statement containing `pos`.
    ///
    /// The statement starts after the nearest `delims` character outside any paren phrase that
    /// encloses `pos`. If the statement has no text before `pos`, `pos` itself is returned.
    pub fn stmt_start(&self, pos: usize, delims: &[char]) -> Result<usize> {
        self.check(pos)?;
        let mut anchor = pos;
        while let Some(open) = self.enclosing_open(anchor)? {
            if !matches!(self.rope.char(open), '(' | '[') {
                break;
            }
            anchor = open;
        }
        let from = match self.find_prev_delimiter(anchor, delims, true)? {
            Some(delim) => delim + 1,
            None => 0,
        };
        match self.next_non_ws(from, true)? {
            Some(first) if first < pos => Ok(first),
            _ => Ok(pos),
        }
    }

    /// Leading whitespace of the line on which the statement containing `pos` begins.
    pub fn indent_of_stmt_containing(&self, pos: usize, delims: &[char]) -> Result<String> {
        let start = self.stmt_start(pos, delims)?;
        self.leading_whitespace(start)
    }

    // ---------------------------------------------------------------------------------------
    // Edits
    // ---------------------------------------------------------------------------------------

    /// Replace the leading whitespace of the line containing `pos` with `whitespace`.
    ///
    /// Applied as one replace edit; nothing happens when the run already matches.
    pub fn replace_leading_whitespace(&mut self, pos: usize, whitespace: &str) -> Result<()> {
        let start = self.line_start(pos)?;
        let current = self.leading_whitespace(start)?;
        if current == whitespace {
            return Ok(());
        }
        self.replace(start, current.chars().count(), whitespace)
    }

    /// Replace `len` characters at `start` with `text`.
    ///
    /// A cursor after the replaced range keeps its place in the text; a cursor inside it is
    /// clamped into the inserted text.
    pub fn replace(&mut self, start: usize, len: usize, text: &str) -> Result<()> {
        let end = start.checked_add(len).ok_or_else(|| self.bad(start))?;
        self.check(start)?;
        self.check(end)?;

        let text = LineEnding::normalize(text);
        let before_char_count = self.len_chars();
        let cursor_before = self.cursor;
        let deleted_text = self.rope.slice(start..end).to_string();

        self.rope.remove(start..end);
        self.rope.insert(start, &text);
        let inserted = text.chars().count();
        self.model.update(&self.rope, start, len, inserted);

        if self.cursor >= end {
            self.cursor = self.cursor - len + inserted;
        } else if self.cursor > start {
            self.cursor = start + (self.cursor - start).min(inserted);
        }

        self.last_delta = Some(TextDelta {
            before_char_count,
            after_char_count: self.len_chars(),
            edits: vec![TextDeltaEdit {
                start,
                deleted_text,
                inserted_text: text,
            }],
            cursor_before,
            cursor_after: self.cursor,
        });
        Ok(())
    }

    fn check(&self, pos: usize) -> Result<()> {
        if pos > self.rope.len_chars() {
            return Err(self.bad(pos));
        }
        Ok(())
    }

    fn bad(&self, offset: usize) -> IndentError {
        IndentError::BadLocation {
            offset,
            len: self.rope.len_chars(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bounds() {
        let doc = Document::new("ab\ncd\n\nef");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_start(0).unwrap(), 0);
        assert_eq!(doc.line_start(4).unwrap(), 3);
        assert_eq!(doc.line_end(3).unwrap(), 5);
        assert_eq!(doc.line_end(6).unwrap(), 6);
        assert_eq!(doc.line_end(9).unwrap(), 9);
        assert_eq!(doc.prev_line_start(0).unwrap(), None);
        assert_eq!(doc.prev_line_start(7).unwrap(), Some(6));
        assert_eq!(doc.line_text(1).as_deref(), Some("cd"));
    }

    #[test]
    fn test_out_of_range_is_bad_location() {
        let doc = Document::new("abc");
        assert_eq!(
            doc.line_start(4),
            Err(IndentError::BadLocation { offset: 4, len: 3 })
        );
        assert!(doc.find_prev_delimiter(10, &[';'], true).is_err());
        assert!(doc.slice(2, 1).is_err());
        assert!(Document::with_cursor("abc", 9).is_err());
        assert_eq!(
            doc.line_to_char(1),
            Err(IndentError::BadLine {
                line: 1,
                line_count: 1
            })
        );
    }

    #[test]
    fn test_move_cursor_by() {
        let mut doc = Document::with_cursor("ab\ncd", 2).unwrap();
        doc.move_cursor_by(3).unwrap();
        assert_eq!(doc.cursor(), 5);
        doc.move_cursor_by(-5).unwrap();
        assert_eq!(doc.cursor(), 0);

        assert_eq!(
            doc.move_cursor_by(-1),
            Err(IndentError::BadCursorMove {
                cursor: 0,
                delta: -1,
                len: 5
            })
        );
        assert_eq!(
            doc.move_cursor_by(6),
            Err(IndentError::BadCursorMove {
                cursor: 0,
                delta: 6,
                len: 5
            })
        );
        // A failed move leaves the cursor where it was.
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_crlf_is_normalized() {
        let doc = Document::new("a\r\nb");
        assert_eq!(doc.text(), "a\nb");
        assert_eq!(doc.line_ending(), LineEnding::Crlf);
        assert_eq!(doc.text_with_original_line_endings(), "a\r\nb");
    }

    #[test]
    fn test_non_ws_searches_skip_comments_on_request() {
        let doc = Document::new("  /* c */ x\n// y\nz");
        assert_eq!(doc.first_non_ws_on_line(0, false).unwrap(), Some(2));
        assert_eq!(doc.first_non_ws_on_line(0, true).unwrap(), Some(10));
        assert_eq!(doc.first_non_ws_on_line(12, true).unwrap(), None);
        assert_eq!(doc.next_non_ws(11, true).unwrap(), Some(17));
        assert_eq!(doc.prev_non_ws(17, true).unwrap(), Some(10));
        assert_eq!(doc.prev_non_ws(17, false).unwrap(), Some(15));
    }

    #[test]
    fn test_enclosing_open_ignores_shadowed_braces() {
        let text = "f(a, \"(\", '{', /* [ */ b";
        let doc = Document::new(text);
        assert_eq!(doc.enclosing_open(text.len()).unwrap(), Some(1));

        let doc = Document::new("{ (a) [b] ");
        assert_eq!(doc.enclosing_open(10).unwrap(), Some(0));
        assert_eq!(doc.matching_open(4).unwrap(), Some(2));
        assert_eq!(doc.matching_open(3).unwrap(), None);
    }

    #[test]
    fn test_enclosing_open_on_earlier_lines() {
        let text = "class A {\n  void f(int a,\n         int b) {\n    g(); }\n  int x;\n}";
        let doc = Document::new(text);
        let line_start = |line| doc.line_to_char(line).unwrap();
        // Inside the parameter list.
        assert_eq!(doc.enclosing_open(line_start(2)).unwrap(), Some(18));
        // Inside the method body, opened on the previous line.
        assert_eq!(doc.enclosing_open(line_start(3)).unwrap(), Some(42));
        // Back in the class body after `}` on the same line.
        assert_eq!(doc.enclosing_open(line_start(3) + 10).unwrap(), Some(8));
        assert_eq!(doc.enclosing_open(line_start(4)).unwrap(), Some(8));
        assert_eq!(doc.matching_open(text.len() - 1).unwrap(), Some(8));
        assert_eq!(doc.enclosing_open(text.len()).unwrap(), None);
    }

    #[test]
    fn test_enclosing_open_after_edits() {
        let mut doc = Document::new("a {\nb (\nc\n");
        doc.replace(0, 0, "\n\n").unwrap();
        assert_eq!(doc.enclosing_open(doc.line_to_char(4).unwrap()).unwrap(), Some(8));
        doc.replace(2, 0, "x }\ny {").unwrap();
        assert_eq!(doc.text(), "\n\nx }\ny {a {\nb (\nc\n");
        assert_eq!(doc.enclosing_open(doc.line_to_char(4).unwrap()).unwrap(), Some(11));
        assert_eq!(doc.enclosing_open(doc.line_to_char(5).unwrap()).unwrap(), Some(15));
    }

    #[test]
    fn test_find_prev_delimiter_skips_paren_phrases() {
        let doc = Document::new("a; for (i = 0; i < n; i++) x");
        let end = doc.len_chars();
        assert_eq!(doc.find_prev_delimiter(end, &[';'], true).unwrap(), Some(1));
        assert_eq!(doc.find_prev_delimiter(end, &[';'], false).unwrap(), Some(20));
        assert_eq!(doc.find_prev_delimiter(1, &[';'], true).unwrap(), None);
    }

    #[test]
    fn test_indent_info_reports_brace_column() {
        let doc = Document::new("var = method(arg1,\n  arg2");
        let info = doc.indent_info(20).unwrap();
        assert_eq!(info.brace, Some(BraceKind::Paren));
        assert_eq!(info.dist_to_brace, Some(7));
        assert_eq!(info.dist_to_newline, Some(19));
        assert_eq!(info.brace_column(), Some(12));

        let doc = Document::new("foo();\nbar();");
        assert_eq!(doc.indent_info(7).unwrap(), IndentInfo::default());
    }

    #[test]
    fn test_stmt_start_climbs_out_of_parens() {
        let text = "x;\n  foo(a,\n      b);";
        let doc = Document::new(text);
        assert_eq!(doc.stmt_start(18, STATEMENT_DELIMITERS).unwrap(), 5);
        assert_eq!(
            doc.indent_of_stmt_containing(18, STATEMENT_DELIMITERS).unwrap(),
            "  "
        );
        // A statement without text before the queried offset starts there.
        assert_eq!(doc.stmt_start(5, STATEMENT_DELIMITERS).unwrap(), 5);
    }

    #[test]
    fn test_find_char_queries() {
        let doc = Document::new("x = a ? b\n  : c; // :");
        assert_eq!(doc.find_char_on_line(12, ':').unwrap(), Some(12));
        assert!(doc.find_char_in_stmt_before('?', 12).unwrap());

        let doc = Document::new("a ? b;\ncase 1:");
        assert!(!doc.find_char_in_stmt_before('?', 13).unwrap());
    }

    #[test]
    fn test_block_comment_closed_after() {
        let doc = Document::new("/** a\nb */\nint x;");
        assert!(doc.block_comment_closed_after(6).unwrap());
        assert!(!doc.block_comment_closed_after(11).unwrap());

        // The terminator belongs to a later comment.
        let doc = Document::new("/**\n\nint x; /* y */");
        assert!(!doc.block_comment_closed_after(4).unwrap());
        assert!(Document::new("/*/ x */").block_comment_closed_after(2).unwrap());
    }

    #[test]
    fn test_replace_leading_whitespace_moves_cursor_with_text() {
        let mut doc = Document::with_cursor("a\n\tbc", 4).unwrap();
        doc.replace_leading_whitespace(3, "    ").unwrap();
        assert_eq!(doc.text(), "a\n    bc");
        assert_eq!(doc.cursor(), 7);

        let delta = doc.take_last_delta().unwrap();
        assert_eq!(delta.edits.len(), 1);
        assert_eq!(delta.edits[0].start, 2);
        assert_eq!(delta.edits[0].deleted_text, "\t");
        assert_eq!(delta.edits[0].inserted_text, "    ");

        // Unchanged runs are not edited at all.
        doc.replace_leading_whitespace(3, "    ").unwrap();
        assert!(doc.last_delta().is_none());
    }

    #[test]
    fn test_edits_keep_lexical_model_current() {
        let mut doc = Document::new("a;\nb;\nc;");
        assert_eq!(doc.lexical_state_at(6).unwrap(), LexicalState::Free);
        doc.replace(0, 0, "/*").unwrap();
        assert_eq!(doc.lexical_state_at(8).unwrap(), LexicalState::InsideBlockComment);
        doc.replace(0, 2, "").unwrap();
        assert_eq!(doc.lexical_state_at(6).unwrap(), LexicalState::Free);
    }
}
