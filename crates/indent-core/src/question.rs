//! Question nodes: predicates over the lexical context of the line being indented.
//!
//! Questions never edit the document. They receive the offset to reason about explicitly, so
//! there is no cursor to save and restore. A query that fails (an offset outside the document)
//! makes the question answer "no".

use crate::document::{BraceKind, Document, STATEMENT_DELIMITERS};
use crate::error::Result;
use crate::indenter::IndentReason;
use crate::reduced::LexicalState;
use crate::text::is_ident_char;

/// Delimiters that end one operand or argument and start the next.
pub const PHRASE_DELIMITERS: &[char] = &[
    '{', ';', ',', '(', '[', '&', '|', '+', '-', '*', '/', '%', '=', '<', '>', '}',
];

/// A predicate over the line containing the evaluation offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// The current line starts inside a block comment.
    InsideComment,
    /// The current line starts inside a block comment that the previous line did not start in.
    PrevLineStartsComment,
    /// Enter was pressed, or the current line holds only whitespace.
    CurrLineEmptyOrEnterTriggered,
    /// Enter was pressed.
    EnterTriggered,
    /// The block comment holding the current line already has its own `*/`: one follows the
    /// line start before any `/*`.
    CommentAlreadyClosed,
    /// The first non-whitespace text of the current line starts with `prefix`.
    ///
    /// A prefix ending in an identifier character only matches whole words. The match fails
    /// when the text following the prefix (after whitespace) starts with one of `excluding`.
    CurrLineStartsWith {
        /// Expected text.
        prefix: String,
        /// Treat comment text as whitespace when looking for the first character.
        skip_comments: bool,
        /// Following words that veto the match.
        excluding: Vec<String>,
    },
    /// The first non-whitespace text of the previous line starts with `prefix`.
    PrevLineStartsWith {
        /// Expected text.
        prefix: String,
    },
    /// The next non-whitespace character after the offset (comments included) is `*`.
    FollowedByStar,
    /// The delimiter enclosing the line start is `{`.
    BraceIsCurly,
    /// The delimiter enclosing the line start is `(` or `[`.
    BraceIsParenOrBracket,
    /// The last code character before the line is the `{` that encloses it.
    StartAfterOpenBrace,
    /// The code character before the `{` enclosing the line is one of `chars`.
    HasCharPrecedingOpenBrace {
        /// Accepted predecessors, e.g. `=` for initializer blocks.
        chars: Vec<char>,
    },
    /// The previous phrase delimiter (outside nested parens) ends the previous line.
    NewParenPhrase,
    /// The previous `;`, `{` or `}` is followed by nothing but whitespace and comments up to the
    /// line start, or there is none.
    StartingNewStatement,
    /// An unshadowed `find` occurs in the statement before the first `end` on the line.
    ExistsCharInStatement {
        /// Character searched for.
        find: char,
        /// Character on the current line the search starts from.
        end: char,
    },
    /// An unshadowed `find` occurs in the statement that ends before the line.
    ExistsCharInPrevStatement {
        /// Character searched for.
        find: char,
    },
    /// The current line contains an unshadowed `ch`.
    LineContains {
        /// Character searched for.
        ch: char,
    },
}

impl Question {
    /// `CurrLineStartsWith` that looks at the raw first character.
    pub fn curr_line_starts_with(prefix: impl Into<String>) -> Self {
        Self::CurrLineStartsWith {
            prefix: prefix.into(),
            skip_comments: false,
            excluding: Vec::new(),
        }
    }

    /// `CurrLineStartsWith` that skips leading comments.
    pub fn curr_line_starts_with_skip_comments(prefix: impl Into<String>) -> Self {
        Self::CurrLineStartsWith {
            prefix: prefix.into(),
            skip_comments: true,
            excluding: Vec::new(),
        }
    }

    /// `PrevLineStartsWith`.
    pub fn prev_line_starts_with(prefix: impl Into<String>) -> Self {
        Self::PrevLineStartsWith {
            prefix: prefix.into(),
        }
    }

    /// Rule name used in traces and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsideComment => "InsideComment",
            Self::PrevLineStartsComment => "PrevLineStartsComment",
            Self::CurrLineEmptyOrEnterTriggered => "CurrLineEmptyOrEnterTriggered",
            Self::EnterTriggered => "EnterTriggered",
            Self::CommentAlreadyClosed => "CommentAlreadyClosed",
            Self::CurrLineStartsWith { .. } => "CurrLineStartsWith",
            Self::PrevLineStartsWith { .. } => "PrevLineStartsWith",
            Self::FollowedByStar => "FollowedByStar",
            Self::BraceIsCurly => "BraceIsCurly",
            Self::BraceIsParenOrBracket => "BraceIsParenOrBracket",
            Self::StartAfterOpenBrace => "StartAfterOpenBrace",
            Self::HasCharPrecedingOpenBrace { .. } => "HasCharPrecedingOpenBrace",
            Self::NewParenPhrase => "NewParenPhrase",
            Self::StartingNewStatement => "StartingNewStatement",
            Self::ExistsCharInStatement { .. } => "ExistsCharInStatement",
            Self::ExistsCharInPrevStatement { .. } => "ExistsCharInPrevStatement",
            Self::LineContains { .. } => "LineContains",
        }
    }

    /// Answer the question for the line containing `pos`.
    pub fn evaluate(&self, doc: &Document, pos: usize, reason: IndentReason) -> bool {
        match self.check(doc, pos, reason) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::debug!(rule = self.name(), %err, "question failed, answering no");
                false
            }
        }
    }

    fn check(&self, doc: &Document, pos: usize, reason: IndentReason) -> Result<bool> {
        let start = doc.line_start(pos)?;
        match self {
            Self::InsideComment => {
                Ok(doc.lexical_state_at(start)? == LexicalState::InsideBlockComment)
            }
            Self::PrevLineStartsComment => {
                if doc.lexical_state_at(start)? != LexicalState::InsideBlockComment {
                    return Ok(false);
                }
                match doc.prev_line_start(start)? {
                    Some(prev) => {
                        Ok(doc.lexical_state_at(prev)? != LexicalState::InsideBlockComment)
                    }
                    None => Ok(false),
                }
            }
            Self::CurrLineEmptyOrEnterTriggered => {
                Ok(reason == IndentReason::EnterKeyPressed || doc.line_is_blank(start)?)
            }
            Self::EnterTriggered => Ok(reason == IndentReason::EnterKeyPressed),
            Self::CommentAlreadyClosed => doc.block_comment_closed_after(start),
            Self::CurrLineStartsWith {
                prefix,
                skip_comments,
                excluding,
            } => {
                let Some(first) = doc.first_non_ws_on_line(start, *skip_comments)? else {
                    return Ok(false);
                };
                let rest = doc.slice(first, doc.line_end(start)?)?;
                Ok(starts_with_word(&rest, prefix, excluding))
            }
            Self::PrevLineStartsWith { prefix } => {
                let Some(prev) = doc.prev_line_start(start)? else {
                    return Ok(false);
                };
                let Some(first) = doc.first_non_ws_on_line(prev, false)? else {
                    return Ok(false);
                };
                let rest = doc.slice(first, doc.line_end(prev)?)?;
                Ok(rest.starts_with(prefix.as_str()))
            }
            Self::FollowedByStar => {
                Ok(doc.next_non_ws(pos, false)?.and_then(|at| doc.char_at(at)) == Some('*'))
            }
            Self::BraceIsCurly => Ok(doc.indent_info(start)?.brace == Some(BraceKind::Curly)),
            Self::BraceIsParenOrBracket => Ok(doc
                .indent_info(start)?
                .brace
                .is_some_and(BraceKind::is_paren_or_bracket)),
            Self::StartAfterOpenBrace => {
                let Some(brace) = enclosing_curly(doc, start)? else {
                    return Ok(false);
                };
                Ok(doc.prev_non_ws(start, true)? == Some(brace))
            }
            Self::HasCharPrecedingOpenBrace { chars } => {
                let Some(brace) = enclosing_curly(doc, start)? else {
                    return Ok(false);
                };
                Ok(doc
                    .prev_non_ws(brace, true)?
                    .and_then(|at| doc.char_at(at))
                    .is_some_and(|ch| chars.contains(&ch)))
            }
            Self::NewParenPhrase => {
                let Some(delim) = doc.find_prev_delimiter(start, PHRASE_DELIMITERS, true)? else {
                    return Ok(false);
                };
                Ok(doc.prev_non_ws(start, true)? == Some(delim))
            }
            Self::StartingNewStatement => {
                let Some(delim) = doc.find_prev_delimiter(start, STATEMENT_DELIMITERS, true)?
                else {
                    return Ok(true);
                };
                Ok(doc.prev_non_ws(start, true)? == Some(delim))
            }
            Self::ExistsCharInStatement { find, end } => {
                let Some(at) = doc.find_char_on_line(start, *end)? else {
                    return Ok(false);
                };
                doc.find_char_in_stmt_before(*find, at)
            }
            Self::ExistsCharInPrevStatement { find } => {
                let Some(delim) = doc.find_prev_delimiter(start, STATEMENT_DELIMITERS, true)?
                else {
                    return Ok(false);
                };
                doc.find_char_in_stmt_before(*find, delim)
            }
            Self::LineContains { ch } => Ok(doc.find_char_on_line(start, *ch)?.is_some()),
        }
    }
}

/// Offset of the `{` enclosing `line_start`, if the enclosing delimiter is a curly brace.
fn enclosing_curly(doc: &Document, line_start: usize) -> Result<Option<usize>> {
    Ok(doc
        .enclosing_open(line_start)?
        .filter(|&at| doc.char_at(at) == Some('{')))
}

fn starts_with_word(text: &str, prefix: &str, excluding: &[String]) -> bool {
    let Some(rest) = text.strip_prefix(prefix) else {
        return false;
    };
    let wordy = prefix.chars().last().is_some_and(is_ident_char);
    if wordy && rest.chars().next().is_some_and(is_ident_char) {
        return false;
    }
    let following = rest.trim_start();
    !excluding
        .iter()
        .any(|word| following.starts_with(word.as_str()))
}
