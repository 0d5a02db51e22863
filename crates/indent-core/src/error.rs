use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by [`Document`](crate::Document) queries and edits.
///
/// The decision tree never lets these escape: questions answer "no" and actions skip the edit.
pub enum IndentError {
    #[error("bad location: offset {offset} is outside the document (length {len})")]
    /// A character offset outside `0..=len` was passed to a query or edit.
    BadLocation {
        /// The rejected offset.
        offset: usize,
        /// Document length in characters at the time of the call.
        len: usize,
    },
    #[error("bad line: line {line} is outside the document ({line_count} lines)")]
    /// A zero-based line index past the last line.
    BadLine {
        /// The rejected line index.
        line: usize,
        /// Number of lines in the document.
        line_count: usize,
    },
    #[error("bad cursor move: moving {delta} from {cursor} leaves the document (length {len})")]
    /// A relative cursor move that would land before the start or past the end.
    BadCursorMove {
        /// Cursor offset before the move.
        cursor: usize,
        /// Requested signed distance.
        delta: isize,
        /// Document length in characters.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndentError>;
