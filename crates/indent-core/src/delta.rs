//! Structured records of the edits the indenter makes.
//!
//! An indent request rewrites at most one contiguous region of the document (the leading
//! whitespace of a line, or a whole line for templated comment closing). Hosts that keep their
//! own undo stack or sync the text elsewhere can pick the change up from
//! [`Document::take_last_delta`](crate::Document::take_last_delta) instead of diffing.
//!
//! Offsets are **character offsets** (Unicode scalar values).

/// A single replace expressed in character offsets.
///
/// `start` is relative to the document **before** the edit; the deleted range is
/// `start..start + deleted_len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// `true` if the edit only touches space and tab characters.
    pub fn is_whitespace_only(&self) -> bool {
        let blank = |s: &str| s.chars().all(|c| c == ' ' || c == '\t');
        blank(&self.deleted_text) && blank(&self.inserted_text)
    }
}

/// A document text change together with the cursor movement it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered edits; applying them in order turns the "before" text into the "after" text.
    pub edits: Vec<TextDeltaEdit>,
    /// Cursor offset before the change.
    pub cursor_before: usize,
    /// Cursor offset right after the change (before any later cursor relocation).
    pub cursor_after: usize,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
