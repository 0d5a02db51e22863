//! Line ending helpers.
//!
//! The indenter only understands LF (`'\n'`) as a line terminator. Text that arrives with CRLF
//! or bare CR line endings is normalized when a [`Document`](crate::Document) is built, and the
//! detected style is kept so that hosts can write the text back the way they found it.

/// The newline sequence a text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
    /// Classic Mac-style CR (`'\r'`).
    Cr,
}

impl LineEnding {
    /// Detect the dominant line ending of a source text.
    ///
    /// Policy: any CRLF wins, then any lone CR, otherwise LF.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else if text.contains('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    /// Rewrite every CRLF and lone CR as LF.
    pub fn normalize(text: &str) -> String {
        if !text.contains('\r') {
            return text.to_string();
        }
        text.replace("\r\n", "\n").replace('\r', "\n")
    }

    /// Convert an LF-normalized text to this line ending.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
            Self::Cr => text.replace('\n', "\r"),
        }
    }
}
