//! Reduced lexical model.
//!
//! A deliberately small lexer that only knows what the indenter needs: whether a character is
//! code, part of a comment, or part of a quoted literal. It recognizes
//!
//! - `//` line comments,
//! - `/* ... */` block comments (not nesting; `/*/` does not close),
//! - `"..."` strings and `'...'` character literals with backslash escapes.
//!
//! Quoted literals that are still open at the end of a line carry on into the next line.
//!
//! The model stores one [`Shade`] per character and one scanner mode per *gap* (the position
//! between two characters, `0..=len`). It also records, for every line start, the lines holding
//! the opening delimiters that are still unmatched there, so finding an enclosing brace never
//! has to walk back further than the current line and the line of the brace.
//!
//! After an edit only the edited line and the lines after it are rescanned. Rescanning stops at
//! the first line start where both the scanner mode and the open-delimiter stack match what the
//! old text had at the same place; the old tail is reused from there.

use ropey::Rope;

/// Lexical state at a gap between two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalState {
    /// Plain code.
    Free,
    /// Inside a `//` comment.
    InsideLineComment,
    /// Inside a `/* */` comment.
    InsideBlockComment,
    /// Inside a string or character literal.
    InsideString,
}

/// Classification of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shade {
    Code,
    Comment,
    Quoted,
}

/// Scanner mode at a gap. `Slash`, `BlockStar` and `QuoteEscape` remember a pending first
/// character of a two-character token. None of them can survive a `'\n'`, so the mode at a line
/// start is always `Free`, `Block` or `Quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Free,
    Slash,
    LineComment,
    Block,
    BlockStar,
    Quote(char),
    QuoteEscape(char),
}

impl Mode {
    fn state(self) -> LexicalState {
        match self {
            Mode::Free | Mode::Slash => LexicalState::Free,
            Mode::LineComment => LexicalState::InsideLineComment,
            Mode::Block | Mode::BlockStar => LexicalState::InsideBlockComment,
            Mode::Quote(_) | Mode::QuoteEscape(_) => LexicalState::InsideString,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ReducedModel {
    /// `modes[i]` is the mode of the gap before character `i`; `len + 1` entries.
    modes: Vec<Mode>,
    /// `shades[i]` classifies character `i`; `len` entries.
    shades: Vec<Shade>,
    /// `line_opens[l]` lists, outermost first, the line of every unshadowed `(`, `[` or `{`
    /// still open at the start of line `l`. A closer with nothing open is ignored.
    line_opens: Vec<Vec<usize>>,
}

impl ReducedModel {
    pub(crate) fn from_rope(rope: &Rope) -> Self {
        let mut model = Self {
            modes: Vec::with_capacity(rope.len_chars() + 1),
            shades: Vec::with_capacity(rope.len_chars()),
            line_opens: Vec::with_capacity(rope.len_lines()),
        };
        model.modes.push(Mode::Free);
        model.line_opens.push(Vec::new());

        let mut opens = Vec::new();
        let mut line = 0;
        for ch in rope.chars() {
            let shade = model.push(ch);
            nest(&mut opens, line, ch, shade);
            if ch == '\n' {
                line += 1;
                model.line_opens.push(opens.clone());
            }
        }
        model
    }

    pub(crate) fn len(&self) -> usize {
        self.shades.len()
    }

    /// Lexical state of the gap before character `gap`. `gap` must be `<= len`.
    pub(crate) fn state_at(&self, gap: usize) -> LexicalState {
        self.modes[gap].state()
    }

    pub(crate) fn shade(&self, pos: usize) -> Shade {
        self.shades[pos]
    }

    /// `true` if the character at `pos` belongs to a comment or a quoted literal.
    pub(crate) fn is_shadowed(&self, pos: usize) -> bool {
        self.shades[pos] != Shade::Code
    }

    /// Lines of the opening delimiters still open at the start of `line`, outermost first.
    pub(crate) fn opens_at_line(&self, line: usize) -> &[usize] {
        &self.line_opens[line]
    }

    /// Bring the model in line with `rope` after `removed` characters at `start` were replaced
    /// by `inserted` characters.
    pub(crate) fn update(&mut self, rope: &Rope, start: usize, removed: usize, inserted: usize) {
        let old_modes = std::mem::take(&mut self.modes);
        let old_shades = std::mem::take(&mut self.shades);

        // Text before `start` is untouched, and so is everything up to its line start.
        let first_line = rope.char_to_line(start);
        let resume = rope.line_to_char(first_line);
        self.modes.extend_from_slice(&old_modes[..=resume]);
        self.shades.extend_from_slice(&old_shades[..resume]);

        let line_delta = rope.len_lines() as isize - self.line_opens.len() as isize;
        let mut opens = self.line_opens[first_line].clone();
        let mut line = first_line;
        let mut fresh = Vec::new();

        let edit_end = start + inserted;
        for (i, ch) in rope.chars_at(resume).enumerate() {
            let pos = resume + i;
            let shade = self.push(ch);
            nest(&mut opens, line, ch, shade);
            if ch != '\n' {
                continue;
            }
            line += 1;

            if pos >= edit_end {
                let new_gap = pos + 1;
                let old_gap = new_gap - inserted + removed;
                let old_line = line.saturating_add_signed(-line_delta);
                if old_gap < old_modes.len()
                    && old_modes[old_gap] == self.modes[new_gap]
                    && same_opens(&self.line_opens[old_line], &opens, first_line, line_delta)
                {
                    self.shades.extend_from_slice(&old_shades[old_gap..]);
                    self.modes.extend_from_slice(&old_modes[old_gap + 1..]);
                    fresh.push(opens);
                    self.line_opens.splice(first_line + 1..=old_line, fresh);
                    if line_delta != 0 {
                        for tail in &mut self.line_opens[line + 1..] {
                            for open in tail.iter_mut() {
                                *open = shift_line(*open, first_line, line_delta);
                            }
                        }
                    }
                    debug_assert_eq!(self.shades.len(), rope.len_chars());
                    debug_assert_eq!(self.line_opens.len(), rope.len_lines());
                    return;
                }
            }
            fresh.push(opens.clone());
        }
        self.line_opens.splice(first_line + 1.., fresh);
        debug_assert_eq!(self.shades.len(), rope.len_chars());
        debug_assert_eq!(self.line_opens.len(), rope.len_lines());
    }

    fn push(&mut self, ch: char) -> Shade {
        let mode = self.modes[self.modes.len() - 1];
        let (next, shade) = match mode {
            Mode::Free => free_step(ch),
            Mode::Slash => match ch {
                '/' => {
                    self.reshade_opener(Mode::LineComment);
                    (Mode::LineComment, Shade::Comment)
                }
                '*' => {
                    self.reshade_opener(Mode::Block);
                    (Mode::Block, Shade::Comment)
                }
                _ => free_step(ch),
            },
            Mode::LineComment => {
                if ch == '\n' {
                    (Mode::Free, Shade::Code)
                } else {
                    (Mode::LineComment, Shade::Comment)
                }
            }
            Mode::Block => {
                if ch == '*' {
                    (Mode::BlockStar, Shade::Comment)
                } else {
                    (Mode::Block, Shade::Comment)
                }
            }
            Mode::BlockStar => match ch {
                '/' => (Mode::Free, Shade::Comment),
                '*' => (Mode::BlockStar, Shade::Comment),
                _ => (Mode::Block, Shade::Comment),
            },
            Mode::Quote(quote) => {
                if ch == '\\' {
                    (Mode::QuoteEscape(quote), Shade::Quoted)
                } else if ch == quote {
                    (Mode::Free, Shade::Quoted)
                } else {
                    (Mode::Quote(quote), Shade::Quoted)
                }
            }
            Mode::QuoteEscape(quote) => (Mode::Quote(quote), Shade::Quoted),
        };
        self.shades.push(shade);
        self.modes.push(next);
        shade
    }

    /// The `/` just scanned opened a comment: it belongs to the comment, and so does the gap
    /// after it.
    fn reshade_opener(&mut self, mode: Mode) {
        let slash = self.shades.len() - 1;
        self.shades[slash] = Shade::Comment;
        self.modes[slash + 1] = mode;
    }
}

/// Track an unshadowed delimiter on `line` in the open-delimiter stack.
fn nest(opens: &mut Vec<usize>, line: usize, ch: char, shade: Shade) {
    if shade != Shade::Code {
        return;
    }
    match ch {
        '(' | '[' | '{' => opens.push(line),
        ')' | ']' | '}' => {
            opens.pop();
        }
        _ => {}
    }
}

/// Map a line index of the old text to the new text. Lines up to `first_line` did not move.
fn shift_line(line: usize, first_line: usize, delta: isize) -> usize {
    if line > first_line {
        line.saturating_add_signed(delta)
    } else {
        line
    }
}

fn same_opens(old: &[usize], new: &[usize], first_line: usize, delta: isize) -> bool {
    old.len() == new.len()
        && old
            .iter()
            .zip(new)
            .all(|(&old, &new)| shift_line(old, first_line, delta) == new)
}

fn free_step(ch: char) -> (Mode, Shade) {
    match ch {
        '/' => (Mode::Slash, Shade::Code),
        '"' | '\'' => (Mode::Quote(ch), Shade::Quoted),
        _ => (Mode::Free, Shade::Code),
    }
}
