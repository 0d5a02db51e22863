use unicode_width::UnicodeWidthChar;

/// Space or tab: the characters an indentation run is made of.
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Display width of a character in cells (UAX #11); control characters count as one cell.
pub(crate) fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

pub(crate) fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Byte index of the `column`-th character of `s`, or `s.len()` past the end.
pub(crate) fn byte_index(s: &str, column: usize) -> usize {
    s.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(str_width("method"), 6);
        assert_eq!(str_width("f(\"你好\""), 8);
        assert_eq!(char_width('\t'), 1);
    }

    #[test]
    fn test_byte_index() {
        assert_eq!(byte_index("a你b", 2), 4);
        assert_eq!(byte_index("ab", 7), 2);
    }
}
