use indent_core::{Document, IndentConfig, IndentReason, Indenter, Trace};
use pretty_assertions::assert_eq;

fn auto_closing() -> Indenter {
    Indenter::new(IndentConfig::default().with_auto_close_block_comments(true))
}

fn indent_at(indenter: &Indenter, text: &str, cursor: usize, reason: IndentReason) -> Document {
    let mut doc = Document::with_cursor(text, cursor).unwrap();
    indenter.indent(&mut doc, reason);
    doc
}

#[test]
fn test_enter_after_opener_starts_star_line() {
    let doc = indent_at(&Indenter::default(), "/**\n", 4, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * ");
    assert_eq!(doc.cursor(), 7);
}

#[test]
fn test_enter_after_star_line_repeats_star() {
    let doc = indent_at(&Indenter::default(), "/**\n * a\n", 9, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * a\n * ");
    assert_eq!(doc.cursor(), 12);
}

#[test]
fn test_enter_splitting_comment_text_keeps_text_after_cursor() {
    let doc = indent_at(&Indenter::default(), "/**\nhello", 4, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * hello");
    assert_eq!(doc.cursor(), 7);

    let doc = indent_at(&auto_closing(), "/**\nhello", 4, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * hello\n */");
    assert_eq!(doc.cursor(), 7);
}

#[test]
fn test_auto_close_skips_already_closed_comment() {
    let doc = indent_at(&auto_closing(), "/**\n\n */", 4, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * \n */");
    assert_eq!(doc.cursor(), 7);
}

#[test]
fn test_auto_close_trace() {
    let mut doc = Document::with_cursor("/**\n", 4).unwrap();
    let mut trace = Trace::enabled();
    auto_closing().indent_traced(&mut doc, IndentReason::EnterKeyPressed, &mut trace);
    assert_eq!(
        trace.path(),
        vec![
            ("InsideComment", "Yes"),
            ("PrevLineStartsComment", "Yes"),
            ("CurrLineEmptyOrEnterTriggered", "Yes"),
            ("EnterTriggered", "Yes"),
            ("FollowedByStar", "No"),
            ("CommentAlreadyClosed", "No"),
            ("InsertTemplatedLinesPreservingCurrentText", ""),
        ]
    );
}

#[test]
fn test_auto_close_leaves_comment_with_its_own_terminator() {
    let doc = indent_at(
        &auto_closing(),
        "/** a\nb */\nint x;",
        6,
        IndentReason::EnterKeyPressed,
    );
    assert_eq!(doc.text(), "/** a\n * b */\nint x;");
    assert_eq!(doc.cursor(), 9);
}

#[test]
fn test_auto_close_when_only_a_later_comment_terminates() {
    let doc = indent_at(
        &auto_closing(),
        "/**\n\nint x; /* y */",
        4,
        IndentReason::EnterKeyPressed,
    );
    assert_eq!(doc.text(), "/**\n * \n */\nint x; /* y */");
    assert_eq!(doc.cursor(), 7);
}

#[test]
fn test_reindent_never_closes_a_comment() {
    let text = "/**\n\nfoo\n */\nclass A {}";
    let mut doc = Document::new(text);
    let lines = doc.line_count();
    auto_closing().indent_lines(&mut doc, 0..lines);
    assert_eq!(doc.text(), "/**\n\nfoo\n*/\nclass A {}");
    assert_eq!(doc.text().matches("*/").count(), 1);
}

#[test]
fn test_blank_comment_line_keeps_indent_on_reindent() {
    for indenter in [Indenter::default(), auto_closing()] {
        let doc = indent_at(&indenter, "  /**\n\n   */", 6, IndentReason::Other);
        assert_eq!(doc.text(), "  /**\n  \n   */");

        let doc = indent_at(&indenter, "/**\n * a\n\n */", 9, IndentReason::Other);
        assert_eq!(doc.text(), "/**\n * a\n \n */");
    }
}

#[test]
fn test_second_enter_on_star_line_changes_nothing() {
    for indenter in [Indenter::default(), auto_closing()] {
        let mut doc = Document::with_cursor("/**\n", 4).unwrap();
        indenter.indent(&mut doc, IndentReason::EnterKeyPressed);
        let once = doc.text();
        indenter.indent(&mut doc, IndentReason::EnterKeyPressed);
        assert_eq!(doc.text(), once);
        assert_eq!(doc.cursor(), 7);
    }
}

#[test]
fn test_closing_line_lines_up_with_stars() {
    let doc = indent_at(
        &Indenter::default(),
        "  /**\n   * a\n*/",
        13,
        IndentReason::Other,
    );
    assert_eq!(doc.text(), "  /**\n   * a\n   */");
}

#[test]
fn test_reindent_of_comment_text_never_inserts_stars() {
    let indenter = Indenter::default();
    let doc = indent_at(&indenter, "/*\nhello\n*/", 3, IndentReason::Other);
    assert_eq!(doc.text(), "/*\n   hello\n*/");

    let doc = indent_at(&indenter, "  /*\n* x\n*/", 5, IndentReason::Other);
    assert_eq!(doc.text(), "  /*\n   * x\n*/");

    let doc = indent_at(&indenter, "/*\n * a\nb\n*/", 8, IndentReason::Other);
    assert_eq!(doc.text(), "/*\n * a\n   b\n*/");
}

#[test]
fn test_code_after_comment_is_indented_as_code() {
    let doc = indent_at(
        &Indenter::default(),
        "class A {\n  /** doc */\nvoid f();\n}",
        23,
        IndentReason::Other,
    );
    assert_eq!(doc.text(), "class A {\n  /** doc */\n  void f();\n}");
}
