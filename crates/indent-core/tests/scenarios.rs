use indent_core::{
    Action, Document, IndentConfig, IndentReason, IndentTree, Indenter, Question, Trace,
    TreeBuilder,
};
use pretty_assertions::assert_eq;

fn run_single(action: Action, text: &str, cursor: usize) -> Document {
    let indenter = Indenter::from_tree(IndentTree::single(action));
    let mut doc = Document::with_cursor(text, cursor).unwrap();
    indenter.indent(&mut doc, IndentReason::Other);
    doc
}

#[test]
fn test_closing_paren_aligns_under_open_paren() {
    let doc = run_single(Action::align_to_enclosing_delimiter(""), "method(\n)\n", 8);
    assert_eq!(doc.text(), "method(\n      )\n");
}

#[test]
fn test_argument_aligns_one_past_open_paren() {
    let doc = run_single(
        Action::align_to_enclosing_delimiter(" "),
        "var = method(arg1,\n  arg2, arg3) + 4;",
        20,
    );
    assert_eq!(doc.text(), "var = method(arg1,\n             arg2, arg3) + 4;");
}

#[test]
fn test_preceding_statement_falls_back_to_suffix() {
    let doc = run_single(
        Action::align_to_preceding_statement_start("  ", true),
        "foo();\nbar();",
        2,
    );
    assert_eq!(doc.text(), "  foo();\nbar();");
}

#[test]
fn test_enter_after_comment_opener_closes_the_comment() {
    let indenter = Indenter::new(IndentConfig::default().with_auto_close_block_comments(true));
    let mut doc = Document::with_cursor("/**\n", 4).unwrap();
    indenter.indent(&mut doc, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "/**\n * \n */");
    assert_eq!(doc.cursor(), 7);
}

#[test]
fn test_previous_line_indent_prepends_suffix_verbatim() {
    let doc = run_single(
        Action::repeat_previous_line_indent("abc"),
        "  foo();\n  bar();",
        9,
    );
    assert_eq!(doc.text(), "  foo();\n  abcbar();");
}

#[test]
fn test_trace_records_root_to_leaf_path() {
    let mut b = TreeBuilder::new();
    let align = b.action(Action::align_to_enclosing_delimiter("  "));
    let other = b.action(Action::NoOp);
    let curly = b.question(Question::BraceIsCurly, align, other);
    let paren = b.question(Question::BraceIsParenOrBracket, other, curly);
    let root = b.question(Question::InsideComment, other, paren);
    let indenter = Indenter::from_tree(b.build(root));

    let mut doc = Document::with_cursor("class A {\nx\n}", 10).unwrap();
    let mut trace = Trace::enabled();
    indenter.indent_traced(&mut doc, IndentReason::Other, &mut trace);

    assert_eq!(
        trace.path(),
        vec![
            ("InsideComment", "No"),
            ("BraceIsParenOrBracket", "No"),
            ("BraceIsCurly", "Yes"),
            ("AlignToEnclosingDelimiter", ""),
        ]
    );
    assert_eq!(doc.text(), "class A {\n          x\n}");
}

#[test]
fn test_trace_is_stable_across_runs_and_restarts_per_request() {
    let indenter = Indenter::default();
    let mut trace = Trace::enabled();

    let mut first = Document::with_cursor("class A {\nint x;\n}", 10).unwrap();
    indenter.indent_traced(&mut first, IndentReason::Other, &mut trace);
    let path = trace.path();

    let mut second = Document::with_cursor("class A {\nint x;\n}", 10).unwrap();
    indenter.indent_traced(&mut second, IndentReason::Other, &mut trace);
    assert_eq!(trace.path(), path);
    assert_eq!(
        path,
        vec![
            ("InsideComment", "No"),
            ("BraceIsParenOrBracket", "No"),
            ("CurrLineStartsWith", "No"),
            ("BraceIsCurly", "Yes"),
            ("StartAfterOpenBrace", "Yes"),
            ("AlignToEnclosingBraceStatementStart", ""),
        ]
    );
}

#[test]
fn test_disabled_trace_stays_empty() {
    let indenter = Indenter::default();
    let mut trace = Trace::disabled();
    let mut doc = Document::with_cursor("f(a,\nb);", 5).unwrap();
    indenter.indent_traced(&mut doc, IndentReason::Other, &mut trace);
    assert!(trace.entries().is_empty());
    assert_eq!(doc.text(), "f(a,\n  b);");
}

#[test]
fn test_indent_is_a_single_undoable_edit() {
    let indenter = Indenter::default();
    let mut doc = Document::with_cursor("class A {\n\t   int x;\n}", 10).unwrap();
    indenter.indent(&mut doc, IndentReason::Other);

    let delta = doc.take_last_delta().unwrap();
    assert_eq!(delta.edits.len(), 1);
    assert_eq!(delta.edits[0].start, 10);
    assert_eq!(delta.edits[0].deleted_text, "\t   ");
    assert_eq!(delta.edits[0].inserted_text, "  ");
    assert!(delta.edits[0].is_whitespace_only());

    indenter.indent(&mut doc, IndentReason::Other);
    assert!(doc.last_delta().is_none());
}

#[test]
fn test_out_of_range_cursor_never_panics() {
    let indenter = Indenter::default();
    let mut doc = Document::new("");
    indenter.indent(&mut doc, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "");
}
