use indent_core::{Document, IndentConfig, IndentReason, Indenter};
use pretty_assertions::assert_eq;

fn flush_left(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

fn reindent(indenter: &Indenter, text: &str) -> String {
    let mut doc = Document::new(text);
    let lines = doc.line_count();
    indenter.indent_lines(&mut doc, 0..lines);
    doc.text()
}

const CLASS: &[&str] = &[
    "class Foo {",
    "  int x;",
    "  void run(int a,",
    "           int b) {",
    "    if (a > b) {",
    "      call(a,",
    "           b);",
    "    } else {",
    "      x = a > b",
    "        ? a",
    "        : b;",
    "    }",
    "    switch (a) {",
    "      case 1:",
    "        x = 1;",
    "        break;",
    "      default:",
    "        x = 2;",
    "    }",
    "  }",
    "}",
];

#[test]
fn test_reindent_class_from_flush_left() {
    let indenter = Indenter::default();
    assert_eq!(reindent(&indenter, &flush_left(CLASS)), CLASS.join("\n"));
}

#[test]
fn test_reindent_is_idempotent_on_formatted_text() {
    let indenter = Indenter::default();
    let formatted = CLASS.join("\n");
    assert_eq!(reindent(&indenter, &formatted), formatted);
}

#[test]
fn test_reindent_from_over_indented_text() {
    let indenter = Indenter::default();
    let messy = CLASS
        .iter()
        .map(|line| format!("\t    {}", line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(reindent(&indenter, &messy), CLASS.join("\n"));
}

const SWITCH_BLOCKS: &[&str] = &[
    "class A {",
    "  void f(int a) {",
    "    switch (a) {",
    "      case 1:",
    "        if (a > 0) {",
    "          g();",
    "        }",
    "        break;",
    "      default: {",
    "        h();",
    "      }",
    "    }",
    "    outer:",
    "      while (true) {",
    "        break outer;",
    "      }",
    "  }",
    "}",
];

#[test]
fn test_blocks_under_case_and_label_colons() {
    let indenter = Indenter::default();
    assert_eq!(
        reindent(&indenter, &flush_left(SWITCH_BLOCKS)),
        SWITCH_BLOCKS.join("\n")
    );
    let formatted = SWITCH_BLOCKS.join("\n");
    assert_eq!(reindent(&indenter, &formatted), formatted);
}

#[test]
fn test_indent_width_is_configurable() {
    let indenter = Indenter::new(IndentConfig::new(4));
    let text = flush_left(&["class A {", "void f() {", "g();", "}", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        ["class A {", "    void f() {", "        g();", "    }", "}"].join("\n")
    );
}

#[test]
fn test_brace_on_its_own_line() {
    let indenter = Indenter::default();
    let text = flush_left(&["class A {", "void f()", "{", "g();", "}", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        ["class A {", "  void f()", "  {", "    g();", "  }", "}"].join("\n")
    );
}

#[test]
fn test_array_initializer_and_closing_bracket() {
    let indenter = Indenter::default();
    let text = flush_left(&["class A {", "int[] v = {", "1,", "2 };", "int w = m[", "i", "];", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        [
            "class A {",
            "  int[] v = {",
            "    1,",
            "    2 };",
            "  int w = m[",
            "            i",
            "           ];",
            "}",
        ]
        .join("\n")
    );
}

#[test]
fn test_operator_continuation_inside_parens() {
    let indenter = Indenter::default();
    let text = flush_left(&["if (a", "&& b) {", "c();", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        ["if (a", "      && b) {", "  c();", "}"].join("\n")
    );
}

#[test]
fn test_comments_do_not_change_alignment() {
    let indenter = Indenter::default();
    let plain = reindent(&indenter, "foo(a,\nb);");
    let commented = reindent(&indenter, "foo(a, /* ) { */\nb);");
    assert_eq!(plain, "foo(a,\n    b);");
    assert_eq!(commented, "foo(a, /* ) { */\n    b);");

    let text = flush_left(&["class A {", "int x; // {", "int y; /* } */", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        ["class A {", "  int x; // {", "  int y; /* } */", "}"].join("\n")
    );
}

#[test]
fn test_strings_and_char_literals_are_transparent() {
    let indenter = Indenter::default();
    let text = flush_left(&["class A {", "String s = \"{ ( [\";", "char c = '}';", "int z;", "}"]);
    assert_eq!(
        reindent(&indenter, &text),
        [
            "class A {",
            "  String s = \"{ ( [\";",
            "  char c = '}';",
            "  int z;",
            "}",
        ]
        .join("\n")
    );
}

#[test]
fn test_enter_in_code_indents_new_line() {
    let indenter = Indenter::default();
    let mut doc = Document::with_cursor("class A {\n  void f() {\n", 23).unwrap();
    indenter.indent(&mut doc, IndentReason::EnterKeyPressed);
    assert_eq!(doc.text(), "class A {\n  void f() {\n    ");
    assert_eq!(doc.cursor(), 27);
}

#[test]
fn test_crlf_input_round_trips() {
    let indenter = Indenter::default();
    let mut doc = Document::new("class A {\r\nint x;\r\n}\r\n");
    let lines = doc.line_count();
    indenter.indent_lines(&mut doc, 0..lines);
    assert_eq!(doc.text(), "class A {\n  int x;\n}\n");
    assert_eq!(
        doc.text_with_original_line_endings(),
        "class A {\r\n  int x;\r\n}\r\n"
    );
}
