//! The default Java-style indentation policy.
//!
//! [`build_tree`] assembles the decision tree once per configuration. The indent unit is baked
//! into several actions, so a configuration change means building a new tree.

use crate::action::{Action, LineTemplate, TemplatePoint};
use crate::question::Question;
use crate::tree::{IndentTree, NodeId, TreeBuilder};
use indent_core_config::IndentConfig;

/// Characters before a `{` that make it an initializer block rather than a code block.
const INITIALIZER_BRACE_PRECEDERS: &[char] = &['=', ',', '{', ']'];

/// Build the default decision tree for `config`.
pub fn build_tree(config: &IndentConfig) -> IndentTree {
    let one = config.one_level();
    let mut b = TreeBuilder::new();

    let comment = comment_subtree(&mut b, config);
    let code = code_subtree(&mut b, &one);
    let root = b.question(Question::InsideComment, comment, code);
    b.build(root)
}

fn comment_subtree(b: &mut TreeBuilder, config: &IndentConfig) -> NodeId {
    let star = b.action(Action::repeat_previous_line_indent_and_relocate_cursor(" * ", 3));
    let verbatim = b.action(Action::repeat_previous_line_indent(""));

    // First line after the comment opener. Only Enter starts a star line; a blank line that is
    // merely re-indented keeps the opener's indentation.
    let continue_comment = if config.auto_close_block_comments {
        let close = b.action(Action::InsertTemplatedLinesPreservingCurrentText(
            LineTemplate::new(
                [" * ", " */"],
                TemplatePoint::new(0, 3),
                TemplatePoint::new(0, 3),
            ),
        ));
        let unclosed = b.question(Question::CommentAlreadyClosed, star, close);
        b.question(Question::FollowedByStar, star, unclosed)
    } else {
        star
    };
    let opener_enter = b.question(Question::EnterTriggered, continue_comment, verbatim);
    let under_opener_star = b.action(Action::repeat_previous_line_indent(" "));
    let under_opener_text = b.action(Action::repeat_previous_line_indent("   "));
    let after_opener_text = b.question(
        Question::curr_line_starts_with("*"),
        under_opener_star,
        under_opener_text,
    );
    let after_opener = b.question(
        Question::CurrLineEmptyOrEnterTriggered,
        opener_enter,
        after_opener_text,
    );

    // Deeper comment lines.
    let new_star = b.action(Action::repeat_previous_line_indent_and_relocate_cursor("* ", 2));
    let past_star = b.action(Action::repeat_previous_line_indent("  "));
    let star_enter = b.question(Question::EnterTriggered, new_star, verbatim);
    let fresh_line = b.question(Question::CurrLineEmptyOrEnterTriggered, star_enter, past_star);
    let after_star = b.question(Question::curr_line_starts_with("*"), verbatim, fresh_line);
    let inside = b.question(Question::prev_line_starts_with("*"), after_star, verbatim);

    b.question(Question::PrevLineStartsComment, after_opener, inside)
}

fn code_subtree(b: &mut TreeBuilder, one: &str) -> NodeId {
    let align_delim = b.action(Action::align_to_enclosing_delimiter(""));
    let align_delim_space = b.action(Action::align_to_enclosing_delimiter(" "));
    let align_delim_continued = b.action(Action::align_to_enclosing_delimiter(format!(" {one}")));
    let brace_stmt = b.action(Action::align_to_enclosing_brace_statement_start(""));
    let brace_stmt_one = b.action(Action::align_to_enclosing_brace_statement_start(one));
    let prev_stmt = b.action(Action::align_to_preceding_statement_start("", false));
    let prev_stmt_colon = b.action(Action::align_to_preceding_statement_start("", true));
    let curr_stmt = b.action(Action::align_to_statement_start(""));
    let curr_stmt_one = b.action(Action::align_to_statement_start(one));

    // Inside `(...)` or `[...]`.
    let new_phrase = b.question(Question::NewParenPhrase, align_delim_space, align_delim_continued);
    let close_bracket = b.question(Question::curr_line_starts_with("]"), align_delim, new_phrase);
    let close_paren = b.question(Question::curr_line_starts_with(")"), align_delim, close_bracket);

    // Statement body, shared by every curly or top-level context.
    let label_or_ternary_start = b.question(
        Question::ExistsCharInStatement {
            find: '?',
            end: ':',
        },
        prev_stmt,
        brace_stmt_one,
    );
    let after_ternary = b.question(
        Question::ExistsCharInPrevStatement { find: '?' },
        prev_stmt,
        prev_stmt_colon,
    );
    let new_stmt = b.question(
        Question::LineContains { ch: ':' },
        label_or_ternary_start,
        after_ternary,
    );
    let label_or_ternary_cont = b.question(
        Question::ExistsCharInStatement {
            find: '?',
            end: ':',
        },
        curr_stmt_one,
        brace_stmt_one,
    );
    let continued_colon = b.question(
        Question::LineContains { ch: ':' },
        label_or_ternary_cont,
        curr_stmt_one,
    );
    let continued = b.question(
        Question::curr_line_starts_with_skip_comments("{"),
        curr_stmt,
        continued_colon,
    );
    let body = b.question(Question::StartingNewStatement, new_stmt, continued);

    // Inside `{...}`.
    let initializer = b.question(
        Question::HasCharPrecedingOpenBrace {
            chars: INITIALIZER_BRACE_PRECEDERS.to_vec(),
        },
        brace_stmt_one,
        body,
    );
    let first_in_block = b.question(Question::StartAfterOpenBrace, brace_stmt_one, initializer);
    let curly = b.question(Question::BraceIsCurly, first_in_block, body);
    let closing = b.question(
        Question::curr_line_starts_with_skip_comments("}"),
        brace_stmt,
        curly,
    );

    b.question(Question::BraceIsParenOrBracket, close_paren, closing)
}
