//! jindent: re-indent Java-like source files with `indent-core`.

use std::fs;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use indent_core::{Document, Indenter, Trace};
use indent_core_config::{DEFAULT_SPACES_PER_LEVEL, IndentConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Re-indent brace-structured source code.
#[derive(Parser, Debug)]
#[command(name = "jindent", version, about, long_about = None)]
struct Cli {
    /// File to re-indent. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(short = 'w', long, default_value_t = DEFAULT_SPACES_PER_LEVEL)]
    indent_width: usize,

    /// Close `/*` comments automatically when a new comment line is opened.
    #[arg(long)]
    auto_close_comments: bool,

    /// Only re-indent lines `A:B` (1-based, inclusive; either side may be omitted).
    #[arg(short, long, value_name = "A:B")]
    lines: Option<LineSpan>,

    /// Print the decision path of every line to stderr.
    #[arg(long)]
    trace: bool,

    /// Overwrite the input file instead of printing to stdout.
    #[arg(short, long, requires = "path")]
    in_place: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// A 1-based inclusive line span as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LineSpan {
    first: Option<usize>,
    last: Option<usize>,
}

impl LineSpan {
    /// Zero-based half-open range, clamped to `line_count`.
    fn to_range(self, line_count: usize) -> Range<usize> {
        let start = self.first.map_or(0, |first| first - 1).min(line_count);
        let end = self.last.map_or(line_count, |last| last.min(line_count));
        start..end.max(start)
    }
}

impl FromStr for LineSpan {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (first, last) = match s.split_once(':') {
            Some((first, last)) => (parse_line_number(first)?, parse_line_number(last)?),
            None => {
                let line = parse_line_number(s)?;
                (line, line)
            }
        };
        if let (Some(first), Some(last)) = (first, last)
            && first > last
        {
            return Err(format!("line span {first}:{last} is reversed"));
        }
        Ok(Self { first, last })
    }
}

fn parse_line_number(s: &str) -> std::result::Result<Option<usize>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<usize>() {
        Ok(0) => Err("line numbers start at 1".to_string()),
        Ok(line) => Ok(Some(line)),
        Err(err) => Err(format!("invalid line number {s:?}: {err}")),
    }
}

/// Result of re-indenting one source text.
#[derive(Debug)]
struct Reindented {
    text: String,
    /// Rendered decision path per zero-based line, when tracing was requested.
    traces: Vec<(usize, String)>,
}

fn reindent(source: &str, indenter: &Indenter, span: LineSpan, trace: bool) -> Reindented {
    let mut doc = Document::new(source);
    let range = span.to_range(doc.line_count());
    debug!(?range, line_ending = ?doc.line_ending(), "re-indenting");

    let mut recorder = if trace {
        Trace::enabled()
    } else {
        Trace::disabled()
    };
    let mut traces = Vec::new();
    indenter.indent_lines_traced(&mut doc, range, &mut recorder, |line, recorded| {
        if trace {
            traces.push((line, recorded.to_string()));
        }
    });

    Reindented {
        text: doc.text_with_original_line_endings(),
        traces,
    }
}

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = IndentConfig::new(cli.indent_width)
        .with_auto_close_block_comments(cli.auto_close_comments);
    let indenter = Indenter::new(config);

    let source = read_input(&cli)?;
    let result = reindent(&source, &indenter, cli.lines.unwrap_or_default(), cli.trace);

    if cli.trace {
        let mut stderr = io::stderr().lock();
        for (line, path) in &result.traces {
            writeln!(stderr, "line {}:", line + 1)?;
            for entry in path.lines() {
                writeln!(stderr, "  {entry}")?;
            }
        }
    }

    match (&cli.path, cli.in_place) {
        (Some(path), true) => {
            if result.text == source {
                info!(path = %path.display(), "already indented");
            } else {
                fs::write(path, &result.text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "re-indented");
            }
        }
        _ => io::stdout()
            .lock()
            .write_all(result.text.as_bytes())
            .context("failed to write stdout")?,
    }

    Ok(())
}
