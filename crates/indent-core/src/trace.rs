//! Decision trace recording.
//!
//! A [`Trace`] collects the `(rule, direction)` pairs visited while one indent request walks the
//! decision tree: `Yes`/`No` for every question, and an empty direction for the terminal action.
//! It is an explicit context object owned by the caller; a disabled trace (the default) records
//! nothing.
//!
//! The log is not cleared eagerly. Once a terminal action closes a path, the next recorded
//! entry starts a fresh path, so the last complete path stays readable until the next request.

use std::fmt;

/// Which way a rule sent the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A question answered yes.
    Yes,
    /// A question answered no.
    No,
    /// A terminal action fired.
    Terminal,
}

impl Direction {
    /// `"Yes"`, `"No"` or `""`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Terminal => "",
        }
    }
}

/// One visited rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Rule name, e.g. `"BraceIsCurly"`.
    pub rule: &'static str,
    /// Decision taken at the rule.
    pub direction: Direction,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.rule, self.direction.as_str())
    }
}

/// A resettable log of decisions.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    enabled: bool,
    start_over: bool,
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// A trace that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A trace that records every decision.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Whether decisions are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch recording on or off. Already recorded entries are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.start_over = false;
    }

    /// Entries of the current (or last completed) path, root first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// The path as `(rule, direction)` string pairs.
    pub fn path(&self) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .map(|entry| (entry.rule, entry.direction.as_str()))
            .collect()
    }

    /// `true` once a terminal action has closed the current path.
    pub fn is_complete(&self) -> bool {
        self.start_over
    }

    pub(crate) fn record(&mut self, rule: &'static str, direction: Direction) {
        if !self.enabled {
            return;
        }
        if self.start_over {
            self.entries.clear();
            self.start_over = false;
        }
        self.entries.push(TraceEntry { rule, direction });
        if direction == Direction::Terminal {
            self.start_over = true;
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
