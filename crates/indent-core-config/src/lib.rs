#![warn(missing_docs)]
//! `indent-core-config` - plain configuration values for `indent-core`.
//!
//! This crate intentionally stays lightweight and has no dependencies. Hosts build an
//! [`IndentConfig`] from whatever settings store they own and hand it to the indenter; loading
//! and persisting settings is the host's business.

/// Default number of spaces per indent level.
pub const DEFAULT_SPACES_PER_LEVEL: usize = 2;

/// Tunables of the indentation policy.
///
/// Both values are baked into the decision tree when it is assembled, so changing either one
/// requires a rebuild (see `Indenter::set_config` in `indent-core`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentConfig {
    /// Number of space characters that make up one indent level.
    pub spaces_per_level: usize,
    /// When `true`, pressing Enter right after opening a block comment inserts the closing
    /// `*/` line automatically.
    pub auto_close_block_comments: bool,
}

impl IndentConfig {
    /// Create a config with the given indent width and comment auto-closing disabled.
    pub fn new(spaces_per_level: usize) -> Self {
        Self {
            spaces_per_level,
            auto_close_block_comments: false,
        }
    }

    /// Return a copy with a different indent width.
    pub fn with_spaces_per_level(mut self, spaces_per_level: usize) -> Self {
        self.spaces_per_level = spaces_per_level;
        self
    }

    /// Return a copy with block comment auto-closing switched on or off.
    pub fn with_auto_close_block_comments(mut self, enabled: bool) -> Self {
        self.auto_close_block_comments = enabled;
        self
    }

    /// The whitespace for a single indent level.
    pub fn one_level(&self) -> String {
        " ".repeat(self.spaces_per_level)
    }
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SPACES_PER_LEVEL)
    }
}
