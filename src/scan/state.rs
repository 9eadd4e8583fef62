//! Scanner state and accumulators.

use std::fmt;

use serde::Serialize;

/// Parser state at a line boundary.
///
/// Exactly one state is current between lines. Transitions are driven by line
/// prefixes and brace/conditional balance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseState {
    #[default]
    Normal,
    /// One or more `//` lines, or a single-line `/* */` comment.
    Comment,
    /// Inside a `/* ... */` span that started on an earlier line.
    MultiLineComment,
    Macro,
    Typedef,
    Export,
}

impl ParseState {
    /// Whether a pending comment buffer belongs to the next construct.
    pub fn is_comment(&self) -> bool {
        matches!(self, ParseState::Comment | ParseState::MultiLineComment)
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseState::Normal => "normal",
            ParseState::Comment => "comment",
            ParseState::MultiLineComment => "multi-line comment",
            ParseState::Macro => "macro",
            ParseState::Typedef => "typedef",
            ParseState::Export => "export",
        };
        f.write_str(s)
    }
}

/// Mutable accumulator threaded through the line classifier.
///
/// `depth` is one counter shared by conditional-macro nesting and brace
/// nesting of typedefs and exports. It is never reset between constructs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanInfo {
    pub depth: i32,
    /// Pending comment, flushed into whichever construct follows it.
    pub comment: String,
    pub macros: String,
    pub typedefs: String,
    pub exports: String,
    /// Offset in `macros` where the current macro block started.
    pub(crate) macro_start: usize,
    /// Whether the current macro block contains an `#include` line.
    pub(crate) macro_has_include: bool,
}

impl ScanInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the pending comment into `target` if the previous state was a comment.
    pub(crate) fn flush_comment_into(&mut self, last_state: ParseState, target: Target) {
        if !last_state.is_comment() {
            return;
        }
        let comment = std::mem::take(&mut self.comment);
        self.buffer(target).push_str(&comment);
    }

    pub(crate) fn buffer(&mut self, target: Target) -> &mut String {
        match target {
            Target::Macros => &mut self.macros,
            Target::Typedefs => &mut self.typedefs,
            Target::Exports => &mut self.exports,
        }
    }

    /// Apply the brace balance of `line` to `depth`.
    pub(crate) fn track_braces(&mut self, line: &str) {
        let opens = line.matches('{').count() as i32;
        let closes = line.matches('}').count() as i32;
        self.depth += opens - closes;
    }
}

/// Which construct accumulator a line is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Macros,
    Typedefs,
    Exports,
}
