//! Header conventions recognised by the scanner.
//!
//! Every marker the line classifier looks for lives here instead of in
//! module-level constants, so one build invocation can carry its own rules
//! (loaded from the `[scan]` section of `Lunargen.toml`).

use serde::{Deserialize, Serialize};

/// Marker that tags a declaration as part of the dynamic-module ABI.
pub const DEFAULT_EXPORT_MARKER: &str = "LS_EXPORT";

/// Marker that tags an inline function defined in a header.
pub const DEFAULT_INLINE_MARKER: &str = "_FORCE_INLINE_";

/// Marker that replaces the export marker in import-only headers.
pub const DEFAULT_IMPORT_MARKER: &str = "LS_IMPORT";

/// Rules for classifying header lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanRules {
    /// Line prefix that starts an exported declaration.
    pub export_marker: String,

    /// Line prefix that starts an inline function (scanned like an export).
    pub inline_marker: String,

    /// Macro lines containing any of these tokens are never extracted.
    pub skip_markers: Vec<String>,

    /// Identifier suffix of include guards (`#ifndef FOO_H`).
    pub guard_suffix: String,

    /// Drop conditional macro blocks that contain an `#include`.
    pub discard_include_blocks: bool,
}

impl Default for ScanRules {
    fn default() -> Self {
        ScanRules {
            export_marker: DEFAULT_EXPORT_MARKER.to_string(),
            inline_marker: DEFAULT_INLINE_MARKER.to_string(),
            skip_markers: vec!["OPENGL_ENABLED".to_string()],
            guard_suffix: "_H".to_string(),
            discard_include_blocks: false,
        }
    }
}

impl ScanRules {
    pub fn with_discard_include_blocks(mut self, discard: bool) -> Self {
        self.discard_include_blocks = discard;
        self
    }

    /// `#define`, `#if`, `#ifdef` or `#ifndef` that is neither an include
    /// guard nor marked to be skipped.
    pub fn is_macro_start(&self, line: &str) -> bool {
        (line.starts_with("#define") || line.starts_with("#if")) && self.is_extractable(line)
    }

    /// A macro start that opens a conditional block.
    pub fn is_complex_macro_start(&self, line: &str) -> bool {
        // `#ifdef` and `#ifndef` share the `#if` prefix
        line.starts_with("#if") && self.is_extractable(line)
    }

    pub fn is_export(&self, line: &str) -> bool {
        (!self.export_marker.is_empty() && line.starts_with(&self.export_marker))
            || self.is_inline(line)
    }

    pub fn is_inline(&self, line: &str) -> bool {
        !self.inline_marker.is_empty() && line.starts_with(&self.inline_marker)
    }

    fn is_extractable(&self, line: &str) -> bool {
        !self.is_guard(line) && !self.skip_markers.iter().any(|m| line.contains(m.as_str()))
    }

    fn is_guard(&self, line: &str) -> bool {
        !self.guard_suffix.is_empty() && strip_eol(line).ends_with(&self.guard_suffix)
    }
}

/// The line without its trailing `\n` or `\r\n`.
pub(crate) fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whether the line ends in a preprocessor continuation backslash.
pub(crate) fn is_continued(line: &str) -> bool {
    strip_eol(line).ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_start_excludes_guards() {
        let rules = ScanRules::default();
        assert!(rules.is_macro_start("#define LS_MAX 4\n"));
        assert!(rules.is_macro_start("#ifdef DEBUG_ENABLED\n"));
        assert!(!rules.is_macro_start("#ifndef CORE_LOG_H\n"));
        assert!(!rules.is_macro_start("#define CORE_LOG_H\n"));
        assert!(!rules.is_macro_start("#endif // CORE_LOG_H\n"));
    }

    #[test]
    fn test_skip_marker() {
        let rules = ScanRules::default();
        assert!(!rules.is_macro_start("#if defined(OPENGL_ENABLED)\n"));
        assert!(!rules.is_complex_macro_start("#ifdef OPENGL_ENABLED\n"));
    }

    #[test]
    fn test_complex_macro_start() {
        let rules = ScanRules::default();
        assert!(rules.is_complex_macro_start("#if defined(_WIN32)\n"));
        assert!(rules.is_complex_macro_start("#ifndef LS_NO_LOG\n"));
        assert!(!rules.is_complex_macro_start("#define LS_NO_LOG\n"));
    }

    #[test]
    fn test_export_markers() {
        let rules = ScanRules::default();
        assert!(rules.is_export("LS_EXPORT void ls_init(void);\n"));
        assert!(rules.is_export("_FORCE_INLINE_ int ls_min(int a, int b) {\n"));
        assert!(!rules.is_export("  LS_EXPORT void indented(void);\n"));
    }

    #[test]
    fn test_continuation() {
        assert!(is_continued("#define A(x) \\\n"));
        assert!(is_continued("#define A(x) \\\r\n"));
        assert!(!is_continued("#define A 1\n"));
    }
}
