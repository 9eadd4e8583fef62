//! Line classifier.
//!
//! One transition function per [`ParseState`]. Each takes the previous state,
//! the raw line (including its line terminator) and the shared [`ScanInfo`],
//! appends the line to at most one accumulator and returns the next state.
//!
//! This is prefix matching plus brace counting, not a C grammar: braces inside
//! strings or comments are counted like any other brace.

use super::rules::{is_continued, strip_eol, ScanRules};
use super::state::{ParseState, ScanInfo, Target};

/// Feed one line through the transition function of `current`.
pub fn classify(
    rules: &ScanRules,
    current: ParseState,
    last: ParseState,
    line: &str,
    info: &mut ScanInfo,
) -> ParseState {
    let next = match current {
        ParseState::Normal => normal(rules, last, line, info),
        ParseState::Comment => comment(rules, line, info),
        ParseState::MultiLineComment => multi_line_comment(line, info),
        ParseState::Macro => in_macro(rules, line, info),
        ParseState::Typedef => in_typedef(line, info),
        ParseState::Export => in_export(line, info),
    };
    tracing::trace!(%current, %next, depth = info.depth, line = strip_eol(line));
    next
}

fn normal(rules: &ScanRules, last: ParseState, line: &str, info: &mut ScanInfo) -> ParseState {
    if line.starts_with("/*") {
        info.comment = line.to_string();
        let compact: String = line.chars().filter(|c| *c != ' ').collect();
        if strip_eol(&compact).ends_with("*/") {
            ParseState::Comment
        } else {
            ParseState::MultiLineComment
        }
    } else if line.starts_with("//") {
        info.comment = line.to_string();
        ParseState::Comment
    } else if rules.is_macro_start(line) {
        if rules.is_complex_macro_start(line) {
            info.depth += 1;
        }
        info.macro_start = info.macros.len();
        info.macro_has_include = false;
        info.flush_comment_into(last, Target::Macros);
        info.macros.push_str(line);
        close_macro_if_done(rules, line, info)
    } else if line.starts_with("typedef") {
        info.flush_comment_into(last, Target::Typedefs);
        info.typedefs.push_str(line);
        info.track_braces(line);
        if !line.contains(';') || info.depth != 0 {
            ParseState::Typedef
        } else {
            info.typedefs.push('\n');
            ParseState::Normal
        }
    } else if rules.is_export(line) {
        info.flush_comment_into(last, Target::Exports);
        info.exports.push_str(line);
        info.track_braces(line);
        if !line.contains(';') || info.depth != 0 {
            ParseState::Export
        } else {
            ParseState::Normal
        }
    } else {
        ParseState::Normal
    }
}

fn comment(rules: &ScanRules, line: &str, info: &mut ScanInfo) -> ParseState {
    if line.starts_with("//") {
        info.comment.push_str(line);
        return ParseState::Comment;
    }
    // The comment only ends once a non-comment line shows up, so that line
    // is classified as if we were in the normal state.
    normal(rules, ParseState::Comment, line, info)
}

fn multi_line_comment(line: &str, info: &mut ScanInfo) -> ParseState {
    info.comment.push_str(line);
    if strip_eol(line).trim_end().ends_with("*/") {
        ParseState::Normal
    } else {
        ParseState::MultiLineComment
    }
}

fn in_macro(rules: &ScanRules, line: &str, info: &mut ScanInfo) -> ParseState {
    info.macros.push_str(line);
    if line.contains("#include") {
        info.macro_has_include = true;
    }
    if line.starts_with("#endif") {
        info.depth -= 1;
    }

    let next = close_macro_if_done(rules, line, info);

    // Nested conditionals are counted after the close check.
    if rules.is_complex_macro_start(line) {
        info.depth += 1;
    }
    next
}

/// Terminate the macro block once it is balanced and not continued.
fn close_macro_if_done(rules: &ScanRules, line: &str, info: &mut ScanInfo) -> ParseState {
    if is_continued(line) || info.depth != 0 {
        return ParseState::Macro;
    }

    if rules.discard_include_blocks && info.macro_has_include {
        info.macros.truncate(info.macro_start);
    } else {
        info.macros.push('\n');
    }
    info.macro_has_include = false;
    ParseState::Normal
}

fn in_typedef(line: &str, info: &mut ScanInfo) -> ParseState {
    info.typedefs.push_str(line);
    info.track_braces(line);
    if line.contains(';') && info.depth == 0 {
        info.typedefs.push('\n');
        ParseState::Normal
    } else {
        ParseState::Typedef
    }
}

fn in_export(line: &str, info: &mut ScanInfo) -> ParseState {
    info.exports.push_str(line);
    info.track_braces(line);
    if (line.contains(';') || line.contains('}')) && info.depth == 0 {
        ParseState::Normal
    } else {
        ParseState::Export
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rules: &ScanRules, lines: &[&str]) -> (ParseState, ScanInfo) {
        let mut info = ScanInfo::new();
        let mut current = ParseState::Normal;
        let mut last = ParseState::Normal;
        for line in lines {
            let next = classify(rules, current, last, line, &mut info);
            last = current;
            current = next;
        }
        (current, info)
    }

    #[test]
    fn test_single_line_comment_block() {
        let (state, info) = run(&ScanRules::default(), &["/* one liner */\n"]);
        assert_eq!(state, ParseState::Comment);
        assert_eq!(info.comment, "/* one liner */\n");
    }

    #[test]
    fn test_multi_line_comment_ends_on_close() {
        let rules = ScanRules::default();
        let (state, info) = run(&rules, &["/*\n", " * Doc.\n", " */\n"]);
        assert_eq!(state, ParseState::Normal);
        assert_eq!(info.comment, "/*\n * Doc.\n */\n");
    }

    #[test]
    fn test_comment_attaches_to_typedef() {
        let rules = ScanRules::default();
        let (_, info) = run(&rules, &["// A handle.\n", "typedef int Handle;\n"]);
        assert_eq!(info.typedefs, "// A handle.\ntypedef int Handle;\n\n");
        assert!(info.comment.is_empty());
    }

    #[test]
    fn test_multi_line_comment_attaches_to_export() {
        let rules = ScanRules::default();
        let (_, info) = run(
            &rules,
            &["/*\n", " * Init.\n", " */\n", "LS_EXPORT void ls_init(void);\n"],
        );
        assert_eq!(info.exports, "/*\n * Init.\n */\nLS_EXPORT void ls_init(void);\n");
    }

    #[test]
    fn test_unrelated_line_drops_nothing_into_outputs() {
        let rules = ScanRules::default();
        let (state, info) = run(&rules, &["#include \"core/api.h\"\n", "\n", "int local;\n"]);
        assert_eq!(state, ParseState::Normal);
        assert!(info.macros.is_empty());
        assert!(info.typedefs.is_empty());
        assert!(info.exports.is_empty());
    }

    #[test]
    fn test_continued_define() {
        let rules = ScanRules::default();
        let (state, info) = run(
            &rules,
            &["#define LS_CHECK(x) \\\n", "\tdo { x; } while (0)\n"],
        );
        assert_eq!(state, ParseState::Normal);
        assert_eq!(info.macros, "#define LS_CHECK(x) \\\n\tdo { x; } while (0)\n\n");
        assert_eq!(info.depth, 0);
    }

    #[test]
    fn test_conditional_block_with_nesting() {
        let rules = ScanRules::default();
        let lines = [
            "#if defined(DEBUG)\n",
            "#ifdef LS_TRACE\n",
            "#define LS_LOG 2\n",
            "#endif\n",
            "#define LS_ASSERTS\n",
            "#endif\n",
        ];
        let (state, info) = run(&rules, &lines);
        assert_eq!(state, ParseState::Normal);
        assert_eq!(info.depth, 0);
        assert_eq!(info.macros, format!("{}\n", lines.concat()));
    }

    #[test]
    fn test_include_block_discarded_when_enabled() {
        let rules = ScanRules::default().with_discard_include_blocks(true);
        let lines = [
            "#define LS_KEEP 1\n",
            "#ifdef WINDOWS_ENABLED\n",
            "#include <windows.h>\n",
            "#endif\n",
        ];
        let (_, info) = run(&rules, &lines);
        assert_eq!(info.macros, "#define LS_KEEP 1\n\n");
        assert_eq!(info.depth, 0);
    }

    #[test]
    fn test_include_block_kept_by_default() {
        let rules = ScanRules::default();
        let lines = ["#ifdef WINDOWS_ENABLED\n", "#include <windows.h>\n", "#endif\n"];
        let (_, info) = run(&rules, &lines);
        assert_eq!(info.macros, format!("{}\n", lines.concat()));
    }

    #[test]
    fn test_inline_export_tracks_braces() {
        let rules = ScanRules::default();
        let lines = [
            "_FORCE_INLINE_ int ls_clamp(int v, int lo, int hi) {\n",
            "\tif (v < lo) {\n",
            "\t\treturn lo;\n",
            "\t}\n",
            "\treturn v > hi ? hi : v;\n",
            "}\n",
        ];
        let (state, info) = run(&rules, &lines);
        assert_eq!(state, ParseState::Normal);
        assert_eq!(info.exports, lines.concat());
    }

    #[test]
    fn test_multi_line_export_declaration() {
        let rules = ScanRules::default();
        let (state, info) = run(
            &rules,
            &["LS_EXPORT void ls_draw(int x,\n", "\tint y);\n", "int ignored;\n"],
        );
        assert_eq!(state, ParseState::Normal);
        assert_eq!(info.exports, "LS_EXPORT void ls_draw(int x,\n\tint y);\n");
    }
}
