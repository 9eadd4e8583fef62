//! Public API header assembly.
//!
//! The header is: banner and include guard, a platform/visibility preamble,
//! then every macro block, every typedef block and the export section, in
//! header-list order.

use serde::{Deserialize, Serialize};

use super::exports::{rewrite_exports, ApiNames, RewrittenExports, GENERATED_BANNER};
use crate::scan::rules::DEFAULT_IMPORT_MARKER;
use crate::scan::{ScanRules, ScannedHeader};

/// How exported declarations appear in the generated header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportStyle {
    /// Late-bound through indirection slots (dynamic modules).
    #[default]
    Indirect,
    /// Declared directly with the import marker (native applications).
    Import,
}

/// Platform identification and symbol visibility macros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    pub guard: String,
    /// Give `LS_IMPORT` an explicit web branch.
    pub web_import: bool,
    /// Also define `LS_EXPORT`.
    pub export_macro: bool,
}

impl Preamble {
    pub fn for_style(style: ExportStyle, guard: impl Into<String>) -> Self {
        let full = style == ExportStyle::Indirect;
        Preamble {
            guard: guard.into(),
            web_import: full,
            export_macro: full,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{GENERATED_BANNER}\n#ifndef {guard}\n#define {guard}\n\n",
            guard = self.guard
        );
        out.push_str(PLATFORM_BLOCK);
        out.push('\n');

        out.push_str("#if defined(_MSC_VER)\n#define LS_IMPORT __declspec(dllimport)\n");
        if self.web_import {
            out.push_str("#elif defined(__EMSCRIPTEN__)\n#define LS_IMPORT\n");
        }
        out.push_str(
            "#elif defined(__GNUC__)\n\
             #define LS_IMPORT __attribute__((visibility(\"default\")))\n\
             #else\n\
             #define LS_IMPORT\n\
             #endif // defined(_MSC_VER)\n\n",
        );

        if self.export_macro {
            out.push_str(EXPORT_BLOCK);
            out.push('\n');
        }
        out
    }
}

const PLATFORM_BLOCK: &str = "\
#if defined(__linux__) || defined(__FreeBSD__)
#define LINUXBSD_ENABLED
#elif defined(_WIN32) || defined(WIN32)
#define WINDOWS_ENABLED
#elif defined(__EMSCRIPTEN__)
#define WEB_ENABLED
#endif // defined(__linux__) || defined(__FreeBSD__)
";

const EXPORT_BLOCK: &str = "\
#if defined(_MSC_VER)
#define LS_EXPORT __declspec(dllexport)
#elif defined(__EMSCRIPTEN__)
#define LS_EXPORT __attribute__((used))
#elif defined(__GNUC__)
#define LS_EXPORT __attribute__((visibility(\"default\")))
#else // _MSC_VER
#define LS_EXPORT
#endif // _MSC_VER
";

/// Replace every `"\n\n\n"` with `"\n"` in one left-to-right pass.
pub fn collapse_blank_lines(text: &str) -> String {
    text.replace("\n\n\n", "\n")
}

/// Generated API text for one header list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutput {
    pub header: String,
    /// Consumer source (indirect style only), still holding the header placeholder.
    pub source: Option<String>,
    /// Rewriter output (indirect style only).
    pub rewritten: Option<RewrittenExports>,
}

/// Build the API header (and consumer source) from aggregated blocks.
///
/// `rules` must be the rules the blocks were scanned with; their export
/// marker is the one rewritten.
pub fn build_api(
    blocks: &ScannedHeader,
    style: ExportStyle,
    guard: &str,
    rules: &ScanRules,
    names: &ApiNames,
) -> ApiOutput {
    let mut header = Preamble::for_style(style, guard).render();
    header.push_str(&blocks.macros);
    header.push_str(&blocks.typedefs);

    let (exports, source, rewritten) = match style {
        ExportStyle::Indirect => {
            let rewritten = rewrite_exports(&blocks.exports, rules, names);
            (
                rewritten.header.clone(),
                Some(collapse_blank_lines(&rewritten.source)),
                Some(rewritten),
            )
        }
        ExportStyle::Import => (
            import_exports(&blocks.exports, &rules.export_marker),
            None,
            None,
        ),
    };

    header.push_str(&exports);
    header.push_str(&format!("#endif // {guard}\n"));

    ApiOutput {
        header: collapse_blank_lines(&header),
        source,
        rewritten,
    }
}

fn import_exports(exports: &str, marker: &str) -> String {
    if marker.is_empty() {
        return exports.to_string();
    }
    exports.replace(marker, DEFAULT_IMPORT_MARKER)
}
