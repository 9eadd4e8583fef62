//! Producer-side source for dynamic modules.
//!
//! Combines the real headers, the interface table initializer and the full
//! text of the generated API header and source. The text is embedded so a
//! loader can hand it to modules built against it or compare it at runtime.

use super::api_header::{collapse_blank_lines, ApiOutput};
use super::embed::{byte_array, ArrayStyle};
use super::exports::GENERATED_BANNER;

/// Symbol holding the embedded API header text.
pub const API_HEADER_SYMBOL: &str = "LS_API_HEADER";

/// Symbol holding the embedded API source text.
pub const API_SOURCE_SYMBOL: &str = "LS_API_SOURCE";

/// Render the combined dynamic module source.
///
/// `includes` are emitted verbatim as `#include "..."` lines in order.
/// Returns `None` when `api` was not built in the indirect export style.
pub fn dynamic_module_source(
    module_header: &str,
    includes: &[String],
    api: &ApiOutput,
) -> Option<String> {
    let rewritten = api.rewritten.as_ref()?;
    let source = api.source.as_deref()?;

    let mut out = format!("{GENERATED_BANNER}\n#include \"{module_header}\"\n\n");
    for include in includes {
        out.push_str(&format!("#include \"{include}\"\n"));
    }
    out.push('\n');
    out.push_str(&rewritten.producer);
    out.push_str(&byte_array(
        API_HEADER_SYMBOL,
        api.header.as_bytes(),
        ArrayStyle::UnsignedChar,
    ));
    out.push_str(&byte_array(
        API_SOURCE_SYMBOL,
        source.as_bytes(),
        ArrayStyle::UnsignedChar,
    ));

    Some(collapse_blank_lines(&out))
}

/// Render a native API source embedding only the header text.
pub fn native_api_source(module_header: &str, header: &str) -> String {
    let mut out = format!("{GENERATED_BANNER}\n#include \"{module_header}\"\n\n");
    out.push_str(&byte_array(
        API_HEADER_SYMBOL,
        header.as_bytes(),
        ArrayStyle::UnsignedChar,
    ));
    out
}
