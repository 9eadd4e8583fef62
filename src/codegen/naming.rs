//! Generated symbol names.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::diagnostic::GenError;

static C_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Whether `name` is a plain C identifier.
pub fn is_c_identifier(name: &str) -> bool {
    C_IDENTIFIER.is_match(name)
}

/// Reject names that cannot be emitted as a C symbol.
pub fn check_identifier(name: &str, what: &'static str) -> Result<(), GenError> {
    if is_c_identifier(name) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier {
            what,
            name: name.to_string(),
        })
    }
}

/// Function-pointer type name for an exported function.
///
/// Splits on `_`, capitalizes each segment (rest lowercased), writes the
/// segment equal to `acronym` (case-insensitively) in all caps, and appends
/// `Func`: `ls_window_create` becomes `LSWindowCreateFunc`.
pub fn func_type_name(function: &str, acronym: &str) -> String {
    let mut name = String::with_capacity(function.len() + 4);
    for segment in function.split('_') {
        if !acronym.is_empty() && segment.eq_ignore_ascii_case(acronym) {
            name.push_str(&acronym.to_ascii_uppercase());
        } else {
            name.push_str(&capitalize(segment));
        }
    }
    name.push_str("Func");
    name
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Slot name for an exported symbol: `ls_init` with prefix `_impl_` is `_impl_ls_init`.
pub fn slot_name(prefix: &str, symbol: &str) -> String {
    format!("{prefix}{symbol}")
}
