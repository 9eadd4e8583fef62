//! Embedding files as C byte arrays.
//!
//! Bytes are written as comma-separated decimal values followed by a
//! terminating `0`. A line break is inserted after the value at every
//! non-zero multiple of [`BYTES_PER_LINE`], so the first line holds one
//! value more than the others.

use std::fmt::Write as _;

/// Wrap interval for embedded byte values.
pub const BYTES_PER_LINE: usize = 16;

/// Element type and pointer form of the emitted array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStyle {
    /// `const char *const NAME = (const char[N]){ ... };` used for shaders.
    ConstChar,
    /// `const unsigned char *NAME = (const unsigned char[N]){ ... };` used for
    /// embedded API text.
    UnsignedChar,
}

impl ArrayStyle {
    fn declaration(&self, symbol: &str, len: usize) -> String {
        match self {
            ArrayStyle::ConstChar => {
                format!("const char *const {symbol} = (const char[{len}]){{\n")
            }
            ArrayStyle::UnsignedChar => {
                format!("const unsigned char *{symbol} = (const unsigned char[{len}]){{\n")
            }
        }
    }
}

/// Render `bytes` as a NUL-terminated array literal bound to `symbol`.
pub fn byte_array(symbol: &str, bytes: &[u8], style: ArrayStyle) -> String {
    let mut out = style.declaration(symbol, bytes.len() + 1);
    out.push('\t');
    for (i, b) in bytes.iter().enumerate() {
        let _ = write!(out, "{b}, ");
        if i % BYTES_PER_LINE == 0 && i != 0 {
            out.push_str("\n\t");
        }
    }
    out.push_str("0\n};\n");
    out
}

/// Source file embedding a shader (or any binary asset).
pub fn shader_source(symbol: &str, bytes: &[u8]) -> String {
    byte_array(symbol, bytes, ArrayStyle::ConstChar)
}
