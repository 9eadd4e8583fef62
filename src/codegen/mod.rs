//! C source generators.
//!
//! Every generator is a pure function from scanned or configured input to
//! file text; writing to disk happens in [`crate::ops`].

pub mod api_header;
pub mod dynamic_module;
pub mod embed;
pub mod exports;
pub mod lua_constants;
pub mod modules;
pub mod naming;
pub mod version;

pub use api_header::{build_api, ApiOutput, ExportStyle};
pub use exports::{rewrite_exports, ApiNames, RewrittenExports};
