//! Lunargen - C header scanning and API glue generation
//!
//! This crate provides the library half of the `lunargen` CLI: scanning C
//! headers for macro, typedef and exported-declaration blocks, and emitting
//! the generated API headers, dynamic-module glue, Lua constant bindings and
//! embedded assets a C engine build consumes.

pub mod codegen;
pub mod core;
pub mod ops;
pub mod scan;
pub mod util;

pub use core::{manifest::Manifest, profile::ProfileKind, project::Project};
pub use scan::{aggregate, Aggregated, HeaderScanner, LineScanner, ScanRules, ScannedHeader};
pub use util::diagnostic::GenError;
