//! High-level operations.
//!
//! Each operation reads its inputs relative to a project root, runs one
//! generator and writes the output files. Recoverable problems (missing
//! headers, unsupported declarations) become warnings in the returned
//! [`GenerateReport`]; everything else is an error.

pub mod api;
pub mod embed;
pub mod generate;
pub mod lua;
pub mod modules;
pub mod version;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use api::{generate_api, scan_headers, ApiOptions};
pub use embed::embed_file;
pub use generate::generate_all;
pub use lua::generate_lua_constants;
pub use modules::{detect_modules, generate_modules};
pub use version::generate_version;

/// One file written by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub generator: &'static str,
    pub path: PathBuf,
}

/// What an operation wrote and what it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub files: Vec<GeneratedFile>,
    pub warnings: Vec<String>,
}

impl GenerateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, generator: &'static str, path: &Path) {
        tracing::debug!("{} wrote {}", generator, path.display());
        self.files.push(GeneratedFile {
            generator,
            path: path.to_path_buf(),
        });
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn extend(&mut self, other: GenerateReport) {
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
    }
}
