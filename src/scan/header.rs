//! Header scanner.
//!
//! Drives the line classifier over one header and returns its macro, typedef
//! and export blocks. Callers go through [`HeaderScanner`] so the line-based
//! scanner can be swapped for a tokenizing one without touching them.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::classify::classify;
use super::rules::ScanRules;
use super::state::{ParseState, ScanInfo};
use crate::util::diagnostic::GenError;

/// The three text blocks extracted from a header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannedHeader {
    pub macros: String,
    pub typedefs: String,
    pub exports: String,
}

impl ScannedHeader {
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty() && self.typedefs.is_empty() && self.exports.is_empty()
    }

    /// Append another header's blocks after this one's.
    pub fn append(&mut self, other: &ScannedHeader) {
        self.macros.push_str(&other.macros);
        self.typedefs.push_str(&other.typedefs);
        self.exports.push_str(&other.exports);
    }
}

/// Something that can extract macro/typedef/export blocks from header text.
pub trait HeaderScanner {
    /// Scan header text that has already been read.
    fn scan_str(&self, content: &str) -> ScannedHeader;

    /// Read and scan a header file.
    fn scan_file(&self, path: &Path) -> Result<ScannedHeader, GenError> {
        let bytes = fs::read(path).map_err(|source| GenError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(self.scan_str(&content))
    }
}

/// The line-oriented scanner built on [`classify`].
#[derive(Debug, Clone, Default)]
pub struct LineScanner {
    rules: ScanRules,
}

impl LineScanner {
    pub fn new(rules: ScanRules) -> Self {
        LineScanner { rules }
    }

    /// Scan and also return the final state and accumulator, for inspection.
    pub fn scan_with_info(&self, content: &str) -> (ParseState, ScanInfo) {
        let mut info = ScanInfo::new();
        let mut current = ParseState::Normal;
        let mut last = ParseState::Normal;

        for line in content.split_inclusive('\n') {
            let next = classify(&self.rules, current, last, line, &mut info);
            last = current;
            current = next;
        }

        (current, info)
    }
}

impl HeaderScanner for LineScanner {
    fn scan_str(&self, content: &str) -> ScannedHeader {
        let (state, info) = self.scan_with_info(content);
        if state != ParseState::Normal {
            tracing::debug!(%state, depth = info.depth, "header ended inside an open construct");
        }
        ScannedHeader {
            macros: info.macros,
            typedefs: info.typedefs,
            exports: info.exports,
        }
    }
}
