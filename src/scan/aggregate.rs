//! Multi-header aggregation.
//!
//! Header order is part of the output: blocks are concatenated in list order
//! and nothing is de-duplicated.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::header::{HeaderScanner, ScannedHeader};
use crate::util::diagnostic::GenError;

/// Combined scan output for an ordered header list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregated {
    #[serde(flatten)]
    pub blocks: ScannedHeader,
    /// Headers that were scanned, in order.
    pub scanned: Vec<PathBuf>,
    /// Listed headers that do not exist.
    pub missing: Vec<PathBuf>,
    /// Headers that exist but could not be read.
    pub unreadable: Vec<PathBuf>,
}

impl Aggregated {
    pub fn macros(&self) -> &str {
        &self.blocks.macros
    }

    pub fn typedefs(&self) -> &str {
        &self.blocks.typedefs
    }

    pub fn exports(&self) -> &str {
        &self.blocks.exports
    }
}

/// Scan `headers` in order, resolving relative paths against `root`.
///
/// Missing or unreadable headers are reported and skipped; they never abort
/// the run.
pub fn aggregate<S: HeaderScanner + ?Sized>(
    scanner: &S,
    root: &Path,
    headers: &[PathBuf],
) -> Aggregated {
    let mut result = Aggregated::default();

    for header in headers {
        let path = root.join(header);
        if !path.exists() {
            tracing::debug!("{}", GenError::MissingInputFile { path: path.clone() });
            result.missing.push(header.clone());
            continue;
        }

        match scanner.scan_file(&path) {
            Ok(scanned) => {
                tracing::debug!(
                    "scanned {} ({} macro, {} typedef, {} export bytes)",
                    header.display(),
                    scanned.macros.len(),
                    scanned.typedefs.len(),
                    scanned.exports.len()
                );
                result.blocks.append(&scanned);
                result.scanned.push(header.clone());
            }
            Err(e) => {
                tracing::debug!("{}", e);
                result.unreadable.push(header.clone());
            }
        }
    }

    result
}
