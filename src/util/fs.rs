//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file as raw bytes.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Expand an ordered header list relative to `base`.
///
/// Plain entries are kept as given, whether or not they exist. Glob entries
/// expand in place to the matching files, sorted, as paths relative to
/// `base`. The result is never de-duplicated.
pub fn expand_header_list(base: &Path, entries: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for entry in entries {
        if !is_glob_pattern(entry) {
            results.push(PathBuf::from(entry));
            continue;
        }

        let full_pattern = base.join(entry);
        let pattern_str = full_pattern.to_string_lossy();

        let mut matched = Vec::new();
        for path in glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", entry))? {
            match path {
                Ok(path) if path.is_file() => matched.push(relative_path(base, &path)),
                Ok(_) => {}
                Err(e) => tracing::warn!("glob error: {}", e),
            }
        }
        if matched.is_empty() {
            tracing::warn!("pattern {} matched no files", entry);
        }
        matched.sort();
        results.extend(matched);
    }

    Ok(results)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Path as written in a C `#include`, always with `/` separators.
pub fn include_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
