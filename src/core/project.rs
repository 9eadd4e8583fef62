//! Project root discovery.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::util::diagnostic::GenError;

/// Find `Lunargen.toml` in `start` or the nearest parent directory.
pub fn find_manifest(start: &Path) -> Result<PathBuf, GenError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(GenError::ManifestNotFound {
                start: start.to_path_buf(),
            });
        }
    }
}

/// A project: its root directory and the jobs to run there.
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest: Manifest,
    /// Path of the loaded manifest, `None` when running the built-in profiles.
    pub manifest_path: Option<PathBuf>,
}

impl Project {
    /// Locate the project for a command.
    ///
    /// With an explicit `root` only that directory is considered. Otherwise
    /// the manifest is searched from `cwd` upwards. Without a manifest the
    /// project root is `root` (or `cwd`) and the built-in profiles apply.
    pub fn discover(cwd: &Path, root: Option<&Path>) -> Result<Self> {
        let found = match root {
            Some(root) => {
                let candidate = root.join(MANIFEST_NAME);
                candidate.is_file().then_some(candidate)
            }
            None => match find_manifest(cwd) {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!("{}, using built-in profiles", e);
                    None
                }
            },
        };

        match found {
            Some(path) => Ok(Project {
                manifest: Manifest::load(&path)?,
                manifest_path: Some(path),
            }),
            None => Ok(Project {
                manifest: Manifest::builtin(root.unwrap_or(cwd)),
                manifest_path: None,
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.manifest.root
    }
}
