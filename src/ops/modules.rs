//! Module detection and registration source generation.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::codegen::modules::{modules_source, ModuleEntry};
use crate::core::manifest::ModulesJob;
use crate::ops::GenerateReport;
use crate::util::fs::{include_path, relative_path, write_string};

const MODULE_MARKER: &str = "module_initialize.h";

fn is_module(path: &Path) -> bool {
    path.is_dir() && path.join(MODULE_MARKER).is_file()
}

fn sorted_subdirs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn add_module(root: &Path, path: &Path, modules: &mut Vec<ModuleEntry>) {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return;
    };
    upsert(
        modules,
        ModuleEntry {
            name,
            path: include_path(&relative_path(root, path)),
        },
    );
}

fn upsert(modules: &mut Vec<ModuleEntry>, entry: ModuleEntry) {
    match modules.iter_mut().find(|m| m.name == entry.name) {
        Some(existing) => existing.path = entry.path,
        None => modules.push(entry),
    }
}

/// Find module directories under `search` (relative to `root`).
///
/// Without `recursive` the search directory itself and its direct children
/// are checked; otherwise the whole tree is walked breadth-first. Children
/// are visited in sorted order. A later module with the same directory name
/// replaces the earlier path but keeps its position.
pub fn detect_modules(root: &Path, search: &Path, recursive: bool) -> Result<Vec<ModuleEntry>> {
    let start = root.join(search);
    let mut modules = Vec::new();
    if !start.is_dir() {
        return Ok(modules);
    }

    if !recursive {
        if is_module(&start) {
            add_module(root, &start, &mut modules);
        }
        for child in sorted_subdirs(&start)? {
            if is_module(&child) {
                add_module(root, &child, &mut modules);
            }
        }
        return Ok(modules);
    }

    let mut queue = VecDeque::from([start]);
    while let Some(dir) = queue.pop_front() {
        if is_module(&dir) {
            add_module(root, &dir, &mut modules);
        }
        queue.extend(sorted_subdirs(&dir)?);
    }
    Ok(modules)
}

/// Detect modules and write the registration source.
pub fn generate_modules(root: &Path, job: &ModulesJob) -> Result<GenerateReport> {
    let mut modules = Vec::new();
    for search in &job.search {
        for module in detect_modules(root, search, job.recursive)? {
            upsert(&mut modules, module);
        }
    }
    tracing::debug!("{} modules with {}", modules.len(), MODULE_MARKER);

    let mut report = GenerateReport::new();
    if modules.is_empty() {
        report.warn("no modules found");
    }

    let output = root.join(&job.output);
    write_string(&output, &modules_source(&modules))?;
    report.record("modules", &output);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn module(root: &Path, path: &str) {
        let dir = root.join(path);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MODULE_MARKER), "").unwrap();
    }

    #[test]
    fn test_detect_direct_children() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "modules/lua");
        module(tmp.path(), "modules/audio");
        module(tmp.path(), "modules/audio/codecs/ogg");
        fs::create_dir_all(tmp.path().join("modules/empty")).unwrap();

        let modules = detect_modules(tmp.path(), Path::new("modules"), false).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["audio", "lua"]);
        assert_eq!(modules[0].path, "modules/audio");
    }

    #[test]
    fn test_detect_recursive() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "modules/lua");
        module(tmp.path(), "modules/audio/codecs/ogg");

        let modules = detect_modules(tmp.path(), Path::new("modules"), true).unwrap();
        let paths: Vec<&str> = modules.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, ["modules/lua", "modules/audio/codecs/ogg"]);
    }

    #[test]
    fn test_generate_modules() {
        let tmp = TempDir::new().unwrap();
        module(tmp.path(), "modules/lua");

        let report = generate_modules(tmp.path(), &ModulesJob::default()).unwrap();
        assert!(report.warnings.is_empty());

        let out = fs::read_to_string(tmp.path().join("modules/initialize_modules.gen.c")).unwrap();
        assert!(out.contains("#include \"modules/lua/module_initialize.h\"\n"));
        assert!(out.contains("#ifdef MODULE_LUA_ENABLED\n\tinitialize_lua_module(p_level);\n"));
    }
}
