//! Lua constant binding generation.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::codegen::lua_constants::{extract_constants, lua_constants_source, ConstantTable};
use crate::codegen::naming::check_identifier;
use crate::core::manifest::LuaConstantsJob;
use crate::ops::GenerateReport;
use crate::util::fs::{expand_header_list, include_path, write_string};

/// Scan the job's headers and write the registration function.
///
/// Missing or unreadable headers are skipped with a warning and left out of
/// the generated includes.
pub fn generate_lua_constants(root: &Path, job: &LuaConstantsJob) -> Result<GenerateReport> {
    check_identifier(&job.function, "a Lua registration function")?;

    let mut report = GenerateReport::new();
    let mut table = ConstantTable::new();
    let mut includes = Vec::new();

    for header in expand_header_list(root, &job.headers)? {
        let path = root.join(&header);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.warn(format!("skipping {}: {}", header.display(), e));
                continue;
            }
        };
        extract_constants(&String::from_utf8_lossy(&bytes), &job.prefix, &mut table);
        includes.push(include_path(&header));
    }

    tracing::debug!("{} constant groups", table.groups().len());

    let output = root.join(&job.output);
    write_string(&output, &lua_constants_source(&job.function, &includes, &table))?;
    report.record("lua-constants", &output);
    Ok(report)
}
