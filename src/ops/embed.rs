//! Embedding a binary asset as a C source file.

use std::path::Path;

use anyhow::Result;

use crate::codegen::embed::shader_source;
use crate::codegen::naming::check_identifier;
use crate::core::manifest::EmbedJob;
use crate::ops::GenerateReport;
use crate::util::fs::{read_bytes, write_string};

/// Write `job.input` as a NUL-terminated byte array named `job.symbol`.
pub fn embed_file(root: &Path, job: &EmbedJob) -> Result<GenerateReport> {
    check_identifier(&job.symbol, "an embedded array")?;

    let bytes = read_bytes(&root.join(&job.input))?;
    let output = root.join(&job.output);
    write_string(&output, &shader_source(&job.symbol, &bytes))?;

    let mut report = GenerateReport::new();
    report.record("embed", &output);
    Ok(report)
}
