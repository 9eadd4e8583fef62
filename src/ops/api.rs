//! API header generation for one profile job.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::codegen::api_header::build_api;
use crate::codegen::dynamic_module::{dynamic_module_source, native_api_source};
use crate::codegen::exports::API_HEADER_PLACEHOLDER;
use crate::codegen::ExportStyle;
use crate::core::profile::ApiJob;
use crate::ops::GenerateReport;
use crate::scan::{aggregate, Aggregated, LineScanner, ScanRules};
use crate::util::fs::{expand_header_list, include_path, write_string};

/// Which files of an API job to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiOptions {
    /// The public header and, for the indirect style, its companion source.
    pub api_files: bool,
    /// The combined source embedding the generated text.
    pub generated_source: bool,
}

impl ApiOptions {
    pub fn all() -> Self {
        ApiOptions {
            api_files: true,
            generated_source: true,
        }
    }
}

/// Expand and scan a header list. Returns the expanded list and the scan.
pub fn scan_headers(
    root: &Path,
    rules: &ScanRules,
    headers: &[String],
) -> Result<(Vec<PathBuf>, Aggregated)> {
    let headers = expand_header_list(root, headers)?;
    let scanner = LineScanner::new(rules.clone());
    let aggregated = aggregate(&scanner, root, &headers);
    Ok((headers, aggregated))
}

/// Run one API job.
pub fn generate_api(
    root: &Path,
    rules: &ScanRules,
    job: &ApiJob,
    opts: ApiOptions,
) -> Result<GenerateReport> {
    let mut report = GenerateReport::new();
    let rules = job.rules(rules);
    let (headers, aggregated) = scan_headers(root, &rules, &job.headers)?;

    for missing in &aggregated.missing {
        report.warn(format!("header {} does not exist", missing.display()));
    }
    for unreadable in &aggregated.unreadable {
        report.warn(format!("could not read {}", unreadable.display()));
    }

    let api = build_api(&aggregated.blocks, job.style(), &job.guard, &rules, &job.names);
    if let Some(rewritten) = &api.rewritten {
        for declaration in &rewritten.unsupported {
            report.warn(format!(
                "parameter list spans several lines, kept verbatim: {}",
                declaration.trim()
            ));
        }
        tracing::debug!("{} interface slots", rewritten.slots.len());
    }

    let output_dir = root.join(&job.output_dir);

    if opts.api_files {
        let header_path = output_dir.join(&job.header_file);
        write_string(&header_path, &api.header)?;
        report.record("api-header", &header_path);

        if let (Some(source_file), Some(source)) = (&job.source_file, &api.source) {
            let source_path = output_dir.join(source_file);
            write_string(&source_path, &source.replace(API_HEADER_PLACEHOLDER, &job.header_file))?;
            report.record("api-source", &source_path);
        }
    }

    if opts.generated_source {
        if let Some(file) = &job.generated_source {
            let text = match job.style() {
                ExportStyle::Indirect => {
                    let includes: Vec<String> = headers.iter().map(|h| include_path(h)).collect();
                    match dynamic_module_source(&job.module_header, &includes, &api) {
                        Some(text) => text,
                        None => bail!("profile {} has no interface table", job.kind),
                    }
                }
                ExportStyle::Import => native_api_source(&job.module_header, &api.header),
            };
            let path = output_dir.join(file);
            write_string(&path, &text)?;
            report.record("generated-source", &path);
        }
    }

    Ok(report)
}
