//! Running every job of a manifest.

use anyhow::{Context, Result};

use crate::core::manifest::Manifest;
use crate::ops::{
    embed_file, generate_api, generate_lua_constants, generate_modules, generate_version,
    ApiOptions, GenerateReport,
};

/// Run all jobs in dependency order.
///
/// The version header and module registration come first because the API
/// header lists include them.
pub fn generate_all(manifest: &Manifest) -> Result<GenerateReport> {
    let root = manifest.root.as_path();
    let mut report = GenerateReport::new();

    if let Some(job) = &manifest.version {
        report.extend(generate_version(root, job)?);
    }

    for job in &manifest.modules {
        report.extend(
            generate_modules(root, job)
                .with_context(|| format!("failed to generate {}", job.output.display()))?,
        );
    }

    for job in &manifest.api {
        tracing::debug!("api job {}", job.kind);
        report.extend(
            generate_api(root, &manifest.scan, job, ApiOptions::all())
                .with_context(|| format!("failed to generate the {} API", job.kind))?,
        );
    }

    for job in &manifest.lua_constants {
        report.extend(
            generate_lua_constants(root, job)
                .with_context(|| format!("failed to generate {}", job.output.display()))?,
        );
    }

    for job in &manifest.embed {
        report.extend(
            embed_file(root, job)
                .with_context(|| format!("failed to embed {}", job.input.display()))?,
        );
    }

    Ok(report)
}
