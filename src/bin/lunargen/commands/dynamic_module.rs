//! `lunargen dynamic-module` command

use anyhow::{bail, Result};

use super::CommandContext;
use crate::cli::ProfileArgs;
use lunargen::codegen::ExportStyle;
use lunargen::core::ProfileKind;
use lunargen::ops::{generate_api, ApiOptions};

pub fn execute(ctx: &CommandContext, args: ProfileArgs) -> Result<()> {
    let kind: ProfileKind = args.profile.parse()?;
    let job = ctx.project.manifest.api_job(kind);

    if job.style() != ExportStyle::Indirect || job.generated_source.is_none() {
        bail!("profile {} does not produce a dynamic module source", kind);
    }

    let opts = ApiOptions {
        api_files: false,
        generated_source: true,
    };
    let report = generate_api(ctx.root(), &ctx.project.manifest.scan, &job, opts)?;
    ctx.finish(&report);
    Ok(())
}
