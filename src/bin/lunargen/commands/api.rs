//! `lunargen api` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::ProfileArgs;
use lunargen::core::ProfileKind;
use lunargen::ops::{generate_api, ApiOptions};
use lunargen::util::shell::Status;

pub fn execute(ctx: &CommandContext, args: ProfileArgs) -> Result<()> {
    let kind: ProfileKind = args.profile.parse()?;
    let job = ctx.project.manifest.api_job(kind);
    ctx.shell
        .verbose(Status::Scanning, format!("{} headers for {}", job.headers.len(), kind));

    let opts = ApiOptions {
        api_files: true,
        generated_source: false,
    };
    let report = generate_api(ctx.root(), &ctx.project.manifest.scan, &job, opts)?;
    ctx.finish(&report);
    Ok(())
}
