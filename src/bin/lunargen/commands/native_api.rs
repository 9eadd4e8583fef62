//! `lunargen native-api` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::NativeApiArgs;
use lunargen::core::ProfileKind;
use lunargen::ops::{generate_api, ApiOptions};

pub fn execute(ctx: &CommandContext, args: NativeApiArgs) -> Result<()> {
    let job = ctx.project.manifest.api_job(ProfileKind::NativeApi);
    let opts = ApiOptions {
        api_files: true,
        generated_source: args.embed,
    };
    let report = generate_api(ctx.root(), &ctx.project.manifest.scan, &job, opts)?;
    ctx.finish(&report);
    Ok(())
}
