//! `lunargen modules` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::ModulesArgs;
use lunargen::ops::generate_modules;

pub fn execute(ctx: &CommandContext, args: ModulesArgs) -> Result<()> {
    let mut job = ctx
        .project
        .manifest
        .modules
        .first()
        .cloned()
        .unwrap_or_default();

    if let Some(output) = args.output {
        job.output = ctx.cwd.join(output);
    }
    if !args.search.is_empty() {
        job.search = args.search.iter().map(|dir| ctx.cwd.join(dir)).collect();
    }
    job.recursive |= args.recursive;

    let report = generate_modules(ctx.root(), &job)?;
    ctx.finish(&report);
    Ok(())
}
