//! `lunargen generate` command

use anyhow::Result;

use super::CommandContext;
use lunargen::ops::generate_all;
use lunargen::util::shell::Status;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.project.manifest_path.is_none() {
        ctx.shell.status(
            Status::Info,
            format!("no Lunargen.toml, running built-in profiles in {}", ctx.root().display()),
        );
    }

    let report = generate_all(&ctx.project.manifest)?;
    ctx.finish(&report);
    Ok(())
}
