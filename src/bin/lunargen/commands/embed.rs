//! `lunargen embed` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::EmbedArgs;
use lunargen::core::manifest::EmbedJob;
use lunargen::ops::embed_file;

pub fn execute(ctx: &CommandContext, args: EmbedArgs) -> Result<()> {
    let job = EmbedJob {
        input: args.input,
        symbol: args.symbol,
        output: args.output,
    };
    let report = embed_file(&ctx.cwd, &job)?;
    ctx.finish(&report);
    Ok(())
}
