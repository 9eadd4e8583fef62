//! `lunargen lua-constants` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::LuaConstantsArgs;
use lunargen::core::manifest::LuaConstantsJob;
use lunargen::ops::generate_lua_constants;

pub fn execute(ctx: &CommandContext, args: LuaConstantsArgs) -> Result<()> {
    // Command-line paths are relative to the working directory
    let job = LuaConstantsJob {
        prefix: args.prefix,
        function: args.function,
        output: args.output,
        headers: args.headers,
    };
    let report = generate_lua_constants(&ctx.cwd, &job)?;
    ctx.finish(&report);
    Ok(())
}
