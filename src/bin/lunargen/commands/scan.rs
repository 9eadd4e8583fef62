//! `lunargen scan` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::ScanArgs;
use lunargen::ops::scan_headers;
use lunargen::util::shell::Status;

pub fn execute(ctx: &CommandContext, args: ScanArgs) -> Result<()> {
    let (_, aggregated) = scan_headers(&ctx.cwd, &ctx.project.manifest.scan, &args.headers)?;

    for header in &aggregated.scanned {
        ctx.shell.verbose(Status::Scanning, header.display());
    }
    for missing in &aggregated.missing {
        ctx.shell.warn(format!("header {} does not exist", missing.display()));
    }
    for unreadable in &aggregated.unreadable {
        ctx.shell.warn(format!("could not read {}", unreadable.display()));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&aggregated)?);
        return Ok(());
    }

    for (title, block) in [
        ("macros", aggregated.macros()),
        ("typedefs", aggregated.typedefs()),
        ("exports", aggregated.exports()),
    ] {
        println!("// ---- {} ----", title);
        print!("{}", block);
    }
    Ok(())
}
