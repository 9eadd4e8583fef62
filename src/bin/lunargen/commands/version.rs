//! `lunargen version` command

use std::path::PathBuf;

use anyhow::Result;

use super::CommandContext;
use crate::cli::VersionArgs;
use lunargen::codegen::version::VersionInfo;
use lunargen::core::manifest::VersionJob;
use lunargen::ops::generate_version;

pub fn execute(ctx: &CommandContext, args: VersionArgs) -> Result<()> {
    let mut job = ctx.project.manifest.version.clone().unwrap_or_else(|| VersionJob {
        output_dir: PathBuf::from("core"),
        hash: String::new(),
        module_versions: Vec::new(),
        info: VersionInfo::default(),
    });

    // CLI overrides the [version] section
    if let Some(dir) = args.output_dir {
        job.output_dir = ctx.cwd.join(dir);
    }
    if let Some(hash) = args.hash {
        job.hash = hash;
    }
    if let Some(build) = args.build {
        job.info.build = build;
    }
    if let Some(status) = args.status {
        job.info.status = status;
    }
    job.module_versions.extend(args.module_version);

    let report = generate_version(ctx.root(), &job)?;
    ctx.finish(&report);
    Ok(())
}
