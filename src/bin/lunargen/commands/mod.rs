//! Command implementations

pub mod api;
pub mod dynamic_module;
pub mod embed;
pub mod generate;
pub mod lua_constants;
pub mod modules;
pub mod native_api;
pub mod scan;
pub mod version;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::Cli;
use lunargen::core::Project;
use lunargen::ops::GenerateReport;
use lunargen::util::config::{global_config_path, load_config, project_config_path};
use lunargen::util::fs::relative_path;
use lunargen::util::Shell;

/// State shared by every command: where we are and how to talk.
pub struct CommandContext {
    pub cwd: PathBuf,
    pub project: Project,
    pub shell: Shell,
    started: Instant,
}

impl CommandContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let root = cli.root.as_ref().map(|r| cwd.join(r));
        let project = Project::discover(&cwd, root.as_deref())?;

        // Load configuration (global + project), CLI flags override both
        let config = load_config(
            global_config_path().as_deref(),
            &project_config_path(project.root()),
        );
        let shell = Shell::from_flags(
            cli.quiet || (!cli.verbose && config.quiet()),
            cli.verbose || config.verbose(),
            cli.color.unwrap_or_else(|| config.color()),
            cli.message_format == "json",
        );

        if let Some(path) = &project.manifest_path {
            tracing::debug!("using manifest {}", path.display());
        }

        Ok(CommandContext {
            cwd,
            project,
            shell,
            started: Instant::now(),
        })
    }

    pub fn root(&self) -> &Path {
        self.project.root()
    }

    /// Print warnings, generated files and the summary line of a report.
    pub fn finish(&self, report: &GenerateReport) {
        for warning in &report.warnings {
            self.shell.warn(warning);
        }
        for file in &report.files {
            let shown = relative_path(&self.cwd, &file.path);
            self.shell.generated(file.generator, &shown);
        }
        self.shell.finished(report.files.len(), self.started.elapsed());
    }
}
