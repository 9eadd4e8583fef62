//! Lunargen.toml manifest parsing and schema.
//!
//! The manifest lists the generator jobs of a project. Every section is
//! optional; a project without a manifest runs the built-in API profiles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codegen::naming::check_identifier;
use crate::codegen::version::VersionInfo;
use crate::codegen::ApiNames;
use crate::core::profile::{ApiJob, ProfileKind};
use crate::scan::ScanRules;
use crate::util::diagnostic::GenError;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Lunargen.toml";

/// An `[[api]]` entry: a built-in profile with optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSpec {
    pub profile: ProfileKind,
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub header_file: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub generated_source: Option<String>,
    #[serde(default)]
    pub module_header: Option<String>,
    #[serde(default)]
    pub guard: Option<String>,
    #[serde(default)]
    pub discard_include_blocks: Option<bool>,
    #[serde(default)]
    pub names: Option<ApiNames>,
}

impl ApiSpec {
    pub fn resolve(&self) -> ApiJob {
        let mut job = ApiJob::builtin(self.profile);
        if let Some(headers) = &self.headers {
            job.headers = headers.clone();
        }
        if let Some(dir) = &self.output_dir {
            job.output_dir = dir.clone();
        }
        if let Some(file) = &self.header_file {
            job.header_file = file.clone();
        }
        if self.source_file.is_some() {
            job.source_file = self.source_file.clone();
        }
        if self.generated_source.is_some() {
            job.generated_source = self.generated_source.clone();
        }
        if let Some(header) = &self.module_header {
            job.module_header = header.clone();
        }
        if let Some(guard) = &self.guard {
            job.guard = guard.clone();
        }
        if let Some(discard) = self.discard_include_blocks {
            job.discard_include_blocks = discard;
        }
        if let Some(names) = &self.names {
            job.names = names.clone();
        }
        job
    }
}

/// An `[[embed]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbedJob {
    pub input: PathBuf,
    pub symbol: String,
    pub output: PathBuf,
}

/// A `[[lua_constants]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LuaConstantsJob {
    #[serde(default)]
    pub prefix: String,
    pub function: String,
    pub output: PathBuf,
    pub headers: Vec<String>,
}

/// The `[version]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionJob {
    #[serde(default = "default_version_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub hash: String,
    /// Suffixes appended to `module_config`, each after a `.`.
    #[serde(default)]
    pub module_versions: Vec<String>,
    #[serde(flatten)]
    pub info: VersionInfo,
}

fn default_version_dir() -> PathBuf {
    PathBuf::from("core")
}

/// A `[[modules]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModulesJob {
    #[serde(default = "default_modules_output")]
    pub output: PathBuf,
    /// Directories searched for modules, in order.
    #[serde(default = "default_modules_search")]
    pub search: Vec<PathBuf>,
    #[serde(default)]
    pub recursive: bool,
}

impl Default for ModulesJob {
    fn default() -> Self {
        ModulesJob {
            output: default_modules_output(),
            search: default_modules_search(),
            recursive: false,
        }
    }
}

fn default_modules_output() -> PathBuf {
    PathBuf::from("modules/initialize_modules.gen.c")
}

fn default_modules_search() -> Vec<PathBuf> {
    vec![PathBuf::from("modules")]
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawManifest {
    scan: ScanRules,
    api: Vec<ApiSpec>,
    embed: Vec<EmbedJob>,
    lua_constants: Vec<LuaConstantsJob>,
    version: Option<VersionJob>,
    modules: Vec<ModulesJob>,
}

/// Parsed manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub scan: ScanRules,
    pub api: Vec<ApiJob>,
    pub embed: Vec<EmbedJob>,
    pub lua_constants: Vec<LuaConstantsJob>,
    pub version: Option<VersionJob>,
    pub modules: Vec<ModulesJob>,
    /// Directory containing the manifest; every job path is relative to it.
    pub root: PathBuf,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| GenError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        for (key, marker) in [
            ("scan.export_marker", &raw.scan.export_marker),
            ("scan.inline_marker", &raw.scan.inline_marker),
        ] {
            if marker.trim().is_empty() {
                return Err(GenError::InvalidManifest {
                    path: path.to_path_buf(),
                    message: format!("{key} must not be empty"),
                }
                .into());
            }
        }
        for names in raw.api.iter().filter_map(|spec| spec.names.as_ref()) {
            check_names(names)?;
        }
        for job in &raw.embed {
            check_identifier(&job.symbol, "an embedded array")?;
        }
        for job in &raw.lua_constants {
            check_identifier(&job.function, "a Lua registration function")?;
        }

        Ok(Manifest {
            scan: raw.scan,
            api: raw.api.iter().map(ApiSpec::resolve).collect(),
            embed: raw.embed,
            lua_constants: raw.lua_constants,
            version: raw.version,
            modules: raw.modules,
            root: path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        })
    }

    /// The manifest used when a project has no `Lunargen.toml`: every
    /// built-in API profile, nothing else.
    pub fn builtin(root: &Path) -> Self {
        Manifest {
            scan: ScanRules::default(),
            api: ProfileKind::ALL.into_iter().map(ApiJob::builtin).collect(),
            embed: Vec::new(),
            lua_constants: Vec::new(),
            version: None,
            modules: Vec::new(),
            root: root.to_path_buf(),
        }
    }

    /// The API job for `kind`, falling back to the built-in profile.
    pub fn api_job(&self, kind: ProfileKind) -> ApiJob {
        self.api
            .iter()
            .find(|job| job.kind == kind)
            .cloned()
            .unwrap_or_else(|| ApiJob::builtin(kind))
    }
}

fn check_names(names: &ApiNames) -> Result<(), GenError> {
    check_identifier(&names.slot_prefix, "a slot prefix")?;
    check_identifier(&names.interface, "an interface struct")?;
    check_identifier(&names.init_function, "an init function")?;
    check_identifier(&names.producer_instance, "an interface instance")?;
    check_identifier(&names.producer_init, "an init function")?;
    check_identifier(&names.allocator, "an allocator")
}
