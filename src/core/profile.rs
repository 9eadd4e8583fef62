//! Built-in API generator profiles.
//!
//! Each profile names an ordered header list and where its output goes. The
//! header order matters: blocks are concatenated in list order, so a header
//! must come after everything its macros and typedefs refer to.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codegen::{ApiNames, ExportStyle};
use crate::scan::ScanRules;
use crate::util::diagnostic::GenError;

/// Which API surface a job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    /// Indirected API for dynamically loaded modules.
    DynamicModules,
    /// Import-only API for native applications linking the engine.
    NativeApplication,
    /// Import-only API with the header text embedded in a source file.
    NativeApi,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::DynamicModules,
        ProfileKind::NativeApplication,
        ProfileKind::NativeApi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::DynamicModules => "dynamic-modules",
            ProfileKind::NativeApplication => "native-application",
            ProfileKind::NativeApi => "native-api",
        }
    }

    pub fn style(&self) -> ExportStyle {
        match self {
            ProfileKind::DynamicModules => ExportStyle::Indirect,
            ProfileKind::NativeApplication | ProfileKind::NativeApi => ExportStyle::Import,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenError::UnknownProfile {
                name: s.to_string(),
            })
    }
}

/// A fully resolved API generator job. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiJob {
    pub kind: ProfileKind,
    pub headers: Vec<String>,
    pub output_dir: PathBuf,
    pub header_file: String,
    /// Consumer source with the indirection slots (indirect style only).
    pub source_file: Option<String>,
    /// Combined source embedding the generated text.
    pub generated_source: Option<String>,
    /// Header the generated source includes first.
    pub module_header: String,
    pub guard: String,
    pub discard_include_blocks: bool,
    pub names: ApiNames,
}

impl ApiJob {
    pub fn builtin(kind: ProfileKind) -> Self {
        let (dir, headers, source_file, generated_source, module_header) = match kind {
            ProfileKind::DynamicModules => (
                "modules/dynamic_modules",
                DYNAMIC_MODULES_HEADERS,
                Some("ls_api.c"),
                Some("dynamic_modules.gen.c"),
                "dynamic_modules.h",
            ),
            ProfileKind::NativeApplication => (
                "modules/native_application",
                NATIVE_APPLICATION_HEADERS,
                None,
                None,
                "native_application.h",
            ),
            ProfileKind::NativeApi => (
                "modules/native_api",
                NATIVE_API_HEADERS,
                None,
                Some("native_api.gen.c"),
                "native_api.h",
            ),
        };

        ApiJob {
            kind,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            output_dir: PathBuf::from(dir),
            header_file: "ls_api.h".to_string(),
            source_file: source_file.map(str::to_string),
            generated_source: generated_source.map(str::to_string),
            module_header: module_header.to_string(),
            guard: "LS_API_H".to_string(),
            discard_include_blocks: kind.style() == ExportStyle::Import,
            names: ApiNames::default(),
        }
    }

    pub fn style(&self) -> ExportStyle {
        self.kind.style()
    }

    /// Scan rules for this job on top of the project-wide rules.
    pub fn rules(&self, base: &ScanRules) -> ScanRules {
        base.clone()
            .with_discard_include_blocks(base.discard_include_blocks || self.discard_include_blocks)
    }
}

const DYNAMIC_MODULES_HEADERS: &[&str] = &[
    "core/version_info.gen.h",
    "core/version.h",
    "core/types/typedefs.h",
    "core/types/string.h",
    "core/log.h",
    "core/memory.h",
    "core/debug.h",
    "core/types/vector/vector2.h",
    "core/types/slice.h",
    "core/types/hashtable.h",
    "core/flags.h",
    "core/window.h",
    "core/input/keycodes.h",
    "core/input/input_manager.h",
    "core/events/events.h",
    "core/events/event_manager.h",
    "core/os/os.h",
    "core/core.h",
    "renderer/window.h",
    "renderer/renderer.h",
    "main/application.h",
    "main/lunar_sprites.h",
    "modules/initialize_modules.h",
    "modules/dynamic_modules/dynamic_modules.h",
];

const NATIVE_APPLICATION_HEADERS: &[&str] = &[
    "core/api.h",
    "core/version_info.gen.h",
    "core/version.h",
    "core/types/typedefs.h",
    "core/types/string.h",
    "core/log.h",
    "core/memory.h",
    "core/path.h",
    "core/time.h",
    "core/debug.h",
    "core/types/vector/vector2.h",
    "core/types/slice.h",
    "core/types/hashtable.h",
    "core/flags.h",
    "core/window.h",
    "core/input/keycodes.h",
    "core/input/input_manager.h",
    "core/events/events.h",
    "core/events/event_manager.h",
    "core/os/os.h",
    "core/core.h",
    "renderer/window.h",
    "renderer/renderer.h",
    "main/application.h",
    "main/project_settings.h",
    "main/lunar_sprites.h",
    "modules/native_application/native_application.h",
];

const NATIVE_API_HEADERS: &[&str] = &[
    "modules/native_api/native_api.h",
    "core/api.h",
    "core/version_info.gen.h",
    "core/version.h",
    "core/types/typedefs.h",
    "core/types/string.h",
    "core/log.h",
    "core/memory.h",
    "core/debug.h",
    "core/types/hashtable.h",
    "core/types/vector/vector2.h",
    "core/flags.h",
    "core/window.h",
    "core/input/keycodes.h",
    "core/input/input_manager.h",
    "core/events/events.h",
    "core/events/event_manager.h",
    "core/os/os.h",
    "core/core.h",
    "renderer/window.h",
    "renderer/renderer.h",
];
