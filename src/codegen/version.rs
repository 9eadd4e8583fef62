//! Version header and version hash source.

use serde::{Deserialize, Serialize};

use super::exports::GENERATED_BANNER;

/// Values written into `version_info.gen.h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub short_name: String,
    pub name: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub status: String,
    pub build: String,
    pub module_config: String,
    pub year: u32,
    pub website: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        VersionInfo {
            short_name: "lunar_sprites".to_string(),
            name: "Lunar Sprites".to_string(),
            major: 0,
            minor: 1,
            patch: 0,
            status: "dev".to_string(),
            build: "custom_build".to_string(),
            module_config: String::new(),
            year: 2024,
            website: String::new(),
        }
    }
}

impl VersionInfo {
    /// Append a module version suffix (`.name`) to the module config string.
    pub fn add_module_version(&mut self, suffix: &str) {
        self.module_config.push('.');
        self.module_config.push_str(suffix);
    }
}

/// Render `version_info.gen.h`.
pub fn version_header(info: &VersionInfo) -> String {
    format!(
        "{GENERATED_BANNER}\n\
         #ifndef VERSION_INFO_GEN_H\n\
         #define VERSION_INFO_GEN_H\n\
         \n\
         #define VERSION_SHORT_NAME \"{short_name}\"\n\
         #define VERSION_NAME \"{name}\"\n\
         #define VERSION_MAJOR {major}\n\
         #define VERSION_MINOR {minor}\n\
         #define VERSION_PATCH {patch}\n\
         #define VERSION_STATUS \"{status}\"\n\
         #define VERSION_BUILD \"{build}\"\n\
         #define VERSION_MODULE_CONFIG \"{module_config}\"\n\
         #define VERSION_YEAR {year}\n\
         #define VERSION_WEBSITE \"{website}\"\n\
         \n\
         #endif // VERSION_INFO_GEN_H\n",
        short_name = info.short_name,
        name = info.name,
        major = info.major,
        minor = info.minor,
        patch = info.patch,
        status = info.status,
        build = info.build,
        module_config = info.module_config,
        year = info.year,
        website = info.website,
    )
}

/// Render `version_info.gen.c`. An empty hash is written as-is.
pub fn version_hash_source(hash: &str) -> String {
    format!(
        "{GENERATED_BANNER}\n#include \"core/version.h\"\nconst char *const VERSION_HASH = \"{hash}\";\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let mut info = VersionInfo {
            major: 1,
            minor: 2,
            patch: 3,
            status: "beta".to_string(),
            ..VersionInfo::default()
        };
        info.add_module_version("lua");

        let out = version_header(&info);
        assert!(out.starts_with("/* THIS FILE IS GENERATED DO NOT EDIT */\n#ifndef VERSION_INFO_GEN_H\n"));
        assert!(out.contains("#define VERSION_MAJOR 1\n#define VERSION_MINOR 2\n#define VERSION_PATCH 3\n"));
        assert!(out.contains("#define VERSION_STATUS \"beta\"\n"));
        assert!(out.contains("#define VERSION_MODULE_CONFIG \".lua\"\n"));
        assert!(out.ends_with("#endif // VERSION_INFO_GEN_H\n"));
    }

    #[test]
    fn test_hash_source() {
        assert_eq!(
            version_hash_source("abc123"),
            "/* THIS FILE IS GENERATED DO NOT EDIT */\n\
             #include \"core/version.h\"\n\
             const char *const VERSION_HASH = \"abc123\";\n"
        );
    }
}
