//! Version header generation.

use std::path::Path;

use anyhow::Result;

use crate::codegen::version::{version_hash_source, version_header};
use crate::core::manifest::VersionJob;
use crate::ops::GenerateReport;
use crate::util::fs::write_string;

/// Write `version_info.gen.h` and `version_info.gen.c` into the job's directory.
pub fn generate_version(root: &Path, job: &VersionJob) -> Result<GenerateReport> {
    let mut report = GenerateReport::new();
    let dir = root.join(&job.output_dir);

    let header = dir.join("version_info.gen.h");
    let mut info = job.info.clone();
    for suffix in &job.module_versions {
        info.add_module_version(suffix);
    }
    write_string(&header, &version_header(&info))?;
    report.record("version", &header);

    if job.hash.is_empty() {
        report.warn("no version hash given, VERSION_HASH is empty");
    }
    let source = dir.join("version_info.gen.c");
    write_string(&source, &version_hash_source(&job.hash))?;
    report.record("version", &source);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::version::VersionInfo;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_generate_version() {
        let tmp = TempDir::new().unwrap();
        let job = VersionJob {
            output_dir: PathBuf::from("core"),
            hash: "0123abcd".to_string(),
            module_versions: vec!["lua".to_string(), "box2d".to_string()],
            info: VersionInfo::default(),
        };

        let report = generate_version(tmp.path(), &job).unwrap();
        assert_eq!(report.files.len(), 2);
        assert!(report.warnings.is_empty());

        let source = fs::read_to_string(tmp.path().join("core/version_info.gen.c")).unwrap();
        assert!(source.contains("VERSION_HASH = \"0123abcd\";"));
        let header = fs::read_to_string(tmp.path().join("core/version_info.gen.h")).unwrap();
        assert!(header.contains("#define VERSION_MODULE_CONFIG \".lua.box2d\"\n"));
    }
}
