//! CLI integration tests for Lunargen.
//!
//! These tests run the binary against small header trees in temporary
//! directories and check the generated files.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the lunargen binary command.
fn lunargen() -> Command {
    let mut cmd = Command::cargo_bin("lunargen").unwrap();
    cmd.arg("--color").arg("never");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(root: &Path, path: &str, contents: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

const CORE_H: &str = "\
#ifndef CORE_H
#define CORE_H

#define LS_TICKS 60

typedef struct {
\tint width;
\tint height;
} LSSize;

LS_EXPORT LSSize ls_window_size(void);
LS_EXPORT extern int ls_frame;

#endif // CORE_H
";

// ============================================================================
// lunargen embed
// ============================================================================

#[test]
fn test_embed_writes_byte_array() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("data.bin"), [0u8, 255, 10]).unwrap();

    lunargen()
        .args(["embed", "data.bin", "--symbol", "kData", "--output", "data.gen.c"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"));

    let out = fs::read_to_string(tmp.path().join("data.gen.c")).unwrap();
    assert_eq!(out, "const char *const kData = (const char[4]){\n\t0, 255, 10, 0\n};\n");
}

#[test]
fn test_embed_rejects_bad_symbol() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("data.bin"), b"x").unwrap();

    lunargen()
        .args(["embed", "data.bin", "--symbol", "2d-data", "--output", "data.gen.c"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid C identifier"));

    assert!(!tmp.path().join("data.gen.c").exists());
}

// ============================================================================
// lunargen api / dynamic-module / native-api
// ============================================================================

#[test]
fn test_api_with_builtin_profile() {
    let tmp = temp_dir();
    write(tmp.path(), "core/core.h", CORE_H);

    lunargen()
        .args(["api", "--root"])
        .arg(tmp.path())
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("does not exist"));

    let dir = tmp.path().join("modules/dynamic_modules");
    let header = fs::read_to_string(dir.join("ls_api.h")).unwrap();
    assert!(header.contains("#ifndef LS_API_H\n"));
    assert!(header.contains("#define LS_TICKS 60\n"));
    assert!(header.contains("#define ls_window_size _impl_ls_window_size\n"));
    assert!(header.contains("#define ls_frame _impl_ls_frame\n"));

    let source = fs::read_to_string(dir.join("ls_api.c")).unwrap();
    assert!(source.contains("#include \"ls_api.h\""));
    assert!(source.contains("\t_impl_ls_frame = interface->_impl_ls_frame;\n"));

    assert!(!dir.join("dynamic_modules.gen.c").exists());
}

#[test]
fn test_missing_headers_warned_once() {
    let tmp = temp_dir();
    write(tmp.path(), "core/core.h", CORE_H);

    lunargen()
        .arg("api")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("header core/log.h does not exist").count(1))
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let tmp = temp_dir();
    write(tmp.path(), "core/core.h", CORE_H);

    lunargen()
        .args(["--quiet", "api"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(tmp.path().join("modules/dynamic_modules/ls_api.h").exists());
}

#[test]
fn test_api_unknown_profile() {
    let tmp = temp_dir();

    lunargen()
        .args(["api", "--profile", "web"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile `web`"));
}

#[test]
fn test_dynamic_module_requires_indirect_profile() {
    let tmp = temp_dir();

    lunargen()
        .args(["dynamic-module", "--profile", "native-api"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not produce a dynamic module source"));
}

#[test]
fn test_native_api_embed() {
    let tmp = temp_dir();
    write(tmp.path(), "core/core.h", CORE_H);

    lunargen()
        .args(["native-api", "--embed"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("native_api.gen.c"));

    let dir = tmp.path().join("modules/native_api");
    let header = fs::read_to_string(dir.join("ls_api.h")).unwrap();
    assert!(header.contains("LS_IMPORT LSSize ls_window_size(void);\n"));
    assert!(!header.contains("LS_EXPORT"));

    let source = fs::read_to_string(dir.join("native_api.gen.c")).unwrap();
    assert!(source.contains("const unsigned char *LS_API_HEADER"));
}

// ============================================================================
// lunargen generate
// ============================================================================

#[test]
fn test_generate_runs_manifest_jobs() {
    let tmp = temp_dir();
    write(tmp.path(), "core/core.h", CORE_H);
    write(tmp.path(), "modules/lua/module_initialize.h", "");
    write(
        tmp.path(),
        "Lunargen.toml",
        r#"
[[api]]
profile = "dynamic-modules"
headers = ["core/*.h"]

[[lua_constants]]
prefix = "LS_"
function = "ls_lua_push_core"
output = "modules/lua/core_constants.gen.c"
headers = ["core/core.h"]

[version]
hash = "c0ffee"

[[modules]]
"#,
    );

    // Run from a subdirectory to exercise manifest discovery
    lunargen()
        .arg("generate")
        .current_dir(tmp.path().join("core"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished"));

    assert!(tmp.path().join("core/version_info.gen.h").exists());
    assert!(tmp.path().join("modules/initialize_modules.gen.c").exists());

    let generated =
        fs::read_to_string(tmp.path().join("modules/dynamic_modules/dynamic_modules.gen.c"))
            .unwrap();
    assert!(generated.contains("#include \"core/core.h\"\n"));
    assert!(generated.contains("LS_API_SOURCE"));

    let lua = fs::read_to_string(tmp.path().join("modules/lua/core_constants.gen.c")).unwrap();
    assert!(lua.contains("\tlua_pushinteger(L, LS_TICKS);\n\tlua_setfield(L, table_index, \"TICKS\");\n"));
}

#[test]
fn test_generate_json_messages() {
    let tmp = temp_dir();
    write(tmp.path(), "shader.vert", "void main() {}\n");
    write(
        tmp.path(),
        "Lunargen.toml",
        r#"
[[embed]]
input = "shader.vert"
symbol = "SHADER_VERT"
output = "shader.vert.gen.c"
"#,
    );

    lunargen()
        .args(["--message-format", "json", "generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reason\":\"generated-file\""))
        .stdout(predicate::str::contains("\"generator\":\"embed\""));
}

#[test]
fn test_generate_rejects_invalid_manifest() {
    let tmp = temp_dir();
    write(tmp.path(), "Lunargen.toml", "[[api]]\nprofile = 3\n");

    lunargen()
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid manifest"));
}

// ============================================================================
// lunargen lua-constants / version / scan
// ============================================================================

#[test]
fn test_lua_constants() {
    let tmp = temp_dir();
    write(
        tmp.path(),
        "keys.h",
        "typedef enum {\n\tLS_KEY_A = 65,\n\tLS_KEY_B,\n} LSKey;\n#define LS_SPEED 1.5f\n",
    );

    lunargen()
        .args([
            "lua-constants",
            "--prefix",
            "LS_",
            "--function",
            "ls_push_keys",
            "--output",
            "keys.gen.c",
            "keys.h",
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    let out = fs::read_to_string(tmp.path().join("keys.gen.c")).unwrap();
    assert!(out.contains("void ls_push_keys(lua_State *L, int32 table_index) {\n"));
    assert!(out.contains("\t// LSKey\n"));
    assert!(out.contains("\tlua_pushnumber(L, LS_SPEED);\n"));
    assert!(out.ends_with("}\n"));
}

#[test]
fn test_version_with_hash() {
    let tmp = temp_dir();

    lunargen()
        .args(["version", "--hash", "abc123", "--status", "stable", "--output-dir", "gen"])
        .args(["--module-version", "lua"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let header = fs::read_to_string(tmp.path().join("gen/version_info.gen.h")).unwrap();
    assert!(header.contains("#define VERSION_STATUS \"stable\"\n"));
    assert!(header.contains("#define VERSION_MODULE_CONFIG \".lua\"\n"));
    let source = fs::read_to_string(tmp.path().join("gen/version_info.gen.c")).unwrap();
    assert!(source.contains("VERSION_HASH = \"abc123\";"));
}

#[test]
fn test_scan_prints_blocks() {
    let tmp = temp_dir();
    write(tmp.path(), "core.h", CORE_H);

    lunargen()
        .args(["scan", "core.h"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("// ---- macros ----\n#define LS_TICKS 60\n"))
        .stdout(predicate::str::contains("LS_EXPORT extern int ls_frame;"));
}

#[test]
fn test_scan_json_reports_missing() {
    let tmp = temp_dir();
    write(tmp.path(), "core.h", CORE_H);

    lunargen()
        .args(["scan", "--json", "core.h", "gone.h"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"missing\": [\n    \"gone.h\"\n  ]"))
        .stdout(predicate::str::contains("\"typedefs\""));
}
