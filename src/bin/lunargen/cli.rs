//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lunargen::util::shell::ColorChoice;

/// Lunargen - C header scanner and API glue generator
#[derive(Parser)]
#[command(name = "lunargen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Output format for messages
    #[arg(
        long,
        global = true,
        value_name = "FMT",
        value_parser = ["human", "json"],
        default_value = "human"
    )]
    pub message_format: String,

    /// Project root (defaults to the nearest directory with Lunargen.toml)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every job in Lunargen.toml (or every built-in profile)
    Generate,

    /// Generate the public API header and its companion source
    Api(ProfileArgs),

    /// Generate the dynamic module source embedding the API text
    DynamicModule(ProfileArgs),

    /// Generate the import-only native API header
    NativeApi(NativeApiArgs),

    /// Generate Lua constant bindings from C headers
    LuaConstants(LuaConstantsArgs),

    /// Embed a file as a C byte array
    Embed(EmbedArgs),

    /// Generate the version header and version hash source
    Version(VersionArgs),

    /// Generate the module registration source
    Modules(ModulesArgs),

    /// Print the macro, typedef and export blocks found in headers
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Profile: dynamic-modules, native-application, native-api
    #[arg(long, default_value = "dynamic-modules")]
    pub profile: String,
}

#[derive(Args)]
pub struct NativeApiArgs {
    /// Also write the source embedding the header text
    #[arg(long)]
    pub embed: bool,
}

#[derive(Args)]
pub struct LuaConstantsArgs {
    /// Prefix removed from the Lua field names
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Name of the generated C function
    #[arg(long)]
    pub function: String,

    /// Output source file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Headers to scan, in order
    #[arg(required = true)]
    pub headers: Vec<String>,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// File to embed
    pub input: PathBuf,

    /// Name of the generated array
    #[arg(long)]
    pub symbol: String,

    /// Output source file
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Directory for version_info.gen.h and version_info.gen.c
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Commit hash written as VERSION_HASH
    #[arg(long)]
    pub hash: Option<String>,

    /// Build name
    #[arg(long)]
    pub build: Option<String>,

    /// Release status (dev, beta, stable, ...)
    #[arg(long)]
    pub status: Option<String>,

    /// Module version suffix appended to VERSION_MODULE_CONFIG (repeatable)
    #[arg(long, value_name = "SUFFIX")]
    pub module_version: Vec<String>,
}

#[derive(Args)]
pub struct ModulesArgs {
    /// Output source file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directories to search for modules
    #[arg(long)]
    pub search: Vec<PathBuf>,

    /// Search the directories recursively
    #[arg(long)]
    pub recursive: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Headers to scan, in order
    #[arg(required = true)]
    pub headers: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
