//! Error taxonomy for the generators.
//!
//! Missing and unreadable inputs are recovered locally by skipping the file;
//! these types describe them when they are reported. Everything else bubbles
//! up through `anyhow` to the CLI.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by scanning and generation.
#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    #[error("header {} does not exist", path.display())]
    #[diagnostic(code(lunargen::scan::missing_input))]
    MissingInputFile { path: PathBuf },

    #[error("could not open {}", path.display())]
    #[diagnostic(code(lunargen::scan::unreadable))]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not find Lunargen.toml in {} or any parent directory", start.display())]
    #[diagnostic(
        code(lunargen::manifest::not_found),
        help("Create a Lunargen.toml at the project root or pass --root")
    )]
    ManifestNotFound { start: PathBuf },

    #[error("invalid manifest {}: {message}", path.display())]
    #[diagnostic(code(lunargen::manifest::invalid))]
    InvalidManifest { path: PathBuf, message: String },

    #[error("unknown profile `{name}`")]
    #[diagnostic(
        code(lunargen::profile::unknown),
        help("Built-in profiles are dynamic-modules, native-application and native-api")
    )]
    UnknownProfile { name: String },

    #[error("`{name}` is not a valid C identifier for {what}")]
    #[diagnostic(
        code(lunargen::codegen::identifier),
        help("C identifiers start with a letter or `_` and contain only letters, digits and `_`")
    )]
    InvalidIdentifier { what: &'static str, name: String },
}
