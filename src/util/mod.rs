//! Utility modules.

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod shell;

pub use diagnostic::GenError;
pub use shell::Shell;
