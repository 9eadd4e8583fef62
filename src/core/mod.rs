//! Project model: manifest, built-in profiles and root discovery.

pub mod manifest;
pub mod profile;
pub mod project;

pub use manifest::{Manifest, MANIFEST_NAME};
pub use profile::{ApiJob, ProfileKind};
pub use project::Project;
