//! Project management module
//!
//! - `Manifest`: project description from `qtexport.toml`
//! - `Project`: a loaded manifest with its export input
//! - `Loader`: builds the project tree and configurations from a manifest

mod loader;
mod manifest;

pub use loader::{LoadError, Loader, Project};
pub use manifest::{
    ConfigurationConfig, ExporterConfig, ItemConfig, Manifest, ManifestError, ProjectInfo,
    MANIFEST_FILE,
};
