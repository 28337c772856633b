//! Project loader
//!
//! Turns a manifest into the `ExportProject` an exporter consumes.

use super::manifest::{ItemConfig, Manifest, ManifestError};
use crate::codegen::QmakeSettings;
use crate::exporter::{ConfigSettings, ExportError, ExportProject, Exporter, ExporterKind};
use crate::tree::{Group, HeaderExtensions, Leaf, ProjectItem};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A project loaded from its manifest
#[derive(Debug)]
pub struct Project {
    /// The project manifest
    pub manifest: Manifest,
    /// Directory containing the manifest
    pub root: PathBuf,
    /// Selected exporter
    pub kind: ExporterKind,
    /// Export input built from the manifest
    pub export: ExportProject,
}

impl Project {
    /// Get the project name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.project.name
    }

    /// The exporter selected by the manifest
    #[must_use]
    pub fn exporter(&self) -> Box<dyn Exporter> {
        self.kind.exporter()
    }

    /// Absolute-or-cwd-relative path of the file the exporter writes
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.root.join(self.exporter().output_file(&self.export))
    }
}

/// Project loader
pub struct Loader;

impl Loader {
    /// Load a project from a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded, names an unknown
    /// exporter, or the current directory cannot be determined.
    pub fn load_project(manifest_path: &Path) -> Result<Project, LoadError> {
        let manifest = Manifest::load(manifest_path).map_err(LoadError::Manifest)?;

        let root = manifest_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        // Absolute, so that an absolute target folder can be related to it
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map_err(|e| LoadError::Io {
                    path: root.clone(),
                    source: e,
                })?
                .join(root)
        };

        Self::from_manifest(manifest, root)
    }

    /// Build a project from an already loaded manifest
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest names an unknown exporter.
    pub fn from_manifest(manifest: Manifest, root: PathBuf) -> Result<Project, LoadError> {
        let kind = ExporterKind::from_type_name(&manifest.exporter.kind)?;
        let exporter = kind.exporter();
        let name = manifest.project.name.clone();

        let target_folder = manifest
            .exporter
            .target_folder
            .clone()
            .unwrap_or_else(|| kind.default_target_folder().to_path_buf());

        let mut export = ExportProject::new(name.as_str(), target_folder);
        export.project_folder = root.clone();

        let mut tree = Group::new(name.as_str());
        for item in &manifest.items {
            tree.push(build_item(item));
        }
        export.root = tree.into();

        for entry in &manifest.configurations {
            let settings = ConfigSettings {
                name: entry.name.clone(),
                is_debug: entry.debug,
                optimisation: entry.optimisation,
                target_name: entry.target_name.clone(),
                header_search_paths: entry.header_search_paths.clone(),
                defines: entry.defines.clone(),
                extra_compiler_flags: entry.extra_compiler_flags.clone(),
            };
            export
                .configurations
                .push(exporter.create_build_config(&name, &settings));
        }

        if let Some(extensions) = &manifest.exporter.header_extensions {
            export.header_extensions = HeaderExtensions::new(extensions);
        }

        export.settings = QmakeSettings {
            shared_library: manifest.exporter.shared_library,
            external_libraries: manifest.exporter.external_libraries.clone(),
            extra_compiler_flags: manifest.exporter.extra_compiler_flags.clone(),
            extra_search_paths: manifest.exporter.extra_search_paths.clone(),
            unix_libraries: manifest.exporter.unix_libraries.clone(),
            windows_libraries: manifest.exporter.windows_libraries.clone(),
            defines: manifest.project.defines.clone(),
        };

        for missing in missing_files(&export.root, &root) {
            warn!(file = %missing.display(), "project file does not exist");
        }

        debug!(
            project = %name,
            exporter = exporter.name(),
            files = export.root.file_count(),
            configurations = export.configurations.len(),
            "loaded project"
        );

        Ok(Project {
            manifest,
            root,
            kind,
            export,
        })
    }
}

fn build_item(item: &ItemConfig) -> ProjectItem {
    match item {
        ItemConfig::Group { group, items } => {
            let mut node = Group::new(group.as_str());
            for child in items {
                node.push(build_item(child));
            }
            node.into()
        }
        ItemConfig::File { file, compile } => {
            let leaf = Leaf::new(file.as_path());
            match compile {
                Some(compile) => leaf.with_compile(*compile).into(),
                None => leaf.into(),
            }
        }
    }
}

fn missing_files(item: &ProjectItem, root: &Path) -> Vec<PathBuf> {
    match item {
        ProjectItem::Group(group) => group
            .children
            .iter()
            .flat_map(|child| missing_files(child, root))
            .collect(),
        ProjectItem::Leaf(leaf) => {
            let path = root.join(&leaf.path);
            if path.exists() {
                Vec::new()
            } else {
                vec![path]
            }
        }
    }
}

/// Errors that can occur when loading a project
#[derive(Debug)]
pub enum LoadError {
    /// Manifest error
    Manifest(ManifestError),
    /// Exporter selection error
    Exporter(ExportError),
    /// IO error resolving the project folder
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl From<ExportError> for LoadError {
    fn from(error: ExportError) -> Self {
        LoadError::Exporter(error)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Manifest(e) => write!(f, "{e}"),
            LoadError::Exporter(e) => write!(f, "{e}"),
            LoadError::Io { path, source } => {
                write!(f, "IO error resolving {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Manifest(e) => Some(e),
            LoadError::Exporter(e) => Some(e),
            LoadError::Io { source, .. } => Some(source),
        }
    }
}
