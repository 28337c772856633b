//! Project exporters
//!
//! An exporter turns an `ExportProject` into the text of one build system's
//! project file. Exporters are selected by a type name, as stored in project
//! settings:
//!
//! - `ExporterKind`: the known exporter variants
//! - `Exporter`: the capabilities every exporter provides
//! - `QtCreatorExporter`: qmake `.pro` output

mod error;
mod qt_creator;

pub use error::{ExportError, ExportResult};
pub use qt_creator::QtCreatorExporter;

use crate::codegen::QmakeSettings;
use crate::config::{BuildConfiguration, ConfigurationSet, PreprocessorDefineSet};
use crate::tree::{HeaderExtensions, ProjectItem};
use std::path::{Path, PathBuf};

/// Everything one export call reads
#[derive(Debug, Clone)]
pub struct ExportProject {
    /// Project name, used for the output file name and default target names
    pub name: String,
    /// Root of the project tree
    pub root: ProjectItem,
    /// Build configurations, in order
    pub configurations: ConfigurationSet,
    /// Folder holding the project; leaf paths are relative to it
    pub project_folder: PathBuf,
    /// Folder the build file is written to, relative to the project folder
    /// unless absolute
    pub target_folder: PathBuf,
    /// Extensions treated as headers
    pub header_extensions: HeaderExtensions,
    /// Flags, libraries and defines shared by all configurations
    pub settings: QmakeSettings,
}

impl ExportProject {
    /// Create a project with an empty tree and no configurations
    ///
    /// The project folder starts out empty, i.e. the current directory.
    #[must_use]
    pub fn new(name: impl Into<String>, target_folder: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            root: ProjectItem::group(name.as_str()),
            name,
            configurations: ConfigurationSet::new(),
            project_folder: PathBuf::new(),
            target_folder: target_folder.into(),
            header_extensions: HeaderExtensions::default(),
            settings: QmakeSettings::default(),
        }
    }
}

/// Settings for one configuration as read from project settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSettings {
    /// Configuration name
    pub name: String,
    /// Debug or release
    pub is_debug: bool,
    /// Optimisation level, if set
    pub optimisation: Option<u8>,
    /// Target binary name; empty means "use the project name"
    pub target_name: String,
    /// Header search paths
    pub header_search_paths: Vec<String>,
    /// Configuration defines
    pub defines: PreprocessorDefineSet,
    /// Raw extra compiler flags
    pub extra_compiler_flags: String,
}

/// A build system exporter
pub trait Exporter {
    /// Human-readable exporter name
    fn name(&self) -> &'static str;

    /// Type name identifying this exporter in project settings
    fn type_name(&self) -> &'static str;

    /// Build a configuration from its settings, filling exporter defaults
    fn create_build_config(&self, project_name: &str, settings: &ConfigSettings)
        -> BuildConfiguration;

    /// Generate the build file text for a project
    ///
    /// # Errors
    ///
    /// Returns an error if generation has to be aborted.
    fn generate(&self, project: &ExportProject) -> ExportResult<String>;

    /// Path of the generated file, relative to the project folder
    fn output_file(&self, project: &ExportProject) -> PathBuf;
}

/// Known exporter variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterKind {
    /// Qt Creator / qmake
    QtCreator,
}

impl ExporterKind {
    /// All known kinds
    pub const ALL: &'static [Self] = &[Self::QtCreator];

    /// Select an exporter by its type name
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnknownExporter`] for unknown names.
    pub fn from_type_name(name: &str) -> ExportResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.exporter().type_name() == name)
            .ok_or_else(|| ExportError::UnknownExporter(name.to_string()))
    }

    /// The exporter implementing this kind
    #[must_use]
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::QtCreator => Box::new(QtCreatorExporter),
        }
    }

    /// Default target folder for this kind, relative to the project folder
    #[must_use]
    pub fn default_target_folder(self) -> &'static Path {
        match self {
            Self::QtCreator => Path::new("Builds/QtCreator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type_name() {
        assert_eq!(
            ExporterKind::from_type_name("QT_CREATOR"),
            Ok(ExporterKind::QtCreator)
        );
    }

    #[test]
    fn test_from_unknown_type_name() {
        assert_eq!(
            ExporterKind::from_type_name("XCODE_MAC"),
            Err(ExportError::UnknownExporter("XCODE_MAC".to_string()))
        );
    }

    #[test]
    fn test_exporter_identity() {
        let exporter = ExporterKind::QtCreator.exporter();
        assert_eq!(exporter.name(), "QtCreator");
        assert_eq!(exporter.type_name(), "QT_CREATOR");
        assert_eq!(
            ExporterKind::QtCreator.default_target_folder(),
            Path::new("Builds/QtCreator")
        );
    }

    #[test]
    fn test_new_project_is_empty() {
        let project = ExportProject::new("Demo", ".");
        assert_eq!(project.root.file_count(), 0);
        assert!(project.configurations.is_empty());
        assert_eq!(project.root.name(), "Demo");
        assert_eq!(project.project_folder, PathBuf::new());
    }
}
