//! Qt Creator exporter

use super::{ConfigSettings, ExportProject, ExportResult, Exporter};
use crate::codegen::QmakeGenerator;
use crate::config::BuildConfiguration;
use crate::tree::Walker;
use std::path::PathBuf;
use tracing::debug;

/// Exports a project as a qmake `.pro` file
#[derive(Debug, Clone, Copy, Default)]
pub struct QtCreatorExporter;

impl Exporter for QtCreatorExporter {
    fn name(&self) -> &'static str {
        "QtCreator"
    }

    fn type_name(&self) -> &'static str {
        "QT_CREATOR"
    }

    fn create_build_config(
        &self,
        project_name: &str,
        settings: &ConfigSettings,
    ) -> BuildConfiguration {
        let target_name = if settings.target_name.trim().is_empty() {
            project_name
        } else {
            settings.target_name.trim()
        };

        let mut config = BuildConfiguration::new(settings.name.as_str(), settings.is_debug)
            .with_target_name(target_name)
            .with_header_search_paths(settings.header_search_paths.iter().cloned())
            .with_extra_compiler_flags(settings.extra_compiler_flags.as_str());
        if let Some(level) = settings.optimisation {
            config = config.with_optimisation(level);
        }
        config.defines = settings.defines.clone();
        config
    }

    fn generate(&self, project: &ExportProject) -> ExportResult<String> {
        let walker = Walker::new(&project.target_folder)
            .with_project_folder(&project.project_folder)
            .with_header_extensions(project.header_extensions.clone());

        let sources = walker.collect_sources(&project.root);
        let headers = walker.collect_headers(&project.root);

        debug!(
            project = %project.name,
            sources = sources.len(),
            headers = headers.len(),
            configurations = project.configurations.len(),
            "generating qmake project"
        );

        let generator = QmakeGenerator::new(
            &project.settings,
            &project.configurations,
            &sources,
            &headers,
        );
        Ok(generator.generate()?)
    }

    fn output_file(&self, project: &ExportProject) -> PathBuf {
        project.target_folder.join(format!("{}.pro", project.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GenerateError;
    use crate::config::PreprocessorDefineSet;
    use crate::exporter::ExportError;
    use crate::tree::PathRoot;
    use crate::tree::{Group, Leaf};
    use std::path::Path;

    fn demo_project() -> ExportProject {
        let mut project = ExportProject::new("Demo", "Builds/QtCreator");
        project.root = Group::new("Demo")
            .with(
                Group::new("Source")
                    .with(Leaf::new("Source/Main.cpp"))
                    .with(Leaf::new("Source/Main.h"))
                    .with(Leaf::new("Source/notes.txt")),
            )
            .into();
        project
    }

    #[test]
    fn test_create_build_config_defaults_target_name() {
        let settings = ConfigSettings {
            name: "Debug".to_string(),
            is_debug: true,
            ..ConfigSettings::default()
        };

        let config = QtCreatorExporter.create_build_config("Demo", &settings);

        assert_eq!(config.target_name, "Demo");
        assert_eq!(config.optimisation, 0);
        assert!(config.is_debug);
    }

    #[test]
    fn test_create_build_config_copies_settings() {
        let settings = ConfigSettings {
            name: "Release".to_string(),
            is_debug: false,
            optimisation: Some(2),
            target_name: "demo-bin".to_string(),
            header_search_paths: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            defines: PreprocessorDefineSet::new().with("FAST", "1"),
            extra_compiler_flags: "-ffast-math".to_string(),
        };

        let config = QtCreatorExporter.create_build_config("Demo", &settings);

        assert_eq!(config.name, "Release");
        assert_eq!(config.optimisation, 2);
        assert_eq!(config.target_name, "demo-bin");
        assert_eq!(config.header_search_paths(), ["a", "b"]);
        assert_eq!(config.defines.get("FAST"), Some("1"));
        assert_eq!(config.extra_compiler_flags, "-ffast-math");
    }

    #[test]
    fn test_generate_rebases_files() {
        let output = QtCreatorExporter.generate(&demo_project()).unwrap();

        assert!(output.contains("SOURCES = \\\n\t\"../../Source/Main.cpp\" \\\n\n"));
        assert!(output.contains("HEADERS = \\\n\t\"../../Source/Main.h\" \\\n\n"));
        assert!(!output.contains("notes.txt"));
    }

    #[test]
    fn test_generate_aborts_when_target_is_outside_project() {
        let mut project = demo_project();
        project.target_folder = PathBuf::from("../elsewhere");

        let result = QtCreatorExporter.generate(&project);

        assert!(matches!(
            result,
            Err(ExportError::Generate(GenerateError::ForeignRoot {
                root: PathRoot::Unknown,
                ..
            }))
        ));
    }

    #[test]
    fn test_generate_with_absolute_project_folder() {
        let mut project = demo_project();
        project.project_folder = PathBuf::from("/home/dev/Demo");
        project.target_folder = PathBuf::from("/tmp/builds");

        let output = QtCreatorExporter.generate(&project).unwrap();

        assert!(output.contains("\t\"../../home/dev/Demo/Source/Main.cpp\" \\\n"));
    }

    #[test]
    fn test_output_file() {
        let path = QtCreatorExporter.output_file(&demo_project());
        assert_eq!(path, Path::new("Builds/QtCreator/Demo.pro"));
    }
}
