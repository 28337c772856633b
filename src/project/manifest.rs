//! Project manifest (qtexport.toml)
//!
//! Describes the project tree, exporter settings and build configurations.

use crate::config::PreprocessorDefineSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`Manifest::find`]
pub const MANIFEST_FILE: &str = "qtexport.toml";

/// Project manifest loaded from `qtexport.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectInfo,

    /// Exporter settings
    #[serde(default)]
    pub exporter: ExporterConfig,

    /// Build configurations, in order
    #[serde(default, rename = "configuration", skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<ConfigurationConfig>,

    /// Project tree, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemConfig>,
}

impl Manifest {
    /// Load a manifest from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save a manifest to a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let content = toml::to_string_pretty(self).map_err(|e| ManifestError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, content).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Create a new manifest with default values and no files or configurations
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: ProjectInfo {
                name: name.into(),
                version: "0.1.0".to_string(),
                description: None,
                defines: PreprocessorDefineSet::new(),
            },
            exporter: ExporterConfig::default(),
            configurations: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Find a manifest by searching upward from a directory
    ///
    /// # Errors
    ///
    /// Returns an error if no manifest is found.
    pub fn find(start: &Path) -> Result<PathBuf, ManifestError> {
        let mut current = start.to_path_buf();

        loop {
            let manifest_path = current.join(MANIFEST_FILE);
            if manifest_path.exists() {
                return Ok(manifest_path);
            }

            if !current.pop() {
                return Err(ManifestError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name, also the name of the generated `.pro` file
    pub name: String,
    /// Project version
    pub version: String,
    /// Project description
    pub description: Option<String>,
    /// Defines shared by every configuration
    #[serde(default, skip_serializing_if = "PreprocessorDefineSet::is_empty")]
    pub defines: PreprocessorDefineSet,
}

/// Exporter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Exporter type name
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Output folder relative to the manifest; the exporter default when unset
    pub target_folder: Option<PathBuf>,
    /// Build a shared library
    #[serde(default)]
    pub shared_library: bool,
    /// Raw text appended to the link line
    #[serde(default)]
    pub external_libraries: String,
    /// Compiler flags for every configuration
    #[serde(default)]
    pub extra_compiler_flags: String,
    /// Include paths for every configuration
    #[serde(default)]
    pub extra_search_paths: Vec<String>,
    /// Libraries linked on unix
    #[serde(default)]
    pub unix_libraries: Vec<String>,
    /// Libraries linked on windows
    #[serde(default)]
    pub windows_libraries: Vec<String>,
    /// Header extensions; the built-in set when unset
    pub header_extensions: Option<Vec<String>>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            target_folder: None,
            shared_library: false,
            external_libraries: String::new(),
            extra_compiler_flags: String::new(),
            extra_search_paths: Vec::new(),
            unix_libraries: Vec::new(),
            windows_libraries: Vec::new(),
            header_extensions: None,
        }
    }
}

fn default_kind() -> String {
    "QT_CREATOR".to_string()
}

/// One `[[configuration]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationConfig {
    /// Configuration name
    pub name: String,
    /// Debug or release
    #[serde(default)]
    pub debug: bool,
    /// Optimisation level
    pub optimisation: Option<u8>,
    /// Target binary name; the project name when unset
    #[serde(default)]
    pub target_name: String,
    /// Header search paths
    #[serde(default)]
    pub header_search_paths: Vec<String>,
    /// Configuration defines
    #[serde(default, skip_serializing_if = "PreprocessorDefineSet::is_empty")]
    pub defines: PreprocessorDefineSet,
    /// Extra compiler flags; may contain `${NAME}` tokens
    #[serde(default)]
    pub extra_compiler_flags: String,
}

impl ConfigurationConfig {
    /// Create a configuration entry with defaults
    #[must_use]
    pub fn new(name: impl Into<String>, debug: bool) -> Self {
        Self {
            name: name.into(),
            debug,
            optimisation: None,
            target_name: String::new(),
            header_search_paths: Vec::new(),
            defines: PreprocessorDefineSet::new(),
            extra_compiler_flags: String::new(),
        }
    }
}

/// One entry of the project tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemConfig {
    /// `{ group = "...", items = [...] }`
    Group {
        /// Group name
        group: String,
        /// Children
        #[serde(default)]
        items: Vec<ItemConfig>,
    },
    /// `{ file = "...", compile = true }`
    File {
        /// Path relative to the manifest
        file: PathBuf,
        /// Override for whether the file is compiled
        #[serde(default, skip_serializing_if = "Option::is_none")]
        compile: Option<bool>,
    },
}

/// Errors that can occur when working with manifests
#[derive(Debug)]
pub enum ManifestError {
    /// IO error reading/writing manifest
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Parse error in TOML
    Parse {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
    /// Serialization error
    Serialize {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying serialization error
        source: toml::ser::Error,
    },
    /// No manifest found
    NotFound {
        /// Directory searched from
        searched_from: PathBuf,
    },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::Io { path, source } => {
                write!(f, "IO error reading {}: {}", path.display(), source)
            }
            ManifestError::Parse { path, source } => {
                write!(f, "Parse error in {}: {}", path.display(), source)
            }
            ManifestError::Serialize { path, source } => {
                write!(f, "Serialization error for {}: {}", path.display(), source)
            }
            ManifestError::NotFound { searched_from } => {
                write!(
                    f,
                    "No {MANIFEST_FILE} found searching from {}",
                    searched_from.display()
                )
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Io { source, .. } => Some(source),
            ManifestError::Parse { source, .. } => Some(source),
            ManifestError::Serialize { source, .. } => Some(source),
            ManifestError::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_new() {
        let manifest = Manifest::new("demo");

        assert_eq!(manifest.project.name, "demo");
        assert_eq!(manifest.project.version, "0.1.0");
        assert_eq!(manifest.exporter.kind, "QT_CREATOR");
        assert!(manifest.exporter.target_folder.is_none());
        assert!(manifest.configurations.is_empty());
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_manifest_deserialize() {
        let toml = r#"
            [project]
            name = "synth"
            version = "1.2.0"
            defines = { APP_VERSION = "1.2.0", STANDALONE = "" }

            [exporter]
            target_folder = "Builds/Linux"
            shared_library = true
            external_libraries = "-lasound"
            extra_search_paths = ["../../LibraryCode"]
            unix_libraries = ["freetype", "pthread"]

            [[configuration]]
            name = "Debug"
            debug = true
            optimisation = 0
            target_name = "synth_d"

            [[configuration]]
            name = "Release"
            optimisation = 3
            defines = { FAST_MATH = "1" }
            extra_compiler_flags = "-ffast-math"

            [[items]]
            group = "Source"
            items = [
                { file = "Source/Main.cpp" },
                { file = "Source/Main.h" },
                { group = "Gui", items = [{ file = "Source/Gui/Editor.cpp", compile = false }] },
            ]

            [[items]]
            file = "README.md"
        "#;

        let manifest: Manifest = toml::from_str(toml).unwrap();

        assert_eq!(manifest.project.name, "synth");
        assert_eq!(manifest.project.defines.len(), 2);
        assert_eq!(
            manifest.exporter.target_folder,
            Some(PathBuf::from("Builds/Linux"))
        );
        assert!(manifest.exporter.shared_library);
        assert_eq!(manifest.exporter.unix_libraries, vec!["freetype", "pthread"]);
        assert_eq!(manifest.configurations.len(), 2);
        assert!(manifest.configurations[0].debug);
        assert!(!manifest.configurations[1].debug);
        assert_eq!(manifest.configurations[1].defines.get("FAST_MATH"), Some("1"));
        assert_eq!(manifest.items.len(), 2);

        match &manifest.items[0] {
            ItemConfig::Group { group, items } => {
                assert_eq!(group, "Source");
                assert_eq!(items.len(), 3);
                assert_eq!(
                    items[2],
                    ItemConfig::Group {
                        group: "Gui".to_string(),
                        items: vec![ItemConfig::File {
                            file: PathBuf::from("Source/Gui/Editor.cpp"),
                            compile: Some(false),
                        }],
                    }
                );
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_manifest_defaults() {
        let toml = r#"
            [project]
            name = "minimal"
            version = "0.1.0"
        "#;

        let manifest: Manifest = toml::from_str(toml).unwrap();

        assert_eq!(manifest.exporter.kind, "QT_CREATOR");
        assert!(!manifest.exporter.shared_library);
        assert!(manifest.exporter.header_extensions.is_none());
        assert!(manifest.configurations.is_empty());
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_manifest_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let mut manifest = Manifest::new("roundtrip");
        manifest.configurations.push(ConfigurationConfig::new("Debug", true));
        manifest.items.push(ItemConfig::Group {
            group: "src".to_string(),
            items: vec![ItemConfig::File {
                file: PathBuf::from("src/main.cpp"),
                compile: None,
            }],
        });
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();

        assert_eq!(loaded.project.name, "roundtrip");
        assert_eq!(loaded.configurations[0].name, "Debug");
        assert_eq!(loaded.items, manifest.items);
    }

    #[test]
    fn test_find_searches_upward() {
        let dir = TempDir::new().unwrap();
        Manifest::new("nested").save(&dir.path().join(MANIFEST_FILE)).unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Manifest::find(&nested).unwrap();

        assert_eq!(found, dir.path().join(MANIFEST_FILE));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "[project\nname = ").unwrap();

        assert!(matches!(Manifest::load(&path), Err(ManifestError::Parse { .. })));
    }
}
