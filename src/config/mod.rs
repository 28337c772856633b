//! Build configurations
//!
//! This module holds the per-variant build settings consumed by the emitter:
//!
//! - `BuildConfiguration`: one named variant (debug or release)
//! - `ConfigurationSet`: the ordered configurations of one export
//! - `PreprocessorDefineSet`: ordered defines with a pure merge
//! - token resolution for `${NAME}` placeholders in flags and paths

mod defines;
mod tokens;

pub use defines::{merge_defines, PreprocessorDefineSet};
pub use tokens::substitute;

use indexmap::IndexSet;
use smol_str::SmolStr;
use std::fmt;

/// Which qmake `CONFIG(...)` gate a configuration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// `CONFIG(debug, debug|release)`
    Debug,
    /// `CONFIG(release, debug|release)`
    Release,
}

impl Gate {
    /// Gate for an is-debug flag
    #[must_use]
    pub const fn for_debug(is_debug: bool) -> Self {
        if is_debug {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// The qmake config keyword
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// `build/<keyword>/`
    #[must_use]
    pub fn output_dir(self) -> String {
        format!("build/{}/", self.keyword())
    }

    /// `build/<keyword>/intermediate/`
    #[must_use]
    pub fn intermediate_dir(self) -> String {
        format!("build/{}/intermediate/", self.keyword())
    }

    /// Defines every configuration of this gate starts from
    #[must_use]
    pub fn base_defines(self) -> PreprocessorDefineSet {
        match self {
            Self::Debug => PreprocessorDefineSet::new()
                .with("DEBUG", "1")
                .with("_DEBUG", "1"),
            Self::Release => PreprocessorDefineSet::new().with("NDEBUG", "1"),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One buildable variant of the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Configuration name, e.g. "Debug"
    pub name: SmolStr,
    /// Debug or release variant
    pub is_debug: bool,
    /// Optimisation level, rendered as `-O<level>`
    pub optimisation: u8,
    /// Name of the produced binary
    pub target_name: String,
    header_search_paths: Vec<String>,
    /// Configuration-specific defines
    pub defines: PreprocessorDefineSet,
    /// Raw extra compiler flags, may contain `${NAME}` tokens
    pub extra_compiler_flags: String,
}

impl BuildConfiguration {
    /// Create a configuration with default settings for its variant
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, is_debug: bool) -> Self {
        Self {
            name: name.into(),
            is_debug,
            optimisation: if is_debug { 0 } else { 3 },
            target_name: String::new(),
            header_search_paths: Vec::new(),
            defines: PreprocessorDefineSet::new(),
            extra_compiler_flags: String::new(),
        }
    }

    /// Set the optimisation level
    #[must_use]
    pub const fn with_optimisation(mut self, level: u8) -> Self {
        self.optimisation = level;
        self
    }

    /// Set the target binary name
    #[must_use]
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = name.into();
        self
    }

    /// Set header search paths; duplicates are dropped
    #[must_use]
    pub fn with_header_search_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_header_search_paths(paths);
        self
    }

    /// Add a define
    #[must_use]
    pub fn with_define(mut self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.defines.set(name, value);
        self
    }

    /// Set the raw extra compiler flags
    #[must_use]
    pub fn with_extra_compiler_flags(mut self, flags: impl Into<String>) -> Self {
        self.extra_compiler_flags = flags.into();
        self
    }

    /// Replace the header search paths; duplicates are dropped
    pub fn set_header_search_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        self.header_search_paths = dedup_search_paths(&paths);
    }

    /// Header search paths, first occurrence order
    #[must_use]
    pub fn header_search_paths(&self) -> &[String] {
        &self.header_search_paths
    }

    /// The `CONFIG(...)` gate of this configuration
    #[must_use]
    pub const fn gate(&self) -> Gate {
        Gate::for_debug(self.is_debug)
    }

    /// Gate defines overlaid with `project` defines and then this
    /// configuration's own defines
    #[must_use]
    pub fn effective_defines(&self, project: &PreprocessorDefineSet) -> PreprocessorDefineSet {
        let own = merge_defines(project, &self.defines);
        merge_defines(&self.gate().base_defines(), &own)
    }

    /// Resolve `${NAME}` placeholders in `template`
    ///
    /// Recognized names are `CONFIGURATION`, `TARGET_NAME`, `OUTPUT_DIR`,
    /// `INTERMEDIATE_DIR` and any name in `defines`.
    #[must_use]
    pub fn resolve_tokens(&self, template: &str, defines: &PreprocessorDefineSet) -> String {
        let gate = self.gate();
        let output_dir = gate.output_dir();
        let intermediate_dir = gate.intermediate_dir();

        substitute(template, |name| match name {
            "CONFIGURATION" => Some(self.name.as_str()),
            "TARGET_NAME" => Some(self.target_name.as_str()),
            "OUTPUT_DIR" => Some(output_dir.as_str()),
            "INTERMEDIATE_DIR" => Some(intermediate_dir.as_str()),
            other => defines.get(other),
        })
    }
}

/// The ordered configurations of one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSet {
    configurations: Vec<BuildConfiguration>,
}

impl ConfigurationSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a configuration
    pub fn push(&mut self, configuration: BuildConfiguration) {
        self.configurations.push(configuration);
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, BuildConfiguration> {
        self.configurations.iter()
    }

    /// Configurations matching `predicate`, in original order
    pub fn filter<'a, P>(
        &'a self,
        mut predicate: P,
    ) -> impl Iterator<Item = &'a BuildConfiguration>
    where
        P: FnMut(&BuildConfiguration) -> bool + 'a,
    {
        self.configurations.iter().filter(move |c| predicate(*c))
    }

    /// Debug configurations, in original order
    pub fn debug(&self) -> impl Iterator<Item = &BuildConfiguration> {
        self.filter(|c| c.is_debug)
    }

    /// Release configurations, in original order
    pub fn release(&self) -> impl Iterator<Item = &BuildConfiguration> {
        self.filter(|c| !c.is_debug)
    }

    /// Number of configurations
    #[must_use]
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

impl FromIterator<BuildConfiguration> for ConfigurationSet {
    fn from_iter<I: IntoIterator<Item = BuildConfiguration>>(iter: I) -> Self {
        Self {
            configurations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigurationSet {
    type Item = &'a BuildConfiguration;
    type IntoIter = std::slice::Iter<'a, BuildConfiguration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

/// Drop exact duplicates, keeping each path at its first position
///
/// Comparison is case-sensitive.
#[must_use]
pub fn dedup_search_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let unique: IndexSet<&str> = paths.iter().map(|p| p.as_ref()).collect();
    unique.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_search_paths() {
        assert_eq!(dedup_search_paths(&["a", "b", "a", "c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        assert_eq!(
            dedup_search_paths(&["Include", "include", "Include"]),
            vec!["Include", "include"]
        );
    }

    #[test]
    fn test_dedup_empty() {
        let empty: [&str; 0] = [];
        assert!(dedup_search_paths(&empty).is_empty());
    }

    #[test]
    fn test_configuration_dedups_header_paths() {
        let config = BuildConfiguration::new("Debug", true)
            .with_header_search_paths(["../../lib", "/usr/include", "../../lib"]);

        assert_eq!(config.header_search_paths(), ["../../lib", "/usr/include"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let set: ConfigurationSet = [
            BuildConfiguration::new("Debug", true),
            BuildConfiguration::new("Release", false),
            BuildConfiguration::new("Debug32", true),
            BuildConfiguration::new("Release32", false),
        ]
        .into_iter()
        .collect();

        let debug: Vec<_> = set.debug().map(|c| c.name.as_str()).collect();
        let release: Vec<_> = set.release().map(|c| c.name.as_str()).collect();
        let named: Vec<_> = set
            .filter(|c| c.name.ends_with("32"))
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(debug, vec!["Debug", "Debug32"]);
        assert_eq!(release, vec!["Release", "Release32"]);
        assert_eq!(named, vec!["Debug32", "Release32"]);
    }

    #[test]
    fn test_gate_from_flag() {
        assert_eq!(BuildConfiguration::new("Anything", true).gate(), Gate::Debug);
        assert_eq!(BuildConfiguration::new("Debug", false).gate(), Gate::Release);
        assert_eq!(Gate::Release.intermediate_dir(), "build/release/intermediate/");
    }

    #[test]
    fn test_effective_defines_layering() {
        let project = PreprocessorDefineSet::new()
            .with("APP_VERSION", "1.0")
            .with("USE_GL", "1");
        let config = BuildConfiguration::new("Release", false)
            .with_define("USE_GL", "0")
            .with_define("NDEBUG", "");

        let defines = config.effective_defines(&project);
        let keys: Vec<_> = defines.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["NDEBUG", "APP_VERSION", "USE_GL"]);
        assert_eq!(defines.get("NDEBUG"), Some(""));
        assert_eq!(defines.get("USE_GL"), Some("0"));
        assert_eq!(project.get("USE_GL"), Some("1"));
    }

    #[test]
    fn test_resolve_tokens() {
        let config = BuildConfiguration::new("Release", false).with_target_name("demo");
        let defines = config.effective_defines(&PreprocessorDefineSet::new());

        assert_eq!(
            config.resolve_tokens("-L${INTERMEDIATE_DIR} -o ${TARGET_NAME}", &defines),
            "-Lbuild/release/intermediate/ -o demo"
        );
        assert_eq!(
            config.resolve_tokens("${CONFIGURATION}:${OUTPUT_DIR}:${NDEBUG}", &defines),
            "Release:build/release/:1"
        );
        assert_eq!(config.resolve_tokens("${UNKNOWN}", &defines), "${UNKNOWN}");
    }
}
