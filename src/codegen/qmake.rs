//! qmake project file generator
//!
//! Emits a `.pro` file as a fixed, linear sequence of sections. Every
//! configuration produces its own `CONFIG(...)` gated blocks, keyed by its
//! debug flag; configurations sharing a flag are all emitted and qmake's own
//! last-assignment-wins evaluation decides between them.

use super::error::{GenerateError, GenerateResult};
use crate::config::{
    dedup_search_paths, BuildConfiguration, ConfigurationSet, Gate, PreprocessorDefineSet,
};
use crate::tree::{unix_style_path, PathRoot, RelativePath};
use std::fmt::Write;

/// Library search path used for unix links
const UNIX_LIBRARY_PATH: &str = "/usr/X11R6/lib/";

/// Libraries every windows link pulls in
const WINDOWS_BASE_LIBRARIES: &[&str] = &["gdi32", "user32", "kernel32", "comctl32"];

/// Exporter-wide settings read by the generator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QmakeSettings {
    /// Build a shared library instead of an executable
    pub shared_library: bool,
    /// Raw text appended to `LIBS`
    pub external_libraries: String,
    /// Flags added to every configuration ahead of its own extra flags
    pub extra_compiler_flags: String,
    /// Include paths added to every configuration ahead of its own
    pub extra_search_paths: Vec<String>,
    /// Library names linked on unix
    pub unix_libraries: Vec<String>,
    /// Library names linked on windows
    pub windows_libraries: Vec<String>,
    /// Project-wide defines, overridden by configuration defines
    pub defines: PreprocessorDefineSet,
}

/// qmake project file generator
pub struct QmakeGenerator<'a> {
    settings: &'a QmakeSettings,
    configurations: &'a ConfigurationSet,
    sources: &'a [RelativePath],
    headers: &'a [RelativePath],
    output: String,
}

impl<'a> QmakeGenerator<'a> {
    /// Create a generator over already-collected file lists
    #[must_use]
    pub fn new(
        settings: &'a QmakeSettings,
        configurations: &'a ConfigurationSet,
        sources: &'a [RelativePath],
        headers: &'a [RelativePath],
    ) -> Self {
        Self {
            settings,
            configurations,
            sources,
            headers,
            output: String::new(),
        }
    }

    /// Generate the complete project file
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::ForeignRoot`] if any source or header path is
    /// not relative to the build target folder. Nothing is produced in that case.
    pub fn generate(mut self) -> GenerateResult<String> {
        Self::check_roots("source", self.sources)?;
        Self::check_roots("header", self.headers)?;

        self.generate_header();
        self.generate_template();
        self.generate_output_dirs();
        self.generate_compiler_flags();
        self.generate_configuration_flags();
        self.generate_platform_compiler_flags();
        self.generate_cxx_flags();
        self.generate_linker_flags();
        self.generate_platform_linker_flags();
        self.generate_debug_linker_flags();
        self.generate_file_list("SOURCES", self.sources);
        self.generate_file_list("HEADERS", self.headers);

        Ok(self.output)
    }

    fn check_roots(kind: &'static str, paths: &[RelativePath]) -> GenerateResult<()> {
        match paths.iter().find(|p| p.root() != PathRoot::BuildTargetFolder) {
            Some(path) => Err(GenerateError::ForeignRoot {
                kind,
                path: path.as_str().to_string(),
                root: path.root(),
            }),
            None => Ok(()),
        }
    }

    fn generate_header(&mut self) {
        writeln!(self.output, "# Automatically generated qmake file, created by qtexport").unwrap();
        writeln!(
            self.output,
            "# Don't edit this file! Your changes will be overwritten when you re-export the project!"
        )
        .unwrap();
        writeln!(self.output).unwrap();
    }

    fn generate_template(&mut self) {
        writeln!(self.output, "TEMPLATE = app").unwrap();
        writeln!(self.output, "CONFIG  -= qt").unwrap();
        writeln!(self.output).unwrap();
    }

    fn generate_output_dirs(&mut self) {
        for config in self.configurations {
            let gate = config.gate();
            writeln!(self.output, "{}{{", gate_condition(gate)).unwrap();
            writeln!(self.output, "    DESTDIR     = {}", gate.output_dir()).unwrap();
            writeln!(self.output, "    OBJECTS_DIR = {}", gate.intermediate_dir()).unwrap();
            writeln!(self.output, "    TARGET = {}", config.target_name).unwrap();
            writeln!(self.output, "}}").unwrap();
        }
        writeln!(self.output).unwrap();
    }

    fn generate_compiler_flags(&mut self) {
        writeln!(self.output, "# Compiler flags").unwrap();
        write!(self.output, "QMAKE_CFLAGS = -std=gnu++0x").unwrap();
        if self.settings.shared_library {
            write!(self.output, " -fPIC").unwrap();
        }
        writeln!(self.output).unwrap();
    }

    fn generate_configuration_flags(&mut self) {
        for config in self.configurations {
            let defines = config.effective_defines(&self.settings.defines);

            match config.gate() {
                Gate::Release => write!(self.output, "QMAKE_CFLAGS_RELEASE = ").unwrap(),
                Gate::Debug => write!(self.output, "QMAKE_CFLAGS_DEBUG   = -g -ggdb ").unwrap(),
            }
            write!(self.output, " -O{}", config.optimisation).unwrap();

            let extra = self.extra_compiler_flags(config);
            let extra = config.resolve_tokens(&extra, &defines);
            write!(self.output, "{}", format!(" {extra}").trim_end()).unwrap();

            writeln!(self.output, "{}", defines.to_gcc_flags()).unwrap();

            self.generate_include_paths(config, &defines);
        }
    }

    fn extra_compiler_flags(&self, config: &BuildConfiguration) -> String {
        [
            self.settings.extra_compiler_flags.trim(),
            config.extra_compiler_flags.trim(),
        ]
        .iter()
        .filter(|flags| !flags.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn generate_include_paths(
        &mut self,
        config: &BuildConfiguration,
        defines: &PreprocessorDefineSet,
    ) {
        let mut search_paths = self.settings.extra_search_paths.clone();
        search_paths.extend(config.header_search_paths().iter().cloned());
        let search_paths = dedup_search_paths(&search_paths);

        writeln!(self.output, "{}{{", gate_condition(config.gate())).unwrap();
        writeln!(self.output, "    INCLUDEPATH = \\").unwrap();
        for path in &search_paths {
            let resolved = config.resolve_tokens(path, defines);
            let entry = quote_if_contains_spaces(&unix_style_path(&resolved));
            writeln!(self.output, "        {entry} \\").unwrap();
        }
        writeln!(self.output, "}}").unwrap();
    }

    fn generate_platform_compiler_flags(&mut self) {
        let linux = PreprocessorDefineSet::new().with("LINUX", "1");
        writeln!(
            self.output,
            "unix:  QMAKE_CFLAGS += -I/usr/include/freetype2 -I/usr/include{}",
            linux.to_gcc_flags()
        )
        .unwrap();
        writeln!(
            self.output,
            "win32: QMAKE_CFLAGS += -mstackrealign -D__MINGW__=1 -D__MINGW_EXTENSION="
        )
        .unwrap();
        writeln!(self.output).unwrap();
        writeln!(self.output).unwrap();
    }

    fn generate_cxx_flags(&mut self) {
        writeln!(self.output, "QMAKE_CXXFLAGS         = $$QMAKE_CFLAGS").unwrap();
        writeln!(self.output, "QMAKE_CXXFLAGS_RELEASE = $$QMAKE_CFLAGS_RELEASE").unwrap();
        writeln!(self.output, "QMAKE_CXXFLAGS_DEBUG   = $$QMAKE_CFLAGS_DEBUG").unwrap();
        writeln!(self.output).unwrap();
        writeln!(self.output).unwrap();
    }

    fn generate_linker_flags(&mut self) {
        writeln!(self.output, "# Linker flags").unwrap();
        write!(self.output, "LIBS = -L$$DESTDIR {}", self.settings.external_libraries).unwrap();
        if self.settings.shared_library {
            write!(self.output, " -shared").unwrap();
        }
        writeln!(self.output).unwrap();
    }

    fn generate_platform_linker_flags(&mut self) {
        write!(self.output, "unix:  LIBS += -L{UNIX_LIBRARY_PATH}").unwrap();
        for lib in &self.settings.unix_libraries {
            write!(self.output, " -l{lib}").unwrap();
        }
        writeln!(self.output).unwrap();

        write!(self.output, "win32: LIBS +=").unwrap();
        for lib in WINDOWS_BASE_LIBRARIES {
            write!(self.output, " -l{lib}").unwrap();
        }
        for lib in &self.settings.windows_libraries {
            write!(self.output, " -l{lib}").unwrap();
        }
        writeln!(self.output).unwrap();
    }

    fn generate_debug_linker_flags(&mut self) {
        writeln!(self.output, "QMAKE_LFLAGS_DEBUG += -fvisibility=hidden").unwrap();
    }

    // Every entry, the last one included, ends with a continuation marker.
    fn generate_file_list(&mut self, variable: &str, files: &[RelativePath]) {
        writeln!(self.output).unwrap();
        writeln!(self.output, "{variable} = \\").unwrap();
        for file in files {
            writeln!(self.output, "\t{} \\", quoted(&file.to_unix_style())).unwrap();
        }
        writeln!(self.output).unwrap();
    }
}

/// `CONFIG(<gate>, debug|release)`
fn gate_condition(gate: Gate) -> String {
    format!("CONFIG({}, debug|release)", gate.keyword())
}

/// Wrap in double quotes, escaping embedded quotes
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Quote a value containing whitespace unless it is quoted already
fn quote_if_contains_spaces(text: &str) -> String {
    let already_quoted = text.len() > 1 && text.starts_with('"') && text.ends_with('"');
    if text.contains(char::is_whitespace) && !already_quoted {
        quoted(text)
    } else {
        text.to_string()
    }
}
